//! In-memory transport doubles.
//!
//! `RecordingNotifier` captures everything the game says and
//! `ScriptedSource` replays canned update batches, so the game can be
//! exercised without a network.

use super::{Notifier, TransportError, Update, UpdateSource};
use crate::geo::Coordinate;
use std::collections::VecDeque;

/// Something the game sent to the player.
#[derive(Clone, Debug, PartialEq)]
pub enum Outbound {
    Text(String),
    Location(Coordinate),
}

/// Notifier that records every outbound payload.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Vec<Outbound>,
    failing: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails.
    pub fn failing() -> Self {
        Self {
            sent: Vec::new(),
            failing: true,
        }
    }

    pub fn sent(&self) -> &[Outbound] {
        &self.sent
    }

    /// Only the text payloads, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.sent
            .iter()
            .filter_map(|o| match o {
                Outbound::Text(t) => Some(t.as_str()),
                Outbound::Location(_) => None,
            })
            .collect()
    }

    /// Only the location payloads, in order.
    pub fn locations(&self) -> Vec<Coordinate> {
        self.sent
            .iter()
            .filter_map(|o| match o {
                Outbound::Location(c) => Some(*c),
                Outbound::Text(_) => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }

    fn push(&mut self, outbound: Outbound) -> Result<(), TransportError> {
        if self.failing {
            return Err(TransportError::Unavailable("notifier offline".to_string()));
        }
        self.sent.push(outbound);
        Ok(())
    }
}

impl Notifier for RecordingNotifier {
    fn send_text(&mut self, body: &str) -> Result<(), TransportError> {
        self.push(Outbound::Text(body.to_string()))
    }

    fn send_location(&mut self, location: Coordinate) -> Result<(), TransportError> {
        self.push(Outbound::Location(location))
    }
}

/// Update source that hands out one scripted batch per fetch.
///
/// Batches are returned verbatim, so a script may replay sequence numbers
/// or include updates older than the requested cursor. Once the script is
/// exhausted every fetch returns an empty batch.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    batches: VecDeque<Result<Vec<Update>, String>>,
    requested: Vec<i64>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_batch(&mut self, batch: Vec<Update>) -> &mut Self {
        self.batches.push_back(Ok(batch));
        self
    }

    /// Make the next unanswered fetch fail.
    pub fn push_failure(&mut self, reason: impl Into<String>) -> &mut Self {
        self.batches.push_back(Err(reason.into()));
        self
    }

    /// The `after_sequence` argument of every fetch so far.
    pub fn requested(&self) -> &[i64] {
        &self.requested
    }
}

impl UpdateSource for ScriptedSource {
    fn fetch(&mut self, after_sequence: i64) -> Result<Vec<Update>, TransportError> {
        self.requested.push(after_sequence);
        match self.batches.pop_front() {
            Some(Ok(batch)) => Ok(batch),
            Some(Err(reason)) => Err(TransportError::Unavailable(reason)),
            None => Ok(Vec::new()),
        }
    }
}
