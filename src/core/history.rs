//! Phase change history.
//!
//! Keeps an in-memory record of every transition the poll loop applied,
//! so operators and tests can see how a session unfolded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single phase change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseChange {
    /// Name of the phase being left
    pub from: String,
    /// Name of the phase being entered
    pub to: String,
    /// When the change was applied
    pub timestamp: DateTime<Utc>,
    /// Sequence number of the update that caused it, `None` for clock ticks
    pub sequence: Option<i64>,
}

/// Changes kept by [`TransitionLog::new`].
pub const DEFAULT_LOG_LIMIT: usize = 256;

fn default_limit() -> usize {
    DEFAULT_LOG_LIMIT
}

/// Ordered log of the most recent phase changes.
///
/// A session can run for as long as the process does, so the log holds at
/// most `limit` changes and drops the oldest once full.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use treasure_hunt::core::{PhaseChange, TransitionLog};
///
/// let mut log = TransitionLog::new();
/// log.record(PhaseChange {
///     from: "Intro".to_string(),
///     to: "Hunt".to_string(),
///     timestamp: Utc::now(),
///     sequence: Some(7),
/// });
///
/// assert_eq!(log.get_path(), vec!["Intro", "Hunt"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionLog {
    changes: Vec<PhaseChange>,
    #[serde(default = "default_limit")]
    limit: usize,
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LOG_LIMIT)
    }

    /// A log that keeps at most `limit` changes (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            changes: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Append a change, evicting the oldest entries past the limit.
    pub fn record(&mut self, change: PhaseChange) {
        self.changes.push(change);
        if self.changes.len() > self.limit {
            let excess = self.changes.len() - self.limit;
            self.changes.drain(..excess);
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Names of the phases traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.changes.first() {
            path.push(first.from.as_str());
        }
        for change in &self.changes {
            path.push(change.to.as_str());
        }
        path
    }

    /// Time between the first and last recorded change.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.changes.first()?, self.changes.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn changes(&self) -> &[PhaseChange] {
        &self.changes
    }
}
