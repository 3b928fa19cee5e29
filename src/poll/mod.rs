//! The update-polling driver.
//!
//! [`PollLoop`] owns the current phase and the [`PollCursor`]. Each cycle it
//! fetches pending updates, drops the ones already seen or older than the
//! process, feeds the rest to the current phase in order, and finally gives
//! the phase a clock tick. Any transport failure ends the loop.

use crate::core::{PhaseChange, State, TransitionLog};
use crate::transport::{Notifier, TransportError, UpdateSource};
use chrono::Utc;
use rand::Rng;
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where the loop is in the update stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollCursor {
    last_sequence: i64,
    started_at: i64,
}

impl PollCursor {
    /// A cursor that has seen nothing and ignores messages sent at or
    /// before `started_at` (unix seconds).
    pub fn new(started_at: i64) -> Self {
        Self {
            last_sequence: 0,
            started_at,
        }
    }

    pub fn starting_now() -> Self {
        Self::new(Utc::now().timestamp())
    }

    /// Highest sequence number handled so far.
    pub fn last_sequence(&self) -> i64 {
        self.last_sequence
    }

    pub fn started_at(&self) -> i64 {
        self.started_at
    }

    pub fn is_duplicate(&self, sequence: i64) -> bool {
        sequence <= self.last_sequence
    }

    pub fn is_stale(&self, timestamp: i64) -> bool {
        timestamp <= self.started_at
    }

    fn advance(&mut self, sequence: i64) {
        self.last_sequence = self.last_sequence.max(sequence);
    }
}

/// What one cycle did with the updates it fetched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub delivered: usize,
    pub duplicates: usize,
    pub stale: usize,
    pub malformed: usize,
    pub transitions: usize,
}

/// Drives one chat's game from an update source.
pub struct PollLoop<S, U, N, R> {
    current: S,
    source: U,
    notifier: N,
    rng: R,
    cursor: PollCursor,
    interval: Duration,
    log: TransitionLog,
}

impl<S, U, N, R> PollLoop<S, U, N, R>
where
    S: State,
    U: UpdateSource,
    N: Notifier,
    R: Rng,
{
    pub fn new(
        initial: S,
        source: U,
        notifier: N,
        rng: R,
        cursor: PollCursor,
        interval: Duration,
    ) -> Self {
        Self {
            current: initial,
            source,
            notifier,
            rng,
            cursor,
            interval,
            log: TransitionLog::new(),
        }
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn source_mut(&mut self) -> &mut U {
        &mut self.source
    }

    /// Announce the initial phase.
    pub fn start(&mut self) -> Result<(), TransportError> {
        info!(state = self.current.name(), "starting game");
        self.current.enter(&mut self.notifier)
    }

    /// Announce the initial phase, then poll forever.
    ///
    /// Only returns if a transport call fails.
    pub fn run(mut self) -> Result<Infallible, TransportError> {
        self.start()?;
        loop {
            std::thread::sleep(self.interval);
            self.poll_once()?;
        }
    }

    /// One fetch, deliver and tick cycle, without the sleep.
    pub fn poll_once(&mut self) -> Result<CycleReport, TransportError> {
        let updates = self.source.fetch(self.cursor.last_sequence())?;
        let mut report = CycleReport::default();

        for update in updates {
            let sequence = update.sequence;
            if self.cursor.is_duplicate(sequence) {
                debug!(sequence, "skipping duplicate update");
                report.duplicates += 1;
                continue;
            }
            self.cursor.advance(sequence);

            let Some(message) = update.message else {
                warn!(sequence, "update carries no message, skipping");
                report.malformed += 1;
                continue;
            };
            if self.cursor.is_stale(message.timestamp) {
                debug!(sequence, timestamp = message.timestamp, "skipping update older than process");
                report.stale += 1;
                continue;
            }

            info!(sequence, ?message, "received update");
            report.delivered += 1;
            let next = self
                .current
                .process_message(&message, &mut self.notifier, &mut self.rng)?;
            if self.apply(next, Some(sequence))? {
                report.transitions += 1;
            }
        }

        let next = self.current.process_time(&mut self.notifier)?;
        if self.apply(next, None)? {
            report.transitions += 1;
        }

        Ok(report)
    }

    /// Swap in `next` and enter it, unless it is absent or unchanged.
    fn apply(&mut self, next: Option<S>, sequence: Option<i64>) -> Result<bool, TransportError> {
        let Some(next) = next else {
            return Ok(false);
        };
        if next == self.current {
            return Ok(false);
        }

        info!(from = self.current.name(), to = next.name(), "phase change");
        self.log.record(PhaseChange {
            from: self.current.name().to_string(),
            to: next.name().to_string(),
            timestamp: Utc::now(),
            sequence,
        });
        self.current = next;
        self.current.enter(&mut self.notifier)?;
        Ok(true)
    }
}
