//! The active phase: the player sends locations until they find the
//! treasure or run out of attempts.

use super::GameState;
use crate::config::GameConfig;
use crate::geo::{distance_meters, Coordinate};
use crate::transport::{InboundMessage, Notifier, TransportError};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

/// Substring that reveals the target when the debug flag is set.
pub const DEBUG_KEYWORD: &str = "where";

#[derive(Clone, Debug, PartialEq)]
pub struct Hunt {
    chat: String,
    entered_at: DateTime<Utc>,
    target: Coordinate,
    return_to: Box<GameState>,
    // Not clamped: keeps counting down after a loss.
    attempts: i64,
    config: Arc<GameConfig>,
}

impl Hunt {
    pub fn new(
        chat: impl Into<String>,
        target: Coordinate,
        return_to: GameState,
        config: Arc<GameConfig>,
    ) -> Self {
        Self {
            chat: chat.into(),
            entered_at: Utc::now(),
            target,
            return_to: Box::new(return_to),
            attempts: i64::from(config.attempts),
            config,
        }
    }

    pub fn chat(&self) -> &str {
        &self.chat
    }

    pub fn entered_at(&self) -> DateTime<Utc> {
        self.entered_at
    }

    pub fn target(&self) -> Coordinate {
        self.target
    }

    /// The phase to resume once the treasure is found.
    pub fn return_to(&self) -> &GameState {
        &self.return_to
    }

    /// Guesses left; negative once the player keeps guessing after losing.
    pub fn attempts_remaining(&self) -> i64 {
        self.attempts
    }

    pub(super) fn enter<N: Notifier + ?Sized>(&self, notifier: &mut N) -> Result<(), TransportError> {
        notifier.send_text("The treasure is buried somewhere around...")?;
        notifier.send_text("Send me your location and I'll tell you how far you are.")?;
        notifier.send_text(&format!("You have {} tries.", self.attempts))?;
        if self.config.distance_error > 0.0 {
            notifier.send_text(&format!(
                "Also, the distance I give you will be within {:.0} metres of the real distance.",
                self.config.distance_error.trunc()
            ))?;
        }
        Ok(())
    }

    pub(super) fn process_message<N: Notifier + ?Sized, R: Rng + ?Sized>(
        &mut self,
        message: &InboundMessage,
        notifier: &mut N,
        rng: &mut R,
    ) -> Result<Option<GameState>, TransportError> {
        if self.config.debug && message.text_contains(DEBUG_KEYWORD) {
            notifier.send_text("here")?;
            notifier.send_location(self.target)?;
            return Ok(None);
        }

        let Some(reported) = message.location else {
            return Ok(None);
        };

        let distance = distance_meters(reported, self.target);
        debug!(chat = %self.chat, distance, "location received");

        if distance < self.config.tolerance {
            info!(chat = %self.chat, distance, "treasure found");
            notifier.send_text("Congratulations!")?;
            notifier.send_location(self.target)?;
            notifier.send_text("The actual treasure was here, but close enough.")?;
            return Ok(Some((*self.return_to).clone()));
        }

        let noisy = self.noisy_distance(distance, rng);
        notifier.send_text(&format!("You are {noisy:.0} metres away."))?;

        self.attempts -= 1;
        if self.attempts > 0 {
            let plural = if self.attempts == 1 { "" } else { "s" };
            notifier.send_text(&format!(
                "You have {} attempt{plural} remaining.",
                self.attempts
            ))?;
        } else {
            info!(chat = %self.chat, "out of attempts");
            notifier.send_text("You've lost!")?;
            notifier.send_location(self.target)?;
            notifier.send_text("The treasure was here the whole time!")?;
        }

        Ok(None)
    }

    /// Uniform sample in `[distance - e, distance + e]`; may go negative.
    fn noisy_distance<R: Rng + ?Sized>(&self, distance: f64, rng: &mut R) -> f64 {
        let e = self.config.distance_error;
        if e > 0.0 {
            rng.random_range(distance - e..=distance + e)
        } else {
            distance
        }
    }
}
