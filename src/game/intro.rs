//! The lobby phase: waits for the player to ask for a hunt.

use super::{GameState, Hunt};
use crate::config::GameConfig;
use crate::geo::random_point_in_rectangle;
use crate::transport::{InboundMessage, Notifier, TransportError};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Arc;
use tracing::info;

/// Substring that starts a hunt (case-sensitive).
pub const START_KEYWORD: &str = "hunt";

#[derive(Clone, Debug, PartialEq)]
pub struct Intro {
    chat: String,
    entered_at: DateTime<Utc>,
    config: Arc<GameConfig>,
}

impl Intro {
    /// `config` is expected to be [`GameConfig::validated`] output.
    pub fn new(chat: impl Into<String>, config: Arc<GameConfig>) -> Self {
        Self {
            chat: chat.into(),
            entered_at: Utc::now(),
            config,
        }
    }

    pub fn chat(&self) -> &str {
        &self.chat
    }

    pub fn entered_at(&self) -> DateTime<Utc> {
        self.entered_at
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub(super) fn enter<N: Notifier + ?Sized>(&self, notifier: &mut N) -> Result<(), TransportError> {
        notifier.send_text("Welcome to the treasure hunt!")?;
        notifier.send_text(&format!("Type '{START_KEYWORD}' to begin."))
    }

    pub(super) fn process_message<N: Notifier + ?Sized, R: Rng + ?Sized>(
        &self,
        message: &InboundMessage,
        notifier: &mut N,
        rng: &mut R,
    ) -> Result<Option<GameState>, TransportError> {
        if !message.text_contains(START_KEYWORD) {
            return Ok(None);
        }

        notifier.send_text("OK")?;
        let target = random_point_in_rectangle(&self.config.bounds, rng);
        info!(chat = %self.chat, "hiding treasure");

        Ok(Some(GameState::Hunt(Hunt::new(
            self.chat.clone(),
            target,
            GameState::Intro(self.clone()),
            Arc::clone(&self.config),
        ))))
    }
}
