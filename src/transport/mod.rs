//! Contracts for the chat transport the game runs over.
//!
//! The game only needs two capabilities: a source of inbound updates and a
//! way to send text and locations back to the player. Both are traits so the
//! poll loop and states can be driven by test doubles.

use crate::geo::Coordinate;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod memory;
pub mod telegram;

pub use error::TransportError;
pub use telegram::TelegramBot;

/// A message sent by the player.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Unix timestamp (seconds) assigned by the transport
    pub timestamp: i64,

    /// Free text, if any
    pub text: Option<String>,

    /// Shared location, if any
    pub location: Option<Coordinate>,
}

impl InboundMessage {
    pub fn text(timestamp: i64, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: Some(text.into()),
            location: None,
        }
    }

    pub fn location(timestamp: i64, location: Coordinate) -> Self {
        Self {
            timestamp,
            text: None,
            location: Some(location),
        }
    }

    /// True if the message text contains `needle` (case-sensitive).
    pub fn text_contains(&self, needle: &str) -> bool {
        self.text.as_deref().is_some_and(|t| t.contains(needle))
    }
}

/// One unit delivered by an [`UpdateSource`].
///
/// `message` is `None` for updates that carry no player message, such as
/// edits or service events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Update {
    /// Strictly increasing across the lifetime of the source
    pub sequence: i64,
    pub message: Option<InboundMessage>,
}

/// Yields inbound updates in sequence order.
pub trait UpdateSource {
    /// Fetch every pending update whose sequence number is greater than
    /// `after_sequence`.
    fn fetch(&mut self, after_sequence: i64) -> Result<Vec<Update>, TransportError>;
}

/// Sends replies to the player's chat.
pub trait Notifier {
    fn send_text(&mut self, body: &str) -> Result<(), TransportError>;

    fn send_location(&mut self, location: Coordinate) -> Result<(), TransportError>;
}
