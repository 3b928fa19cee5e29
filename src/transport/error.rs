//! Transport error types.

use thiserror::Error;

/// Failures talking to the chat transport.
///
/// None of these are retried by the library; they propagate out of the poll
/// loop and end the process.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status with a body the Bot API did not write
    #[error("Bot API call '{method}' failed with HTTP status {status}")]
    Status { method: String, status: u16 },

    /// A success status whose body is not a Bot API reply
    #[error("Malformed Bot API reply: {0}")]
    Decode(#[from] serde_json::Error),

    /// The Bot API answered but rejected the call
    #[error("Bot API call '{method}' was rejected: {description}")]
    Api { method: String, description: String },

    /// Any other collaborator failure
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}
