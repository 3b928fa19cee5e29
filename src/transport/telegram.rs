//! Telegram Bot API transport.
//!
//! Uses blocking HTTP calls: the poll loop is single-threaded and only ever
//! waits on one request at a time.

use super::{InboundMessage, Notifier, TransportError, Update, UpdateSource};
use crate::geo::Coordinate;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

const API_BASE: &str = "https://api.telegram.org";

/// A bot bound to a single destination chat.
pub struct TelegramBot {
    client: Client,
    token: String,
    chat: String,
}

impl TelegramBot {
    pub fn new(token: impl Into<String>, chat: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            chat: chat.into(),
        }
    }

    pub fn chat(&self) -> &str {
        &self.chat
    }

    fn call<B, T>(&self, method: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{API_BASE}/bot{}/{method}", self.token);
        debug!(method, "calling Bot API");
        let response = self.client.post(url).json(body).send()?;
        let status = response.status();
        let bytes = response.bytes()?;
        decode_reply(method, status, &bytes)
    }
}

/// Decodes a Bot API reply. Telegram explains most failures in a JSON body
/// even on 4xx statuses, so the body wins over the status whenever it parses.
fn decode_reply<T: DeserializeOwned>(
    method: &str,
    status: StatusCode,
    body: &[u8],
) -> Result<T, TransportError> {
    match serde_json::from_slice::<ApiResponse<T>>(body) {
        Ok(reply) => reply.into_result(method),
        Err(_) if !status.is_success() => Err(TransportError::Status {
            method: method.to_string(),
            status: status.as_u16(),
        }),
        Err(e) => Err(TransportError::Decode(e)),
    }
}

impl UpdateSource for TelegramBot {
    fn fetch(&mut self, after_sequence: i64) -> Result<Vec<Update>, TransportError> {
        let request = GetUpdates {
            offset: after_sequence + 1,
        };
        let raw: Vec<RawUpdate> = self.call("getUpdates", &request)?;
        Ok(raw.into_iter().map(Update::from).collect())
    }
}

impl Notifier for TelegramBot {
    fn send_text(&mut self, body: &str) -> Result<(), TransportError> {
        let request = SendMessage {
            chat_id: &self.chat,
            text: body,
        };
        let _: serde_json::Value = self.call("sendMessage", &request)?;
        Ok(())
    }

    fn send_location(&mut self, location: Coordinate) -> Result<(), TransportError> {
        let request = SendLocation {
            chat_id: &self.chat,
            latitude: location.latitude,
            longitude: location.longitude,
        };
        let _: serde_json::Value = self.call("sendLocation", &request)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &str) -> Result<T, TransportError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            (_, _) => Err(TransportError::Api {
                method: method.to_string(),
                description: self
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            }),
        }
    }
}

#[derive(Serialize)]
struct GetUpdates {
    offset: i64,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
struct SendLocation<'a> {
    chat_id: &'a str,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct RawUpdate {
    update_id: i64,
    message: Option<RawMessage>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    date: i64,
    text: Option<String>,
    location: Option<RawLocation>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    latitude: f64,
    longitude: f64,
}

impl From<RawUpdate> for Update {
    fn from(raw: RawUpdate) -> Self {
        Update {
            sequence: raw.update_id,
            message: raw.message.map(|m| InboundMessage {
                timestamp: m.date,
                text: m.text,
                location: m
                    .location
                    .map(|l| Coordinate::new(l.latitude, l.longitude)),
            }),
        }
    }
}
