//! Chat-side message types exchanged between the transport and the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque reference to a conversation (channel, group or direct chat).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelRef(pub String);

impl ChannelRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message posted somewhere the bot can see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Unique event ID (UUIDv7), used to correlate log lines.
    pub id: Uuid,
    /// User id of the author.
    pub sender_id: String,
    /// Display name of the author, if the transport knows it.
    #[serde(default)]
    pub sender_name: Option<String>,
    /// Whether the message was posted in a direct chat with the bot.
    pub is_direct: bool,
    /// Conversation the message was posted in.
    pub channel: ChannelRef,
    /// Raw message text, including any leading mention.
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl InboundEvent {
    pub fn new(
        sender_id: impl Into<String>,
        is_direct: bool,
        channel: ChannelRef,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            sender_id: sender_id.into(),
            sender_name: None,
            is_direct,
            channel,
            text: text.into(),
            received_at: Utc::now(),
        }
    }
}

/// One outbound reply. These are the only two things a transport must deliver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    File { filename: String, bytes: Vec<u8> },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn file(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::File {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Text content, or `None` for attachments.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::File { .. } => None,
        }
    }
}
