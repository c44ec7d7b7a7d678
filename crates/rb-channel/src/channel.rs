//! The reply side of a chat transport.

use async_trait::async_trait;

use rb_protocol::{ChannelRef, Reply};

use crate::error::ChannelResult;

/// Delivers replies into a conversation.
///
/// Implemented by real transports and by `MockChannel` in tests.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Post a text message.
    async fn send_text(&self, channel: &ChannelRef, text: &str) -> ChannelResult<()>;

    /// Upload a file attachment.
    async fn send_file(&self, channel: &ChannelRef, bytes: &[u8], filename: &str)
    -> ChannelResult<()>;

    /// Deliver one reply with the matching primitive.
    async fn send(&self, channel: &ChannelRef, reply: &Reply) -> ChannelResult<()> {
        match reply {
            Reply::Text(text) => self.send_text(channel, text).await,
            Reply::File { filename, bytes } => self.send_file(channel, bytes, filename).await,
        }
    }
}
