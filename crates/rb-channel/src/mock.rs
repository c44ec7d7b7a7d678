//! Mock transport for testing without a chat service.
//!
//! Records every reply per conversation and can be told to fail sends into
//! a given conversation.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use rb_protocol::{ChannelRef, Reply};

use crate::channel::Channel;
use crate::error::{ChannelError, ChannelResult};

/// A recorded send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub channel: ChannelRef,
    pub reply: Reply,
}

/// Mock implementation of the `Channel` trait.
pub struct MockChannel {
    sent: Mutex<Vec<Sent>>,
    failing: Mutex<HashSet<String>>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Make every send into `channel` fail from now on.
    pub fn fail_on(&self, channel: &str) {
        self.failing.lock().unwrap().insert(channel.to_string());
    }

    /// All successful sends, in order.
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Replies delivered into one conversation.
    pub fn sent_to(&self, channel: &str) -> Vec<Reply> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.channel.as_str() == channel)
            .map(|s| s.reply.clone())
            .collect()
    }

    /// Text replies delivered into one conversation.
    pub fn texts_to(&self, channel: &str) -> Vec<String> {
        self.sent_to(channel)
            .iter()
            .filter_map(|r| r.as_text().map(String::from))
            .collect()
    }

    pub fn reset(&self) {
        self.sent.lock().unwrap().clear();
        self.failing.lock().unwrap().clear();
    }

    fn record(&self, channel: &ChannelRef, reply: Reply) -> ChannelResult<()> {
        if self.failing.lock().unwrap().contains(channel.as_str()) {
            return Err(ChannelError::Send {
                channel: channel.to_string(),
                reason: "channel_not_found".into(),
            });
        }
        self.sent.lock().unwrap().push(Sent {
            channel: channel.clone(),
            reply,
        });
        Ok(())
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for MockChannel {
    async fn send_text(&self, channel: &ChannelRef, text: &str) -> ChannelResult<()> {
        self.record(channel, Reply::text(text))
    }

    async fn send_file(
        &self,
        channel: &ChannelRef,
        bytes: &[u8],
        filename: &str,
    ) -> ChannelResult<()> {
        self.record(channel, Reply::file(filename, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_text_and_files() {
        let mock = MockChannel::new();
        let chat = ChannelRef::new("C1");
        mock.send_text(&chat, "hello").await.unwrap();
        mock.send(&chat, &Reply::file("TABLE_KUNDE.txt", b"dump".to_vec()))
            .await
            .unwrap();

        let sent = mock.sent_to("C1");
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], Reply::text("hello"));
        assert!(matches!(&sent[1], Reply::File { filename, .. } if filename == "TABLE_KUNDE.txt"));
        assert_eq!(mock.texts_to("C1"), vec!["hello"]);
    }

    #[tokio::test]
    async fn failing_channel_records_nothing() {
        let mock = MockChannel::new();
        mock.fail_on("C-dead");

        let err = mock
            .send_text(&ChannelRef::new("C-dead"), "lost")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("C-dead"));
        assert!(mock.sent().is_empty());

        mock.send_text(&ChannelRef::new("C-live"), "ok").await.unwrap();
        assert_eq!(mock.sent().len(), 1);
    }

    #[tokio::test]
    async fn reset_clears_state() {
        let mock = MockChannel::new();
        mock.fail_on("C1");
        mock.send_text(&ChannelRef::new("C2"), "x").await.unwrap();

        mock.reset();
        assert!(mock.sent().is_empty());
        mock.send_text(&ChannelRef::new("C1"), "y").await.unwrap();
    }
}
