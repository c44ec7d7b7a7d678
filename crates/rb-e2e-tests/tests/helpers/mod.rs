//! Shared test harness for E2E integration tests.
//!
//! Wires a real `Bot` (engine, lookup services, fault boundary) to a
//! `MockChannel`, with the sample dataset written to a temp file so that
//! `refresh` goes through the same loading path as production.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rb_bot::{Bot, BotConfig, load_reference_data};
use rb_channel::{ChannelConfig, MockChannel};
use rb_engine::Catalog;
use rb_lookup::{Dataset, sample};
use rb_protocol::{ChannelRef, InboundEvent, Reply};

pub const BOT_ID: &str = "U0BOT";
pub const ADMIN: &str = "D-admin";
pub const OBSERVED: &str = "C-ids";
pub const DM: &str = "D-user";

/// End-to-end harness: one bot, one mock transport, one dataset file.
pub struct TestHarness {
    pub bot: Arc<Bot>,
    pub chat: Arc<MockChannel>,
    pub dataset_path: PathBuf,
}

impl TestHarness {
    /// Bot loaded with the sample dataset.
    pub fn with_sample_data() -> Self {
        Self::with_dataset(&sample::dataset())
    }

    /// Bot loaded with `dataset`, which is also what `refresh` re-reads.
    pub fn with_dataset(dataset: &Dataset) -> Self {
        let dataset_path = std::env::temp_dir().join(format!(
            "rb-e2e-{}.json",
            uuid::Uuid::now_v7()
        ));
        write_dataset(&dataset_path, dataset);

        let mut channel = ChannelConfig::new(BOT_ID, "refbot");
        channel.admin_channel = Some(ADMIN.into());
        channel.observed_channels = vec![OBSERVED.into()];
        let config = BotConfig {
            dataset_path: dataset_path.clone(),
            channel,
        };

        let data = load_reference_data(&dataset_path).unwrap();
        let catalog = Arc::new(Catalog::new(data));
        let chat = Arc::new(MockChannel::new());
        let bot = Arc::new(Bot::new(&config, catalog, chat.clone()));

        Self {
            bot,
            chat,
            dataset_path,
        }
    }

    /// Bot with no reference data at all.
    pub fn empty() -> Self {
        Self::with_dataset(&Dataset::default())
    }

    /// Replace the dataset file on disk (takes effect on `refresh`).
    pub fn rewrite_dataset(&self, dataset: &Dataset) {
        write_dataset(&self.dataset_path, dataset);
    }

    /// Send a direct message and wait until it has been fully handled.
    pub async fn dm(&self, text: &str) -> Vec<Reply> {
        self.send(InboundEvent::new("U1", true, ChannelRef::new(DM), text))
            .await;
        self.chat.sent_to(DM)
    }

    /// Post in a channel and wait until it has been fully handled.
    pub async fn post(&self, channel: &str, text: &str) -> Vec<Reply> {
        self.send(InboundEvent::new("U1", false, ChannelRef::new(channel), text))
            .await;
        self.chat.sent_to(channel)
    }

    pub async fn send(&self, event: InboundEvent) {
        self.bot.process(event).await.unwrap();
    }

    pub fn admin_replies(&self) -> Vec<Reply> {
        self.chat.sent_to(ADMIN)
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.dataset_path);
    }
}

fn write_dataset(path: &Path, dataset: &Dataset) {
    std::fs::write(path, serde_json::to_string_pretty(dataset).unwrap()).unwrap();
}

/// Text content of every text reply.
pub fn texts(replies: &[Reply]) -> Vec<&str> {
    replies.iter().filter_map(Reply::as_text).collect()
}

/// Filenames of every attachment.
pub fn filenames(replies: &[Reply]) -> Vec<&str> {
    replies
        .iter()
        .filter_map(|r| match r {
            Reply::File { filename, .. } => Some(filename.as_str()),
            Reply::Text(_) => None,
        })
        .collect()
}
