//! Event handling: addressing, interpretation, delivery and the fault boundary.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use rb_channel::{Addressed, Channel, ChannelConfig, address};
use rb_engine::{Catalog, Directive, Interpreter, ReferenceData};
use rb_lookup::Dataset;
use rb_protocol::{ChannelRef, InboundEvent, Reply};

use crate::config::BotConfig;
use crate::fault::{FaultReport, take_panic_trace};

/// Read, index and snapshot a dataset file. Blocking.
pub fn load_reference_data(path: &Path) -> anyhow::Result<ReferenceData> {
    let dataset = Dataset::from_file(path)
        .with_context(|| format!("loading dataset {}", path.display()))?;
    let services = dataset
        .into_services()
        .with_context(|| format!("indexing dataset {}", path.display()))?;
    Ok(ReferenceData::from_services(services))
}

/// The running bot. Shared between event tasks behind an `Arc`.
pub struct Bot {
    interpreter: Interpreter,
    channel: Arc<dyn Channel>,
    identity: ChannelConfig,
    dataset_path: PathBuf,
    /// Held across load and publish so snapshots go out in request order.
    refresh_lock: Mutex<()>,
}

impl Bot {
    pub fn new(config: &BotConfig, catalog: Arc<Catalog>, channel: Arc<dyn Channel>) -> Self {
        Self {
            interpreter: Interpreter::new(catalog, config.channel.bot_name.clone()),
            channel,
            identity: config.channel.clone(),
            dataset_path: config.dataset_path.clone(),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.interpreter.catalog()
    }

    /// Handle one event on its own task.
    ///
    /// Errors and panics stop at this boundary: they are logged and reported
    /// to the admin conversation, never to the sender.
    pub fn process(self: &Arc<Self>, event: InboundEvent) -> JoinHandle<()> {
        let bot = Arc::clone(self);
        tokio::spawn(async move {
            let worker = {
                let bot = Arc::clone(&bot);
                let event = event.clone();
                tokio::spawn(async move { bot.handle(&event).await })
            };

            let report = match worker.await {
                Ok(Ok(())) => return,
                Ok(Err(e)) => FaultReport::from_error(&event, &e),
                Err(join_error) if join_error.is_panic() => {
                    let backtrace = take_panic_trace(join_error.id());
                    FaultReport::from_panic(&event, join_error.into_panic().as_ref(), backtrace)
                }
                Err(join_error) => FaultReport::new(&event, join_error.to_string()),
            };
            bot.report_fault(&event, report).await;
        })
    }

    /// Address, interpret and answer one event.
    pub async fn handle(&self, event: &InboundEvent) -> anyhow::Result<()> {
        let text = match address(event, &self.identity) {
            Addressed::ToBot { text, mentioned } => {
                tracing::info!(
                    event_id = %event.id,
                    sender = %event.sender_id,
                    channel = %event.channel,
                    mentioned,
                    text = %text,
                    "message received"
                );
                text
            }
            Addressed::OwnMessage => return Ok(()),
            Addressed::Ignored => {
                tracing::debug!(event_id = %event.id, channel = %event.channel, "not addressed");
                return Ok(());
            }
        };

        let replies = match self.interpreter.interpret(&text) {
            Directive::Reply(replies) => replies,
            Directive::Refresh => {
                self.refresh().await?;
                self.interpreter.status()
            }
        };

        if replies.is_empty() {
            tracing::debug!(event_id = %event.id, "nothing to say");
        }
        self.deliver(&event.channel, &replies).await?;
        tracing::info!(event_id = %event.id, replies = replies.len(), "message answered");
        Ok(())
    }

    /// Reload the dataset off the async runtime and publish the new snapshot.
    pub async fn refresh(&self) -> anyhow::Result<()> {
        let _guard = self.refresh_lock.lock().await;
        let path = self.dataset_path.clone();
        tracing::info!(path = %path.display(), "refreshing reference data");

        let data = tokio::task::spawn_blocking(move || load_reference_data(&path))
            .await
            .context("dataset loader task failed")??;
        self.catalog().replace(data);
        Ok(())
    }

    async fn deliver(&self, channel: &ChannelRef, replies: &[Reply]) -> anyhow::Result<()> {
        for reply in replies {
            self.channel
                .send(channel, reply)
                .await
                .with_context(|| format!("sending reply to {channel}"))?;
        }
        Ok(())
    }

    async fn report_fault(&self, event: &InboundEvent, report: FaultReport) {
        tracing::error!(
            event_id = %event.id,
            sender = %report.sender,
            channel = %report.channel,
            trace = %report.trace,
            "failed to handle message"
        );

        let Some(admin) = &self.identity.admin_channel else {
            return;
        };
        let admin = ChannelRef::new(admin.as_str());
        if let Err(e) = self.deliver(&admin, &report.replies()).await {
            tracing::error!(error = %e, admin = %admin, "failed to report fault to admin");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use rb_channel::{ChannelResult, MockChannel};
    use rb_lookup::sample;

    use crate::fault::install_panic_hook;

    fn write_sample_dataset(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "rb-bot-unit-{name}-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, serde_json::to_string(&sample::dataset()).unwrap()).unwrap();
        path
    }

    fn bot(channel: Arc<MockChannel>, dataset_path: PathBuf) -> Arc<Bot> {
        let mut identity = ChannelConfig::new("U0BOT", "refbot");
        identity.admin_channel = Some("D-admin".into());
        let config = BotConfig {
            dataset_path,
            channel: identity,
        };
        let catalog = Arc::new(Catalog::new(ReferenceData::empty()));
        Arc::new(Bot::new(&config, catalog, channel))
    }

    fn dm(text: &str) -> InboundEvent {
        InboundEvent::new("U1", true, ChannelRef::new("D1"), text)
    }

    #[test]
    fn load_reference_data_missing_file() {
        let err = load_reference_data(Path::new("/nonexistent/dataset.json"))
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("loading dataset /nonexistent/dataset.json"));
    }

    #[tokio::test]
    async fn refresh_publishes_new_snapshot() {
        let path = write_sample_dataset("publish");
        let mock = Arc::new(MockChannel::new());
        let bot = bot(mock.clone(), path.clone());
        assert_eq!(bot.catalog().snapshot().table_count(), 0);

        bot.handle(&dm("refresh")).await.unwrap();

        assert_eq!(bot.catalog().snapshot().table_count(), 5);
        let texts = mock.texts_to("D1");
        assert_eq!(texts.len(), 1);
        assert!(texts[0].starts_with("5 database tables"));
        std::fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn unaddressed_and_own_messages_get_no_reply() {
        let mock = Arc::new(MockChannel::new());
        let bot = bot(mock.clone(), PathBuf::from("/unused"));

        bot.handle(&InboundEvent::new("U1", false, ChannelRef::new("C1"), "help"))
            .await
            .unwrap();
        bot.handle(&InboundEvent::new("U0BOT", true, ChannelRef::new("D1"), "help"))
            .await
            .unwrap();
        assert!(mock.sent().is_empty());
    }

    #[tokio::test]
    async fn failed_refresh_is_reported_to_admin_only() {
        let mock = Arc::new(MockChannel::new());
        let bot = bot(mock.clone(), PathBuf::from("/nonexistent/dataset.json"));

        bot.process(dm("refresh")).await.unwrap();

        assert!(mock.sent_to("D1").is_empty());
        let admin = mock.sent_to("D-admin");
        assert_eq!(admin.len(), 2);
        assert!(admin[0].as_text().unwrap().contains("content: refresh"));
        match &admin[1] {
            Reply::File { filename, bytes } => {
                assert_eq!(filename, "Stacktrace.txt");
                assert!(String::from_utf8_lossy(bytes).contains("nonexistent"));
            }
            other => panic!("expected attachment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_admin_is_only_logged() {
        let mock = Arc::new(MockChannel::new());
        mock.fail_on("D1");
        mock.fail_on("D-admin");
        let bot = bot(mock.clone(), PathBuf::from("/unused"));

        bot.process(dm("help")).await.unwrap();
        assert!(mock.sent().is_empty());
    }

    #[tokio::test]
    async fn refreshes_wait_for_the_one_in_progress() {
        let path = write_sample_dataset("serial");
        let mock = Arc::new(MockChannel::new());
        let bot = bot(mock, path.clone());

        let guard = bot.refresh_lock.lock().await;
        let pending = {
            let bot = Arc::clone(&bot);
            tokio::spawn(async move { bot.refresh().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!pending.is_finished());
        assert_eq!(bot.catalog().snapshot().table_count(), 0);

        drop(guard);
        pending.await.unwrap().unwrap();
        assert_eq!(bot.catalog().snapshot().table_count(), 5);
        std::fs::remove_file(path).unwrap();
    }

    /// Panics while sending to `D-crash`; everything else goes to the mock.
    struct CrashingChannel(Arc<MockChannel>);

    #[async_trait]
    impl Channel for CrashingChannel {
        async fn send_text(&self, channel: &ChannelRef, text: &str) -> ChannelResult<()> {
            if channel.as_str() == "D-crash" {
                panic!("transport exploded");
            }
            self.0.send_text(channel, text).await
        }

        async fn send_file(
            &self,
            channel: &ChannelRef,
            bytes: &[u8],
            filename: &str,
        ) -> ChannelResult<()> {
            self.0.send_file(channel, bytes, filename).await
        }
    }

    #[tokio::test]
    async fn panic_report_carries_backtrace() {
        install_panic_hook();
        let mock = Arc::new(MockChannel::new());
        let mut identity = ChannelConfig::new("U0BOT", "refbot");
        identity.admin_channel = Some("D-admin".into());
        let config = BotConfig {
            dataset_path: PathBuf::from("/unused"),
            channel: identity,
        };
        let catalog = Arc::new(Catalog::new(ReferenceData::empty()));
        let bot = Arc::new(Bot::new(
            &config,
            catalog,
            Arc::new(CrashingChannel(mock.clone())),
        ));

        let event = InboundEvent::new("U1", true, ChannelRef::new("D-crash"), "help");
        bot.process(event).await.unwrap();

        let admin = mock.sent_to("D-admin");
        assert_eq!(admin.len(), 2);
        let Reply::File { bytes, .. } = &admin[1] else {
            panic!("expected attachment");
        };
        let trace = String::from_utf8_lossy(bytes);
        assert!(trace.starts_with("panic: transport exploded"));
        assert!(trace.contains("stack backtrace:"));
    }
}
