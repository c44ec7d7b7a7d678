//! Terminal transport for running the bot locally.
//!
//! Each stdin line is one inbound event. A line starting with `#name ` is
//! posted in channel `name`; anything else is a direct message. Text replies
//! go to stdout, attachments are written to the output directory.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use rb_protocol::{ChannelRef, InboundEvent};

use crate::channel::Channel;
use crate::error::ChannelResult;

/// Conversation used for direct console messages.
pub const CONSOLE_DIRECT: &str = "console";

/// Sender id of everything typed on the console.
pub const CONSOLE_SENDER: &str = "operator";

pub struct ConsoleChannel {
    output_dir: PathBuf,
}

impl ConsoleChannel {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl Channel for ConsoleChannel {
    async fn send_text(&self, channel: &ChannelRef, text: &str) -> ChannelResult<()> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("[{channel}] {text}\n").as_bytes())
            .await?;
        stdout.flush().await?;
        Ok(())
    }

    async fn send_file(
        &self,
        channel: &ChannelRef,
        bytes: &[u8],
        filename: &str,
    ) -> ChannelResult<()> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(filename);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(%channel, path = %path.display(), size = bytes.len(), "attachment written");
        self.send_text(channel, &format!("(file {})", path.display()))
            .await
    }
}

/// Turn one console line into an event. Blank lines are skipped.
pub fn parse_console_line(line: &str) -> Option<InboundEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(rest) = line.strip_prefix('#') {
        let (channel, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        return Some(InboundEvent::new(
            CONSOLE_SENDER,
            false,
            ChannelRef::new(channel),
            text.trim(),
        ));
    }

    Some(InboundEvent::new(
        CONSOLE_SENDER,
        true,
        ChannelRef::new(CONSOLE_DIRECT),
        line,
    ))
}

/// Read stdin line by line on a background task.
///
/// The receiver yields `None` once stdin is closed.
pub fn console_events() -> mpsc::Receiver<InboundEvent> {
    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let Some(event) = parse_console_line(&line) else {
                        continue;
                    };
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
        tracing::debug!("console input closed");
    });
    rx
}
