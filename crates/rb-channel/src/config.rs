use std::path::PathBuf;

use serde::Deserialize;

/// Transport settings: who the bot is and where it listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelConfig {
    /// The bot's own user id, as it appears in `<@ID>` mentions.
    pub bot_id: String,
    /// Display name used in help texts (`@name`).
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    /// Conversation that receives fault reports. None disables reporting.
    #[serde(default)]
    pub admin_channel: Option<String>,
    /// Channels where the bot answers without being mentioned.
    #[serde(default)]
    pub observed_channels: Vec<String>,
    /// Where the console transport writes file attachments.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl ChannelConfig {
    pub fn new(bot_id: impl Into<String>, bot_name: impl Into<String>) -> Self {
        Self {
            bot_id: bot_id.into(),
            bot_name: bot_name.into(),
            admin_channel: None,
            observed_channels: Vec::new(),
            output_dir: default_output_dir(),
        }
    }

    pub fn is_observed(&self, channel: &str) -> bool {
        self.observed_channels.iter().any(|c| c == channel)
    }
}

fn default_bot_name() -> String {
    "refbot".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("/var/lib/refbot/out")
}
