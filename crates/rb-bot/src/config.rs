//! Bot configuration, loaded from TOML.

use std::path::PathBuf;

use rb_channel::ChannelConfig;
use serde::Deserialize;

/// Top-level configuration for the bot.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// JSON reference dataset, re-read on every `refresh`.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    /// Identity and transport settings.
    pub channel: ChannelConfig,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("/etc/refbot/dataset.json")
}

impl BotConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
