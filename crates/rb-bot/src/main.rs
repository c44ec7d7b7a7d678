//! refbot: answers questions about reference data in chat.
//!
//! Loads the dataset, then reads events from the console transport and
//! handles each one on its own task until stdin closes or Ctrl-C.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use rb_bot::{Bot, BotConfig, load_reference_data};
use rb_channel::{ConsoleChannel, console_events};
use rb_engine::Catalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    rb_bot::fault::install_panic_hook();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "refbot starting");

    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/etc/refbot/bot.toml".to_string());

    let config = BotConfig::from_file(&config_path)?;
    tracing::info!(
        bot_id = %config.channel.bot_id,
        bot_name = %config.channel.bot_name,
        dataset = %config.dataset_path.display(),
        "config loaded"
    );

    // ── Reference data ──────────────────────────────────────────
    let path = config.dataset_path.clone();
    let data = tokio::task::spawn_blocking(move || load_reference_data(&path)).await??;
    let catalog = Arc::new(Catalog::new(data));

    // ── Transport ───────────────────────────────────────────────
    let channel = Arc::new(ConsoleChannel::new(&config.channel.output_dir));
    let bot = Arc::new(Bot::new(&config, catalog, channel));
    let mut events = console_events();
    let mut in_flight = Vec::new();

    tracing::info!("refbot ready");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    in_flight.retain(|task: &tokio::task::JoinHandle<()>| !task.is_finished());
                    in_flight.push(bot.process(event));
                }
                None => {
                    tracing::info!("event source closed");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received");
                break;
            }
        }
    }

    for task in in_flight {
        if let Err(e) = task.await {
            tracing::warn!(error = %e, "event task did not finish cleanly");
        }
    }

    tracing::info!("refbot stopped");
    Ok(())
}
