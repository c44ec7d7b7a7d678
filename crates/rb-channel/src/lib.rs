//! Chat transport boundary for refbot.
//!
//! - `Channel` trait: the two reply primitives (text, file)
//! - `address` decides whether an inbound event is meant for the bot
//! - `ConsoleChannel` + `console_events` for running locally on a terminal
//! - `MockChannel` for tests

pub mod channel;
pub mod config;
pub mod console;
pub mod error;
pub mod handler;
pub mod mock;

// Re-exports for convenience.
pub use channel::Channel;
pub use config::ChannelConfig;
pub use console::{ConsoleChannel, console_events};
pub use error::{ChannelError, ChannelResult};
pub use handler::{Addressed, address};
pub use mock::{MockChannel, Sent};
