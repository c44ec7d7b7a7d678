//! refbot runtime library.
//!
//! Re-exports the modules so `rb-e2e-tests` can drive a `Bot` against a
//! `MockChannel` without the binary.

pub mod bot;
pub mod config;
pub mod fault;

pub use bot::{Bot, load_reference_data};
pub use config::BotConfig;
pub use fault::FaultReport;
