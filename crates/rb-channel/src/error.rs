//! Transport error types.

use thiserror::Error;

/// Errors a transport can report when delivering a reply.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("send error on {channel}: {reason}")]
    Send { channel: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for transport results.
pub type ChannelResult<T> = Result<T, ChannelError>;
