//! Inbound addressing: is this message for the bot, and with which text?
//!
//! The engine only ever sees text with the bot's own mention removed.

use rb_protocol::InboundEvent;

use crate::config::ChannelConfig;

/// Outcome of addressing one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Addressed {
    /// The bot should interpret this text.
    ToBot { text: String, mentioned: bool },
    /// Posted by the bot itself.
    OwnMessage,
    /// Not meant for the bot.
    Ignored,
}

/// Classify an inbound event for the bot described by `config`.
///
/// A leading `<@BOT_ID>` mention is stripped and the rest trimmed. Without a
/// mention, direct chats and observed channels are still addressed.
pub fn address(event: &InboundEvent, config: &ChannelConfig) -> Addressed {
    if event.sender_id == config.bot_id {
        return Addressed::OwnMessage;
    }

    let mention = format!("<@{}>", config.bot_id);
    if let Some(rest) = event.text.trim_start().strip_prefix(&mention) {
        return Addressed::ToBot {
            text: rest.trim().to_string(),
            mentioned: true,
        };
    }

    if event.is_direct || config.is_observed(event.channel.as_str()) {
        return Addressed::ToBot {
            text: event.text.trim().to_string(),
            mentioned: false,
        };
    }

    Addressed::Ignored
}
