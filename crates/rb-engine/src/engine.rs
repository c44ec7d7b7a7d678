//! Entry point: one message text in, a directive out.

use std::sync::Arc;

use rb_protocol::Reply;

use crate::catalog::Catalog;
use crate::codec::{CLASS_PART_HEX_LEN, IDENTIFIER_HEX_LEN, parse_identifier};
use crate::numbase::NumberBase;
use crate::resolver;
use crate::respond::{OnMiss, Responder};
use crate::router::{Command, CommandKind, parse_command};

/// What the caller should do with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Send these replies, in order. May be empty.
    Reply(Vec<Reply>),
    /// Reload reference data, then report status.
    Refresh,
}

impl Directive {
    pub fn replies(&self) -> &[Reply] {
        match self {
            Self::Reply(replies) => replies,
            Self::Refresh => &[],
        }
    }
}

/// Interprets addressed message text against the current catalog snapshot.
pub struct Interpreter {
    catalog: Arc<Catalog>,
    bot_name: String,
}

impl Interpreter {
    pub fn new(catalog: Arc<Catalog>, bot_name: impl Into<String>) -> Self {
        Self {
            catalog,
            bot_name: bot_name.into(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn interpret(&self, text: &str) -> Directive {
        let data = self.catalog.snapshot();
        let mut responder = Responder::new(&data, &self.bot_name);

        match parse_command(text) {
            Some(command) if command.kind == CommandKind::Refresh => return Directive::Refresh,
            Some(command) => {
                tracing::debug!(command = command.name(), "command matched");
                dispatch(&mut responder, &command);
            }
            None => {
                tracing::debug!("no command, resolving freeform");
                resolver::resolve(&mut responder, text);
            }
        }

        Directive::Reply(responder.into_replies())
    }

    /// Status report for the current snapshot.
    pub fn status(&self) -> Vec<Reply> {
        let data = self.catalog.snapshot();
        let mut responder = Responder::new(&data, &self.bot_name);
        responder.status();
        responder.into_replies()
    }
}

fn dispatch(r: &mut Responder<'_>, command: &Command) {
    let arg = command.arg();
    match command.kind {
        CommandKind::Help => r.help(),
        CommandKind::Status => r.status(),
        // Handled by the caller before dispatch.
        CommandKind::Refresh => {}
        CommandKind::Translate => r.translations(arg, OnMiss::Report),
        CommandKind::Id => match parse_identifier(arg, IDENTIFIER_HEX_LEN) {
            Some(id) => r.identifier(&id, OnMiss::Report),
            None => r.not_an_identifier(arg, IDENTIFIER_HEX_LEN),
        },
        CommandKind::SysCodes => r.sys_code_list(arg, OnMiss::Report),
        CommandKind::SysCode => match parse_identifier(arg, IDENTIFIER_HEX_LEN) {
            Some(id) => r.sys_code_by_id(id.value, OnMiss::Report),
            None => r.sys_code_text(arg, OnMiss::Report),
        },
        CommandKind::ClassPart => match parse_identifier(arg, CLASS_PART_HEX_LEN) {
            Some(_) => r.class_part(arg, OnMiss::Report),
            None => r.not_an_identifier(arg, CLASS_PART_HEX_LEN),
        },
        CommandKind::Tables => r.table_names(arg, OnMiss::Report),
        CommandKind::Table => {
            r.table(arg, OnMiss::Report);
        }
        CommandKind::Key => r.key_node(arg, OnMiss::Report),
        CommandKind::Dec => {
            r.number(arg, NumberBase::Decimal, OnMiss::Report);
        }
        CommandKind::Hex => {
            r.number(arg, NumberBase::Hex, OnMiss::Report);
        }
        CommandKind::Bin => {
            r.number(arg, NumberBase::Binary, OnMiss::Report);
        }
    }
}
