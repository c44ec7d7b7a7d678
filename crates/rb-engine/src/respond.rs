//! Reply formatting for every lookup the router and resolver perform.
//!
//! Each method appends zero or more replies. `OnMiss` decides whether a
//! failed lookup is reported ("not found") or stays silent: commands report,
//! freeform strategies stay silent.

use rb_protocol::Reply;

use crate::catalog::ReferenceData;
use crate::codec::{CLASS_PART_HEX_LEN, Identifier, class_part_text, derive_class_part};
use crate::index::MatchKind;
use crate::numbase::NumberBase;

/// Maximum entries listed before the list is cut off with an ellipsis.
pub const MAX_LISTED: usize = 10;

/// What to do when a lookup finds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMiss {
    Report,
    Silent,
}

/// Collects replies for one message against one snapshot.
pub struct Responder<'a> {
    data: &'a ReferenceData,
    bot_name: &'a str,
    replies: Vec<Reply>,
}

impl<'a> Responder<'a> {
    pub fn new(data: &'a ReferenceData, bot_name: &'a str) -> Self {
        Self {
            data,
            bot_name,
            replies: Vec::new(),
        }
    }

    pub fn into_replies(self) -> Vec<Reply> {
        self.replies
    }

    fn say(&mut self, text: impl Into<String>) {
        self.replies.push(Reply::text(text));
    }

    fn miss(&mut self, on_miss: OnMiss, text: impl Into<String>) {
        if on_miss == OnMiss::Report {
            self.say(text);
        }
    }

    // ── help / status ───────────────────────────────────────────

    pub fn help(&mut self) {
        let bot = format!("@{}", self.bot_name);
        let text = format!(
            "You can ask me questions by giving me a command with an appropriate argument.\n\
             Try it out by asking one of the following lines (just copy and paste into a new message):\n\
             {bot} help\n\
             {bot} status\n\
             {bot} id 108300000012be3c\n\
             {bot} classpart 1083\n\
             {bot} tables zuord\n\
             {bot} table portfolio\n\
             {bot} syscode 10510000940000aa\n\
             {bot} syscode C_InstParam_PseudoVerfall\n\
             {bot} syscodes InstParam\n\
             {bot} key 1890\n\
             {bot} hex c0defeed\n\
             {bot} dec 1234567890\n\
             {bot} bin 0b101010\n\
             {bot} translate interest\n\
             \n\
             If you talk with me without specifying a command, I will try to answer as best as I can (maybe giving multiple answers).\n\
             Please try one of the following:\n\
             {bot} 108300000012be3c\n\
             {bot} 1083\n\
             {bot} portfolio\n\
             {bot} interest\n\
             \n\
             If you talk with me in a direct chat you do not need to prefix the messages with my name {bot}.\n\
             Please try one of the following:\n\
             108300000012be3c\n\
             1083\n\
             portfolio\n\
             interest"
        );
        self.say(text);
    }

    pub fn status(&mut self) {
        let mut text = format!(
            "{} database tables\n{} syscodes\n",
            self.data.table_count(),
            self.data.syscode_count()
        );
        for provider in self.data.translations.providers() {
            text.push_str(&format!("{} {} translations\n", provider.count, provider.name));
        }
        text.push_str(&format!(
            "{} total translations\nloaded {}",
            self.data.translations.len(),
            self.data.loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        self.say(text);
    }

    // ── identifiers and classparts ──────────────────────────────

    /// Report an identifier, then the table its classpart points to.
    pub fn identifier(&mut self, id: &Identifier, on_miss: OnMiss) {
        self.say(format!("This is an id: `{}` = decimal {}", id.hex, id.value));
        self.class_part(&id.hex, on_miss);
    }

    /// Argument that failed to parse as an identifier of `hex_len` digits.
    pub fn not_an_identifier(&mut self, text: &str, hex_len: usize) {
        let kind = if hex_len == CLASS_PART_HEX_LEN { "classpart" } else { "id" };
        self.say(format!(
            "This is not a valid {kind}: {text}. It must be {hex_len} hex digits."
        ));
    }

    /// Table named by the first four hex digits of `hex`.
    pub fn class_part(&mut self, hex: &str, on_miss: OnMiss) {
        let Some(head) = hex.get(..CLASS_PART_HEX_LEN) else {
            self.miss(on_miss, format!("This is not a classpart: {hex}."));
            return;
        };
        let table = derive_class_part(head).and_then(|cp| self.data.tables.get_table_name(cp));
        match table {
            Some(name) => self.say(format!("The classpart {head} indicates the table {name}")),
            None => self.miss(on_miss, format!("This is not a classpart: {head}.")),
        }
    }

    // ── syscodes ────────────────────────────────────────────────

    pub fn sys_code_by_id(&mut self, id: u64, on_miss: OnMiss) {
        match self.data.syscodes.get_sys_code(id) {
            Some(syscode) => {
                let text = self.data.syscodes.to_display_text(&syscode);
                self.say(text);
            }
            None => self.miss(on_miss, format!("This is not a valid syscode: {id:x}")),
        }
    }

    /// Compact one-line-per-syscode list.
    pub fn sys_code_list(&mut self, text: &str, on_miss: OnMiss) {
        let found = self.data.syscodes.find_sys_codes(text);
        if found.is_empty() {
            self.miss(on_miss, "No matching syscodes found.");
            return;
        }

        let mut message = format!(
            "Found {} {}:\n",
            found.len(),
            plural(found.len(), "syscode", "syscodes")
        );
        for syscode in &found {
            message.push_str(&format!("{:x} `{}`\n", syscode.id, syscode.name));
        }
        self.say(message);
    }

    /// Full description of each matching syscode, at most [`MAX_LISTED`].
    pub fn sys_code_text(&mut self, text: &str, on_miss: OnMiss) {
        let found = self.data.syscodes.find_sys_codes(text);
        if found.is_empty() {
            self.miss(on_miss, "No matching syscodes found.");
            return;
        }

        let mut message = format!(
            "Found {} {}:\n",
            found.len(),
            plural(found.len(), "syscode", "syscodes")
        );
        for syscode in found.iter().take(MAX_LISTED) {
            message.push_str(&self.data.syscodes.to_display_text(syscode));
            message.push('\n');
        }
        if found.len() > MAX_LISTED {
            message.push_str("...");
        }
        self.say(message);
    }

    // ── tables ──────────────────────────────────────────────────

    /// Dump and classpart of a table by name (case-insensitive input).
    /// Returns whether the table is known.
    pub fn table(&mut self, text: &str, on_miss: OnMiss) -> bool {
        let name = text.to_uppercase();

        if let Some(table) = self.data.tables.get_table(&name) {
            self.replies
                .push(Reply::file(format!("TABLE_{name}.txt"), table.dump()));
        }

        match self.data.tables.get_table_id(&name) {
            Some(id) => {
                self.say(format!(
                    "The classpart of the table {name} is {}",
                    class_part_text(id)
                ));
                true
            }
            None => {
                self.miss(on_miss, format!("This is not a table: {name}."));
                false
            }
        }
    }

    pub fn table_names(&mut self, partial: &str, on_miss: OnMiss) {
        let mut names = self.data.tables.get_table_names(partial);
        if names.is_empty() {
            self.miss(on_miss, "_No matching tables found._");
            return;
        }
        names.sort();

        let mut message = format!(
            "_Found {} matching {}._\n",
            names.len(),
            plural(names.len(), "table", "tables")
        );
        for name in &names {
            message.push_str(name);
            message.push('\n');
        }
        self.say(message);
    }

    // ── key nodes ───────────────────────────────────────────────

    pub fn key_node(&mut self, text: &str, on_miss: OnMiss) {
        let Ok(id) = text.parse::<i32>() else {
            self.miss(
                on_miss,
                format!("Not a valid key id (must be an integer value): {text}"),
            );
            return;
        };

        match self.data.key_nodes.get_key_node(id) {
            Some(node) => {
                let text = self.data.key_nodes.to_display_text(&node);
                self.say(text);
            }
            None => self.miss(on_miss, format!("No key node found for id: {id}")),
        }
    }

    // ── numbers ─────────────────────────────────────────────────

    /// Convert `token` in `base`. The intro line only appears on success.
    pub fn number(&mut self, token: &str, base: NumberBase, on_miss: OnMiss) -> bool {
        let Some(conversion) = base.convert(token) else {
            self.miss(
                on_miss,
                format!("Not a valid number for base {}: {token}", base.radix()),
            );
            return false;
        };

        self.say(format!("Interpreting as number with base {}:", base.radix()));
        self.say(format!(
            "Dec: {}\nHex: {}\nBin: {}",
            conversion.decimal(),
            conversion.hex(),
            conversion.binary()
        ));
        true
    }

    // ── translations ────────────────────────────────────────────

    pub fn translations(&mut self, query: &str, on_miss: OnMiss) {
        if query.is_empty() {
            self.miss(on_miss, "Nothing to translate.");
            return;
        }

        let Some((kind, list)) = self.data.translations.search(query).best() else {
            self.miss(on_miss, "No translations found.");
            return;
        };

        let noun = plural(list.len(), "translation", "translations");
        let mut message = match kind {
            MatchKind::Exact => format!("Found {} {noun} for exactly this term:\n", list.len()),
            MatchKind::Partial => format!(
                "Found {} {noun} that partially matched this term:\n",
                list.len()
            ),
        };
        for translation in list.iter().take(MAX_LISTED) {
            message.push_str(&format!(
                "_{}_ : _{}_\n",
                translation.english, translation.german
            ));
        }
        if list.len() > MAX_LISTED {
            message.push_str("...\n");
        }
        self.say(message);
    }
}

fn plural<'s>(count: usize, singular: &'s str, plural: &'s str) -> &'s str {
    if count == 1 { singular } else { plural }
}
