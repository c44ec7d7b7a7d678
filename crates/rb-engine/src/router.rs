//! Command grammar: name plus minimum argument count.
//!
//! A message is a command only when its first whitespace-separated token is
//! exactly a command name and enough arguments follow. Anything else goes to
//! the freeform resolver.

/// The fixed set of commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    Refresh,
    Status,
    Translate,
    Id,
    SysCodes,
    SysCode,
    ClassPart,
    Tables,
    Table,
    Key,
    Dec,
    Hex,
    Bin,
}

impl CommandKind {
    pub const ALL: [CommandKind; 14] = [
        Self::Help,
        Self::Refresh,
        Self::Status,
        Self::Translate,
        Self::Id,
        Self::SysCodes,
        Self::SysCode,
        Self::ClassPart,
        Self::Tables,
        Self::Table,
        Self::Key,
        Self::Dec,
        Self::Hex,
        Self::Bin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Refresh => "refresh",
            Self::Status => "status",
            Self::Translate => "translate",
            Self::Id => "id",
            Self::SysCodes => "syscodes",
            Self::SysCode => "syscode",
            Self::ClassPart => "classpart",
            Self::Tables => "tables",
            Self::Table => "table",
            Self::Key => "key",
            Self::Dec => "dec",
            Self::Hex => "hex",
            Self::Bin => "bin",
        }
    }

    /// Minimum number of arguments after the command name.
    pub fn arity(self) -> usize {
        match self {
            Self::Help | Self::Refresh | Self::Status => 0,
            _ => 1,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// A matched command and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub args: Vec<String>,
}

impl Command {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// The first argument. Present for every kind with arity 1.
    pub fn arg(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }
}

/// Match `text` against the grammar. Empty text is `help`.
pub fn parse_command(text: &str) -> Option<Command> {
    let mut tokens = text.split_whitespace();
    let Some(first) = tokens.next() else {
        return Some(Command {
            kind: CommandKind::Help,
            args: Vec::new(),
        });
    };

    let kind = CommandKind::from_name(first)?;
    let args: Vec<String> = tokens.map(String::from).collect();
    if args.len() < kind.arity() {
        return None;
    }
    Some(Command { kind, args })
}
