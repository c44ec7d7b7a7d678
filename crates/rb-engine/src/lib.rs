//! Message interpretation engine for refbot.
//!
//! Takes one line of operator text and turns it into replies:
//! - **Router** (`router`): exact command grammar (`id X`, `table X`, ...).
//! - **Resolver** (`resolver`): freeform fallback that runs every strategy
//!   (identifier, classpart, number bases, syscode, table, translation) and
//!   combines whatever succeeds.
//!
//! Reference data is read through a `Catalog` snapshot that can be swapped
//! atomically on refresh.

pub mod catalog;
pub mod codec;
pub mod engine;
pub mod index;
pub mod numbase;
pub mod respond;
pub mod resolver;
pub mod router;

pub use catalog::{Catalog, ReferenceData};
pub use codec::{Identifier, parse_identifier};
pub use engine::{Directive, Interpreter};
pub use index::{MatchKind, SearchResult, TranslationIndex};
pub use numbase::{Conversion, NumberBase};
pub use router::{Command, CommandKind, parse_command};
