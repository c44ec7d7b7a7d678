//! Lookup services for refbot.
//!
//! Defines the read-only contracts the interpretation engine consumes
//! (`TableLookup`, `SysCodeLookup`, `KeyNodeLookup`, `TranslationProvider`),
//! in-memory implementations of each, and a JSON `Dataset` bundle that the
//! bot loads from disk to build them.

pub mod dataset;
pub mod error;
pub mod memory;
pub mod properties;
pub mod sample;
pub mod source;

// Re-export key types for convenience
pub use dataset::{Dataset, PropertiesPair, Services};
pub use error::{LookupError, LookupResult};
pub use memory::{InMemoryKeyNodes, InMemorySysCodes, InMemoryTables};
pub use properties::PropertiesTranslations;
pub use source::{KeyNodeLookup, SysCodeLookup, TableLookup, TranslationProvider};
