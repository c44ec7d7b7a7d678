//! Lookup contracts: the only view of the reference data the engine has.
//!
//! All lookups are in-memory and infallible: a miss is `None` or an empty
//! list, never an error. Implementations must be safe to share between
//! concurrently handled messages.

use std::collections::HashSet;

use rb_protocol::{KeyNode, SysCode, Table, Translation};

/// Database schema lookups.
pub trait TableLookup: Send + Sync {
    /// Table by exact (upper-case) name.
    fn get_table(&self, name: &str) -> Option<Table>;

    /// Table id by exact (upper-case) name.
    fn get_table_id(&self, name: &str) -> Option<u16>;

    /// Name of the table whose id equals the (already masked) classpart.
    fn get_table_name(&self, class_part: u16) -> Option<String>;

    /// Names containing `partial`, case-insensitive. Empty `partial` lists all.
    fn get_table_names(&self, partial: &str) -> Vec<String>;
}

/// Syscode lookups.
pub trait SysCodeLookup: Send + Sync {
    fn get_sys_code(&self, id: u64) -> Option<SysCode>;

    /// Syscodes whose name contains `partial`, case-insensitive. Empty `partial` lists all.
    fn find_sys_codes(&self, partial: &str) -> Vec<SysCode>;

    /// Multi-line description of a syscode for chat display.
    fn to_display_text(&self, syscode: &SysCode) -> String;
}

/// Key-migration hierarchy lookups.
pub trait KeyNodeLookup: Send + Sync {
    fn get_key_node(&self, id: i32) -> Option<KeyNode>;

    /// Multi-line description of a key node for chat display.
    fn to_display_text(&self, node: &KeyNode) -> String;
}

/// A source of translation pairs aggregated by the translation index.
pub trait TranslationProvider: Send + Sync {
    /// Short label used in status output (e.g. "syscode").
    fn name(&self) -> &str;

    fn translations(&self) -> &HashSet<Translation>;

    /// Drop all content so the provider can be refilled.
    fn clear(&mut self);
}

/// Add a pair to `set` when both labels are present.
pub(crate) fn insert_pair(set: &mut HashSet<Translation>, english: &str, german: &str) {
    let english = english.trim();
    let german = german.trim();
    if !english.is_empty() && !german.is_empty() {
        set.insert(Translation::new(english, german));
    }
}

/// Case-insensitive containment used by the partial-name lookups.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
