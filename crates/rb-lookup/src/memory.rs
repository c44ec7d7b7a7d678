//! In-memory lookup services built from already-parsed reference entities.

use std::collections::{BTreeMap, HashMap, HashSet};

use rb_protocol::{KeyNode, SysCode, Table, Translation};

use crate::error::{LookupError, LookupResult};
use crate::source::{
    KeyNodeLookup, SysCodeLookup, TableLookup, TranslationProvider, contains_ignore_case,
    insert_pair,
};

// ── Tables ──────────────────────────────────────────────────────

/// Schema tables indexed by name and by table id.
#[derive(Debug, Default)]
pub struct InMemoryTables {
    by_name: BTreeMap<String, Table>,
    name_by_id: HashMap<u16, String>,
}

impl InMemoryTables {
    /// Index the given tables. Names are normalized to upper case.
    pub fn new(tables: Vec<Table>) -> LookupResult<Self> {
        let mut index = Self::default();
        for mut table in tables {
            table.name = table.name.to_uppercase();
            if index.name_by_id.contains_key(&table.id) {
                return Err(LookupError::Duplicate {
                    kind: "table id",
                    key: table.id.to_string(),
                });
            }
            if index.by_name.contains_key(&table.name) {
                return Err(LookupError::Duplicate {
                    kind: "table",
                    key: table.name,
                });
            }
            index.name_by_id.insert(table.id, table.name.clone());
            index.by_name.insert(table.name.clone(), table);
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl TableLookup for InMemoryTables {
    fn get_table(&self, name: &str) -> Option<Table> {
        self.by_name.get(name).cloned()
    }

    fn get_table_id(&self, name: &str) -> Option<u16> {
        self.by_name.get(name).map(|t| t.id)
    }

    fn get_table_name(&self, class_part: u16) -> Option<String> {
        self.name_by_id.get(&class_part).cloned()
    }

    fn get_table_names(&self, partial: &str) -> Vec<String> {
        self.by_name
            .keys()
            .filter(|name| contains_ignore_case(name, partial))
            .cloned()
            .collect()
    }
}

// ── SysCodes ────────────────────────────────────────────────────

/// Syscodes indexed by id; their bilingual labels double as translations.
#[derive(Debug, Default)]
pub struct InMemorySysCodes {
    by_id: BTreeMap<u64, SysCode>,
    translations: HashSet<Translation>,
}

impl InMemorySysCodes {
    pub fn new(syscodes: Vec<SysCode>) -> LookupResult<Self> {
        let mut index = Self::default();
        for syscode in syscodes {
            if index.by_id.contains_key(&syscode.id) {
                return Err(LookupError::Duplicate {
                    kind: "syscode",
                    key: format!("{:x}", syscode.id),
                });
            }
            insert_pair(
                &mut index.translations,
                &syscode.english_short,
                &syscode.german_short,
            );
            insert_pair(
                &mut index.translations,
                &syscode.english_medium,
                &syscode.german_medium,
            );
            index.by_id.insert(syscode.id, syscode);
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn describe(&self, id: u64) -> String {
        match self.by_id.get(&id) {
            Some(child) => format!("{:x} `{}`", id, child.name),
            None => format!("{id:x}"),
        }
    }
}

impl SysCodeLookup for InMemorySysCodes {
    fn get_sys_code(&self, id: u64) -> Option<SysCode> {
        self.by_id.get(&id).cloned()
    }

    fn find_sys_codes(&self, partial: &str) -> Vec<SysCode> {
        self.by_id
            .values()
            .filter(|s| contains_ignore_case(&s.name, partial))
            .cloned()
            .collect()
    }

    fn to_display_text(&self, syscode: &SysCode) -> String {
        let mut out = format!("Syscode {:x} `{}`\n", syscode.id, syscode.name);
        if !syscode.code.is_empty() {
            out.push_str(&format!("Code: {}\n", syscode.code));
        }
        if syscode.group_id != 0 {
            out.push_str(&format!("Group: {}\n", self.describe(syscode.group_id)));
        }
        out.push_str(&format!(
            "English: _{}_ / _{}_\n",
            syscode.english_short, syscode.english_medium
        ));
        out.push_str(&format!(
            "German: _{}_ / _{}_\n",
            syscode.german_short, syscode.german_medium
        ));
        if !syscode.children.is_empty() {
            out.push_str(&format!("Children ({}):\n", syscode.children.len()));
            for child in &syscode.children {
                out.push_str(&format!("  {}\n", self.describe(*child)));
            }
        }
        if !syscode.subset_entries.is_empty() {
            out.push_str(&format!(
                "Subset entries ({}):\n",
                syscode.subset_entries.len()
            ));
            for entry in &syscode.subset_entries {
                let marker = if entry.default_entry { " (default)" } else { "" };
                out.push_str(&format!(
                    "  #{} {}{}\n",
                    entry.sort_number,
                    self.describe(entry.id),
                    marker
                ));
            }
        }
        out.trim_end().to_string()
    }
}

impl TranslationProvider for InMemorySysCodes {
    fn name(&self) -> &str {
        "syscode"
    }

    fn translations(&self) -> &HashSet<Translation> {
        &self.translations
    }

    fn clear(&mut self) {
        self.by_id.clear();
        self.translations.clear();
    }
}

// ── Key nodes ───────────────────────────────────────────────────

/// Key-migration nodes indexed by key id; node labels double as translations.
#[derive(Debug, Default)]
pub struct InMemoryKeyNodes {
    by_id: BTreeMap<i32, KeyNode>,
    translations: HashSet<Translation>,
}

impl InMemoryKeyNodes {
    pub fn new(nodes: Vec<KeyNode>) -> LookupResult<Self> {
        let mut index = Self::default();
        for node in nodes {
            if index.by_id.contains_key(&node.id) {
                return Err(LookupError::Duplicate {
                    kind: "key node",
                    key: node.id.to_string(),
                });
            }
            insert_pair(&mut index.translations, &node.english, &node.german);
            index.by_id.insert(node.id, node);
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn describe(&self, id: i32) -> String {
        match self.by_id.get(&id) {
            Some(node) => format!("{} `{}`", id, node.name),
            None => id.to_string(),
        }
    }
}

impl KeyNodeLookup for InMemoryKeyNodes {
    fn get_key_node(&self, id: i32) -> Option<KeyNode> {
        self.by_id.get(&id).cloned()
    }

    fn to_display_text(&self, node: &KeyNode) -> String {
        let mut out = format!("Key {} `{}`\n", node.id, node.name);
        out.push_str(&format!("English: _{}_\n", node.english));
        out.push_str(&format!("German: _{}_\n", node.german));
        if let Some(parent) = node.parent {
            out.push_str(&format!("Parent: {}\n", self.describe(parent)));
        }
        if !node.children.is_empty() {
            out.push_str(&format!("Children ({}):\n", node.children.len()));
            for child in &node.children {
                out.push_str(&format!("  {}\n", self.describe(*child)));
            }
        }
        out.trim_end().to_string()
    }
}

impl TranslationProvider for InMemoryKeyNodes {
    fn name(&self) -> &str {
        "keymigration"
    }

    fn translations(&self) -> &HashSet<Translation> {
        &self.translations
    }

    fn clear(&mut self) {
        self.by_id.clear();
        self.translations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    #[test]
    fn tables_lookup_by_name_and_id() {
        let tables = InMemoryTables::new(sample::tables()).unwrap();
        assert_eq!(tables.get_table_id("PORTFOLIO"), Some(0x083));
        assert_eq!(tables.get_table_name(0x083).as_deref(), Some("PORTFOLIO"));
        assert!(tables.get_table("portfolio").is_none()); // exact, upper-case only
        assert!(tables.get_table_name(0xfff).is_none());
    }

    #[test]
    fn tables_names_are_normalized() {
        let tables = InMemoryTables::new(vec![Table {
            id: 7,
            name: "lower".into(),
            columns: vec![],
        }])
        .unwrap();
        assert_eq!(tables.get_table_id("LOWER"), Some(7));
    }

    #[test]
    fn tables_partial_names_sorted() {
        let tables = InMemoryTables::new(sample::tables()).unwrap();
        let names = tables.get_table_names("zuord");
        assert_eq!(names, vec!["ZUORDNUNG", "ZUORD_PORTFOLIO_KUNDE"]);
        assert_eq!(tables.get_table_names("").len(), tables.len());
    }

    #[test]
    fn tables_duplicate_id_rejected() {
        let mut list = sample::tables();
        list.push(Table {
            id: 0x083,
            name: "OTHER".into(),
            columns: vec![],
        });
        let err = InMemoryTables::new(list).unwrap_err();
        assert!(matches!(err, LookupError::Duplicate { kind: "table id", .. }));
    }

    #[test]
    fn syscodes_find_by_partial_name() {
        let syscodes = InMemorySysCodes::new(sample::syscodes()).unwrap();
        let found = syscodes.find_sys_codes("verfall");
        assert_eq!(found.len(), 2);
        assert!(syscodes.find_sys_codes("nothing-like-this").is_empty());
        assert_eq!(syscodes.find_sys_codes("").len(), syscodes.len());
    }

    #[test]
    fn syscodes_labels_become_translations() {
        let syscodes = InMemorySysCodes::new(sample::syscodes()).unwrap();
        assert!(
            syscodes
                .translations()
                .contains(&Translation::new("Pseudo expiry", "Pseudoverfall"))
        );
    }

    #[test]
    fn syscode_display_lists_children() {
        let syscodes = InMemorySysCodes::new(sample::syscodes()).unwrap();
        let group = syscodes.get_sys_code(0x1051000094000000).unwrap();
        let text = syscodes.to_display_text(&group);
        assert!(text.starts_with("Syscode 1051000094000000 `C_InstParam`"));
        assert!(text.contains("10510000940000aa `C_InstParam_PseudoVerfall`"));
        assert!(text.contains("Children (2):"));
    }

    #[test]
    fn syscodes_clear_drops_everything() {
        let mut syscodes = InMemorySysCodes::new(sample::syscodes()).unwrap();
        syscodes.clear();
        assert!(syscodes.is_empty());
        assert!(syscodes.translations().is_empty());
    }

    #[test]
    fn key_node_display_names_parent() {
        let keys = InMemoryKeyNodes::new(sample::key_nodes()).unwrap();
        let node = keys.get_key_node(1891).unwrap();
        let text = keys.to_display_text(&node);
        assert!(text.starts_with("Key 1891 `INTEREST`"));
        assert!(text.contains("Parent: 1890 `INTEREST_RATE`"));
        assert!(keys.get_key_node(42).is_none());
    }
}
