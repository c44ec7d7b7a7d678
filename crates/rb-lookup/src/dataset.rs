//! JSON reference dataset bundle.
//!
//! One file carrying tables, syscodes, key nodes and property-file pairs.
//! `Dataset::into_services` turns it into the in-memory lookup services.

use std::collections::BTreeMap;
use std::path::Path;

use rb_protocol::{KeyNode, SysCode, Table};
use serde::{Deserialize, Serialize};

use crate::error::{LookupError, LookupResult};
use crate::memory::{InMemoryKeyNodes, InMemorySysCodes, InMemoryTables};
use crate::properties::PropertiesTranslations;

/// Raw reference data as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub syscodes: Vec<SysCode>,
    #[serde(default)]
    pub key_nodes: Vec<KeyNode>,
    /// English/German property maps, paired by key.
    #[serde(default)]
    pub properties: Vec<PropertiesPair>,
}

/// One English property file and its German counterpart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertiesPair {
    pub english: BTreeMap<String, String>,
    pub german: BTreeMap<String, String>,
}

/// Lookup services built from a [`Dataset`].
#[derive(Debug)]
pub struct Services {
    pub tables: InMemoryTables,
    pub syscodes: InMemorySysCodes,
    pub key_nodes: InMemoryKeyNodes,
    pub properties: PropertiesTranslations,
}

impl Dataset {
    /// Load a dataset from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> LookupResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LookupError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> LookupResult<Self> {
        serde_json::from_str(json).map_err(|e| LookupError::Parse(e.to_string()))
    }

    /// Index everything. Fails on duplicate keys.
    pub fn into_services(self) -> LookupResult<Services> {
        let mut properties = PropertiesTranslations::new();
        for pair in &self.properties {
            properties.parse(&pair.english, &pair.german);
        }

        let services = Services {
            tables: InMemoryTables::new(self.tables)?,
            syscodes: InMemorySysCodes::new(self.syscodes)?,
            key_nodes: InMemoryKeyNodes::new(self.key_nodes)?,
            properties,
        };

        tracing::info!(
            tables = services.tables.len(),
            syscodes = services.syscodes.len(),
            key_nodes = services.key_nodes.len(),
            "reference dataset indexed"
        );
        Ok(services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SysCodeLookup, TableLookup, TranslationProvider};

    #[test]
    fn empty_json_is_empty_dataset() {
        let dataset = Dataset::from_json("{}").unwrap();
        let services = dataset.into_services().unwrap();
        assert!(services.tables.is_empty());
        assert!(services.properties.translations().is_empty());
    }

    #[test]
    fn parse_full_bundle() {
        let json = r#"{
            "tables": [{"id": 131, "name": "PORTFOLIO", "columns": []}],
            "syscodes": [{"id": 1, "name": "C_One", "english_short": "One", "german_short": "Eins"}],
            "key_nodes": [{"id": 5, "name": "FIVE"}],
            "properties": [{"english": {"k": "Customer"}, "german": {"k": "Kunde"}}]
        }"#;
        let services = Dataset::from_json(json).unwrap().into_services().unwrap();
        assert_eq!(services.tables.get_table_name(131).as_deref(), Some("PORTFOLIO"));
        assert!(services.syscodes.get_sys_code(1).is_some());
        assert_eq!(services.syscodes.translations().len(), 1);
        assert_eq!(services.properties.translations().len(), 1);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = Dataset::from_json("{not json").unwrap_err();
        assert!(matches!(err, LookupError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Dataset::from_file("/nonexistent/refbot/dataset.json").unwrap_err();
        assert!(matches!(err, LookupError::Io(ref msg) if msg.contains("/nonexistent")));
    }

    #[test]
    fn duplicate_syscode_fails_indexing() {
        let json = r#"{"syscodes": [{"id": 1, "name": "A"}, {"id": 1, "name": "B"}]}"#;
        let err = Dataset::from_json(json).unwrap().into_services().unwrap_err();
        assert!(err.to_string().contains("duplicate syscode"));
    }
}
