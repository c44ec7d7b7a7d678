//! Published reference-data snapshot.
//!
//! `ReferenceData` is immutable once built. `Catalog` holds the current one
//! behind an `ArcSwap`: a message loads the snapshot once and keeps a
//! consistent view while a refresh builds the next one on the side and
//! publishes it with a single pointer swap.

use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};

use rb_lookup::{
    KeyNodeLookup, Services, SysCodeLookup, TableLookup, TranslationProvider,
};

use crate::index::TranslationIndex;

/// One complete, consistent set of lookup services.
pub struct ReferenceData {
    pub tables: Arc<dyn TableLookup>,
    pub syscodes: Arc<dyn SysCodeLookup>,
    pub key_nodes: Arc<dyn KeyNodeLookup>,
    pub translations: TranslationIndex,
    pub loaded_at: DateTime<Utc>,
}

impl ReferenceData {
    /// Build a snapshot from in-memory services.
    ///
    /// Translations are aggregated in the same order the bot always used:
    /// key migration, properties, syscodes.
    pub fn from_services(services: Services) -> Self {
        let providers: [&dyn TranslationProvider; 3] = [
            &services.key_nodes,
            &services.properties,
            &services.syscodes,
        ];
        let translations = TranslationIndex::from_providers(&providers);

        Self {
            tables: Arc::new(services.tables),
            syscodes: Arc::new(services.syscodes),
            key_nodes: Arc::new(services.key_nodes),
            translations,
            loaded_at: Utc::now(),
        }
    }

    /// A snapshot with no data at all.
    pub fn empty() -> Self {
        Self::from_services(Services {
            tables: Default::default(),
            syscodes: Default::default(),
            key_nodes: Default::default(),
            properties: Default::default(),
        })
    }

    pub fn table_count(&self) -> usize {
        self.tables.get_table_names("").len()
    }

    pub fn syscode_count(&self) -> usize {
        self.syscodes.find_sys_codes("").len()
    }
}

/// Holder of the current snapshot.
pub struct Catalog {
    current: ArcSwap<ReferenceData>,
}

impl Catalog {
    pub fn new(data: ReferenceData) -> Self {
        Self {
            current: ArcSwap::from_pointee(data),
        }
    }

    /// The snapshot to use for one message.
    pub fn snapshot(&self) -> Arc<ReferenceData> {
        self.current.load_full()
    }

    /// Publish a fully built snapshot.
    pub fn replace(&self, data: ReferenceData) {
        tracing::info!(
            tables = data.table_count(),
            syscodes = data.syscode_count(),
            translations = data.translations.len(),
            "publishing reference snapshot"
        );
        self.current.store(Arc::new(data));
    }
}
