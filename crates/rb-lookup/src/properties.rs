//! Translations paired from English and German property maps.

use std::collections::{BTreeMap, HashSet};

use rb_protocol::Translation;

use crate::source::{TranslationProvider, insert_pair};

/// Pairs values of two property maps that share a key.
#[derive(Debug, Default)]
pub struct PropertiesTranslations {
    translations: HashSet<Translation>,
}

impl PropertiesTranslations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every key present in both maps as an English/German pair.
    ///
    /// Keys missing from either side are skipped. Can be called repeatedly to
    /// accumulate several file pairs.
    pub fn parse(&mut self, english: &BTreeMap<String, String>, german: &BTreeMap<String, String>) {
        let before = self.translations.len();
        for (key, english_value) in english {
            if let Some(german_value) = german.get(key) {
                insert_pair(&mut self.translations, english_value, german_value);
            }
        }
        tracing::debug!(
            added = self.translations.len() - before,
            total = self.translations.len(),
            "paired properties translations"
        );
    }
}

impl TranslationProvider for PropertiesTranslations {
    fn name(&self) -> &str {
        "properties"
    }

    fn translations(&self) -> &HashSet<Translation> {
        &self.translations
    }

    fn clear(&mut self) {
        self.translations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn pairs_by_shared_key() {
        let mut props = PropertiesTranslations::new();
        props.parse(
            &map(&[("a", "Interest"), ("b", "Portfolio"), ("only.en", "Orphan")]),
            &map(&[("a", "Zins"), ("b", "Depot"), ("only.de", "Waise")]),
        );
        assert_eq!(props.translations().len(), 2);
        assert!(
            props
                .translations()
                .contains(&Translation::new("Portfolio", "Depot"))
        );
    }

    #[test]
    fn repeated_parse_is_idempotent() {
        let en = map(&[("a", "Interest")]);
        let de = map(&[("a", "Zins")]);
        let mut props = PropertiesTranslations::new();
        props.parse(&en, &de);
        props.parse(&en, &de);
        assert_eq!(props.translations().len(), 1);
    }

    #[test]
    fn clear_empties_provider() {
        let mut props = PropertiesTranslations::new();
        props.parse(&map(&[("a", "Interest")]), &map(&[("a", "Zins")]));
        props.clear();
        assert!(props.translations().is_empty());
    }
}
