//! Deduplicated, searchable set of translations from all providers.

use std::collections::HashSet;

use rb_lookup::TranslationProvider;
use rb_protocol::Translation;

/// Per-provider contribution, reported by `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCount {
    pub name: String,
    pub count: usize,
}

/// Union of every provider's translations.
#[derive(Debug, Default)]
pub struct TranslationIndex {
    translations: HashSet<Translation>,
    providers: Vec<ProviderCount>,
}

/// How a search result matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Partial,
}

/// Raw search output. A translation may be in both sets.
#[derive(Debug, Default)]
pub struct SearchResult {
    pub exact: HashSet<Translation>,
    pub partial: HashSet<Translation>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.partial.is_empty()
    }

    /// Exact matches if there are any, otherwise partial ones, in display order.
    pub fn best(&self) -> Option<(MatchKind, Vec<Translation>)> {
        let (kind, set) = if !self.exact.is_empty() {
            (MatchKind::Exact, &self.exact)
        } else if !self.partial.is_empty() {
            (MatchKind::Partial, &self.partial)
        } else {
            return None;
        };
        let mut list: Vec<Translation> = set.iter().cloned().collect();
        list.sort_by(Translation::display_cmp);
        Some((kind, list))
    }
}

impl TranslationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_providers(providers: &[&dyn TranslationProvider]) -> Self {
        let mut index = Self::new();
        index.rebuild(providers);
        index
    }

    /// Clear, then union every provider's set in order.
    pub fn rebuild(&mut self, providers: &[&dyn TranslationProvider]) {
        self.translations.clear();
        self.providers.clear();
        for provider in providers {
            let set = provider.translations();
            self.translations.extend(set.iter().cloned());
            self.providers.push(ProviderCount {
                name: provider.name().to_string(),
                count: set.len(),
            });
        }
        tracing::debug!(
            providers = self.providers.len(),
            total = self.translations.len(),
            "translation index rebuilt"
        );
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    pub fn providers(&self) -> &[ProviderCount] {
        &self.providers
    }

    /// Case-insensitive search on both languages.
    pub fn search(&self, query: &str) -> SearchResult {
        let mut result = SearchResult::default();
        if query.is_empty() {
            return result;
        }

        let needle = query.to_lowercase();
        for translation in &self.translations {
            let english = translation.english.to_lowercase();
            let german = translation.german.to_lowercase();
            if english == needle || german == needle {
                result.exact.insert(translation.clone());
            }
            if english.contains(&needle) || german.contains(&needle) {
                result.partial.insert(translation.clone());
            }
        }
        result
    }
}
