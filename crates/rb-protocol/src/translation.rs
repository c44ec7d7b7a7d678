use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// An English/German term pair.
///
/// Equality and hashing are on both strings, case-sensitive, so the same pair
/// delivered by two providers collapses to one entry in a set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Translation {
    pub english: String,
    pub german: String,
}

impl Translation {
    pub fn new(english: impl Into<String>, german: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            german: german.into(),
        }
    }

    /// Display ordering: shorter terms first, then lexicographic.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.english
            .len()
            .cmp(&other.english.len())
            .then_with(|| self.german.len().cmp(&other.german.len()))
            .then_with(|| self.english.cmp(&other.english))
            .then_with(|| self.german.cmp(&other.german))
    }
}
