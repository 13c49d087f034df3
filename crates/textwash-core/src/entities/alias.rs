//! Alias allocation
//!
//! Each entity gets `{LABEL}_{n}`, where `n` counts entities of that label
//! in first-seen order starting at 1. Counters are per document and never
//! reuse a number.

use super::EntityMap;
use std::collections::HashMap;

/// Phrase → alias table for one document, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl AliasTable {
    /// Number every entity within its label
    pub fn allocate(entities: &EntityMap) -> Self {
        let mut counters: HashMap<&str, usize> = HashMap::new();
        let mut table = Self::default();

        for entity in entities.iter() {
            let counter = counters.entry(entity.label.as_str()).or_insert(0);
            *counter += 1;
            let alias = format!("{}_{}", entity.label, counter);

            table
                .index
                .insert(entity.phrase.to_lowercase(), table.entries.len());
            table.entries.push((entity.phrase.clone(), alias));
        }

        table
    }

    /// Alias of a phrase (case-insensitive)
    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.index
            .get(&phrase.to_lowercase())
            .map(|&i| self.entries[i].1.as_str())
    }

    /// `(phrase, alias)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, a)| (p.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
