//! Entity canonicalization
//!
//! Turns noisy classifier spans into a clean phrase → label map:
//! non-entities, single characters and anything that does not look like a
//! word are dropped, and phrases are deduplicated case-insensitively so
//! "Tunisia" and "tunisia" share one alias. The first occurrence decides
//! both the surface form and the label.

use crate::classify::NON_ENTITY_LABEL;
use crate::spans::Span;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};

/// Letters/digits joined only by internal apostrophes, hyphens, periods,
/// ampersands or slashes: "O'Neil", "AT&T", "U.K", "24/7"
static WORD_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9]+(?:['’\-.&/][A-Za-z0-9]+)*$").expect("valid word-like pattern")
});

/// Typographic quotes stripped alongside ASCII punctuation
const TYPOGRAPHIC_QUOTES: &[char] = &['’', '‘', '“', '”'];

/// One canonical entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub phrase: String,
    pub label: String,
}

/// Insertion-ordered phrase → label map, unique by lowercase phrase
///
/// Iteration order is first-seen order, which the alias allocator relies
/// on for stable numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMap {
    entries: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl EntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the phrase is already present (case-insensitively).
    /// Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, phrase: impl Into<String>, label: impl Into<String>) -> bool {
        let phrase = phrase.into();
        let key = phrase.to_lowercase();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(Entity {
            phrase,
            label: label.into(),
        });
        true
    }

    /// Insert, or relabel an existing phrase in place (keeping its position
    /// and surface form)
    pub fn upsert(&mut self, phrase: impl Into<String>, label: impl Into<String>) {
        let phrase = phrase.into();
        match self.index.get(&phrase.to_lowercase()) {
            Some(&i) => self.entries[i].label = label.into(),
            None => {
                self.insert_if_absent(phrase, label);
            }
        }
    }

    /// Remove a phrase (case-insensitively)
    pub fn remove(&mut self, phrase: &str) -> Option<Entity> {
        let i = self.index.remove(&phrase.to_lowercase())?;
        let removed = self.entries.remove(i);
        self.reindex();
        Some(removed)
    }

    /// Keep only entities matching the predicate
    pub fn retain<F: FnMut(&Entity) -> bool>(&mut self, keep: F) {
        self.entries.retain(keep);
        self.reindex();
    }

    /// Label of a phrase (case-insensitive)
    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.index
            .get(&phrase.to_lowercase())
            .map(|&i| self.entries[i].label.as_str())
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.index.contains_key(&phrase.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.phrase.to_lowercase(), i))
            .collect();
    }
}

/// Caller-supplied adjustments applied after detection
#[derive(Debug, Clone, Default)]
pub struct EntityFilter {
    /// Keep only entities with these labels (`None` keeps everything)
    pub allowed_labels: Option<BTreeSet<String>>,
    /// Phrases never anonymized, even when detected
    pub deny: Vec<String>,
    /// `(phrase, label)` pairs always anonymized, even when not detected
    pub allow: Vec<(String, String)>,
}

impl EntityFilter {
    /// Apply, in order: deny-list removal, allow-list insertion, label filter
    pub fn apply(&self, mut entities: EntityMap) -> EntityMap {
        for phrase in &self.deny {
            if let Some(removed) = entities.remove(phrase.trim()) {
                tracing::debug!("Deny-list removed {:?} ({})", removed.phrase, removed.label);
            }
        }

        for (phrase, label) in &self.allow {
            let phrase = phrase.trim();
            if phrase.is_empty() {
                continue;
            }
            entities.upsert(phrase, label.trim());
        }

        if let Some(allowed) = &self.allowed_labels {
            let before = entities.len();
            entities.retain(|e| allowed.contains(&e.label));
            tracing::debug!("Label filter kept {}/{} entities", entities.len(), before);
        }

        entities
    }

    pub fn is_empty(&self) -> bool {
        self.allowed_labels.is_none() && self.deny.is_empty() && self.allow.is_empty()
    }
}

/// Strip surrounding punctuation and check the result is word-like.
///
/// Returns `None` for phrases that should never become entities.
pub fn clean_phrase(raw: &str) -> Option<&str> {
    if raw.chars().count() <= 1 {
        return None;
    }

    let cleaned = raw.trim_matches(|c: char| c.is_ascii_punctuation() || TYPOGRAPHIC_QUOTES.contains(&c));
    if cleaned.chars().count() <= 1 || !WORD_LIKE.is_match(cleaned) {
        return None;
    }

    Some(cleaned)
}

/// Build the canonical entity map from whole-word spans
pub fn canonicalize(spans: &[Span]) -> EntityMap {
    let mut entities = EntityMap::new();

    for span in spans {
        if span.label == NON_ENTITY_LABEL {
            continue;
        }
        let Some(cleaned) = clean_phrase(&span.text) else {
            continue;
        };
        entities.insert_if_absent(cleaned, span.label.as_str());
    }

    entities
}
