//! Canonical entity substitution
//!
//! Longer phrases go first so "John Smith" is consumed before "John" could
//! match on its own and leave a dangling "Smith" behind.

use super::patterns::{replace_phrase, PatternCache};
use crate::entities::AliasTable;
use std::cmp::Reverse;

/// Replace every entity phrase with its alias
pub fn replace_entities(text: &str, aliases: &AliasTable, cache: &PatternCache) -> String {
    let mut phrases: Vec<(&str, &str)> = aliases.iter().collect();
    // Stable: equal lengths keep first-seen order
    phrases.sort_by_key(|(phrase, _)| Reverse(phrase.chars().count()));

    let mut result = text.to_string();
    for (phrase, alias) in phrases {
        if phrase.chars().count() <= 1 {
            continue;
        }
        result = replace_phrase(cache, &result, phrase, alias);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityFilter, EntityMap};

    fn aliases(pairs: &[(&str, &str)]) -> AliasTable {
        let mut map = EntityMap::new();
        for (phrase, label) in pairs {
            map.insert_if_absent(*phrase, *label);
        }
        AliasTable::allocate(&map)
    }

    #[test]
    fn test_longest_phrase_first() {
        let table = aliases(&[("John", "PERSON"), ("John Smith", "PERSON")]);
        let result = replace_entities("John Smith called John", &table, &PatternCache::new());
        assert_eq!(result, "PERSON_2 called PERSON_1");
        assert!(!result.contains("Smith"));
    }

    #[test]
    fn test_possessive() {
        let table = aliases(&[("Johnson", "PERSON")]);
        assert_eq!(
            replace_entities("Johnson's cat", &table, &PatternCache::new()),
            "PERSON_1's cat"
        );
    }

    #[test]
    fn test_all_occurrences_any_case() {
        let table = aliases(&[("Tunisia", "LOCATION"), ("Acme", "ORGANIZATION")]);
        assert_eq!(
            replace_entities(
                "Acme left Tunisia.\nTUNISIA missed acme, and Tunisia's sun.",
                &table,
                &PatternCache::new()
            ),
            "ORGANIZATION_1 left LOCATION_1.\nLOCATION_1 missed ORGANIZATION_1, and LOCATION_1's sun."
        );
    }

    #[test]
    fn test_allow_listed_non_ascii_phrase_replaced() {
        let filter = EntityFilter {
            allow: vec![("İstanbul".to_string(), "LOCATION".to_string())],
            ..EntityFilter::default()
        };
        let table = AliasTable::allocate(&filter.apply(EntityMap::new()));
        assert_eq!(
            replace_entities("She flew to İstanbul today", &table, &PatternCache::new()),
            "She flew to LOCATION_1 today"
        );
    }

    #[test]
    fn test_single_character_phrases_skipped() {
        let table = aliases(&[("X", "PERSON")]);
        assert_eq!(replace_entities("X marks", &table, &PatternCache::new()), "X marks");
    }

    #[test]
    fn test_no_entities_is_noop() {
        let table = AliasTable::default();
        assert_eq!(replace_entities("Hello world", &table, &PatternCache::new()), "Hello world");
    }
}
