//! Pronoun and title substitution
//!
//! All entries of the category table are matched in one scan, so a token
//! written by one entry (e.g. `MR/MS`) is never rewritten by another entry
//! (`ms`). At each position entries are tried in table order.

use super::patterns::{boundary_safe, replace_matches, replace_phrase, PatternCache};
use crate::vocab::CategoryTable;
use fancy_regex::Regex;

/// Compiled matcher for a category table
#[derive(Debug)]
pub struct CategoryMatcher {
    table: CategoryTable,
    pattern: Option<Regex>,
}

impl CategoryMatcher {
    pub fn new(table: &CategoryTable) -> Self {
        let pattern = if table.is_empty() {
            None
        } else {
            let alternation = table
                .entries()
                .iter()
                .map(|(word, _)| fancy_regex::escape(word).into_owned())
                .collect::<Vec<_>>()
                .join("|");

            match Regex::new(&boundary_safe(&alternation)) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!("Could not compile category pattern ({}); matching entries one by one", e);
                    None
                }
            }
        };

        Self {
            table: table.clone(),
            pattern,
        }
    }

    /// Matcher that skips the combined scan and goes entry by entry
    #[cfg(test)]
    fn entry_by_entry(table: &CategoryTable) -> Self {
        Self {
            table: table.clone(),
            pattern: None,
        }
    }

    /// Replace every vocabulary word with its category token
    pub fn apply(&self, text: &str, cache: &PatternCache) -> String {
        if let Some(re) = &self.pattern {
            let replaced = replace_matches(re, text, |m| match self.table.get(m.as_str()) {
                Some(category) => category.token().to_string(),
                None => m.as_str().to_string(),
            });
            match replaced {
                Ok(result) => return result,
                Err(e) => tracing::warn!("Category scan failed ({}); matching entries one by one", e),
            }
        }

        let mut result = text.to_string();
        for (word, category) in self.table.entries() {
            result = replace_phrase(cache, &result, word, category.token());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Category;

    fn apply(text: &str) -> String {
        CategoryMatcher::new(&CategoryTable::english()).apply(text, &PatternCache::new())
    }

    #[test]
    fn test_pronouns_collapse() {
        assert_eq!(
            apply("He told her that he was late"),
            "PRONOUN told PRONOUN that PRONOUN was late"
        );
    }

    #[test]
    fn test_longer_pronouns() {
        assert_eq!(
            apply("She hurt herself; the book is hers, not his."),
            "PRONOUN hurt PRONOUN; the book is PRONOUN, not PRONOUN."
        );
    }

    #[test]
    fn test_titles_keep_period() {
        assert_eq!(
            apply("Mr. PERSON_1 met Dr. PERSON_2 and Mrs PERSON_3"),
            "MR/MS. PERSON_1 met TITLE. PERSON_2 and MR/MS PERSON_3"
        );
    }

    #[test]
    fn test_category_tokens_not_rescanned() {
        assert_eq!(apply("Ms PERSON_1 and Miss PERSON_2"), "MR/MS PERSON_1 and MR/MS PERSON_2");
    }

    #[test]
    fn test_not_inside_words() {
        assert_eq!(
            apply("There is helium in the shell; the theme is heroic"),
            "There is helium in the shell; the theme is heroic"
        );
    }

    #[test]
    fn test_entry_by_entry_fallback() {
        let table = CategoryTable::english();
        let matcher = CategoryMatcher::entry_by_entry(&table);
        let cache = PatternCache::new();

        assert_eq!(
            matcher.apply("He met Dr. PERSON_1 and her", &cache),
            "PRONOUN met TITLE. PERSON_1 and PRONOUN"
        );
        assert_eq!(cache.len(), table.len());
    }

    #[test]
    fn test_entry_fallback_is_literal_when_pattern_failed() {
        let matcher = CategoryMatcher::entry_by_entry(&CategoryTable::new([("he", Category::Pronoun)]));
        let cache = PatternCache::new();
        cache.mark_failed("he");

        assert_eq!(matcher.apply("He met the crew", &cache), "He met tPRONOUN crew");
    }

    #[test]
    fn test_empty_table_is_noop() {
        let matcher = CategoryMatcher::new(&CategoryTable::new(Vec::<(&str, Category)>::new()));
        assert_eq!(matcher.apply("He left", &PatternCache::new()), "He left");
    }

    #[test]
    fn test_custom_table() {
        let table = CategoryTable::new([("hij", Category::Pronoun), ("zij", Category::Pronoun)]);
        let matcher = CategoryMatcher::new(&table);
        assert_eq!(matcher.apply("Hij zei dat zij kwam", &PatternCache::new()), "PRONOUN zei dat PRONOUN kwam");
    }
}
