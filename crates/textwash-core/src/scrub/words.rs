//! Written-number and month substitution
//!
//! Word-like tokens are looked up in the written-number list first, then the
//! month list. Matches get `NUMERIC_n` / `DATE_n` in order of first
//! appearance. These counters are independent of the digit-numeric pass, so
//! `NUMERIC_1` can name both "25" and "nineteen" in the same document.

use super::patterns::{replace_phrase, PatternCache};
use crate::vocab::WordLists;
use fancy_regex::Regex;
use once_cell::sync::Lazy;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Letters optionally joined by internal apostrophes or hyphens:
/// "January", "twenty-five", "O'Neil"
static WORD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?<!\w)[A-Za-z]+(?:['’\-][A-Za-z]+)*(?!\w)").expect("valid word pattern"));

/// Replace written numbers and month names with numbered aliases
pub fn replace_numbers_and_months(text: &str, words: &WordLists, cache: &PatternCache) -> String {
    if words.is_empty() {
        return text.to_string();
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut mapping: Vec<(String, String)> = Vec::new();
    let mut numeric = 1;
    let mut date = 1;

    for m in WORD_TOKEN.find_iter(text) {
        let m = match m {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("Written-number/month substitution skipped: {}", e);
                return text.to_string();
            }
        };

        let key = m.as_str().to_lowercase();
        if seen.contains(&key) {
            continue;
        }

        let alias = if words.is_written_number(&key) {
            numeric += 1;
            format!("NUMERIC_{}", numeric - 1)
        } else if words.is_month(&key) {
            date += 1;
            format!("DATE_{}", date - 1)
        } else {
            continue;
        };

        seen.insert(key);
        mapping.push((m.as_str().to_string(), alias));
    }

    if mapping.is_empty() {
        return text.to_string();
    }
    tracing::debug!("Replacing {} written numbers/months", mapping.len());

    // Stable: equal lengths keep first-appearance order
    mapping.sort_by_key(|(phrase, _)| Reverse(phrase.chars().count()));

    let mut result = text.to_string();
    for (phrase, alias) in &mapping {
        result = replace_phrase(cache, &result, phrase, alias);
    }
    result
}
