//! Digit-numeric substitution
//!
//! Every distinct digit token gets `NUMERIC_n` in order of first
//! appearance: 25, 3.14, 1,000, 1.000, 1,000.50, 1.000,50.

use super::patterns::replace_matches;
use fancy_regex::Regex;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?<!\w)\d+(?:[.,]\d+)*(?!\w)").expect("valid numeric pattern"));

/// Replace digit tokens with `NUMERIC_1`, `NUMERIC_2`, ...
///
/// Numbering is local to this pass. Alias digits such as the `1` in
/// `PERSON_1` are never touched since they follow a word character.
pub fn replace_numerics(text: &str) -> String {
    let mut numbering: HashMap<String, String> = HashMap::new();

    let result = replace_matches(&NUMERIC_TOKEN, text, |m| {
        let next = numbering.len() + 1;
        numbering
            .entry(m.as_str().to_string())
            .or_insert_with(|| format!("NUMERIC_{}", next))
            .clone()
    });

    match result {
        Ok(result) => {
            if !numbering.is_empty() {
                tracing::debug!("Replaced {} distinct numeric tokens", numbering.len());
            }
            result
        }
        Err(e) => {
            tracing::warn!("Numeric substitution skipped: {}", e);
            text.to_string()
        }
    }
}
