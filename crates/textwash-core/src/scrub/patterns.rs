//! Boundary-safe phrase matching
//!
//! A boundary-safe match is never directly preceded or followed by a word
//! character, so "Johnson" matches in "Johnson's" and "(Johnson)" but not in
//! "Johnsonville". The surrounding punctuation and line breaks are left
//! untouched. All matching is case-insensitive.

use crate::error::AnonymizeError;
use fancy_regex::{Match, Regex};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Wrap an already-escaped expression in word-boundary lookarounds
pub(crate) fn boundary_safe(expr: &str) -> String {
    format!(r"(?i)(?<!\w)(?:{})(?!\w)", expr)
}

/// Compile the boundary-safe pattern for a literal phrase
pub fn compile_phrase(phrase: &str) -> Result<Regex, AnonymizeError> {
    Regex::new(&boundary_safe(&fancy_regex::escape(phrase)))
        .map_err(|e| AnonymizeError::pattern_compilation(phrase, e))
}

/// Lazily-built cache of compiled phrase patterns
///
/// Keyed by the lowercased phrase. Shared by every document processed by
/// the same anonymizer. Phrases whose pattern failed to compile are cached
/// as `None` so the failure is only logged once.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: RwLock<HashMap<String, Option<Arc<Regex>>>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or build) the pattern for `phrase`
    pub fn get(&self, phrase: &str) -> Option<Arc<Regex>> {
        let key = phrase.to_lowercase();

        if let Ok(patterns) = self.patterns.read() {
            if let Some(entry) = patterns.get(&key) {
                return entry.clone();
            }
        }

        // Compile from the phrase itself: lowercasing can change code points
        // ("İ" becomes "i" + U+0307) and the pattern would no longer match
        let compiled = match compile_phrase(phrase) {
            Ok(re) => Some(Arc::new(re)),
            Err(e) => {
                tracing::warn!("{}; using literal replacement", e);
                None
            }
        };

        if let Ok(mut patterns) = self.patterns.write() {
            patterns.insert(key, compiled.clone());
        }
        compiled
    }

    /// Record `phrase` as having no usable pattern
    #[cfg(test)]
    pub(crate) fn mark_failed(&self, phrase: &str) {
        if let Ok(mut patterns) = self.patterns.write() {
            patterns.insert(phrase.to_lowercase(), None);
        }
    }

    /// Number of cached phrases
    pub fn len(&self) -> usize {
        self.patterns.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Replace every match of `re`, building each replacement from the match
pub(crate) fn replace_matches<F>(re: &Regex, text: &str, mut replacement: F) -> Result<String, fancy_regex::Error>
where
    F: FnMut(&Match<'_>) -> String,
{
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for m in re.find_iter(text) {
        let m = m?;
        result.push_str(&text[last_end..m.start()]);
        result.push_str(&replacement(&m));
        last_end = m.end();
    }

    result.push_str(&text[last_end..]);
    Ok(result)
}

/// Replace every boundary-safe, case-insensitive occurrence of `phrase`.
///
/// Falls back to a plain literal replacement for this phrase alone when
/// no pattern can be built or matching fails.
pub fn replace_phrase(cache: &PatternCache, text: &str, phrase: &str, replacement: &str) -> String {
    if let Some(re) = cache.get(phrase) {
        match replace_matches(&re, text, |_| replacement.to_string()) {
            Ok(result) => return result,
            Err(e) => {
                tracing::warn!(
                    "{}; using literal replacement",
                    AnonymizeError::pattern_compilation(phrase, e)
                );
            }
        }
    }

    text.replace(phrase, replacement)
}
