//! Substitution passes
//!
//! A document is rewritten by five passes, each reading the previous one's
//! output:
//! 1. URL masking - "https://..." → `URL`
//! 2. Entity substitution - detected phrases → `{LABEL}_{n}`
//! 3. Digit numbers - "1,000" → `NUMERIC_n`
//! 4. Pronouns and titles - "she", "Dr" → `PRONOUN`, `TITLE`, ...
//! 5. Written numbers and months - "nineteen", "January" → `NUMERIC_n`, `DATE_n`
//!
//! Whitespace normalization runs last, outside the passes.

mod aliases;
mod numerics;
mod patterns;
mod pronouns;
mod urls;
mod whitespace;
mod words;

pub use aliases::replace_entities;
pub use numerics::replace_numerics;
pub use patterns::{compile_phrase, replace_phrase, PatternCache};
pub use pronouns::CategoryMatcher;
pub use urls::{mask_urls, URL_TOKEN};
pub use whitespace::normalize_whitespace;
pub use words::replace_numbers_and_months;

use crate::entities::AliasTable;
use crate::vocab::Vocabulary;
use std::sync::Arc;

/// Runs the substitution passes against shared, read-only vocabularies
///
/// One scrubber serves any number of documents, concurrently if needed:
/// all per-document state is passed in or created inside [`scrub`](Self::scrub).
#[derive(Debug)]
pub struct Scrubber {
    vocabulary: Arc<Vocabulary>,
    categories: CategoryMatcher,
    cache: PatternCache,
}

impl Scrubber {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        let categories = CategoryMatcher::new(&vocabulary.categories);
        Self {
            vocabulary,
            categories,
            cache: PatternCache::new(),
        }
    }

    /// Compiled phrase patterns shared across documents
    pub fn pattern_cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Apply all five passes to `text`
    pub fn scrub(&self, text: &str, aliases: &AliasTable) -> String {
        let masked = mask_urls(text);
        tracing::debug!("After URL masking: {}", masked);

        // Entity substitution reads the masked text so URLs stay hidden
        let result = replace_entities(&masked, aliases, &self.cache);
        tracing::debug!("After entity substitution ({} aliases): {}", aliases.len(), result);

        let result = replace_numerics(&result);
        tracing::debug!("After numeric substitution: {}", result);

        let result = self.categories.apply(&result, &self.cache);
        tracing::debug!("After pronoun/title substitution: {}", result);

        let result = replace_numbers_and_months(&result, &self.vocabulary.words, &self.cache);
        tracing::debug!("After written-number/month substitution: {}", result);

        result
    }
}
