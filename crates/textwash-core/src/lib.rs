//! Textwash Core - text anonymization pipeline
//!
//! This library provides the core functionality for:
//! - Reconstructing whole words from token-classifier predictions
//! - Canonicalizing detected entities and allocating per-document aliases
//! - Substituting entities, URLs, numbers, months, pronouns and titles
//! - Whitespace normalization of the anonymized output

pub mod classify;
pub mod config;
pub mod entities;
pub mod error;
pub mod scrub;
pub mod spans;
pub mod vocab;

mod pipeline;

pub use classify::{Classifier, LabelSet, PrecomputedClassifier, Prediction};
pub use config::{AllowEntry, Config, ConfigError, Language};
pub use entities::{AliasTable, EntityFilter, EntityMap};
pub use error::{AnonymizeError, Result};
pub use pipeline::{AnonymizeResult, Anonymizer, DocumentOutcome, Timings};
pub use spans::{ModelFamily, Span};

use once_cell::sync::OnceCell;

/// Scrubber shared by every [`anonymize`] call, built on first use
static DEFAULT_SCRUBBER: OnceCell<scrub::Scrubber> = OnceCell::new();

fn default_scrubber() -> &'static scrub::Scrubber {
    DEFAULT_SCRUBBER.get_or_init(|| scrub::Scrubber::new(vocab::vocabulary()))
}

/// Anonymize text from classifier predictions already computed for it
///
/// Uses the process-wide vocabulary and no entity filter. This is the
/// shortest path through the library.
pub fn anonymize(text: &str, predictions: &[Prediction], family: ModelFamily) -> String {
    let scrubber = default_scrubber();
    let entities = entities::canonicalize(&spans::reconstruct_spans(predictions, family));
    let aliases = AliasTable::allocate(&entities);
    scrub::normalize_whitespace(&scrubber.scrub(text, &aliases))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pred(word: &str, start: usize, entity: &str) -> Prediction {
        Prediction {
            word: word.to_string(),
            start,
            end: start + word.trim_start_matches("##").len(),
            entity: entity.to_string(),
        }
    }

    #[test]
    fn test_anonymize_wordpiece() {
        let predictions = vec![
            pred("Jan", 0, "PERSON_FIRSTNAME"),
            pred("##sen", 3, "NONE"),
            pred("belde", 7, "NONE"),
        ];
        assert_eq!(
            anonymize("Jansen belde  op 4 mei", &predictions, ModelFamily::WordPiece),
            "PERSON_FIRSTNAME_1 belde op NUMERIC_1 mei"
        );
    }

    #[test]
    fn test_anonymize_reuses_compiled_patterns() {
        let predictions = vec![pred("Bakker", 0, "PERSON_LASTNAME")];
        let first = anonymize("Bakker belde", &predictions, ModelFamily::ByteLevelBpe);
        let cached = default_scrubber().pattern_cache().get("bakker").unwrap();
        let second = anonymize("Bakker belde", &predictions, ModelFamily::ByteLevelBpe);

        assert_eq!(first, "PERSON_LASTNAME_1 belde");
        assert_eq!(first, second);
        assert!(std::ptr::eq(default_scrubber(), default_scrubber()));
        assert!(std::sync::Arc::ptr_eq(
            &cached,
            &default_scrubber().pattern_cache().get("BAKKER").unwrap()
        ));
    }
}
