//! Process-wide vocabularies
//!
//! The month and written-number word lists and the pronoun/title category
//! table are loaded once at startup and shared read-only by every document.
//! A vocabulary can be registered explicitly (e.g. after loading the files
//! named in the config); otherwise the built-in English lists are used.

mod categories;
mod wordlists;

pub use categories::{Category, CategoryTable};
pub use wordlists::WordLists;

use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Global vocabulary storage - set once, then only read
static GLOBAL_VOCABULARY: OnceCell<Arc<Vocabulary>> = OnceCell::new();

/// Immutable word lists and category table used by the substitution passes
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub words: WordLists,
    pub categories: CategoryTable,
}

impl Vocabulary {
    pub fn new(words: WordLists, categories: CategoryTable) -> Self {
        Self { words, categories }
    }

    /// Built-in English months, written numbers, pronouns and titles
    pub fn english() -> Self {
        Self::new(WordLists::english(), CategoryTable::english())
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::english()
    }
}

/// Register the process-wide vocabulary
///
/// Only the first registration takes effect; later calls return the
/// vocabulary that is already in place.
pub fn register_vocabulary(vocabulary: Vocabulary) -> Arc<Vocabulary> {
    let mut registered = false;
    let global = GLOBAL_VOCABULARY.get_or_init(|| {
        registered = true;
        Arc::new(vocabulary)
    });
    if registered {
        tracing::debug!(
            "Global vocabulary registered ({} months, {} written numbers, {} categories)",
            global.words.months().len(),
            global.words.written_numbers().len(),
            global.categories.len()
        );
    } else {
        tracing::debug!("Global vocabulary already registered, keeping existing lists");
    }
    Arc::clone(global)
}

/// Get the process-wide vocabulary, registering the English defaults if
/// nothing was registered yet
pub fn vocabulary() -> Arc<Vocabulary> {
    Arc::clone(GLOBAL_VOCABULARY.get_or_init(|| Arc::new(Vocabulary::english())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_vocabulary_is_shared() {
        let first = vocabulary();
        let second = register_vocabulary(Vocabulary::new(
            WordLists::new(vec!["mars".to_string()], vec![]),
            CategoryTable::english(),
        ));
        // Whatever got registered first wins, and everyone sees the same lists
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &vocabulary()));
    }
}
