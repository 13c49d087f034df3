//! Pronoun and honorific-title categories
//!
//! Every word in a category is replaced by the same literal token, with no
//! per-word numbering.

/// Category a fixed vocabulary word collapses onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Pronoun,
    MrMs,
    Title,
}

impl Category {
    /// Literal token written in place of any word of this category
    pub fn token(&self) -> &'static str {
        match self {
            Self::Pronoun => "PRONOUN",
            Self::MrMs => "MR/MS",
            Self::Title => "TITLE",
        }
    }
}

/// Ordered word → category table
///
/// Order matters for matching: earlier entries are tried first at each
/// position, so a bare "dr" leaves the period of "Dr." in place.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    entries: Vec<(String, Category)>,
}

impl CategoryTable {
    /// Build from `(word, category)` pairs; words are stored lowercase and
    /// later duplicates are ignored.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Category)>,
        S: AsRef<str>,
    {
        let mut table: Vec<(String, Category)> = Vec::new();
        for (word, category) in entries {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || table.iter().any(|(w, _)| *w == word) {
                continue;
            }
            table.push((word, category));
        }
        Self { entries: table }
    }

    /// English pronouns, forms of address and titles
    pub fn english() -> Self {
        use Category::*;
        Self::new([
            ("he", Pronoun),
            ("she", Pronoun),
            ("him", Pronoun),
            ("his", Pronoun),
            ("her", Pronoun),
            ("hers", Pronoun),
            ("himself", Pronoun),
            ("herself", Pronoun),
            ("mr", MrMs),
            ("mrs", MrMs),
            ("mr.", MrMs),
            ("mrs.", MrMs),
            ("miss", MrMs),
            ("ms", MrMs),
            ("dr", Title),
            ("dr.", Title),
            ("prof", Title),
            ("prof.", Title),
            ("sir", Title),
            ("dame", Title),
            ("madam", Title),
            ("lady", Title),
            ("lord", Title),
        ])
    }

    /// Case-insensitive lookup
    pub fn get(&self, word: &str) -> Option<Category> {
        let lower = word.to_lowercase();
        self.entries
            .iter()
            .find(|(w, _)| *w == lower)
            .map(|(_, c)| *c)
    }

    pub fn entries(&self) -> &[(String, Category)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        assert_eq!(Category::Pronoun.token(), "PRONOUN");
        assert_eq!(Category::MrMs.token(), "MR/MS");
        assert_eq!(Category::Title.token(), "TITLE");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = CategoryTable::english();
        assert_eq!(table.get("She"), Some(Category::Pronoun));
        assert_eq!(table.get("MRS."), Some(Category::MrMs));
        assert_eq!(table.get("Prof"), Some(Category::Title));
        assert_eq!(table.get("they"), None);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let table = CategoryTable::new([
            ("Sir", Category::Title),
            ("sir", Category::MrMs),
            ("  ", Category::Pronoun),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("sir"), Some(Category::Title));
    }
}
