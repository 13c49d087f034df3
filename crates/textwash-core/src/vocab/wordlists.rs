//! Month and written-number vocabularies
//!
//! Loaded from plain text files with one entry per line. Membership checks
//! are case-insensitive.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

const ENGLISH_MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const ENGLISH_WRITTEN_NUMBERS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen",
    "seventeen", "eighteen", "nineteen",
    "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion",
];

/// Ordered month and written-number lists with lowercase lookup sets
#[derive(Debug, Clone, Default)]
pub struct WordLists {
    months: Vec<String>,
    written_numbers: Vec<String>,
    month_set: HashSet<String>,
    number_set: HashSet<String>,
}

impl WordLists {
    /// Build from already-loaded lists. Entries are trimmed; blank entries
    /// are dropped.
    pub fn new(months: Vec<String>, written_numbers: Vec<String>) -> Self {
        let months = clean_entries(months);
        let written_numbers = clean_entries(written_numbers);
        let month_set = months.iter().map(|m| m.to_lowercase()).collect();
        let number_set = written_numbers.iter().map(|w| w.to_lowercase()).collect();

        Self {
            months,
            written_numbers,
            month_set,
            number_set,
        }
    }

    /// Load both lists from files, one entry per line
    pub fn load_from_files<P: AsRef<Path>, Q: AsRef<Path>>(months: P, written_numbers: Q) -> Result<Self> {
        let months = read_lines(months.as_ref())?;
        let written_numbers = read_lines(written_numbers.as_ref())?;
        Ok(Self::new(months, written_numbers))
    }

    /// Built-in English lists
    pub fn english() -> Self {
        Self::new(
            ENGLISH_MONTHS.iter().map(|s| s.to_string()).collect(),
            ENGLISH_WRITTEN_NUMBERS.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn months(&self) -> &[String] {
        &self.months
    }

    pub fn written_numbers(&self) -> &[String] {
        &self.written_numbers
    }

    pub fn is_month(&self, word: &str) -> bool {
        self.month_set.contains(&word.to_lowercase())
    }

    pub fn is_written_number(&self, word: &str) -> bool {
        self.number_set.contains(&word.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty() && self.written_numbers.is_empty()
    }
}

fn clean_entries(entries: Vec<String>) -> Vec<String> {
    entries
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read vocabulary from {:?}", path))?;
    Ok(contents.lines().map(str::to_string).collect())
}
