//! Entity labels known to the classifier
//!
//! Used to validate the caller's label filter before any document is
//! processed.

use crate::error::AnonymizeError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Labels produced by the substitution passes rather than the classifier
const PASS_LABELS: &[&str] = &["NUMERIC", "PRONOUN"];

/// Classifier labels that never name an entity
const HIDDEN_LABELS: &[&str] = &["NONE", "PAD"];

/// The part of a model's `config.json` we care about
#[derive(Debug, Deserialize)]
struct ModelConfig {
    id2label: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: BTreeSet<String>,
}

impl LabelSet {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Read the `id2label` table from `<model_dir>/config.json`
    pub fn load_from_model_dir(model_dir: &Path) -> Result<Self> {
        let path = model_dir.join("config.json");
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read model config from {:?}", path))?;
        let config: ModelConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse id2label from {:?}", path))?;

        let labels = Self::new(config.id2label.into_values());
        tracing::debug!("Loaded {} classifier labels from {:?}", labels.labels.len(), path);
        Ok(labels)
    }

    /// Labels a caller may filter on, sorted
    pub fn available(&self) -> Vec<String> {
        let mut available: BTreeSet<String> = self.labels.clone();
        available.extend(PASS_LABELS.iter().map(|l| l.to_string()));
        for hidden in HIDDEN_LABELS {
            available.remove(*hidden);
        }
        available.into_iter().collect()
    }

    /// Whether `label` may be used in a label filter
    pub fn contains(&self, label: &str) -> bool {
        !HIDDEN_LABELS.contains(&label) && (self.labels.contains(label) || PASS_LABELS.contains(&label))
    }

    /// Check every requested label, returning the cleaned set.
    ///
    /// Fails on the first unknown label, listing the valid ones.
    pub fn validate<S: AsRef<str>>(&self, requested: &[S]) -> Result<BTreeSet<String>, AnonymizeError> {
        let mut selected = BTreeSet::new();

        for label in requested {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            if !self.contains(label) {
                return Err(AnonymizeError::invalid_filter(label, self.available()));
            }
            selected.insert(label.to_string());
        }

        Ok(selected)
    }

    /// Split a comma-separated label list
    pub fn parse_list(list: &str) -> Vec<String> {
        list.split(',')
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> LabelSet {
        LabelSet::new(["NONE", "PAD", "PERSON_FIRSTNAME", "LOCATION", "ORGANIZATION"])
    }

    #[test]
    fn test_available_adds_pass_labels_and_hides_none() {
        assert_eq!(
            labels().available(),
            vec!["LOCATION", "NUMERIC", "ORGANIZATION", "PERSON_FIRSTNAME", "PRONOUN"]
        );
    }

    #[test]
    fn test_validate_accepts_known_labels() {
        let selected = labels().validate(&[" LOCATION", "PRONOUN", ""]).unwrap();
        assert_eq!(selected.len(), 2);
        assert!(selected.contains("LOCATION"));
    }

    #[test]
    fn test_validate_rejects_unknown_and_hidden() {
        let err = labels().validate(&["LOCATION", "PLANET"]).unwrap_err();
        match err {
            AnonymizeError::InvalidEntityFilter { label, available } => {
                assert_eq!(label, "PLANET");
                assert!(available.contains(&"LOCATION".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(labels().validate(&["NONE"]).is_err());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            LabelSet::parse_list("LOCATION, PERSON_FIRSTNAME,,"),
            vec!["LOCATION", "PERSON_FIRSTNAME"]
        );
    }

    #[test]
    fn test_load_from_model_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"architectures": ["RobertaForTokenClassification"],
                "id2label": {"0": "NONE", "1": "LOCATION", "2": "PAD"}}"#,
        )
        .unwrap();

        let labels = LabelSet::load_from_model_dir(dir.path()).unwrap();
        assert!(labels.contains("LOCATION"));
        assert!(labels.contains("NUMERIC"));
        assert!(!labels.contains("NONE"));
        assert!(!labels.contains("PAD"));
        assert_eq!(labels.available(), vec!["LOCATION", "NUMERIC", "PRONOUN"]);
    }
}
