//! Classifier backed by predictions computed ahead of time
//!
//! The model runs in a separate process and writes one JSON array of
//! `{word, start, end, entity}` objects per document. This backend serves
//! those predictions back, keyed by the exact document text.

use super::{Classifier, ClassifyError, Prediction};
use std::collections::HashMap;
use std::path::Path;

/// Characters of a document shown in error messages
const PREVIEW_CHARS: usize = 40;

#[derive(Debug, Clone, Default)]
pub struct PrecomputedClassifier {
    by_text: HashMap<String, Vec<Prediction>>,
}

impl PrecomputedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the predictions for one document
    pub fn insert(&mut self, text: impl Into<String>, predictions: Vec<Prediction>) {
        self.by_text.insert(text.into(), predictions);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, text: impl Into<String>, predictions: Vec<Prediction>) -> Self {
        self.insert(text, predictions);
        self
    }

    /// Read a predictions file (a JSON array of fragments)
    pub fn read_predictions(path: &Path) -> Result<Vec<Prediction>, ClassifyError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ClassifyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ClassifyError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.by_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_text.is_empty()
    }
}

impl Classifier for PrecomputedClassifier {
    fn classify(&self, text: &str) -> Result<Vec<Prediction>, ClassifyError> {
        self.by_text
            .get(text)
            .cloned()
            .ok_or_else(|| ClassifyError::MissingPredictions {
                preview: text.chars().take(PREVIEW_CHARS).collect(),
            })
    }

    fn name(&self) -> &'static str {
        "precomputed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serves_registered_predictions() {
        let preds = vec![Prediction {
            word: "Alice".to_string(),
            start: 0,
            end: 5,
            entity: "PERSON_FIRSTNAME".to_string(),
        }];
        let classifier = PrecomputedClassifier::new().with("Alice left", preds.clone());

        assert_eq!(classifier.classify("Alice left").unwrap(), preds);
        assert_eq!(classifier.len(), 1);
    }

    #[test]
    fn test_unknown_document() {
        let classifier = PrecomputedClassifier::new();
        let err = classifier.classify("Some document nobody classified").unwrap_err();
        assert!(matches!(err, ClassifyError::MissingPredictions { .. }));
    }

    #[test]
    fn test_read_pipeline_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        // Extra fields from the inference pipeline are ignored
        std::fs::write(
            &path,
            r#"[{"entity": "LOCATION", "score": 0.98, "index": 4, "word": "ĠParis", "start": 10, "end": 15}]"#,
        )
        .unwrap();

        let preds = PrecomputedClassifier::read_predictions(&path).unwrap();
        assert_eq!(preds.len(), 1);
        assert_eq!(preds[0].word, "ĠParis");
        assert_eq!(preds[0].entity, "LOCATION");
    }

    #[test]
    fn test_read_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = PrecomputedClassifier::read_predictions(&path).unwrap_err();
        assert!(matches!(err, ClassifyError::Parse { .. }));
    }
}
