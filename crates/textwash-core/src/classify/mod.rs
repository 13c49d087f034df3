//! Token-classifier boundary
//!
//! The classification model itself runs outside this crate. The pipeline
//! only sees its output: an ordered list of labeled sub-token fragments.

mod backend;
mod labels;
mod precomputed;

pub use backend::Classifier;
pub use labels::LabelSet;
pub use precomputed::PrecomputedClassifier;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Label the classifier uses for "not an entity"
pub const NON_ENTITY_LABEL: &str = "NONE";

/// One labeled fragment, as emitted by a token-classification pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Fragment text, including any tokenizer continuation marker
    pub word: String,
    pub start: usize,
    pub end: usize,
    /// Predicted label (`NONE` for non-entities)
    pub entity: String,
}

/// Classifier failures, scoped to a single document
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("No predictions available for document starting with {preview:?}")]
    MissingPredictions { preview: String },

    #[error("Failed to read predictions from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse predictions from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Classifier backend failed: {0}")]
    Backend(String),
}
