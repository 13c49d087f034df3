//! Classifier trait for a unified interface across inference runtimes

use super::{ClassifyError, Prediction};

/// Trait for token-classification backends
///
/// Implementations are shared between worker threads, so they must either
/// support concurrent calls or serialize them internally.
pub trait Classifier: Send + Sync {
    /// Label every sub-token fragment of `text`, in document order
    fn classify(&self, text: &str) -> Result<Vec<Prediction>, ClassifyError>;

    /// Get the backend name for logging
    fn name(&self) -> &'static str;
}
