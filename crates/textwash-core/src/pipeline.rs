//! Main processing pipeline: Classifier output → Entities → Aliases → Substitution → Normalization

use crate::{
    classify::{Classifier, LabelSet, Prediction},
    config::Config,
    entities::{canonicalize, AliasTable, EntityFilter, EntityMap},
    error::Result,
    scrub::{normalize_whitespace, Scrubber},
    spans::{reconstruct_spans, ModelFamily},
    vocab::{self, Vocabulary},
};
use std::sync::Arc;
use std::time::Instant;

/// Result from anonymizing one document
#[derive(Debug, Clone)]
pub struct AnonymizeResult {
    /// The untouched input
    pub original: String,
    /// Anonymized, whitespace-normalized output
    pub anonymized: String,
    /// Entities that were substituted, in first-seen order
    pub entities: EntityMap,
    /// Alias assigned to each entity
    pub aliases: AliasTable,
    /// Processing timings
    pub timings: Timings,
}

/// Processing time breakdown
#[derive(Debug, Clone, Default)]
pub struct Timings {
    pub classify_ms: u64,
    pub substitute_ms: u64,
    pub total_ms: u64,
}

/// Outcome of one document in a batch
#[derive(Debug)]
pub struct DocumentOutcome {
    /// Caller-chosen document id (usually the file stem)
    pub id: String,
    pub result: Result<AnonymizeResult>,
}

/// The anonymization pipeline
///
/// Holds only process-wide, read-only state (classifier, vocabularies,
/// compiled patterns), so one instance can be shared between workers.
pub struct Anonymizer {
    classifier: Arc<dyn Classifier>,
    family: ModelFamily,
    scrubber: Scrubber,
    labels: Option<LabelSet>,
}

impl Anonymizer {
    /// Create an anonymizer for classifier output of the given family
    pub fn new(classifier: Arc<dyn Classifier>, family: ModelFamily, vocabulary: Arc<Vocabulary>) -> Self {
        tracing::info!("Initializing anonymizer");
        tracing::info!("  Classifier: {} ({:?})", classifier.name(), family);
        tracing::info!(
            "  Vocabulary: {} months, {} written numbers, {} pronouns/titles",
            vocabulary.words.months().len(),
            vocabulary.words.written_numbers().len(),
            vocabulary.categories.len()
        );

        Self {
            classifier,
            family,
            scrubber: Scrubber::new(vocabulary),
            labels: None,
        }
    }

    /// Create an anonymizer from configuration, registering the configured
    /// vocabulary as the process-wide one
    pub fn from_config(config: &Config, classifier: Arc<dyn Classifier>) -> anyhow::Result<Self> {
        let vocabulary = vocab::register_vocabulary(config.load_vocabulary()?);
        Ok(Self::new(classifier, config.language.model_family(), vocabulary))
    }

    /// Attach the classifier's label set, enabling filter validation
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Check the filter's labels against the classifier's label set.
    ///
    /// A no-op when no label set is attached.
    pub fn validate_filter(&self, filter: &EntityFilter) -> Result<()> {
        if let (Some(labels), Some(allowed)) = (&self.labels, &filter.allowed_labels) {
            let requested: Vec<&str> = allowed.iter().map(String::as_str).collect();
            labels.validate(&requested)?;
        }
        Ok(())
    }

    /// Run the classifier and canonicalize its output
    pub fn identify(&self, text: &str) -> Result<EntityMap> {
        let predictions = self.classifier.classify(text)?;
        Ok(self.entities_from_predictions(&predictions))
    }

    fn entities_from_predictions(&self, predictions: &[Prediction]) -> EntityMap {
        let spans = reconstruct_spans(predictions, self.family);
        let entities = canonicalize(&spans);
        tracing::debug!(
            "{} predictions → {} spans → {} entities",
            predictions.len(),
            spans.len(),
            entities.len()
        );
        entities
    }

    /// Anonymize one document
    pub fn anonymize(&self, text: &str, filter: &EntityFilter) -> Result<AnonymizeResult> {
        let start = Instant::now();

        let entities = self.identify(text)?;
        let classify_ms = start.elapsed().as_millis() as u64;

        let mut result = self.substitute(text, entities, filter);
        result.timings.classify_ms = classify_ms;
        result.timings.total_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Anonymized document in {}ms (classify: {}ms, substitute: {}ms, {} entities)",
            result.timings.total_ms,
            classify_ms,
            result.timings.substitute_ms,
            result.entities.len()
        );
        Ok(result)
    }

    /// Anonymize one document from predictions already computed for it
    pub fn anonymize_predicted(&self, text: &str, predictions: &[Prediction], filter: &EntityFilter) -> AnonymizeResult {
        self.substitute(text, self.entities_from_predictions(predictions), filter)
    }

    fn substitute(&self, text: &str, entities: EntityMap, filter: &EntityFilter) -> AnonymizeResult {
        let start = Instant::now();

        let entities = filter.apply(entities);
        let aliases = AliasTable::allocate(&entities);

        let scrubbed = self.scrubber.scrub(text, &aliases);
        let anonymized = normalize_whitespace(&scrubbed);
        let substitute_ms = start.elapsed().as_millis() as u64;

        AnonymizeResult {
            original: text.to_string(),
            anonymized,
            entities,
            aliases,
            timings: Timings {
                classify_ms: 0,
                substitute_ms,
                total_ms: substitute_ms,
            },
        }
    }

    /// Anonymize a batch of `(id, text)` documents.
    ///
    /// The filter is validated once up front; a failure there aborts the
    /// batch. After that, a failing document is logged and reported in its
    /// outcome while the remaining documents are still processed.
    pub fn anonymize_batch<I>(&self, documents: I, filter: &EntityFilter) -> Result<Vec<DocumentOutcome>>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.validate_filter(filter)?;

        let outcomes = documents
            .into_iter()
            .map(|(id, text)| {
                let result = self.anonymize(&text, filter);
                if let Err(e) = &result {
                    tracing::warn!("Skipping document {}: {}", id, e);
                }
                DocumentOutcome { id, result }
            })
            .collect();

        Ok(outcomes)
    }
}

impl std::fmt::Debug for Anonymizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Anonymizer")
            .field("classifier", &self.classifier.name())
            .field("family", &self.family)
            .field("labels", &self.labels)
            .finish()
    }
}
