//! Run command - anonymize a directory of documents

use anyhow::{Context, Result};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use textwash_core::{Anonymizer, Config, EntityFilter, PrecomputedClassifier};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub struct RunArgs {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub predictions_dir: PathBuf,
    pub keep_original: bool,
}

/// One input document
struct Document {
    stem: String,
    text: String,
}

/// Outcome of one document, reported back from a worker
enum Outcome {
    Written { entities: usize },
    Skipped,
}

/// Per-run document counts
#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    written: usize,
    skipped: usize,
    entities: usize,
}

/// Shared state for the blocking document workers
struct Workers {
    anonymizer: Arc<Anonymizer>,
    filter: Arc<EntityFilter>,
    output_dir: Arc<PathBuf>,
    keep_original: bool,
    jobs: usize,
}

impl Workers {
    /// Process every document on the blocking pool, at most `jobs` at a
    /// time. Each worker ticks `pb` when its document is done.
    async fn process_all(&self, documents: Vec<Document>, pb: &ProgressBar) -> Result<Tally> {
        let semaphore = Arc::new(Semaphore::new(self.jobs.max(1)));
        let mut tasks = JoinSet::new();

        for document in documents {
            let permit = Arc::clone(&semaphore).acquire_owned().await?;
            let anonymizer = Arc::clone(&self.anonymizer);
            let filter = Arc::clone(&self.filter);
            let output_dir = Arc::clone(&self.output_dir);
            let keep_original = self.keep_original;
            let pb = pb.clone();

            tasks.spawn_blocking(move || {
                let _permit = permit;
                let outcome = process_document(&anonymizer, &filter, &document, &output_dir, keep_original);
                pb.inc(1);
                outcome
            });
        }

        let mut tally = Tally::default();
        while let Some(joined) = tasks.join_next().await {
            match joined?? {
                Outcome::Written { entities } => {
                    tally.written += 1;
                    tally.entities += entities;
                }
                Outcome::Skipped => tally.skipped += 1,
            }
        }

        Ok(tally)
    }
}

pub async fn run(config: &Config, args: RunArgs) -> Result<()> {
    let term = Term::stdout();
    let start = Instant::now();

    if !args.input_dir.is_dir() {
        anyhow::bail!("Input directory not found: {}", args.input_dir.display());
    }
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", args.output_dir))?;

    // The label set is only needed to validate --entities
    let labels = if config.entities.is_empty() {
        None
    } else {
        Some(config.load_labels().context("Cannot validate entity labels")?)
    };
    let filter = Arc::new(config.entity_filter(labels.as_ref())?);

    let documents = read_documents(&args.input_dir)?;
    if documents.is_empty() {
        term.write_line(&format!(
            "{} No .txt files found in {}",
            style("!").yellow(),
            args.input_dir.display()
        ))?;
        return Ok(());
    }

    term.write_line(&format!(
        "{} Anonymizing {} documents ({})",
        style("⚙").cyan(),
        documents.len(),
        config.language.display_name()
    ))?;

    let classifier = load_predictions(&documents, &args.predictions_dir);
    let mut anonymizer = Anonymizer::from_config(config, Arc::new(classifier))?;
    if let Some(labels) = labels {
        anonymizer = anonymizer.with_labels(labels);
    }
    anonymizer.validate_filter(&filter)?;
    let anonymizer = Arc::new(anonymizer);

    let jobs = config
        .jobs
        .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
        .unwrap_or(1)
        .max(1);
    tracing::debug!("Processing with {} workers", jobs);

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    let output_dir = Arc::new(args.output_dir);
    let workers = Workers {
        anonymizer,
        filter,
        output_dir: Arc::clone(&output_dir),
        keep_original: args.keep_original,
        jobs,
    };
    let tally = workers.process_all(documents, &pb).await?;
    pb.finish_and_clear();

    term.write_line(&format!(
        "{} Wrote {} documents to {} ({} entities)",
        style("✓").green(),
        tally.written,
        output_dir.display(),
        tally.entities
    ))?;
    if tally.skipped > 0 {
        term.write_line(&format!(
            "{} Skipped {} documents (see warnings above)",
            style("!").yellow(),
            tally.skipped
        ))?;
    }
    term.write_line(&format!(
        "{} Total: {}ms",
        style("⏱").dim(),
        start.elapsed().as_millis()
    ))?;

    Ok(())
}

/// Read every `*.txt` file in `dir`, trimmed, sorted by file name
fn read_documents(dir: &Path) -> Result<Vec<Document>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory {:?}", dir))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {:?}", path))?
                .trim()
                .to_string();
            Ok(Document { stem, text })
        })
        .collect()
}

/// Load `<stem>.json` for every document.
///
/// A document without readable predictions is left out; the pipeline then
/// reports it as unclassified and skips it.
fn load_predictions(documents: &[Document], dir: &Path) -> PrecomputedClassifier {
    let mut classifier = PrecomputedClassifier::new();

    for document in documents {
        let path = dir.join(format!("{}.json", document.stem));
        match PrecomputedClassifier::read_predictions(&path) {
            Ok(predictions) => classifier.insert(document.text.clone(), predictions),
            Err(e) => tracing::warn!("{}: {}", document.stem, e),
        }
    }

    tracing::debug!("Loaded predictions for {}/{} documents", classifier.len(), documents.len());
    classifier
}

fn process_document(
    anonymizer: &Anonymizer,
    filter: &EntityFilter,
    document: &Document,
    output_dir: &Path,
    keep_original: bool,
) -> Result<Outcome> {
    let result = match anonymizer.anonymize(&document.text, filter) {
        Ok(result) => result,
        Err(e) if e.is_per_document() => {
            tracing::warn!("Skipping {}: {}", document.stem, e);
            return Ok(Outcome::Skipped);
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to anonymize {}", document.stem)),
    };

    let written = write_output(output_dir, &document.stem, &result.anonymized).and_then(|()| {
        if keep_original {
            write_output(output_dir, &format!("{}.orig", document.stem), &result.original)
        } else {
            Ok(())
        }
    });

    match written {
        Ok(()) => Ok(Outcome::Written {
            entities: result.entities.len(),
        }),
        Err(e) => {
            tracing::warn!("Skipping {}: {:#}", document.stem, e);
            Ok(Outcome::Skipped)
        }
    }
}

fn write_output(dir: &Path, stem: &str, contents: &str) -> Result<()> {
    let path = dir.join(format!("{}.txt", stem));
    std::fs::write(&path, contents).with_context(|| format!("Failed to write {:?}", path))
}
