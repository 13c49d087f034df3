//! Configuration management for textwash

use crate::classify::LabelSet;
use crate::entities::EntityFilter;
use crate::spans::ModelFamily;
use crate::vocab::{CategoryTable, Vocabulary, WordLists};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Configuration errors surfaced at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid language '{0}' specified (only 'nl' and 'en' supported)")]
    UnsupportedLanguage(String),
}

/// Supported document languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English - RoBERTa-style classifier
    #[default]
    En,
    /// Dutch - BERT-style classifier
    Nl,
}

impl Language {
    /// Language code, also the model directory name under `data_dir`
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Nl => "nl",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Nl => "Dutch",
        }
    }

    /// Tokenizer family of the classifier trained for this language
    pub fn model_family(&self) -> ModelFamily {
        match self {
            Self::En => ModelFamily::ByteLevelBpe,
            Self::Nl => ModelFamily::WordPiece,
        }
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "nl" => Ok(Self::Nl),
            other => Err(ConfigError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// A phrase that is always anonymized, with the label to number it under
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllowEntry {
    pub phrase: String,
    pub label: String,
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document language (selects the classifier family)
    pub language: Language,
    /// Directory holding the vocabularies and one model directory per language
    pub data_dir: PathBuf,
    /// Month vocabulary, one entry per line (default: `<data_dir>/months.txt`)
    pub months_file: Option<PathBuf>,
    /// Written-number vocabulary, one entry per line (default: `<data_dir>/written_numbers.txt`)
    pub written_numbers_file: Option<PathBuf>,
    /// Only anonymize entities with these labels (empty = all)
    pub entities: Vec<String>,
    /// Phrases never anonymized, even when detected
    pub deny: Vec<String>,
    /// Phrases always anonymized, even when not detected
    pub allow: Vec<AllowEntry>,
    /// Documents processed concurrently (default: number of CPUs)
    pub jobs: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            data_dir: PathBuf::from("./data"),
            months_file: None,
            written_numbers_file: None,
            entities: vec![],
            deny: vec![],
            allow: vec![],
            jobs: None,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "textwash", "textwash")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Directory of the classifier for the configured language
    pub fn model_dir(&self) -> PathBuf {
        self.data_dir.join(self.language.code())
    }

    pub fn months_path(&self) -> PathBuf {
        self.months_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("months.txt"))
    }

    pub fn written_numbers_path(&self) -> PathBuf {
        self.written_numbers_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("written_numbers.txt"))
    }

    /// Load the vocabularies, falling back to the built-in English lists
    /// when the vocabulary files are not present
    pub fn load_vocabulary(&self) -> Result<Vocabulary> {
        let months = self.months_path();
        let numbers = self.written_numbers_path();

        let words = if months.exists() && numbers.exists() {
            let words = WordLists::load_from_files(&months, &numbers)?;
            tracing::info!(
                "Loaded {} months and {} written numbers from {:?}",
                words.months().len(),
                words.written_numbers().len(),
                self.data_dir
            );
            words
        } else {
            if self.language != Language::En {
                tracing::warn!(
                    "Vocabulary files not found in {:?}; using built-in English lists for {}",
                    self.data_dir,
                    self.language.display_name()
                );
            }
            WordLists::english()
        };

        Ok(Vocabulary::new(words, CategoryTable::english()))
    }

    /// Load the classifier's label set from `<model_dir>/config.json`
    pub fn load_labels(&self) -> Result<LabelSet> {
        LabelSet::load_from_model_dir(&self.model_dir())
    }

    /// Build the caller-side entity filter from this configuration.
    ///
    /// The label filter is validated against `labels` when given.
    pub fn entity_filter(&self, labels: Option<&LabelSet>) -> Result<EntityFilter> {
        let allowed_labels = if self.entities.is_empty() {
            None
        } else {
            let requested = match labels {
                Some(labels) => labels.validate(&self.entities)?,
                None => self.entities.iter().map(|l| l.trim().to_string()).collect(),
            };
            Some(requested)
        };

        Ok(EntityFilter {
            allowed_labels,
            deny: self.deny.clone(),
            allow: self
                .allow
                .iter()
                .map(|entry| (entry.phrase.clone(), entry.label.clone()))
                .collect(),
        })
    }
}
