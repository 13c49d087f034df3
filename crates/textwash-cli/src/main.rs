//! Textwash CLI - batch anonymization of text documents

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use textwash_core::{Config, Language};

mod commands;

#[derive(Parser)]
#[command(name = "textwash")]
#[command(version)]
#[command(about = "Replace personal information in text with stable placeholders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose output (show per-pass debug info)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Anonymize every .txt file in a directory
    Run {
        /// Directory containing the .txt documents
        #[arg(long)]
        input_dir: PathBuf,

        /// Directory to write anonymized documents to (created if missing)
        #[arg(long)]
        output_dir: PathBuf,

        /// Directory containing <stem>.json classifier predictions
        #[arg(long)]
        predictions_dir: PathBuf,

        /// Document language (en, nl)
        #[arg(long)]
        language: Option<String>,

        /// Only anonymize these entity labels (comma-separated)
        #[arg(long)]
        entities: Option<String>,

        /// Number of documents processed in parallel
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Also write the untouched input as <stem>.orig.txt
        #[arg(long)]
        keep_original: bool,
    },

    /// List the entity labels accepted by --entities
    Labels {
        /// Document language (en, nl)
        #[arg(long)]
        language: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Set the default document language
    SetLanguage {
        /// Language code (en, nl)
        language: String,
    },

    /// Never anonymize a phrase
    Deny {
        /// Phrase to keep as-is
        phrase: String,
    },

    /// Always anonymize a phrase
    Allow {
        /// Phrase to anonymize
        phrase: String,

        /// Entity label to use for its alias
        label: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run {
            input_dir,
            output_dir,
            predictions_dir,
            language,
            entities,
            jobs,
            keep_original,
        } => {
            apply_language(&mut config, language.as_deref())?;
            if let Some(entities) = entities {
                config.entities = textwash_core::LabelSet::parse_list(&entities);
            }
            if jobs.is_some() {
                config.jobs = jobs;
            }

            let args = commands::run::RunArgs {
                input_dir,
                output_dir,
                predictions_dir,
                keep_original,
            };
            commands::run::run(&config, args).await
        }

        Commands::Labels { language } => {
            apply_language(&mut config, language.as_deref())?;
            commands::labels::list(&config)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::show_path(config_path),
            ConfigAction::SetLanguage { language } => {
                commands::config::set_language(&mut config, config_path, &language)
            }
            ConfigAction::Deny { phrase } => {
                commands::config::add_deny(&mut config, config_path, &phrase)
            }
            ConfigAction::Allow { phrase, label } => {
                commands::config::add_allow(&mut config, config_path, &phrase, &label)
            }
        },
    }
}

/// Override the configured language from the command line
fn apply_language(config: &mut Config, language: Option<&str>) -> Result<()> {
    if let Some(code) = language {
        config.language = code.parse::<Language>()?;
    }
    Ok(())
}
