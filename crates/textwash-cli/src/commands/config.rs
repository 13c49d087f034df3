//! Config command - manage configuration

use anyhow::Result;
use console::{style, Term};
use textwash_core::{AllowEntry, Config, Language};

pub fn show(config: &Config) -> Result<()> {
    let term = Term::stdout();

    term.write_line(&format!("{}", style("Textwash Configuration").bold()))?;
    term.write_line("")?;

    term.write_line(&format!(
        "Language:         {}",
        style(config.language.display_name()).cyan()
    ))?;
    term.write_line(&format!(
        "Classifier:       {}",
        style(format!("{:?}", config.language.model_family())).cyan()
    ))?;
    term.write_line(&format!(
        "Data directory:   {}",
        style(config.data_dir.display()).cyan()
    ))?;

    let model_dir = config.model_dir();
    let status = if model_dir.join("config.json").exists() {
        style("found").green()
    } else {
        style("not found").red()
    };
    term.write_line(&format!("  Model:          {} ({})", model_dir.display(), status))?;
    term.write_line(&format!("  Months:         {}", config.months_path().display()))?;
    term.write_line(&format!(
        "  Written numbers: {}",
        config.written_numbers_path().display()
    ))?;

    let jobs = config
        .jobs
        .map(|j| j.to_string())
        .unwrap_or_else(|| "auto".to_string());
    term.write_line(&format!("Jobs:             {}", style(jobs).cyan()))?;

    let entities = if config.entities.is_empty() {
        "all".to_string()
    } else {
        config.entities.join(", ")
    };
    term.write_line(&format!("Entities:         {}", style(entities).cyan()))?;

    if !config.deny.is_empty() {
        term.write_line("")?;
        term.write_line(&format!("{}", style("Never anonymized:").dim()))?;
        for phrase in &config.deny {
            term.write_line(&format!("  - {}", phrase))?;
        }
    }

    if !config.allow.is_empty() {
        term.write_line("")?;
        term.write_line(&format!("{}", style("Always anonymized:").dim()))?;
        for entry in &config.allow {
            term.write_line(&format!("  - {} ({})", entry.phrase, entry.label))?;
        }
    }

    Ok(())
}

pub fn show_path(config_path: Option<&str>) -> Result<()> {
    let path = match config_path {
        Some(p) => std::path::PathBuf::from(p),
        None => Config::default_config_path()?,
    };
    println!("{}", path.display());
    Ok(())
}

pub fn set_language(config: &mut Config, config_path: Option<&str>, language: &str) -> Result<()> {
    let term = Term::stdout();

    let language = match language.parse::<Language>() {
        Ok(language) => language,
        Err(e) => {
            term.write_line(&format!("{} {}", style("✗").red(), e))?;
            return Ok(());
        }
    };

    config.language = language;
    config.save(config_path)?;

    term.write_line(&format!(
        "{} Language set to: {}",
        style("✓").green(),
        language.display_name()
    ))?;

    if !config.model_dir().exists() {
        term.write_line(&format!(
            "{} No classifier at {}",
            style("!").yellow(),
            config.model_dir().display()
        ))?;
    }

    Ok(())
}

pub fn add_deny(config: &mut Config, config_path: Option<&str>, phrase: &str) -> Result<()> {
    let term = Term::stdout();
    let phrase = phrase.trim();

    if config.deny.iter().any(|p| p.eq_ignore_ascii_case(phrase)) {
        term.write_line(&format!(
            "{} '{}' is already on the deny list",
            style("!").yellow(),
            phrase
        ))?;
        return Ok(());
    }

    config.deny.push(phrase.to_string());
    config.save(config_path)?;

    term.write_line(&format!(
        "{} '{}' will never be anonymized",
        style("✓").green(),
        phrase
    ))?;

    Ok(())
}

pub fn add_allow(config: &mut Config, config_path: Option<&str>, phrase: &str, label: &str) -> Result<()> {
    let term = Term::stdout();
    let phrase = phrase.trim();
    let label = label.trim().to_uppercase();

    // A later entry for the same phrase replaces the earlier label
    config.allow.retain(|entry| !entry.phrase.eq_ignore_ascii_case(phrase));
    config.allow.push(AllowEntry {
        phrase: phrase.to_string(),
        label: label.clone(),
    });
    config.save(config_path)?;

    term.write_line(&format!(
        "{} '{}' will always be anonymized as {}",
        style("✓").green(),
        phrase,
        label
    ))?;

    Ok(())
}
