//! Labels command - list the entity labels accepted by --entities

use anyhow::{Context, Result};
use console::{style, Term};
use textwash_core::Config;

pub fn list(config: &Config) -> Result<()> {
    let term = Term::stdout();
    let labels = config
        .load_labels()
        .with_context(|| format!("No classifier found for {}", config.language.display_name()))?;

    term.write_line(&format!(
        "{} ({})",
        style("Available entity labels").bold(),
        config.language.display_name()
    ))?;
    term.write_line("")?;

    for label in labels.available() {
        term.write_line(&format!("  {}", style(label).cyan()))?;
    }

    Ok(())
}
