//! Check command: resolve every component tag without writing output.

use std::path::Path;

use anyhow::Result;

use inlay_static::SiteBuilder;

use crate::config::{load_config, to_build_config};

/// Run the check command. Drafts are included; nothing is written.
pub fn run(config_path: &Path) -> Result<()> {
    let file_config = load_config(config_path)?;
    let config = to_build_config(&file_config, None, false, false);

    let report = SiteBuilder::new(config).check()?;

    for failure in &report.failures {
        match failure.line {
            Some(line) => println!(
                "{}:{}: <{}> {}",
                failure.path.display(),
                line,
                failure.tag,
                failure.message
            ),
            None => println!(
                "{}: <{}> {}",
                failure.path.display(),
                failure.tag,
                failure.message
            ),
        }
    }

    if !report.failures.is_empty() {
        anyhow::bail!(
            "{} unresolved component reference(s) across {} pages",
            report.failures.len(),
            report.pages
        );
    }

    tracing::info!("all component references resolved ({} pages)", report.pages);
    Ok(())
}
