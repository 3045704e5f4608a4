//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use inlay_static::SiteBuilder;

use crate::config::{load_config, to_build_config};

/// Run the build command.
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    no_minify: bool,
    strict: bool,
) -> Result<()> {
    tracing::info!("building static site...");

    let file_config = load_config(config_path)?;
    let config = to_build_config(&file_config, output, no_minify, strict);

    let result = SiteBuilder::new(config).build().await?;

    for failure in &result.failures {
        tracing::warn!(
            "{}:{} <{}> {}",
            failure.path.display(),
            failure.line.unwrap_or(0),
            failure.tag,
            failure.message
        );
    }
    if !result.failures.is_empty() {
        tracing::warn!(
            "{} component reference(s) rendered as error placeholders; run `inlay check`",
            result.failures.len()
        );
    }

    tracing::info!(
        "built {} pages in {}ms",
        result.pages,
        result.duration_ms
    );
    tracing::info!("output: {}", result.output_dir.display());

    Ok(())
}
