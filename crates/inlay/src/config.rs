//! Site configuration (`inlay.toml`).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use inlay_static::BuildConfig;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub docs: DocsSection,
    #[serde(default)]
    pub components: ComponentsSection,
    #[serde(default)]
    pub build: BuildSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub title: String,
    pub base_url: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Documentation".to_string(),
            base_url: "/".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocsSection {
    pub dir: String,
    pub output: String,
    /// Paths to extra CSS stylesheets to include
    pub styles: Vec<String>,
}

impl Default for DocsSection {
    fn default() -> Self {
        Self {
            dir: "docs".to_string(),
            output: "dist".to_string(),
            styles: vec![],
        }
    }
}

/// The `[components]` table: tag names map to HTML element names, plus an
/// `unset` list of tags to drop back to the built-in defaults.
#[derive(Debug, Deserialize, Default)]
pub struct ComponentsSection {
    #[serde(default)]
    pub unset: Vec<String>,
    #[serde(flatten)]
    pub remap: BTreeMap<String, toml::Value>,
}

impl ComponentsSection {
    /// The remap entries as tag/element pairs. Entries whose value is not
    /// a string are skipped with a warning, not a failure.
    pub fn remap_pairs(&self) -> Vec<(String, String)> {
        self.remap
            .iter()
            .filter_map(|(tag, value)| match value.as_str() {
                Some(element) => Some((tag.clone(), element.to_string())),
                None => {
                    tracing::warn!(tag, "ignoring non-string component remap entry");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    pub minify: bool,
    pub strict: bool,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            minify: true,
            strict: false,
        }
    }
}

/// Load configuration from `path` if it exists, defaults otherwise.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::info!("loaded config from {}", path.display());
    Ok(config)
}

/// Convert the file config into a build config, with CLI overrides.
pub fn to_build_config(
    file: &ConfigFile,
    output: Option<PathBuf>,
    no_minify: bool,
    strict: bool,
) -> BuildConfig {
    BuildConfig {
        docs_dir: PathBuf::from(&file.docs.dir),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file.docs.output)),
        minify: !no_minify && file.build.minify,
        strict: strict || file.build.strict,
        base_url: file.site.base_url.clone(),
        title: file.site.title.clone(),
        styles: file.docs.styles.clone(),
        remap: file.components.remap_pairs(),
        unset: file.components.unset.clone(),
        overrides: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_full_config() {
        let config: ConfigFile = toml::from_str(
            r#"
[site]
title = "Inlay Docs"
base_url = "/docs/"

[docs]
dir = "pages"
output = "public"

[components]
Badge = "mark"
Callout = "aside"
unset = ["inlineCode"]

[build]
minify = false
strict = true
"#,
        )
        .unwrap();

        assert_eq!(config.site.title, "Inlay Docs");
        assert_eq!(config.docs.dir, "pages");
        assert_eq!(
            config.components.remap_pairs(),
            vec![
                ("Badge".to_string(), "mark".to_string()),
                ("Callout".to_string(), "aside".to_string()),
            ]
        );
        assert_eq!(config.components.unset, vec!["inlineCode"]);
        assert!(!config.build.minify);
        assert!(config.build.strict);
    }

    #[test]
    fn missing_sections_default() {
        let config: ConfigFile = toml::from_str("[site]\ntitle = \"X\"\n").unwrap();
        assert_eq!(config.docs.dir, "docs");
        assert!(config.build.minify);
        assert!(config.components.remap_pairs().is_empty());
    }

    #[test]
    fn non_string_remap_values_are_skipped() {
        let config: ConfigFile = toml::from_str("[components]\nBadge = 3\nTip = \"ins\"\n").unwrap();
        assert_eq!(
            config.components.remap_pairs(),
            vec![("Tip".to_string(), "ins".to_string())]
        );
    }

    #[test]
    fn cli_flags_override_file_settings() {
        let file = ConfigFile::default();
        let build = to_build_config(&file, Some(PathBuf::from("out")), true, true);
        assert_eq!(build.output_dir, PathBuf::from("out"));
        assert!(!build.minify);
        assert!(build.strict);
    }
}
