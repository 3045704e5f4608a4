//! YAML frontmatter extraction from content sources.

use serde::Deserialize;
use thiserror::Error;

/// Page metadata from the leading `---` block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    /// Page title; falls back to the first heading when absent.
    pub title: Option<String>,
    /// Short summary used in meta tags and search results.
    pub description: Option<String>,
    /// Output path override, relative to the site root.
    pub slug: Option<String>,
    /// Sort position within the section nav. Unordered pages sort last.
    pub order: Option<i64>,
    /// Label shown in the nav instead of the title.
    pub nav: Option<String>,
    /// Drafts are parsed and checked but not published.
    pub draft: bool,
}

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("frontmatter block is never closed")]
    Unterminated,

    #[error("invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split a source file into frontmatter and body.
///
/// Returns the parsed frontmatter, the body, and the number of source
/// lines the frontmatter consumed, so body positions can be reported
/// against the original file. Sources without a leading `---` pass
/// through untouched.
pub fn extract(source: &str) -> Result<(Frontmatter, &str, usize), FrontmatterError> {
    let Some(after_fence) = source.strip_prefix("---") else {
        return Ok((Frontmatter::default(), source, 0));
    };
    let Some(rest) = after_fence
        .strip_prefix('\n')
        .or_else(|| after_fence.strip_prefix("\r\n"))
    else {
        // A line like `----` is a thematic break, not a fence.
        return Ok((Frontmatter::default(), source, 0));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let frontmatter = if yaml.trim().is_empty() {
                Frontmatter::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            let consumed_lines = 2 + yaml.matches('\n').count();
            return Ok((frontmatter, body, consumed_lines));
        }
        offset += line.len();
    }
    Err(FrontmatterError::Unterminated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_fields_and_body() {
        let source = "---\ntitle: Install\norder: 2\ndraft: true\n---\n# Install\n";
        let (fm, body, lines) = extract(source).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Install"));
        assert_eq!(fm.order, Some(2));
        assert!(fm.draft);
        assert_eq!(body, "# Install\n");
        assert_eq!(lines, 5);
    }

    #[test]
    fn source_without_frontmatter_passes_through() {
        let source = "# Just a heading\n";
        let (fm, body, lines) = extract(source).unwrap();
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, source);
        assert_eq!(lines, 0);
    }

    #[test]
    fn empty_block_yields_defaults() {
        let (fm, body, lines) = extract("---\n---\nBody\n").unwrap();
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, "Body\n");
        assert_eq!(lines, 2);
    }

    #[test]
    fn unterminated_block_is_an_error() {
        let err = extract("---\ntitle: Oops\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Unterminated));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = extract("---\ntitle: [unclosed\n---\nBody\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let (fm, _, _) = extract("---\ntitle: Hi\nsidebar_label: legacy\n---\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hi"));
    }

    #[test]
    fn thematic_break_is_not_frontmatter() {
        let (fm, body, _) = extract("----\nnot yaml\n").unwrap();
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, "----\nnot yaml\n");
    }
}
