//! Static site builder.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use inlay_components::{Node, Overrides};
use inlay_mdx::{parse_mdx, Document};

use crate::assets;
use crate::renderer::Renderer;
use crate::templates::{NavItem, PageContext, TemplateEngine, TocEntry};
use crate::theme::{config_overrides, theme_overrides};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source docs directory
    pub docs_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Fail the build on the first unresolved tag instead of emitting
    /// placeholders
    pub strict: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Paths to extra CSS stylesheets to include
    pub styles: Vec<String>,

    /// Tag-to-element remaps from the site config
    pub remap: Vec<(String, String)>,

    /// Tags to unset so they fall back to the built-in table
    pub unset: Vec<String>,

    /// Programmatic component registrations, layered over the theme and
    /// config overrides
    pub overrides: Overrides,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            strict: false,
            base_url: "/".to_string(),
            title: "Documentation".to_string(),
            styles: vec![],
            remap: vec![],
            unset: vec![],
            overrides: Overrides::new(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages written
    pub pages: usize,

    /// Render failures replaced by placeholders (empty in strict mode,
    /// which aborts instead)
    pub failures: Vec<PageFailure>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Result of a check pass: every page parsed and resolved, nothing
/// written.
#[derive(Debug)]
pub struct CheckReport {
    /// Number of pages checked, drafts included
    pub pages: usize,
    pub failures: Vec<PageFailure>,
}

/// One node that failed to render, with its source position.
#[derive(Debug, Clone)]
pub struct PageFailure {
    /// Source file, relative to the docs directory
    pub path: PathBuf,
    /// The tag that failed
    pub tag: String,
    /// 1-based source line, when known
    pub line: Option<usize>,
    pub message: String,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to read docs: {0}")]
    Read(String),

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("failed to render {path}: {message}")]
    Render { path: String, message: String },

    #[error("failed to render template: {0}")]
    Template(String),

    #[error("failed to write output: {0}")]
    Write(String),
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Relative path from docs dir
    relative_path: PathBuf,

    /// Output path
    output_path: PathBuf,

    /// Parsed document
    doc: Document,
}

impl PageInfo {
    fn title(&self) -> String {
        self.doc
            .frontmatter
            .title
            .clone()
            .or_else(|| self.doc.toc.first().map(|entry| entry.title.clone()))
            .unwrap_or_else(|| {
                capitalize(
                    self.relative_path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("Untitled"),
                )
            })
    }
}

/// Static site builder.
pub struct SiteBuilder {
    config: BuildConfig,
    /// Theme, config remaps, and programmatic overrides, outermost first.
    root: Overrides,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Create a new site builder.
    pub fn new(config: BuildConfig) -> Self {
        let root = theme_overrides()
            .layer(&config_overrides(&config.remap, &config.unset))
            .layer(&config.overrides);
        Self {
            config,
            root,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::Write(e.to_string()))?;

        let pages = self.discover_pages()?;
        let published: Vec<&PageInfo> = pages
            .iter()
            .filter(|page| !page.doc.frontmatter.draft)
            .collect();

        let nav = self.build_navigation(&published);

        let results: Vec<Result<Vec<PageFailure>, BuildError>> = published
            .par_iter()
            .map(|page| self.build_page(page, &nav))
            .collect();

        let mut failures = Vec::new();
        for result in results {
            failures.extend(result?);
        }

        self.generate_assets()?;
        self.generate_search_index(&published)?;
        self.generate_sitemap(&published)?;

        Ok(BuildResult {
            pages: published.len(),
            failures,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Parse and resolve every page, drafts included, writing nothing.
    pub fn check(&self) -> Result<CheckReport, BuildError> {
        let pages = self.discover_pages()?;
        let mut failures = Vec::new();
        for page in &pages {
            let mut renderer = Renderer::new();
            renderer
                .render_document(&page.doc.nodes, &self.root)
                .map_err(|e| BuildError::Render {
                    path: page.relative_path.display().to_string(),
                    message: e.to_string(),
                })?;
            failures.extend(renderer.failures().iter().map(|failure| PageFailure {
                path: page.relative_path.clone(),
                tag: failure.tag.clone(),
                line: failure.line,
                message: failure.message.clone(),
            }));
        }
        Ok(CheckReport {
            pages: pages.len(),
            failures,
        })
    }

    /// Discover all content pages in the docs directory.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        let mut pages = Vec::new();

        if !self.config.docs_dir.exists() {
            return Err(BuildError::Read(format!(
                "docs directory not found: {}",
                self.config.docs_dir.display()
            )));
        }

        for entry in WalkDir::new(&self.config.docs_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "mdx" && ext != "md" {
                continue;
            }

            let content = fs::read_to_string(path)
                .map_err(|e| BuildError::Read(format!("{}: {}", path.display(), e)))?;

            let doc = parse_mdx(&content).map_err(|e| BuildError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let relative_path = path
                .strip_prefix(&self.config.docs_dir)
                .unwrap_or(path)
                .to_path_buf();

            let output_path = self.calculate_output_path(&relative_path, &doc);

            pages.push(PageInfo {
                relative_path,
                output_path,
                doc,
            });
        }

        // Frontmatter order first, path as the tiebreak; unordered last.
        pages.sort_by(|a, b| {
            let order_a = a.doc.frontmatter.order.unwrap_or(i64::MAX);
            let order_b = b.doc.frontmatter.order.unwrap_or(i64::MAX);
            order_a
                .cmp(&order_b)
                .then_with(|| a.relative_path.cmp(&b.relative_path))
        });

        Ok(pages)
    }

    /// Calculate output path for a page.
    fn calculate_output_path(&self, relative: &Path, doc: &Document) -> PathBuf {
        if let Some(slug) = &doc.frontmatter.slug {
            return self.config.output_dir.join(slug).join("index.html");
        }

        let stem = relative
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index");
        let parent = relative.parent().unwrap_or(Path::new(""));

        if stem == "index" {
            // docs/index.mdx -> dist/index.html
            self.config.output_dir.join(parent).join("index.html")
        } else {
            // docs/install.mdx -> dist/install/index.html
            self.config
                .output_dir
                .join(parent)
                .join(stem)
                .join("index.html")
        }
    }

    /// Build navigation structure from the published pages.
    fn build_navigation(&self, pages: &[&PageInfo]) -> Vec<NavItem> {
        let mut nav = Vec::new();
        let mut dirs: HashMap<PathBuf, Vec<NavItem>> = HashMap::new();

        for page in pages {
            let title = page
                .doc
                .frontmatter
                .nav
                .clone()
                .unwrap_or_else(|| page.title());

            let item = NavItem {
                title,
                path: self.path_to_url(&page.output_path),
                children: Vec::new(),
                active: false,
            };

            let parent = page.relative_path.parent().unwrap_or(Path::new(""));
            dirs.entry(parent.to_path_buf()).or_default().push(item);
        }

        if let Some(root_items) = dirs.remove(&PathBuf::new()) {
            nav.extend(root_items);
        }

        let mut sections: Vec<(PathBuf, Vec<NavItem>)> = dirs.into_iter().collect();
        sections.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (dir, items) in sections {
            let dir_name = dir
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("Section");

            nav.push(NavItem {
                title: capitalize(dir_name),
                path: format!("{}{}/", self.config.base_url, dir.display()),
                children: items,
                active: false,
            });
        }

        nav
    }

    /// Convert output path to URL.
    fn path_to_url(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.config.output_dir).unwrap_or(path);

        let url = relative
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        if url.is_empty() {
            self.config.base_url.clone()
        } else {
            format!("{}{}/", self.config.base_url, url)
        }
    }

    /// Render and write a single page.
    fn build_page(&self, page: &PageInfo, nav: &[NavItem]) -> Result<Vec<PageFailure>, BuildError> {
        let mut renderer = if self.config.strict {
            Renderer::strict()
        } else {
            Renderer::new()
        };

        let content = renderer
            .render_document(&page.doc.nodes, &self.root)
            .map_err(|e| BuildError::Render {
                path: page.relative_path.display().to_string(),
                message: e.to_string(),
            })?;

        let toc: Vec<TocEntry> = page
            .doc
            .toc
            .iter()
            .map(|entry| TocEntry {
                title: entry.title.clone(),
                id: entry.id.clone(),
                level: entry.level,
            })
            .collect();

        let context = PageContext {
            title: page.title(),
            description: page
                .doc
                .frontmatter
                .description
                .clone()
                .unwrap_or_default(),
            site_title: self.config.title.clone(),
            content,
            nav: nav.to_vec(),
            toc,
            base_url: self.config.base_url.clone(),
            styles: self
                .config
                .styles
                .iter()
                .map(|style| {
                    let filename = Path::new(style)
                        .file_name()
                        .and_then(|f| f.to_str())
                        .unwrap_or("style.css");
                    format!("{}assets/{}", self.config.base_url, filename)
                })
                .collect(),
        };

        let html = self
            .templates
            .render_page("doc.html", &context)
            .map_err(|e| BuildError::Template(e.to_string()))?;

        if let Some(parent) = page.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::Write(e.to_string()))?;
        }
        fs::write(&page.output_path, html).map_err(|e| BuildError::Write(e.to_string()))?;

        Ok(renderer
            .failures()
            .iter()
            .map(|failure| PageFailure {
                path: page.relative_path.clone(),
                tag: failure.tag.clone(),
                line: failure.line,
                message: failure.message.clone(),
            })
            .collect())
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::Write(e.to_string()))?;

        let css = assets::default_css();
        let css = if self.config.minify {
            assets::minify_css(&css).unwrap_or(css)
        } else {
            css
        };
        fs::write(assets_dir.join("site.css"), css)
            .map_err(|e| BuildError::Write(e.to_string()))?;

        fs::write(assets_dir.join("site.js"), assets::default_js())
            .map_err(|e| BuildError::Write(e.to_string()))?;

        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if source_path.exists() {
                let filename = source_path
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or("style.css");
                let content = fs::read_to_string(&source_path)
                    .map_err(|e| BuildError::Read(format!("stylesheet {style_path}: {e}")))?;
                fs::write(assets_dir.join(filename), content)
                    .map_err(|e| BuildError::Write(e.to_string()))?;
            } else {
                tracing::warn!("stylesheet not found: {}", style_path);
            }
        }

        Ok(())
    }

    /// Generate the search index.
    fn generate_search_index(&self, pages: &[&PageInfo]) -> Result<(), BuildError> {
        let index: Vec<serde_json::Value> = pages
            .iter()
            .map(|page| {
                let mut content = page_text(&page.doc.nodes);
                if content.len() > 400 {
                    let mut end = 400;
                    while !content.is_char_boundary(end) {
                        end -= 1;
                    }
                    content.truncate(end);
                }

                serde_json::json!({
                    "title": page.title(),
                    "description": page.doc.frontmatter.description.clone().unwrap_or_default(),
                    "url": self.path_to_url(&page.output_path),
                    "content": content,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::Write(e.to_string()))?;

        fs::write(self.config.output_dir.join("search-index.json"), json)
            .map_err(|e| BuildError::Write(e.to_string()))?;

        Ok(())
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self, pages: &[&PageInfo]) -> Result<(), BuildError> {
        let urls: Vec<String> = pages
            .iter()
            .map(|page| {
                format!(
                    "  <url>\n    <loc>{}{}</loc>\n  </url>",
                    self.config.base_url.trim_end_matches('/'),
                    self.path_to_url(&page.output_path)
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::Write(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::Write(e.to_string()))?;

        Ok(())
    }
}

/// Plain text of a content tree, for the search index.
fn page_text(nodes: &[Node]) -> String {
    fn walk(nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => {
                    if !out.is_empty() && !out.ends_with(' ') {
                        out.push(' ');
                    }
                    out.push_str(text.trim());
                }
                Node::Element(element) => walk(&element.children, out),
                Node::Scope(scope) => walk(&scope.children, out),
                Node::Raw(_) => {}
            }
        }
    }
    let mut out = String::new();
    walk(nodes, &mut out);
    out
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_page(docs: &Path, name: &str, content: &str) {
        fs::write(docs.join(name), content).unwrap();
    }

    fn config(docs: &Path, out: &Path) -> BuildConfig {
        BuildConfig {
            docs_dir: docs.to_path_buf(),
            output_dir: out.to_path_buf(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn builds_a_page_through_the_theme() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        fs::create_dir_all(&docs).unwrap();
        write_page(
            &docs,
            "index.mdx",
            "---\ntitle: Home\n---\n# Welcome\n\n:::tip Fast start\nUse `inlay init`.\n:::\n",
        );

        let result = SiteBuilder::new(config(&docs, &out)).build().await.unwrap();

        assert_eq!(result.pages, 1);
        assert!(result.failures.is_empty());
        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("<title>Home - Documentation</title>"));
        assert!(html.contains("admonition-tip"));
        assert!(html.contains("<code>inlay init</code>"));
        assert!(out.join("assets/site.css").exists());
        assert!(out.join("sitemap.xml").exists());
    }

    #[tokio::test]
    async fn config_remap_resolves_component_tags() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        fs::create_dir_all(&docs).unwrap();
        write_page(
            &docs,
            "index.mdx",
            "---\ntitle: Home\n---\nStatus: <Badge kind=\"new\">fresh</Badge>\n",
        );

        let mut cfg = config(&docs, &out);
        cfg.remap = vec![("Badge".to_string(), "mark".to_string())];
        let result = SiteBuilder::new(cfg).build().await.unwrap();

        assert!(result.failures.is_empty());
        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains(r#"<mark kind="new">fresh</mark>"#));
    }

    #[tokio::test]
    async fn unresolved_tag_yields_placeholder_and_failure() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        fs::create_dir_all(&docs).unwrap();
        write_page(
            &docs,
            "index.mdx",
            "---\ntitle: Home\n---\nIntro.\n\n<Missing thing=\"x\" />\n",
        );

        let result = SiteBuilder::new(config(&docs, &out)).build().await.unwrap();

        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].tag, "Missing");
        assert_eq!(result.failures[0].line, Some(6));
        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("render-error"));
        assert!(html.contains("Intro."));
    }

    #[tokio::test]
    async fn strict_build_aborts_on_unresolved_tag() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        fs::create_dir_all(&docs).unwrap();
        write_page(&docs, "index.mdx", "<Missing />\n");

        let mut cfg = config(&docs, &out);
        cfg.strict = true;
        let err = SiteBuilder::new(cfg).build().await.unwrap_err();
        assert!(matches!(err, BuildError::Render { .. }));
    }

    #[tokio::test]
    async fn drafts_are_checked_but_not_published() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        fs::create_dir_all(&docs).unwrap();
        write_page(&docs, "index.mdx", "---\ntitle: Home\n---\nHello\n");
        write_page(
            &docs,
            "wip.mdx",
            "---\ntitle: WIP\ndraft: true\n---\n<Missing />\n",
        );

        let builder = SiteBuilder::new(config(&docs, &out));
        let result = builder.build().await.unwrap();
        assert_eq!(result.pages, 1);
        assert!(!out.join("wip").exists());

        let report = builder.check().unwrap();
        assert_eq!(report.pages, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, PathBuf::from("wip.mdx"));
    }

    #[tokio::test]
    async fn search_index_carries_page_text() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        fs::create_dir_all(&docs).unwrap();
        write_page(
            &docs,
            "index.mdx",
            "---\ntitle: Searchable\ndescription: Find me\n---\nUnique needle text.\n",
        );

        SiteBuilder::new(config(&docs, &out)).build().await.unwrap();

        let index = fs::read_to_string(out.join("search-index.json")).unwrap();
        assert!(index.contains("Searchable"));
        assert!(index.contains("Find me"));
        assert!(index.contains("Unique needle text."));
    }

    #[tokio::test]
    async fn nested_pages_get_directory_urls_and_nav() {
        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        let out = temp.path().join("dist");
        fs::create_dir_all(docs.join("guides")).unwrap();
        write_page(&docs, "index.mdx", "---\ntitle: Home\norder: 1\n---\nHi\n");
        fs::write(
            docs.join("guides/install.mdx"),
            "---\ntitle: Install\nnav: Installing\n---\n# Install\n",
        )
        .unwrap();

        SiteBuilder::new(config(&docs, &out)).build().await.unwrap();

        assert!(out.join("guides/install/index.html").exists());
        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains("Installing"));
        assert!(html.contains("/guides/install/"));
    }
}
