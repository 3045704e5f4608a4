//! Static assets: the default stylesheet and runtime script.

/// The site stylesheet.
pub fn default_css() -> String {
    DEFAULT_CSS.to_string()
}

/// The site runtime script.
pub fn default_js() -> String {
    DEFAULT_JS.to_string()
}

/// Minify CSS using lightningcss.
pub fn minify_css(css: &str) -> Result<String, String> {
    use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

    let stylesheet = StyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| format!("CSS parse error: {e}"))?;

    let minified = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .map_err(|e| format!("CSS minify error: {e}"))?;

    Ok(minified.code)
}

const DEFAULT_CSS: &str = r#"/* Inlay default theme */

:root {
  --sidebar-width: 260px;
  --toc-width: 200px;
  --content-max-width: 760px;
  --bg: #ffffff;
  --fg: #1c2230;
  --muted-bg: #f5f6f8;
  --muted-fg: #5b6472;
  --border: #e3e6ea;
  --accent: #2458c5;
  --accent-soft: #e8effb;
  --code-bg: #f2f3f5;
  --radius: 6px;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
  background: var(--bg);
  color: var(--fg);
  line-height: 1.6;
}

.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: 100vh;
}

/* Sidebar */
.sidebar {
  background: var(--muted-bg);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
  position: sticky;
  top: 0;
  height: 100vh;
  overflow-y: auto;
}

.nav-header {
  margin-bottom: 1.5rem;
}

.nav-logo {
  font-weight: 700;
  font-size: 1.2rem;
  color: var(--fg);
  text-decoration: none;
}

.nav-list,
.nav-children {
  list-style: none;
}

.nav-children {
  margin-left: 1rem;
  margin-top: 0.25rem;
}

.nav-item a {
  display: block;
  padding: 0.4rem 0.75rem;
  color: var(--muted-fg);
  text-decoration: none;
  border-radius: var(--radius);
}

.nav-item a:hover {
  background: var(--accent-soft);
  color: var(--fg);
}

.nav-item.active > a {
  background: var(--accent);
  color: #fff;
}

/* Main content */
.main {
  display: grid;
  grid-template-columns: 1fr var(--toc-width);
  gap: 2rem;
  padding: 2rem;
  max-width: calc(var(--content-max-width) + var(--toc-width) + 4rem);
}

.doc {
  max-width: var(--content-max-width);
}

.content h1 {
  font-size: 2.25rem;
  margin-bottom: 1.25rem;
}

.content h2 {
  font-size: 1.5rem;
  margin: 2rem 0 1rem;
  padding-bottom: 0.4rem;
  border-bottom: 1px solid var(--border);
}

.content h3 {
  font-size: 1.2rem;
  margin: 1.5rem 0 0.75rem;
}

.content p,
.content ul,
.content ol,
.content table {
  margin-bottom: 1rem;
}

.content ul,
.content ol {
  padding-left: 1.5rem;
}

.content a {
  color: var(--accent);
  text-underline-offset: 3px;
}

.content pre {
  background: var(--code-bg);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1rem;
  overflow-x: auto;
  font-size: 0.875rem;
  margin-bottom: 1rem;
  position: relative;
}

.content code {
  font-family: ui-monospace, "SF Mono", Menlo, monospace;
  font-size: 0.875em;
  background: var(--code-bg);
  padding: 0.1rem 0.35rem;
  border-radius: 4px;
}

.content pre code {
  background: none;
  padding: 0;
}

.content table {
  border-collapse: collapse;
  width: 100%;
}

.content th,
.content td {
  border: 1px solid var(--border);
  padding: 0.4rem 0.75rem;
  text-align: left;
}

.content th {
  background: var(--muted-bg);
}

.content blockquote {
  border-left: 3px solid var(--border);
  padding-left: 1rem;
  color: var(--muted-fg);
  margin-bottom: 1rem;
}

/* Admonitions */
.admonition {
  border: 1px solid var(--border);
  border-left: 4px solid var(--accent);
  border-radius: var(--radius);
  background: var(--accent-soft);
  padding: 0.75rem 1rem;
  margin-bottom: 1rem;
}

.admonition-title {
  font-weight: 600;
  margin-bottom: 0.25rem;
}

.admonition-warning,
.admonition-caution {
  border-left-color: #c2651f;
  background: #fbf1e8;
}

.admonition-danger {
  border-left-color: #bb3434;
  background: #fbecec;
}

.admonition-tip {
  border-left-color: #2d8a4e;
  background: #eaf6ee;
}

/* Failed component references stay visible on the page. */
.render-error {
  border: 1px dashed #bb3434;
  border-radius: var(--radius);
  background: #fbecec;
  color: #8d2525;
  font-family: ui-monospace, monospace;
  font-size: 0.85rem;
  padding: 0.5rem 0.75rem;
  margin-bottom: 1rem;
}

/* Copy button */
.copy-btn {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  padding: 0.2rem 0.6rem;
  font-size: 0.75rem;
  background: var(--bg);
  color: var(--muted-fg);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  cursor: pointer;
}

.copy-btn:hover {
  color: var(--fg);
}

/* Table of contents */
.toc {
  position: sticky;
  top: 2rem;
  align-self: start;
}

.toc h2 {
  font-size: 0.75rem;
  font-weight: 600;
  text-transform: uppercase;
  letter-spacing: 0.05em;
  color: var(--muted-fg);
  margin-bottom: 0.75rem;
}

.toc ul {
  list-style: none;
}

.toc a {
  font-size: 0.85rem;
  color: var(--muted-fg);
  text-decoration: none;
}

.toc a:hover {
  color: var(--fg);
}

.toc-level-3 {
  padding-left: 1rem;
}

.toc-level-4 {
  padding-left: 2rem;
}

@media (max-width: 960px) {
  .layout,
  .main {
    grid-template-columns: 1fr;
  }

  .sidebar {
    position: static;
    height: auto;
  }

  .toc {
    display: none;
  }
}
"#;

const DEFAULT_JS: &str = r#"// Inlay site runtime
(function () {
  'use strict';

  // Highlight the current nav item
  var currentPath = window.location.pathname;
  document.querySelectorAll('.nav-item a').forEach(function (link) {
    var href = link.getAttribute('href');
    if (href === currentPath || (href !== '/' && currentPath.indexOf(href) === 0)) {
      link.parentElement.classList.add('active');
    }
  });

  // Copy buttons on code blocks
  document.querySelectorAll('.content pre').forEach(function (pre) {
    if (pre.querySelector('.copy-btn')) return;

    var btn = document.createElement('button');
    btn.className = 'copy-btn';
    btn.type = 'button';
    btn.textContent = 'Copy';

    btn.addEventListener('click', function () {
      var code = pre.querySelector('code');
      var text = (code || pre).textContent || '';
      navigator.clipboard.writeText(text).then(
        function () {
          btn.textContent = 'Copied';
          setTimeout(function () { btn.textContent = 'Copy'; }, 2000);
        },
        function () {
          btn.textContent = 'Error';
          setTimeout(function () { btn.textContent = 'Copy'; }, 2000);
        }
      );
    });

    pre.appendChild(btn);
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_styles_the_pieces_the_renderer_emits() {
        let css = default_css();
        assert!(css.contains(".admonition"));
        assert!(css.contains(".render-error"));
        assert!(css.contains(".toc"));
    }

    #[test]
    fn js_wires_copy_buttons() {
        let js = default_js();
        assert!(js.contains("clipboard"));
        assert!(js.contains("copy-btn"));
    }

    #[test]
    fn minifies_css() {
        let css = ".doc {\n  color: red;\n  padding: 10px;\n}\n";
        let minified = minify_css(css).unwrap();
        assert!(!minified.contains('\n'));
        assert!(minified.contains(".doc"));
    }
}
