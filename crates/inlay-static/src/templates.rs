//! Page templates for the built site.

use minijinja::{context, Environment};

/// A navigation item.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Child items
    pub children: Vec<NavItem>,
    /// Whether this is the active page
    pub active: bool,
}

/// A table of contents entry.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PageContext {
    /// Page title
    pub title: String,
    /// Page description for meta tags, empty when absent
    pub description: String,
    /// Site title
    pub site_title: String,
    /// Rendered content HTML
    pub content: String,
    /// Navigation items
    pub nav: Vec<NavItem>,
    /// Table of contents
    pub toc: Vec<TocEntry>,
    /// Base URL
    pub base_url: String,
    /// Paths to extra CSS stylesheets to include
    pub styles: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("built-in base template is valid");
        env.add_template_owned("doc.html".to_string(), DOC_TEMPLATE.to_string())
            .expect("built-in doc template is valid");
        env.add_template_owned("nav.html".to_string(), NAV_TEMPLATE.to_string())
            .expect("built-in nav template is valid");

        Self { env }
    }

    /// Render a page using the named template.
    pub fn render_page(
        &self,
        template: &str,
        page: &PageContext,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &page.title,
            description => &page.description,
            site_title => &page.site_title,
            content => &page.content,
            nav => &page.nav,
            toc => &page.toc,
            base_url => &page.base_url,
            styles => &page.styles,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  {% if description %}<meta name="description" content="{{ description }}">
  {% endif %}{% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}<link rel="stylesheet" href="{{ base_url }}assets/site.css">
</head>
<body>
  <div class="layout">
    <nav class="sidebar">
      {% include "nav.html" %}
    </nav>
    <main class="main">
      {% block content %}{% endblock %}
    </main>
  </div>
  <script src="{{ base_url }}assets/site.js"></script>
</body>
</html>"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  <div class="content">
    {{ content | safe }}
  </div>
</article>

{% if toc %}
<aside class="toc">
  <h2>On this page</h2>
  <ul>
  {% for entry in toc %}
    <li class="toc-level-{{ entry.level }}">
      <a href="#{{ entry.id }}">{{ entry.title }}</a>
    </li>
  {% endfor %}
  </ul>
</aside>
{% endif %}
{% endblock %}"##;

const NAV_TEMPLATE: &str = r##"<div class="nav-header">
  <a href="{{ base_url }}" class="nav-logo">{{ site_title }}</a>
</div>
<ul class="nav-list">
{% for item in nav %}
  <li class="nav-item{% if item.active %} active{% endif %}">
    <a href="{{ item.path }}">{{ item.title }}</a>
    {% if item.children %}
    <ul class="nav-children">
      {% for child in item.children %}
      <li class="nav-item{% if child.active %} active{% endif %}">
        <a href="{{ child.path }}">{{ child.title }}</a>
      </li>
      {% endfor %}
    </ul>
    {% endif %}
  </li>
{% endfor %}
</ul>"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageContext {
        PageContext {
            title: "Install".to_string(),
            description: String::new(),
            site_title: "Inlay Docs".to_string(),
            content: "<p>Hello world</p>".to_string(),
            nav: vec![],
            toc: vec![],
            base_url: "/".to_string(),
            styles: vec![],
        }
    }

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::new();
        let html = engine.render_page("doc.html", &page()).unwrap();

        assert!(html.contains("<title>Install - Inlay Docs</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(!html.contains("meta name=\"description\""));
    }

    #[test]
    fn renders_description_meta_when_present() {
        let engine = TemplateEngine::new();
        let mut ctx = page();
        ctx.description = "How to install".to_string();
        let html = engine.render_page("doc.html", &ctx).unwrap();
        assert!(html.contains(r#"<meta name="description" content="How to install">"#));
    }

    #[test]
    fn renders_navigation_tree() {
        let engine = TemplateEngine::new();
        let mut ctx = page();
        ctx.nav = vec![
            NavItem {
                title: "Home".to_string(),
                path: "/".to_string(),
                children: vec![],
                active: true,
            },
            NavItem {
                title: "Guides".to_string(),
                path: "/guides/".to_string(),
                children: vec![NavItem {
                    title: "Install".to_string(),
                    path: "/guides/install/".to_string(),
                    children: vec![],
                    active: false,
                }],
                active: false,
            },
        ];
        let html = engine.render_page("doc.html", &ctx).unwrap();

        assert!(html.contains("Home"));
        assert!(html.contains("/guides/install/"));
    }

    #[test]
    fn renders_toc_with_levels() {
        let engine = TemplateEngine::new();
        let mut ctx = page();
        ctx.toc = vec![TocEntry {
            title: "From source".to_string(),
            id: "from-source".to_string(),
            level: 2,
        }];
        let html = engine.render_page("doc.html", &ctx).unwrap();
        assert!(html.contains("toc-level-2"));
        assert!(html.contains("#from-source"));
    }
}
