//! Initialize documentation in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("initializing inlay...");

    let docs_dir = Path::new("docs");

    if docs_dir.exists() {
        if !yes {
            tracing::warn!("docs/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(docs_dir).context("failed to create docs directory")?;
    }

    let config_path = Path::new("inlay.toml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("failed to write inlay.toml")?;
        tracing::info!("created inlay.toml");
    }

    let index_path = docs_dir.join("index.mdx");
    if !index_path.exists() || yes {
        fs::write(&index_path, DEFAULT_INDEX).context("failed to write index.mdx")?;
        tracing::info!("created docs/index.mdx");
    }

    let getting_started_path = docs_dir.join("getting-started.mdx");
    if !getting_started_path.exists() || yes {
        fs::write(&getting_started_path, DEFAULT_GETTING_STARTED)
            .context("failed to write getting-started.mdx")?;
        tracing::info!("created docs/getting-started.mdx");
    }

    tracing::info!("initialization complete!");
    tracing::info!("run 'inlay build' and then 'inlay serve' to preview the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Inlay configuration

[site]
# Site title
title = "My Documentation"

# Base URL (for deployment)
base_url = "/"

[docs]
# Source directory for documentation
dir = "docs"

# Output directory for the built site
output = "dist"

[components]
# Map component tags used in content to HTML elements. Tags not listed
# here must be registered programmatically or they fail the build check.
Badge = "mark"

# Tags to unset so they fall back to the built-in defaults:
# unset = ["inlineCode"]

[build]
# Enable CSS minification
minify = true

# Abort the build on the first unresolved component tag
strict = false
"#;

const DEFAULT_INDEX: &str = r#"---
title: Welcome
order: 1
---

# Welcome to Your Documentation

This is your documentation site, powered by **inlay**.

:::tip Quick start
Head over to [Getting Started](/getting-started/) to write your first page.
:::

Pages are plain Markdown with two extras: `:::` callout blocks and
component tags like <Badge kind="new">this one</Badge>, resolved through
the site's component registry.
"#;

const DEFAULT_GETTING_STARTED: &str = r#"---
title: Getting Started
order: 2
---

# Getting Started

This guide covers the basics of writing inlay documentation.

## Pages

Create `.mdx` or `.md` files in the `docs/` directory. Each file can start
with frontmatter:

```mdx
---
title: Page Title
order: 1
---

# Your Content Here
```

Set `draft: true` to keep a page out of the built site while it is still
checked by `inlay check`.

## Callouts

Wrap a block in `:::` fences to render it as a callout:

:::warning Heads up
Callouts can hold any Markdown, including `code` and nested callouts.
:::

## Components

Capitalized tags resolve through the component registry. The starter
config maps `Badge` to a plain `mark` element:

<Badge kind="new">like this</Badge>

A tag with no registry entry fails loudly, so broken references never
vanish silently. Find them all at once with:

```bash
inlay check
```

## Building

```bash
inlay build
inlay serve
```
"#;
