//! MDX-flavored markdown parsing into component content trees.
//!
//! This crate is the content source: it extracts YAML frontmatter, parses
//! the markdown body into an `inlay-components` [`Node`](inlay_components::Node)
//! tree, collects a table of contents, and recognizes `:::` admonition
//! blocks and inline `<Component>` tags along the way.

pub mod frontmatter;
pub mod inline;
pub mod parser;

pub use frontmatter::{Frontmatter, FrontmatterError};
pub use parser::{parse_mdx, slugify, Document, ParseError, TocEntry};
