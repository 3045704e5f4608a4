//! Static site builder for inlay documentation.
//!
//! This crate is the rendering host: it walks parsed content trees,
//! threads the component scope chain, resolves every tag through the
//! registry, and emits the finished HTML site with templates, assets, a
//! search index, and a sitemap.

pub mod assets;
pub mod builder;
pub mod renderer;
pub mod templates;
pub mod theme;

pub use builder::{BuildConfig, BuildError, BuildResult, CheckReport, PageFailure, SiteBuilder};
pub use renderer::{RenderFailure, Renderer};
pub use theme::{config_overrides, theme_overrides};
