//! Scoped component registry and content model.
//!
//! Documents are parsed into a [`Node`] tree whose elements name their
//! implementation by tag. At render time each tag resolves through the
//! registry published by the nearest enclosing scope, falling back to a
//! small built-in table and finally to plain HTML passthrough for
//! lowercase tags. Scopes are layered with [`ScopeStack::provide`], which
//! merges local [`Overrides`] over the inherited [`Registry`] without
//! mutating it.

pub mod builtins;
pub mod component;
pub mod error;
pub mod node;
pub mod registry;
pub mod resolve;
pub mod scope;

pub use builtins::builtins;
pub use component::{Component, ComponentFn, PropValue, Props, Slot};
pub use error::{RenderError, ResolveError};
pub use node::{ElementNode, Node, ScopeNode};
pub use registry::{merge, Overrides, Registry};
pub use resolve::{resolve, resolve_element, ResolvedElement, TagRef};
pub use scope::ScopeStack;
