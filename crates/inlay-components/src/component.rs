//! Component implementations and the props they receive.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::RenderError;
use crate::registry::Overrides;

/// Signature of a programmatic component.
///
/// The component receives the element's attributes and a [`Slot`] through
/// which it can render the element's children, and produces an HTML
/// fragment.
pub type ComponentFn =
    dyn Fn(&Props, &mut dyn Slot) -> Result<String, RenderError> + Send + Sync;

/// An implementation a tag can resolve to.
#[derive(Clone)]
pub enum Component {
    /// Render as the named HTML element, forwarding props as attributes.
    Element(String),
    /// Render by calling a function.
    Func(Arc<ComponentFn>),
    /// A bundle of named components, addressed through dotted tags like
    /// `Chart.Line`.
    Module(HashMap<String, Component>),
}

impl Component {
    /// An implementation that renders as the named HTML element.
    pub fn element(name: impl Into<String>) -> Self {
        Component::Element(name.into())
    }

    /// An implementation backed by a render function.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Props, &mut dyn Slot) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        Component::Func(Arc::new(f))
    }

    /// A module built from named members.
    pub fn module<N>(members: impl IntoIterator<Item = (N, Component)>) -> Self
    where
        N: Into<String>,
    {
        Component::Module(
            members
                .into_iter()
                .map(|(name, component)| (name.into(), component))
                .collect(),
        )
    }

    /// Look up a member by name. Only modules have members.
    pub fn member(&self, name: &str) -> Option<&Component> {
        match self {
            Component::Module(members) => members.get(name),
            _ => None,
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Element(name) => f.debug_tuple("Element").field(name).finish(),
            Component::Func(_) => f.write_str("Func(..)"),
            Component::Module(members) => {
                let mut names: Vec<&str> = members.keys().map(String::as_str).collect();
                names.sort_unstable();
                f.debug_tuple("Module").field(&names).finish()
            }
        }
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Component::Element(a), Component::Element(b)) => a == b,
            // Functions compare by identity ie two clones of the same
            // registration are equal, two separate registrations are not.
            (Component::Func(a), Component::Func(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Component::Module(a), Component::Module(b)) => a == b,
            _ => false,
        }
    }
}

/// A single attribute value on a content element.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Quoted string literal: `kind="note"`.
    String(String),
    /// Bare flag or explicit boolean: `collapsed` or `collapsed={false}`.
    Bool(bool),
    /// Brace expression preserved verbatim: `columns={spec.cols}`.
    Expression(String),
}

impl PropValue {
    /// The string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Attributes forwarded to a component, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    entries: Vec<(String, PropValue)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any earlier value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: PropValue) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: PropValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// The attribute's string payload, if present and a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropValue::as_str)
    }

    /// Remove an attribute, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, PropValue)> for Props {
    fn from_iter<I: IntoIterator<Item = (N, PropValue)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (name, value) in iter {
            props.set(name, value);
        }
        props
    }
}

/// Handle through which a component renders the children of its element.
///
/// The rendering host implements this. `render_with` lets a component act
/// as a provider for its own children: the overrides are published for
/// that render only and retracted afterwards.
pub trait Slot {
    /// Render the element's children under the current scope.
    fn render(&mut self) -> Result<String, RenderError>;

    /// Render the element's children with `overrides` layered over the
    /// current scope.
    fn render_with(&mut self, overrides: &Overrides) -> Result<String, RenderError>;

    /// Whether the element has any children.
    fn is_empty(&self) -> bool;
}
