//! The parsed content tree handed to the renderer.

use crate::component::{PropValue, Props};
use crate::registry::Overrides;
use crate::resolve::TagRef;

/// One node of a content tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Plain text, escaped on output.
    Text(String),
    /// Pre-rendered HTML emitted verbatim.
    Raw(String),
    /// An element rendered through tag resolution.
    Element(ElementNode),
    /// A provider boundary: the children see `overrides` layered over the
    /// inherited registry.
    Scope(ScopeNode),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn raw(html: impl Into<String>) -> Self {
        Node::Raw(html.into())
    }

    pub fn scope(overrides: Overrides, children: Vec<Node>) -> Self {
        Node::Scope(ScopeNode {
            overrides,
            children,
        })
    }
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Self {
        Node::Element(element)
    }
}

/// An element occurrence: which tag, with what attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    /// What should render this node.
    pub tag: TagRef,
    /// Attributes forwarded to the implementation.
    pub props: Props,
    /// Identity hint passed through untouched, never interpreted here.
    pub key: Option<String>,
    /// Extra overrides for this element only, applied to its resolution
    /// and visible to its children.
    pub overrides: Option<Overrides>,
    /// Child nodes forwarded to the implementation unchanged.
    pub children: Vec<Node>,
    /// 1-based source line, when the parser knows it.
    pub line: Option<usize>,
}

impl ElementNode {
    pub fn new(tag: impl Into<TagRef>) -> Self {
        ElementNode {
            tag: tag.into(),
            props: Props::new(),
            key: None,
            overrides: None,
            children: Vec::new(),
            line: None,
        }
    }

    pub fn prop(mut self, name: impl Into<String>, value: PropValue) -> Self {
        self.props.set(name, value);
        self
    }

    /// String-attribute shorthand.
    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.prop(name, PropValue::String(value.into()))
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// A provider boundary in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeNode {
    pub overrides: Overrides,
    pub children: Vec<Node>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use pretty_assertions::assert_eq;

    #[test]
    fn element_builder_fills_fields() {
        let el = ElementNode::new("Callout")
            .attr("kind", "warning")
            .key("c-1")
            .child(Node::text("Mind the gap"))
            .at_line(12);
        assert_eq!(el.tag, TagRef::Name("Callout".into()));
        assert_eq!(el.props.get_str("kind"), Some("warning"));
        assert_eq!(el.key.as_deref(), Some("c-1"));
        assert_eq!(el.children, vec![Node::text("Mind the gap")]);
        assert_eq!(el.line, Some(12));
    }

    #[test]
    fn key_is_not_a_prop() {
        let el = ElementNode::new("Row").key("row-7");
        assert!(el.props.is_empty());
    }

    #[test]
    fn scope_node_carries_overrides() {
        let node = Node::scope(
            Overrides::new().set("Greeting", Component::element("h1")),
            vec![Node::text("hello")],
        );
        match node {
            Node::Scope(scope) => {
                assert_eq!(scope.overrides.len(), 1);
                assert_eq!(scope.children.len(), 1);
            }
            other => panic!("expected scope node, got {other:?}"),
        }
    }
}
