//! Scope-threaded rendering of content trees to HTML.
//!
//! The renderer walks a [`Node`] tree, pushing a scope frame for every
//! provider boundary it descends into and resolving each element's tag
//! against the registry visible at that point. Failures stay local: in
//! the default mode a node that cannot render is replaced by a visible
//! error placeholder and its siblings continue, so a broken component
//! reference is loud on the page instead of silently missing.

use inlay_components::{
    builtins, resolve_element, Component, ElementNode, Node, Overrides, Props, PropValue,
    RenderError, ScopeStack, Slot,
};

/// Elements that never carry children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// One failure recorded while rendering in non-strict mode.
#[derive(Debug, Clone)]
pub struct RenderFailure {
    /// The tag that failed to render.
    pub tag: String,
    /// 1-based source line, when the parser recorded one.
    pub line: Option<usize>,
    pub message: String,
}

/// Renders content trees to HTML through the component registry.
pub struct Renderer {
    strict: bool,
    failures: Vec<RenderFailure>,
}

impl Renderer {
    /// A renderer that replaces failed nodes with error placeholders and
    /// records them in [`failures`](Self::failures).
    pub fn new() -> Self {
        Renderer {
            strict: false,
            failures: Vec::new(),
        }
    }

    /// A renderer that propagates the first failure instead of emitting a
    /// placeholder.
    pub fn strict() -> Self {
        Renderer {
            strict: true,
            failures: Vec::new(),
        }
    }

    /// Failures recorded so far, in document order.
    pub fn failures(&self) -> &[RenderFailure] {
        &self.failures
    }

    /// Render nodes with `root` published as the outermost scope.
    pub fn render(&mut self, nodes: &[Node], root: &Overrides) -> Result<String, RenderError> {
        let mut scopes = ScopeStack::new();
        scopes.provide(root, |scopes| self.render_nodes(scopes, nodes))
    }

    /// Render a page's nodes inside the `wrapper` element, so a theme can
    /// take over the document shell by overriding `wrapper`.
    pub fn render_document(
        &mut self,
        nodes: &[Node],
        root: &Overrides,
    ) -> Result<String, RenderError> {
        let page = ElementNode::new("wrapper").children(nodes.to_vec());
        let mut scopes = ScopeStack::new();
        scopes.provide(root, |scopes| self.render_element(scopes, &page))
    }

    fn render_nodes(
        &mut self,
        scopes: &mut ScopeStack,
        nodes: &[Node],
    ) -> Result<String, RenderError> {
        let mut out = String::new();
        for node in nodes {
            out.push_str(&self.render_node(scopes, node)?);
        }
        Ok(out)
    }

    fn render_node(&mut self, scopes: &mut ScopeStack, node: &Node) -> Result<String, RenderError> {
        match node {
            Node::Text(text) => Ok(escape_text(text)),
            Node::Raw(html) => Ok(html.clone()),
            Node::Scope(scope) => scopes.provide(&scope.overrides, |scopes| {
                self.render_nodes(scopes, &scope.children)
            }),
            Node::Element(element) => self.render_element(scopes, element),
        }
    }

    fn render_element(
        &mut self,
        scopes: &mut ScopeStack,
        element: &ElementNode,
    ) -> Result<String, RenderError> {
        match &element.overrides {
            Some(overrides) => {
                scopes.provide(overrides, |scopes| self.render_resolved(scopes, element))
            }
            None => self.render_resolved(scopes, element),
        }
    }

    fn render_resolved(
        &mut self,
        scopes: &mut ScopeStack,
        element: &ElementNode,
    ) -> Result<String, RenderError> {
        let resolved = match resolve_element(element, scopes.current(), builtins()) {
            Ok(resolved) => resolved,
            Err(error) => return self.fail(element, error.into()),
        };

        let rendered = match &resolved.component {
            Component::Element(name) => {
                self.render_html_element(scopes, name, resolved.props, resolved.children)
            }
            Component::Func(func) => {
                let mut slot = ChildSlot {
                    renderer: self,
                    scopes,
                    children: resolved.children,
                };
                func(resolved.props, &mut slot)
            }
            Component::Module(_) => Err(RenderError::ModuleAsTag {
                tag: element.tag.to_string(),
            }),
        };

        match rendered {
            Ok(html) => Ok(html),
            Err(error) => self.fail(element, error),
        }
    }

    fn render_html_element(
        &mut self,
        scopes: &mut ScopeStack,
        name: &str,
        props: &Props,
        children: &[Node],
    ) -> Result<String, RenderError> {
        let mut out = String::new();
        out.push('<');
        out.push_str(name);
        for (prop, value) in props.iter() {
            match value {
                PropValue::String(value) => {
                    out.push(' ');
                    out.push_str(prop);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
                PropValue::Bool(true) => {
                    out.push(' ');
                    out.push_str(prop);
                }
                PropValue::Bool(false) => {}
                PropValue::Expression(expr) => {
                    tracing::debug!(prop, expr, "expression prop dropped in static output");
                }
            }
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&name) {
            return Ok(out);
        }
        out.push_str(&self.render_nodes(scopes, children)?);
        out.push_str("</");
        out.push_str(name);
        out.push('>');
        Ok(out)
    }

    fn fail(&mut self, element: &ElementNode, error: RenderError) -> Result<String, RenderError> {
        if self.strict {
            return Err(error);
        }
        let tag = element.tag.to_string();
        tracing::warn!(tag = %tag, line = ?element.line, %error, "node failed to render");
        self.failures.push(RenderFailure {
            tag: tag.clone(),
            line: element.line,
            message: error.to_string(),
        });
        Ok(format!(
            r#"<div class="render-error">failed to render &lt;{}&gt;: {}</div>"#,
            escape_text(&tag),
            escape_text(&error.to_string()),
        ))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// The handle a function component uses to render its children, backed by
/// the renderer and the scope stack at the component's position.
struct ChildSlot<'a, 'n> {
    renderer: &'a mut Renderer,
    scopes: &'a mut ScopeStack,
    children: &'n [Node],
}

impl Slot for ChildSlot<'_, '_> {
    fn render(&mut self) -> Result<String, RenderError> {
        self.renderer.render_nodes(self.scopes, self.children)
    }

    fn render_with(&mut self, overrides: &Overrides) -> Result<String, RenderError> {
        let renderer = &mut *self.renderer;
        let children = self.children;
        self.scopes
            .provide(overrides, |scopes| renderer.render_nodes(scopes, children))
    }

    fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Escape text content.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value, quotes included.
pub fn escape_attr(text: &str) -> String {
    escape_text(text)
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
