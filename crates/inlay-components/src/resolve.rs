//! Tag resolution: from a tag reference to the component that renders it.

use std::fmt;

use crate::component::{Component, Props};
use crate::error::ResolveError;
use crate::node::{ElementNode, Node};
use crate::registry::Registry;

/// How an element names its implementation.
#[derive(Debug, Clone, PartialEq)]
pub enum TagRef {
    /// The implementation itself. No lookup happens, and no registry can
    /// shadow it.
    Direct(Component),
    /// A symbolic name resolved through the registry chain.
    Name(String),
    /// A dotted name like `Chart.Line`: the root resolves through the
    /// chain, then each member is projected off the resulting module.
    Path {
        root: String,
        members: Vec<String>,
    },
}

impl TagRef {
    /// Parse a textual tag, splitting dotted member paths.
    pub fn parse(tag: &str) -> TagRef {
        match tag.split_once('.') {
            Some((root, rest)) if !root.is_empty() && !rest.is_empty() => TagRef::Path {
                root: root.to_string(),
                members: rest.split('.').map(str::to_string).collect(),
            },
            _ => TagRef::Name(tag.to_string()),
        }
    }
}

impl From<&str> for TagRef {
    fn from(tag: &str) -> Self {
        TagRef::parse(tag)
    }
}

impl From<String> for TagRef {
    fn from(tag: String) -> Self {
        TagRef::parse(&tag)
    }
}

impl From<Component> for TagRef {
    fn from(component: Component) -> Self {
        TagRef::Direct(component)
    }
}

impl fmt::Display for TagRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagRef::Name(name) => f.write_str(name),
            TagRef::Path { root, members } => {
                f.write_str(root)?;
                for member in members {
                    write!(f, ".{member}")?;
                }
                Ok(())
            }
            TagRef::Direct(Component::Element(name)) => f.write_str(name),
            TagRef::Direct(_) => f.write_str("<component>"),
        }
    }
}

/// Whether a tag is a literal HTML element name rather than a component
/// reference. Lowercase-first tags pass through to HTML; capitalized tags
/// must resolve to a registered component.
fn is_intrinsic(tag: &str) -> bool {
    tag.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

/// Resolve a plain name: effective registry first, then the built-in
/// table, then intrinsic passthrough for lowercase tags.
fn resolve_name(
    name: &str,
    registry: &Registry,
    builtins: &Registry,
) -> Result<Component, ResolveError> {
    if let Some(component) = registry.get(name) {
        return Ok(component.clone());
    }
    if let Some(component) = builtins.get(name) {
        return Ok(component.clone());
    }
    if is_intrinsic(name) {
        return Ok(Component::element(name));
    }
    Err(ResolveError::UnresolvedTag {
        tag: name.to_string(),
    })
}

/// Select the implementation for a tag.
///
/// A direct reference wins outright. A dotted path resolves its root like
/// a plain name, then walks members; a missing member or a non-module
/// root is an error, never a silent fallback. A plain name goes through
/// the registry chain.
pub fn resolve(
    tag: &TagRef,
    registry: &Registry,
    builtins: &Registry,
) -> Result<Component, ResolveError> {
    match tag {
        TagRef::Direct(component) => Ok(component.clone()),
        TagRef::Name(name) => resolve_name(name, registry, builtins),
        TagRef::Path { root, members } => {
            let mut current = resolve_name(root, registry, builtins)?;
            let mut path = root.clone();
            for member in members {
                if !matches!(current, Component::Module(_)) {
                    return Err(ResolveError::NotAModule { path });
                }
                current = current
                    .member(member)
                    .cloned()
                    .ok_or_else(|| ResolveError::UnresolvedMember {
                        path: path.clone(),
                        member: member.clone(),
                    })?;
                path.push('.');
                path.push_str(member);
            }
            Ok(current)
        }
    }
}

/// One resolved element, ready for the renderer: the chosen component plus
/// the element's own props, children, and identity hint.
#[derive(Debug)]
pub struct ResolvedElement<'a> {
    pub component: Component,
    pub props: &'a Props,
    pub children: &'a [Node],
    pub key: Option<&'a str>,
}

/// Resolve an element node against the given registries.
///
/// Per-element overrides on the node are the caller's concern; they must
/// already be merged into `registry` before calling this.
pub fn resolve_element<'a>(
    element: &'a ElementNode,
    registry: &Registry,
    builtins: &Registry,
) -> Result<ResolvedElement<'a>, ResolveError> {
    Ok(ResolvedElement {
        component: resolve(&element.tag, registry, builtins)?,
        props: &element.props,
        children: &element.children,
        key: element.key.as_deref(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::builtins;
    use crate::registry::{merge, Overrides};
    use pretty_assertions::assert_eq;

    fn chart_module() -> Component {
        Component::module([
            ("Line", Component::element("canvas")),
            ("Axis", Component::module([("X", Component::element("g"))])),
        ])
    }

    fn registry() -> Registry {
        Registry::from_iter([
            ("Greeting", Component::element("h1")),
            ("Chart", chart_module()),
        ])
    }

    #[test]
    fn parse_plain_and_dotted_tags() {
        assert_eq!(TagRef::parse("Callout"), TagRef::Name("Callout".into()));
        assert_eq!(
            TagRef::parse("Chart.Line"),
            TagRef::Path {
                root: "Chart".into(),
                members: vec!["Line".into()],
            }
        );
        assert_eq!(
            TagRef::parse("Chart.Axis.X"),
            TagRef::Path {
                root: "Chart".into(),
                members: vec!["Axis".into(), "X".into()],
            }
        );
        // Degenerate dots stay plain names and fail resolution loudly.
        assert_eq!(TagRef::parse(".Chart"), TagRef::Name(".Chart".into()));
    }

    #[test]
    fn direct_reference_skips_the_registry() {
        // A shadowing registry entry must not divert a direct reference.
        let shadowed = Registry::from_iter([("Greeting", Component::element("p"))]);
        let direct = TagRef::Direct(Component::element("h1"));
        let resolved = resolve(&direct, &shadowed, builtins()).unwrap();
        assert_eq!(resolved, Component::element("h1"));
    }

    #[test]
    fn registered_name_resolves() {
        let resolved = resolve(&TagRef::parse("Greeting"), &registry(), builtins()).unwrap();
        assert_eq!(resolved, Component::element("h1"));
    }

    #[test]
    fn unknown_capitalized_tag_is_an_error() {
        let err = resolve(&TagRef::parse("Farewell"), &registry(), builtins()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnresolvedTag {
                tag: "Farewell".into()
            }
        );
    }

    #[test]
    fn lowercase_tag_passes_through_as_html() {
        let resolved = resolve(&TagRef::parse("aside"), &Registry::new(), builtins()).unwrap();
        assert_eq!(resolved, Component::element("aside"));
    }

    #[test]
    fn registry_can_take_over_a_lowercase_tag() {
        let custom = Registry::from_iter([("aside", Component::element("section"))]);
        let resolved = resolve(&TagRef::parse("aside"), &custom, builtins()).unwrap();
        assert_eq!(resolved, Component::element("section"));
    }

    #[test]
    fn builtin_fallback_applies_when_registry_misses() {
        let resolved = resolve(&TagRef::parse("inlineCode"), &Registry::new(), builtins()).unwrap();
        assert_eq!(resolved, Component::element("code"));
    }

    #[test]
    fn registry_overrides_builtin() {
        let custom = Registry::from_iter([("inlineCode", Component::element("kbd"))]);
        let resolved = resolve(&TagRef::parse("inlineCode"), &custom, builtins()).unwrap();
        assert_eq!(resolved, Component::element("kbd"));
    }

    #[test]
    fn unset_builtin_override_falls_back_to_builtin() {
        let custom = merge(
            &Registry::from_iter([("inlineCode", Component::element("kbd"))]),
            &Overrides::new().unset("inlineCode"),
        );
        let resolved = resolve(&TagRef::parse("inlineCode"), &custom, builtins()).unwrap();
        assert_eq!(resolved, Component::element("code"));
    }

    #[test]
    fn dotted_path_projects_members() {
        let resolved = resolve(&TagRef::parse("Chart.Line"), &registry(), builtins()).unwrap();
        assert_eq!(resolved, Component::element("canvas"));
        let nested = resolve(&TagRef::parse("Chart.Axis.X"), &registry(), builtins()).unwrap();
        assert_eq!(nested, Component::element("g"));
    }

    #[test]
    fn dotted_path_with_unknown_root_is_an_error() {
        let err = resolve(&TagRef::parse("Widgets.Dial"), &registry(), builtins()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnresolvedTag {
                tag: "Widgets".into()
            }
        );
    }

    #[test]
    fn dotted_path_with_missing_member_is_an_error() {
        let err = resolve(&TagRef::parse("Chart.Pie"), &registry(), builtins()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnresolvedMember {
                path: "Chart".into(),
                member: "Pie".into(),
            }
        );
    }

    #[test]
    fn member_projection_off_a_non_module_is_an_error() {
        let err = resolve(&TagRef::parse("Greeting.Loud"), &registry(), builtins()).unwrap_err();
        assert_eq!(err, ResolveError::NotAModule { path: "Greeting".into() });
        // Deeper projection reports the full path walked so far.
        let err = resolve(&TagRef::parse("Chart.Line.Dashed"), &registry(), builtins()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::NotAModule {
                path: "Chart.Line".into()
            }
        );
    }

    #[test]
    fn resolve_element_borrows_props_and_children() {
        let element = ElementNode::new("Greeting")
            .attr("tone", "warm")
            .key("g-1")
            .child(Node::text("hey"));
        let resolved = resolve_element(&element, &registry(), builtins()).unwrap();
        assert_eq!(resolved.component, Component::element("h1"));
        assert_eq!(resolved.props.get_str("tone"), Some("warm"));
        assert_eq!(resolved.children, &[Node::text("hey")]);
        assert_eq!(resolved.key, Some("g-1"));
    }

    #[test]
    fn display_shows_the_full_dotted_path() {
        assert_eq!(TagRef::parse("Chart.Axis.X").to_string(), "Chart.Axis.X");
        assert_eq!(TagRef::parse("Callout").to_string(), "Callout");
    }
}
