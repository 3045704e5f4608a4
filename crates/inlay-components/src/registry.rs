//! Tag-to-component registries and the merge that layers them.

use std::collections::HashMap;
use std::sync::Arc;

use crate::component::Component;

/// An immutable mapping from tag name to implementation.
///
/// Registries are shared by handle, never mutated in place. Layering
/// overrides on top of one goes through [`merge`], which builds a fresh
/// registry and leaves both inputs untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    entries: Arc<HashMap<String, Component>>,
}

impl Registry {
    /// A registry with no entries.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered tag names, sorted for stable listings.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<N: Into<String>> FromIterator<(N, Component)> for Registry {
    fn from_iter<I: IntoIterator<Item = (N, Component)>>(iter: I) -> Self {
        Registry {
            entries: Arc::new(
                iter.into_iter()
                    .map(|(name, component)| (name.into(), component))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Patch {
    Set(Component),
    Unset,
}

/// Overrides a provider layers onto the registry it inherits.
///
/// Patches apply in insertion order, so a later patch for the same tag
/// wins. Unsetting a tag removes it outright, which sends later lookups
/// to the built-in fallback table instead of the inherited entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    patches: Vec<(String, Patch)>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `name` to `component` in the merged registry.
    pub fn set(mut self, name: impl Into<String>, component: Component) -> Self {
        self.patches.push((name.into(), Patch::Set(component)));
        self
    }

    /// Remove `name` from the merged registry.
    pub fn unset(mut self, name: impl Into<String>) -> Self {
        self.patches.push((name.into(), Patch::Unset));
        self
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Tag names touched by these overrides, in patch order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patches.iter().map(|(name, _)| name.as_str())
    }

    /// Append another override set after this one. Patches still apply in
    /// order, so `other` wins where the two touch the same tag.
    pub fn layer(mut self, other: &Overrides) -> Self {
        self.patches.extend(other.patches.iter().cloned());
        self
    }
}

/// Layer `overrides` over `base`, producing a new registry.
///
/// Neither input is modified, and the result is always freshly built,
/// even when `overrides` is empty. Entries not named by a patch carry
/// over from `base` unchanged.
pub fn merge(base: &Registry, overrides: &Overrides) -> Registry {
    let mut entries: HashMap<String, Component> = base.entries.as_ref().clone();
    for (name, patch) in &overrides.patches {
        match patch {
            Patch::Set(component) => {
                entries.insert(name.clone(), component.clone());
            }
            Patch::Unset => {
                entries.remove(name);
            }
        }
    }
    Registry {
        entries: Arc::new(entries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> Registry {
        Registry::from_iter([
            ("Greeting", Component::element("h1")),
            ("Farewell", Component::element("h2")),
        ])
    }

    #[test]
    fn merge_with_empty_overrides_is_identity() {
        let a = base();
        let merged = merge(&a, &Overrides::new());
        assert_eq!(merged, a);
        // The base survives the merge untouched.
        assert_eq!(a.len(), 2);
        assert!(a.contains("Greeting"));
    }

    #[test]
    fn override_wins_over_base() {
        let a = base();
        let merged = merge(&a, &Overrides::new().set("Greeting", Component::element("p")));
        assert_eq!(merged.get("Greeting"), Some(&Component::element("p")));
        // Untouched entries carry over, and the base keeps its own value.
        assert_eq!(merged.get("Farewell"), Some(&Component::element("h2")));
        assert_eq!(a.get("Greeting"), Some(&Component::element("h1")));
    }

    #[test]
    fn disjoint_overrides_union() {
        let merged = merge(
            &base(),
            &Overrides::new().set("Aside", Component::element("aside")),
        );
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.names(), vec!["Aside", "Farewell", "Greeting"]);
    }

    #[test]
    fn unset_removes_inherited_entry() {
        let merged = merge(&base(), &Overrides::new().unset("Greeting"));
        assert_eq!(merged.get("Greeting"), None);
        assert!(merged.contains("Farewell"));
    }

    #[test]
    fn unset_of_unknown_tag_is_a_no_op() {
        let merged = merge(&base(), &Overrides::new().unset("Nope"));
        assert_eq!(merged, base());
    }

    #[test]
    fn layered_overrides_apply_in_order() {
        let theme = Overrides::new().set("Greeting", Component::element("p"));
        let site = Overrides::new()
            .set("Greeting", Component::element("mark"))
            .unset("Farewell");
        let merged = merge(&base(), &theme.layer(&site));
        assert_eq!(merged.get("Greeting"), Some(&Component::element("mark")));
        assert_eq!(merged.get("Farewell"), None);
    }

    #[test]
    fn later_patch_wins() {
        let merged = merge(
            &base(),
            &Overrides::new()
                .set("Greeting", Component::element("p"))
                .unset("Greeting"),
        );
        assert_eq!(merged.get("Greeting"), None);

        let merged = merge(
            &base(),
            &Overrides::new()
                .unset("Greeting")
                .set("Greeting", Component::element("p")),
        );
        assert_eq!(merged.get("Greeting"), Some(&Component::element("p")));
    }
}
