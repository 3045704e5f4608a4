//! The default theme registry and config-driven overrides.

use inlay_components::{Component, Overrides};

use crate::renderer::escape_text;

/// Overrides the builder publishes as the outermost provider.
///
/// Currently one component: `admonition`, which renders the parser's
/// `:::kind title` blocks as a styled aside. Sites layer their own
/// overrides on top, so any of this can be replaced or unset.
pub fn theme_overrides() -> Overrides {
    Overrides::new().set(
        "admonition",
        Component::func(|props, slot| {
            let kind = match props.get_str("kind") {
                Some(kind) if kind.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') => kind,
                _ => "note",
            };
            let mut out = format!(r#"<aside class="admonition admonition-{kind}">"#);
            if let Some(title) = props.get_str("title") {
                out.push_str(&format!(
                    r#"<p class="admonition-title">{}</p>"#,
                    escape_text(title)
                ));
            }
            out.push_str(r#"<div class="admonition-body">"#);
            out.push_str(&slot.render()?);
            out.push_str("</div></aside>");
            Ok(out)
        }),
    )
}

/// Convert a site config's component table into overrides.
///
/// `remap` maps tag names to plain HTML element names; `unset` removes
/// tags so resolution falls back to the built-in table. Entries that are
/// not usable element names are skipped with a warning rather than
/// failing the build, leaving the inherited mapping in effect.
pub fn config_overrides(remap: &[(String, String)], unset: &[String]) -> Overrides {
    let mut overrides = Overrides::new();
    for (tag, target) in remap {
        if !is_element_name(target) {
            tracing::warn!(tag, target, "ignoring component remap to invalid element name");
            continue;
        }
        overrides = overrides.set(tag.clone(), Component::element(target.clone()));
    }
    for tag in unset {
        overrides = overrides.unset(tag.clone());
    }
    overrides
}

fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
