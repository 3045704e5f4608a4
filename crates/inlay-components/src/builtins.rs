//! Built-in fallbacks consulted when the registry chain misses.

use std::sync::LazyLock;

use crate::component::Component;
use crate::registry::Registry;

static BUILTINS: LazyLock<Registry> = LazyLock::new(|| {
    Registry::from_iter([
        // Inline code spans render as a bare `code` element unless a
        // theme takes them over.
        ("inlineCode", Component::element("code")),
        // The document shell is transparent by default: children render
        // with no extra markup around them.
        ("wrapper", Component::func(|_props, slot| slot.render())),
    ])
});

/// The built-in fallback table.
///
/// Looked up after the effective registry on every tag miss, so unsetting
/// an override restores these defaults rather than leaving a hole.
pub fn builtins() -> &'static Registry {
    &BUILTINS
}
