//! Errors raised while resolving tags and rendering content.

use thiserror::Error;

/// Failure to select an implementation for a tag.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// No registry entry, no built-in, and the tag is capitalized so it
    /// cannot pass through as plain HTML.
    #[error("no component registered for tag `{tag}`")]
    UnresolvedTag { tag: String },

    /// A dotted tag tried to project a member off something that is not a
    /// module.
    #[error("`{path}` is not a module and has no members")]
    NotAModule { path: String },

    /// A dotted tag named a member the module does not export.
    #[error("module `{path}` has no member `{member}`")]
    UnresolvedMember { path: String, member: String },
}

/// Failure while rendering a content tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A module was used as a tag directly; a member must be selected.
    #[error("module `{tag}` cannot render directly; use a member like `{tag}.Name`")]
    ModuleAsTag { tag: String },

    /// A function component reported a failure of its own.
    #[error("component `{tag}` failed: {message}")]
    Component { tag: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_tag() {
        let err = ResolveError::UnresolvedTag {
            tag: "Farewell".into(),
        };
        assert_eq!(
            err.to_string(),
            "no component registered for tag `Farewell`"
        );

        let err = RenderError::ModuleAsTag { tag: "Chart".into() };
        assert!(err.to_string().contains("Chart.Name"));
    }

    #[test]
    fn resolve_errors_convert_into_render_errors() {
        let err: RenderError = ResolveError::NotAModule {
            path: "Greeting".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "`Greeting` is not a module and has no members"
        );
    }
}
