//! The stack of registries published by enclosing providers.

use std::sync::LazyLock;

use crate::registry::{merge, Overrides, Registry};

static EMPTY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Registries published by the providers enclosing the current point of
/// evaluation, innermost last.
///
/// A frame is pushed when evaluation enters a provider and popped when it
/// leaves, so a published registry is visible exactly within that
/// provider's subtree. Outside every provider the stack is empty and
/// [`current`](Self::current) yields the empty registry.
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Registry>,
}

impl ScopeStack {
    /// A stack with no published registries, as at the root of a tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry visible at the current point of evaluation.
    pub fn current(&self) -> &Registry {
        self.frames.last().unwrap_or(&EMPTY)
    }

    /// How many provider scopes are currently entered.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Run `f` with `overrides` merged over the inherited registry.
    ///
    /// The merged registry is visible only inside `f`; the frame is
    /// popped again before `provide` returns, whatever `f` returns.
    pub fn provide<T>(
        &mut self,
        overrides: &Overrides,
        f: impl FnOnce(&mut ScopeStack) -> T,
    ) -> T {
        let merged = merge(self.current(), overrides);
        self.frames.push(merged);
        let out = f(self);
        self.frames.pop();
        out
    }
}
