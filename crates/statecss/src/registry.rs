//! Append-only registries read at style-computation time.
//!
//! Components contribute animation references (a checkbox registers its
//! check animation, a state registers its transition animations). The
//! composed value becomes the `animation` shorthand of the owning element.
//! A registry is a plain value created at setup and passed by reference; it
//! is never a hidden global.

use crate::vars::CssVar;

/// Ordered, duplicate-free list of animation variable references.
///
/// ```
/// use statecss::{AnimationRegistry, CssVar};
///
/// let mut registry = AnimationRegistry::new();
/// registry.register(CssVar::new("check-anim").unwrap());
/// registry.register(CssVar::new("active-anim").unwrap());
///
/// assert_eq!(registry.compose(), "var(--check-anim), var(--active-anim)");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnimationRegistry {
    entries: Vec<CssVar>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `var` unless already registered. Returns its position.
    pub fn register(&mut self, var: CssVar) -> usize {
        if let Some(index) = self.entries.iter().position(|v| *v == var) {
            return index;
        }
        log::trace!("animation registry: registered {var}");
        self.entries.push(var);
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CssVar> {
        self.entries.iter()
    }

    /// Comma-separated `var()` references, or `none` when empty.
    pub fn compose(&self) -> String {
        if self.entries.is_empty() {
            return "none".to_string();
        }
        self.entries
            .iter()
            .map(CssVar::reference)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = AnimationRegistry::new();
        let a = CssVar::new("a").unwrap();
        assert_eq!(registry.register(a.clone()), 0);
        assert_eq!(registry.register(CssVar::new("b").unwrap()), 1);
        assert_eq!(registry.register(a), 0);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_empty_registry_composes_none() {
        assert_eq!(AnimationRegistry::new().compose(), "none");
    }
}
