//! Inline style maps with stable identity.
//!
//! A consuming render tree memoizes on the identity of the style object it
//! receives. [`StyleCell`] keeps handing out the same `Arc` until the
//! contents actually change.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::vars::CssVar;

/// Custom property assignments, ordered by property name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: BTreeMap<CssVar, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, var: &CssVar, value: impl Into<String>) {
        self.entries.insert(var.clone(), value.into());
    }

    pub fn with(mut self, var: &CssVar, value: impl Into<String>) -> Self {
        self.set(var, value);
        self
    }

    pub fn get(&self, var: &CssVar) -> Option<&str> {
        self.entries.get(var).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CssVar, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Renders as an inline `style` attribute value.
    pub fn to_inline(&self) -> String {
        self.iter()
            .map(|(var, value)| format!("{var}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Holds the current style and swaps it only on change.
#[derive(Debug, Default)]
pub struct StyleCell {
    current: Arc<StyleMap>,
}

impl StyleCell {
    pub fn new(initial: StyleMap) -> Self {
        Self {
            current: Arc::new(initial),
        }
    }

    /// Replaces the style if `next` differs. Returns true if it was replaced.
    pub fn update(&mut self, next: StyleMap) -> bool {
        if *self.current == next {
            return false;
        }
        self.current = Arc::new(next);
        true
    }

    pub fn get(&self) -> Arc<StyleMap> {
        Arc::clone(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_kept_when_unchanged() {
        let var = CssVar::new("index").unwrap();
        let mut cell = StyleCell::new(StyleMap::new().with(&var, "1"));
        let before = cell.get();

        assert!(!cell.update(StyleMap::new().with(&var, "1")));
        assert!(Arc::ptr_eq(&before, &cell.get()));

        assert!(cell.update(StyleMap::new().with(&var, "2")));
        assert!(!Arc::ptr_eq(&before, &cell.get()));
        assert_eq!(cell.get().get(&var), Some("2"));
    }

    #[test]
    fn test_inline_rendering() {
        let a = CssVar::new("a").unwrap();
        let b = CssVar::new("b").unwrap();
        let style = StyleMap::new().with(&b, "2").with(&a, "1");
        assert_eq!(style.to_inline(), "--a: 1; --b: 2;");
    }
}
