//! Scoped CSS custom properties.
//!
//! States export their values to style sheets through custom properties.
//! A [`VarScope`] namespaces every property it creates, so two states never
//! collide even when they use the same short names:
//!
//! ```
//! use statecss::VarScope;
//!
//! let scope = VarScope::new("view").unwrap();
//! let index = scope.var("index").unwrap();
//!
//! assert_eq!(index.name(), "--view-index");
//! assert_eq!(index.reference(), "var(--view-index)");
//! assert_eq!(index.reference_or("0"), "var(--view-index, 0)");
//! ```

use std::fmt;

use crate::error::CssError;
use crate::selectors::is_ident;

/// A validated custom property name, including the leading `--`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CssVar(String);

impl CssVar {
    /// Creates a property from a bare identifier (`index` becomes `--index`).
    pub fn new(name: &str) -> Result<Self, CssError> {
        if !is_ident(name) {
            return Err(CssError::InvalidIdentifier(name.to_string()));
        }
        Ok(Self(format!("--{name}")))
    }

    /// The full property name, e.g. `--view-index`.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// A `var()` reference to this property.
    pub fn reference(&self) -> String {
        format!("var({})", self.0)
    }

    /// A `var()` reference with a fallback value.
    pub fn reference_or(&self, fallback: &str) -> String {
        format!("var({}, {})", self.0, fallback)
    }
}

impl fmt::Display for CssVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Factory for custom properties sharing a prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarScope {
    prefix: String,
}

impl VarScope {
    pub fn new(prefix: &str) -> Result<Self, CssError> {
        if !is_ident(prefix) {
            return Err(CssError::InvalidIdentifier(prefix.to_string()));
        }
        Ok(Self {
            prefix: prefix.to_string(),
        })
    }

    /// Scope for a compile-time constant prefix.
    pub fn from_static(prefix: &'static str) -> Self {
        debug_assert!(is_ident(prefix), "invalid scope prefix {prefix:?}");
        Self {
            prefix: prefix.to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Declares `--{prefix}-{name}` for a compile-time constant name.
    pub fn var_static(&self, name: &'static str) -> CssVar {
        debug_assert!(is_ident(name), "invalid property name {name:?}");
        CssVar(format!("--{}-{}", self.prefix, name))
    }

    /// Declares `--{prefix}-{name}`.
    pub fn var(&self, name: &str) -> Result<CssVar, CssError> {
        if !is_ident(name) {
            return Err(CssError::InvalidIdentifier(name.to_string()));
        }
        Ok(CssVar(format!("--{}-{}", self.prefix, name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_names_rejected() {
        assert!(CssVar::new("has space").is_err());
        assert!(VarScope::new("").is_err());
        let scope = VarScope::new("act").unwrap();
        assert_eq!(
            scope.var("a.b"),
            Err(CssError::InvalidIdentifier("a.b".to_string()))
        );
    }

    #[test]
    fn test_display_is_property_name() {
        let var = CssVar::new("gap").unwrap();
        assert_eq!(var.to_string(), "--gap");
    }
}
