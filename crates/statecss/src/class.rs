//! State-indicating class names.

use std::fmt;

use crate::error::CssError;
use crate::selectors::is_ident;

/// A class name such as `is-active`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(String);

impl ClassName {
    pub fn new(name: &str) -> Result<Self, CssError> {
        if !is_ident(name) {
            return Err(CssError::InvalidIdentifier(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// Builds the `is-{phase}` class for a phase name.
    ///
    /// Phase names are compile-time constants, so this does not validate.
    pub fn state(phase: &str) -> Self {
        Self(format!("is-{phase}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The class as a selector, e.g. `.is-active`.
    pub fn selector(&self) -> String {
        format!(".{}", self.0)
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Joins class names into a `class` attribute value, skipping duplicates.
pub fn join_classes<'a>(classes: impl IntoIterator<Item = &'a ClassName>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for class in classes {
        if !seen.contains(&class.as_str()) {
            seen.push(class.as_str());
        }
    }
    seen.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_class() {
        let class = ClassName::state("activating");
        assert_eq!(class.as_str(), "is-activating");
        assert_eq!(class.selector(), ".is-activating");
    }

    #[test]
    fn test_join_skips_duplicates() {
        let a = ClassName::state("active");
        let b = ClassName::state("expanded");
        assert_eq!(join_classes([&a, &b, &a]), "is-active is-expanded");
    }
}
