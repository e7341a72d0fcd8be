//! Error types for state styling configuration.
//!
//! Every error here is a configuration mistake made by a component author.
//! They are raised eagerly, when an option is built, rather than when a
//! style sheet is rendered.

use thiserror::Error;

/// Errors that can occur while building state styling configuration.
///
/// # Examples
///
/// ```rust
/// use statecss::{CssError, validate_selector};
///
/// // A trailing combinator is not a valid filter selector
/// let result = validate_selector(".item >");
/// assert!(matches!(result, Err(CssError::InvalidSelector { .. })));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CssError {
    /// A selector string could not be parsed as a filter.
    ///
    /// `reason` contains details about what was unexpected and where.
    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// A custom property, prefix or class name is not a CSS identifier.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}
