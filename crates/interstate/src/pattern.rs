//! Animation name classification.
//!
//! A state only cares about the animations it drives. The pattern decides
//! which `animation-name`s belong to it. Suffix patterns match at a word
//! boundary: `"activating"` matches `anim-activating` and `activating` but
//! not `deactivating`.
//!
//! ```
//! use interstate::AnimationPattern;
//!
//! let pattern = AnimationPattern::from(["activating", "deactivating"]);
//! assert!(pattern.matches("btn-activating"));
//! assert!(pattern.matches("btn-deactivating"));
//! assert!(!pattern.matches("btn-activating-glow"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type NamePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum AnimationPattern {
    /// A single suffix.
    Suffix(Cow<'static, str>),
    /// Any of several suffixes.
    AnyOf(Vec<Cow<'static, str>>),
    /// A caller-supplied test over the whole name.
    Predicate(NamePredicate),
}

impl AnimationPattern {
    pub fn predicate(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Suffix(suffix) => suffix_matches(name, suffix),
            Self::AnyOf(suffixes) => suffixes.iter().any(|s| suffix_matches(name, s)),
            Self::Predicate(f) => f(name),
        }
    }
}

impl fmt::Debug for AnimationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suffix(s) => f.debug_tuple("Suffix").field(s).finish(),
            Self::AnyOf(s) => f.debug_tuple("AnyOf").field(s).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<&'static str> for AnimationPattern {
    fn from(suffix: &'static str) -> Self {
        Self::Suffix(Cow::Borrowed(suffix))
    }
}

impl From<String> for AnimationPattern {
    fn from(suffix: String) -> Self {
        Self::Suffix(Cow::Owned(suffix))
    }
}

impl From<&'static [&'static str]> for AnimationPattern {
    fn from(suffixes: &'static [&'static str]) -> Self {
        Self::AnyOf(suffixes.iter().map(|s| Cow::Borrowed(*s)).collect())
    }
}

impl<const N: usize> From<[&'static str; N]> for AnimationPattern {
    fn from(suffixes: [&'static str; N]) -> Self {
        Self::AnyOf(suffixes.into_iter().map(Cow::Borrowed).collect())
    }
}

impl From<Vec<String>> for AnimationPattern {
    fn from(suffixes: Vec<String>) -> Self {
        Self::AnyOf(suffixes.into_iter().map(Cow::Owned).collect())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `name` ends with `suffix`, and the character before the suffix is absent
/// or not a word character.
pub fn suffix_matches(name: &str, suffix: &str) -> bool {
    if suffix.is_empty() || !name.ends_with(suffix) {
        return false;
    }
    let head = &name[..name.len() - suffix.len()];
    head.chars().next_back().is_none_or(|c| !is_word_char(c))
}
