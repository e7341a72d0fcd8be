//! Path resolution and matching.
//!
//! Pure functions over `/`-separated pathnames. Nothing here touches a
//! router; callers pass the current pathname in.

use std::fmt;
use std::str::FromStr;

use crate::error::LinkError;

/// The pathname a relative path is resolved against.
///
/// Routers that nest routes hand out the matched route units rather than a
/// single string. A unit may itself contain `/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurrentPath<'a> {
    Pathname(&'a str),
    Units(Vec<&'a str>),
}

impl<'a> CurrentPath<'a> {
    fn segments(&self) -> Vec<&'a str> {
        let units: &[&'a str] = match self {
            Self::Pathname(path) => std::slice::from_ref(path),
            Self::Units(units) => units,
        };
        units
            .iter()
            .copied()
            .flat_map(|unit| unit.split('/'))
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl<'a> From<&'a str> for CurrentPath<'a> {
    fn from(path: &'a str) -> Self {
        Self::Pathname(path)
    }
}

impl<'a> From<&'a String> for CurrentPath<'a> {
    fn from(path: &'a String) -> Self {
        Self::Pathname(path)
    }
}

impl<'a> From<&'a [&'a str]> for CurrentPath<'a> {
    fn from(units: &'a [&'a str]) -> Self {
        Self::Units(units.to_vec())
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for CurrentPath<'a> {
    fn from(units: &'a [&'a str; N]) -> Self {
        Self::Units(units.to_vec())
    }
}

impl<'a> From<&'a [String]> for CurrentPath<'a> {
    fn from(units: &'a [String]) -> Self {
        Self::Units(units.iter().map(String::as_str).collect())
    }
}

/// Resolves `relative` against `current` into an absolute pathname.
///
/// An absolute `relative` is returned with trailing slashes stripped. For a
/// relative one, `.` and empty segments are skipped and `..` pops a segment
/// (never above the root).
///
/// ```
/// use linkcompat::path::resolve_absolute_path_from_relative;
///
/// assert_eq!(resolve_absolute_path_from_relative("/a/b", ".."), "/a");
/// assert_eq!(resolve_absolute_path_from_relative("/a/b", "./c"), "/a/b/c");
/// assert_eq!(resolve_absolute_path_from_relative("/a/b", "/z/"), "/z");
/// assert_eq!(resolve_absolute_path_from_relative(&["/docs", "api/v2"], "../v3"), "/docs/api/v3");
/// ```
pub fn resolve_absolute_path_from_relative<'a>(current: impl Into<CurrentPath<'a>>, relative: &str) -> String {
    if relative.starts_with('/') {
        let trimmed = relative.trim_end_matches('/');
        return if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        };
    }

    let mut segments = current.into().segments();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            literal => segments.push(literal),
        }
    }
    format!("/{}", segments.join("/"))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatchStrategy {
    /// Equal paths, tolerating one trailing slash.
    #[default]
    Exact,
    /// `expected` is `actual` or one of its ancestors.
    Partial,
}

impl MatchStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStrategy {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "partial" => Ok(Self::Partial),
            other => Err(LinkError::UnknownStrategy(other.to_string())),
        }
    }
}

fn differ_by_trailing_slash(a: &str, b: &str) -> bool {
    let (short, long) = if a.len() < b.len() { (a, b) } else { (b, a) };
    long.len() == short.len() + 1 && long.starts_with(short) && long.ends_with('/')
}

/// Whether `actual` matches `expected` under `strategy`.
///
/// Both paths must be absolute; anything else never matches.
pub fn evaluate_path_match(actual: &str, expected: &str, strategy: MatchStrategy) -> bool {
    if !actual.starts_with('/') || !expected.starts_with('/') {
        return false;
    }
    if actual == expected || differ_by_trailing_slash(actual, expected) {
        return true;
    }
    match strategy {
        MatchStrategy::Exact => false,
        MatchStrategy::Partial => {
            if expected == "/" {
                return true;
            }
            if !actual.starts_with(expected) {
                return false;
            }
            // The prefix must end on a segment boundary.
            let boundary = if expected.ends_with('/') {
                expected.len() - 1
            } else {
                expected.len()
            };
            actual.as_bytes().get(boundary) == Some(&b'/')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        assert_eq!(resolve_absolute_path_from_relative("/a/b", ".."), "/a");
        assert_eq!(resolve_absolute_path_from_relative("/a/b", "./c"), "/a/b/c");
        assert_eq!(resolve_absolute_path_from_relative("/a/b/", "c//d/."), "/a/b/c/d");
        assert_eq!(resolve_absolute_path_from_relative("/a", "../../.."), "/");
        assert_eq!(resolve_absolute_path_from_relative("", "x"), "/x");
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(resolve_absolute_path_from_relative("/a/b", "/z"), "/z");
        assert_eq!(resolve_absolute_path_from_relative("/a/b", "/z///"), "/z");
        assert_eq!(resolve_absolute_path_from_relative("/a/b", "/"), "/");
        assert_eq!(resolve_absolute_path_from_relative("/a/b", "///"), "/");
    }

    #[test]
    fn test_resolve_from_units() {
        let units = vec!["/shop".to_string(), "items/42".to_string()];
        assert_eq!(resolve_absolute_path_from_relative(units.as_slice(), "../7"), "/shop/items/7");
    }

    #[test]
    fn test_exact_match() {
        assert!(evaluate_path_match("/about", "/about", MatchStrategy::Exact));
        assert!(evaluate_path_match("/about/", "/about", MatchStrategy::Exact));
        assert!(evaluate_path_match("/about", "/about/", MatchStrategy::Exact));
        assert!(!evaluate_path_match("/about//", "/about", MatchStrategy::Exact));
        assert!(!evaluate_path_match("/about/team", "/about", MatchStrategy::Exact));
        assert!(!evaluate_path_match("x", "/x", MatchStrategy::Exact));
        assert!(!evaluate_path_match("/x", "x", MatchStrategy::Partial));
    }

    #[test]
    fn test_partial_match() {
        assert!(evaluate_path_match("/about/team", "/about", MatchStrategy::Partial));
        assert!(evaluate_path_match("/about/team", "/about/", MatchStrategy::Partial));
        assert!(!evaluate_path_match("/aboutus", "/about", MatchStrategy::Partial));
        assert!(evaluate_path_match("/anything", "/", MatchStrategy::Partial));
        assert!(!evaluate_path_match("/about", "/about/team", MatchStrategy::Partial));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("partial".parse::<MatchStrategy>(), Ok(MatchStrategy::Partial));
        assert_eq!(MatchStrategy::default(), MatchStrategy::Exact);
        assert_eq!(
            "fuzzy".parse::<MatchStrategy>(),
            Err(LinkError::UnknownStrategy("fuzzy".to_string()))
        );
    }
}
