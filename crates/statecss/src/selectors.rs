//! Filter selector parsing and matching.
//!
//! Filters restrict which descendant elements may report bubbled animation
//! events to a state. A filter is a comma-separated list of compound
//! selectors:
//!
//! - Type selectors: `button`, `div`
//! - Class selectors: `.indicator`
//! - ID selectors: `#thumb`
//! - Pseudo-classes: `:focus`
//! - Attribute selectors: `[role]`, `[role=switch]`
//! - Universal selector: `*`
//!
//! Combinators (descendant, `>`, `+`, `~`) are rejected. A filter only ever
//! inspects the event target itself.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{take_until, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, verify},
    multi::many0,
    sequence::{delimited, preceded, tuple},
};

use crate::error::CssError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Type(String),
    Class(String),
    Id(String),
    Universal,
    PseudoClass(String),
    Attribute(String, Option<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundSelector {
    pub selectors: Vec<Selector>,
}

impl CompoundSelector {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    /// Every simple selector must match the element.
    pub fn matches(&self, element: &ElementMeta) -> bool {
        self.selectors.iter().all(|s| element.matches_selector(s))
    }
}

/// A comma-separated list of compound selectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<CompoundSelector>,
}

impl SelectorList {
    pub fn new(selectors: Vec<CompoundSelector>) -> Self {
        Self { selectors }
    }

    /// Returns true if any selector in the list matches.
    pub fn matches(&self, element: &ElementMeta) -> bool {
        self.selectors.iter().any(|c| c.matches(element))
    }
}

/// What a filter can see of an element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementMeta {
    /// Lowercase tag name (e.g. "button").
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    /// Pseudo-classes currently applying (e.g. "focus", "hover").
    pub pseudo_classes: Vec<String>,
}

impl ElementMeta {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_pseudo_class(mut self, name: impl Into<String>) -> Self {
        self.pseudo_classes.push(name.into());
        self
    }

    /// Checks if this element matches a simple selector.
    pub fn matches_selector(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Type(name) => self.tag.eq_ignore_ascii_case(name),
            Selector::Id(id) => self.id.as_ref() == Some(id),
            Selector::Class(class) => self.classes.contains(class),
            Selector::Universal => true,
            Selector::PseudoClass(name) => self.pseudo_classes.contains(name),
            Selector::Attribute(name, value) => self
                .attributes
                .iter()
                .any(|(n, v)| n == name && value.as_ref().is_none_or(|value| v == value)),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Parses a CSS identifier. Identifiers never start with a digit.
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    verify(take_while1(is_ident_char), |s: &str| {
        !s.starts_with(|c: char| c.is_ascii_digit())
    })(input)
}

/// Returns true if the whole string is a single identifier.
pub fn is_ident(source: &str) -> bool {
    matches!(parse_ident(source), Ok((rest, _)) if rest.is_empty())
}

/// Parses a simple selector: Type, .Class, #ID, :pseudo, [attr] or `*`.
pub fn parse_simple_selector(input: &str) -> IResult<&str, Selector> {
    alt((
        map(preceded(char('#'), parse_ident), |s| {
            Selector::Id(s.to_string())
        }),
        map(preceded(char('.'), parse_ident), |s| {
            Selector::Class(s.to_string())
        }),
        map(preceded(char(':'), parse_ident), |s| {
            Selector::PseudoClass(s.to_string())
        }),
        map(char('*'), |_| Selector::Universal),
        parse_attribute_selector,
        map(parse_ident, |s| Selector::Type(s.to_string())),
    ))(input)
}

/// Parses a compound selector (e.g., "button.primary#submit").
pub fn parse_compound_selector(input: &str) -> IResult<&str, CompoundSelector> {
    let (input, first) = parse_simple_selector(input)?;
    // No whitespace between parts: `button :hover` is a descendant selector, not a compound.
    let (input, rest) = many0(parse_simple_selector)(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, CompoundSelector::new(selectors)))
}

/// Parses a comma-separated list of compound selectors.
pub fn parse_selector_list(input: &str) -> IResult<&str, SelectorList> {
    let (input, _) = multispace0(input)?;
    let (input, first) = parse_compound_selector(input)?;
    let (input, rest) = many0(preceded(
        tuple((multispace0, char(','), multispace0)),
        parse_compound_selector,
    ))(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, SelectorList::new(selectors)))
}

fn parse_attribute_selector(input: &str) -> IResult<&str, Selector> {
    let (input, content) = delimited(char('['), take_until("]"), char(']'))(input)?;

    let (name, value) = match content.find('=') {
        Some(idx) => {
            let value = content[idx + 1..].trim().trim_matches(|c| c == '"' || c == '\'');
            (content[..idx].trim(), Some(value.to_string()))
        }
        None => (content.trim(), None),
    };

    if !is_ident(name) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((input, Selector::Attribute(name.to_string(), value)))
}

/// Parses a complete filter selector, rejecting anything left over.
///
/// # Example
///
/// ```
/// use statecss::{ElementMeta, validate_selector};
///
/// let filter = validate_selector("button.indicator, [role=switch]").unwrap();
/// assert!(filter.matches(&ElementMeta::new("button").with_class("indicator")));
/// assert!(!filter.matches(&ElementMeta::new("button")));
/// ```
pub fn validate_selector(source: &str) -> Result<SelectorList, CssError> {
    let invalid = |reason: String| CssError::InvalidSelector {
        selector: source.to_string(),
        reason,
    };

    if source.trim().is_empty() {
        return Err(invalid("empty selector".to_string()));
    }

    let (remaining, list) = parse_selector_list(source).map_err(|e| invalid(e.to_string()))?;
    let rest = remaining.trim();
    if rest.is_empty() {
        return Ok(list);
    }

    let descendant = remaining.starts_with(char::is_whitespace) && parse_compound_selector(rest).is_ok();
    let reason = if descendant || rest.starts_with(['>', '+', '~']) {
        format!("combinators are not supported in filters (at `{rest}`)")
    } else {
        format!("unexpected tokens at `{rest}`")
    };
    Err(invalid(reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_selector_parts() {
        let list = validate_selector("button.primary#submit:focus").unwrap();
        assert_eq!(
            list.selectors[0].selectors,
            vec![
                Selector::Type("button".to_string()),
                Selector::Class("primary".to_string()),
                Selector::Id("submit".to_string()),
                Selector::PseudoClass("focus".to_string()),
            ]
        );
    }

    #[test]
    fn test_attribute_selector_with_quoted_value() {
        let list = validate_selector("[role=\"switch\"]").unwrap();
        assert_eq!(
            list.selectors[0].selectors[0],
            Selector::Attribute("role".to_string(), Some("switch".to_string()))
        );
    }

    #[test]
    fn test_descendant_combinator_rejected() {
        let err = validate_selector(".track .thumb").unwrap_err();
        assert!(err.to_string().contains("combinators"));
    }

    #[test]
    fn test_child_combinator_rejected() {
        assert!(validate_selector(".track>.thumb").is_err());
    }

    #[test]
    fn test_identifier_cannot_start_with_digit() {
        assert!(validate_selector(".1st").is_err());
        assert!(is_ident("first-1"));
        assert!(!is_ident("1st"));
    }

    #[test]
    fn test_empty_selector_rejected() {
        assert!(validate_selector("   ").is_err());
    }

    #[test]
    fn test_attribute_existence_matches_any_value() {
        let list = validate_selector("[aria-pressed]").unwrap();
        let pressed = ElementMeta::new("button").with_attribute("aria-pressed", "false");
        assert!(list.matches(&pressed));
        assert!(!list.matches(&ElementMeta::new("button")));
    }

    #[test]
    fn test_type_match_ignores_case() {
        let list = validate_selector("BUTTON").unwrap();
        assert!(list.matches(&ElementMeta::new("button")));
    }
}
