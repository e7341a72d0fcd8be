//! Link-family detection.
//!
//! Routers disagree on how a link names its destination: Next-style links
//! take `href`, React Router-style links take `to`. Rather than probing props
//! throughout, an element is inspected once into a [`LinkTarget`] and a
//! [`CompatLinkDescriptor`].

use phf::phf_set;

use crate::element::{Element, ElementType, Node, Props};

/// Host tags that can stand in for an anchor.
pub static INTERACTIVE_TAGS: phf::Set<&'static str> = phf_set! {
    "a",
    "button",
    "input",
    "select",
    "textarea",
    "summary",
    "label",
};

/// Handlers an anchor uses for navigation and prefetching.
pub static NAVIGATION_HANDLERS: phf::Set<&'static str> = phf_set! {
    "onClick",
    "onMouseEnter",
    "onTouchStart",
};

pub const ANCHORLESS_PROP: &str = "anchorless";
pub const PASS_HREF_PROP: &str = "passHref";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    Href(String),
    To(String),
    None,
}

impl LinkTarget {
    /// `href` wins when both are present.
    pub fn from_props(props: &Props) -> Self {
        if let Some(href) = props.str("href") {
            return Self::Href(href.to_string());
        }
        if let Some(to) = props.str("to") {
            return Self::To(to.to_string());
        }
        Self::None
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Href(v) | Self::To(v) => Some(v),
            Self::None => None,
        }
    }

    /// The prop name the target came from.
    pub fn prop_name(&self) -> Option<&'static str> {
        match self {
            Self::Href(_) => Some("href"),
            Self::To(_) => Some("to"),
            Self::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompatLinkDescriptor {
    pub target: LinkTarget,
    /// The link renders no anchor of its own and enhances its child instead.
    pub anchorless: bool,
    /// The destination is forwarded to the promoted child.
    pub pass_href: bool,
}

impl CompatLinkDescriptor {
    pub fn inspect(element: &Element) -> Option<Self> {
        if !is_link_candidate(element) {
            return None;
        }
        let target = LinkTarget::from_props(&element.props);
        if target.is_none() {
            return None;
        }
        Some(Self {
            target,
            anchorless: element.props.flag(ANCHORLESS_PROP),
            pass_href: element.props.flag(PASS_HREF_PROP),
        })
    }
}

// Host anchors are what links render, not links themselves.
fn is_link_candidate(element: &Element) -> bool {
    !matches!(element.ty, ElementType::Host(_) | ElementType::Provider { .. })
}

pub fn is_client_link_element(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|e| CompatLinkDescriptor::inspect(e).is_some())
}

/// Whether an element can receive an anchor's navigation props.
pub fn is_interactive(element: &Element) -> bool {
    match &element.ty {
        ElementType::Host(tag) => INTERACTIVE_TAGS.contains(tag.as_str()),
        ElementType::Component(_) => true,
        ElementType::Provider { .. } | ElementType::Passthrough(_) => false,
    }
}

/// The first link in document order, searching through fragments and
/// non-link elements.
pub fn find_first_link(nodes: &[Node]) -> Option<&Element> {
    nodes.iter().find_map(|node| match node {
        Node::Element(element) if is_client_link_element(node) => Some(element),
        Node::Element(element) => find_first_link(&element.children),
        Node::Fragment(children) => find_first_link(children),
        Node::Text(_) | Node::Empty => None,
    })
}
