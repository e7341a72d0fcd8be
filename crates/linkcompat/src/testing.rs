//! Components for exercising link unwrapping.
//!
//! [`ClientLink`] behaves like a client-side router link: it renders an
//! anchor through a provider and a forward-ref layer, and its navigation
//! handlers call `prevent_default` the way a router intercepts the click.
//! [`Button`] is a polymorphic button that renders an anchor when given an
//! `href`.

use crate::element::{Component, Element, Node, PropValue, Props, RenderContext};
use crate::link::{LinkTarget, NAVIGATION_HANDLERS};

/// Context name [`ClientLink`] provides its destination under.
pub const LINK_CONTEXT: &str = "link";

#[derive(Clone, Copy, Debug, Default)]
pub struct ClientLink;

impl Component for ClientLink {
    fn name(&self) -> &str {
        "ClientLink"
    }

    fn render(&self, props: &Props, children: &[Node], _ctx: &RenderContext) -> Node {
        let target = LinkTarget::from_props(props);
        let href = target.value().unwrap_or_default();

        let mut anchor = Element::host("a").prop("href", href);
        for name in NAVIGATION_HANDLERS.iter() {
            anchor = anchor.on(name, |event| event.prevent_default());
        }
        anchor.children = children.to_vec();

        Element::provider(LINK_CONTEXT, href)
            .child(Element::passthrough("LinkForwardRef").child(anchor))
            .into()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Button;

impl Component for Button {
    fn name(&self) -> &str {
        "Button"
    }

    fn render(&self, props: &Props, children: &[Node], _ctx: &RenderContext) -> Node {
        let tag = if props.contains("href") { "a" } else { "button" };
        let mut element = Element::host(tag);
        element.props = props.clone();
        if tag == "button" && !props.contains("type") {
            element.props.insert("type", PropValue::from("button"));
        }
        element.children = children.to_vec();
        element.into()
    }
}

/// A `span` carrying the innermost `theme` context value.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThemedLabel;

impl Component for ThemedLabel {
    fn name(&self) -> &str {
        "ThemedLabel"
    }

    fn render(&self, _props: &Props, children: &[Node], ctx: &RenderContext) -> Node {
        let mut span = Element::host("span");
        if let Some(theme) = ctx.get("theme") {
            span = span.prop("data-theme", theme);
        }
        span.children = children.to_vec();
        span.into()
    }
}
