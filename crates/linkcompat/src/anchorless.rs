//! Anchorless link unwrapping.
//!
//! A router link renders, through any number of wrapper layers, a literal
//! `a` element. Some links are declared anchorless: the caller supplies its
//! own interactive child (a button, a custom component) which must take the
//! anchor's place and receive its navigation behavior.
//!
//! [`use_anchorless_link`] renders the link once and walks the output:
//!
//! - Wrapper nodes (fragments, providers, passthrough layers, other hosts)
//!   are kept verbatim and recursed into.
//! - The walk stops at the first `a` host element.
//! - A regular link keeps its anchor; the link's refs are attached to it.
//! - An anchorless link drops the anchor and promotes its children. The
//!   first interactive child receives the anchor's navigation handlers
//!   (composed after its own) and refs, plus the destination when
//!   `passHref` is set.

use crate::element::{Element, ElementType, Handler, Node, Props, RefSlot, RenderContext};
use crate::link::{CompatLinkDescriptor, NAVIGATION_HANDLERS, is_interactive};

/// What an anchor hands to the child replacing it.
struct Injection {
    handlers: Vec<(String, Handler)>,
    refs: Vec<RefSlot>,
    forwarded: Option<(&'static str, String)>,
}

impl Injection {
    fn apply(&self, element: &mut Element) {
        for (name, anchor_handler) in &self.handlers {
            let merged = match element.props.handler(name) {
                Some(own) => Handler::compose(own, anchor_handler),
                None => anchor_handler.clone(),
            };
            element.props.insert(name.clone(), merged);
        }
        element.refs.extend(self.refs.iter().cloned());
        if let Some((prop, value)) = &self.forwarded {
            element.props.insert(*prop, value.clone());
        }
    }
}

struct Walk {
    descriptor: CompatLinkDescriptor,
    link_refs: Vec<RefSlot>,
    found: bool,
}

impl Walk {
    fn node(&mut self, node: Node) -> Node {
        if self.found {
            return node;
        }
        match node {
            Node::Element(element) if element.ty.is_host("a") => {
                self.found = true;
                self.anchor(element)
            }
            Node::Element(mut element) => {
                element.children = element.children.into_iter().map(|c| self.node(c)).collect();
                Node::Element(element)
            }
            Node::Fragment(children) => Node::Fragment(children.into_iter().map(|c| self.node(c)).collect()),
            other => other,
        }
    }

    fn anchor(&mut self, mut anchor: Element) -> Node {
        let link_refs = std::mem::take(&mut self.link_refs);
        if !self.descriptor.anchorless {
            anchor.refs.extend(link_refs);
            return Node::Element(anchor);
        }

        let injection = Injection {
            handlers: navigation_handlers(&anchor.props),
            refs: anchor.refs.into_iter().chain(link_refs).collect(),
            forwarded: if self.descriptor.pass_href {
                self.descriptor
                    .target
                    .prop_name()
                    .zip(self.descriptor.target.value().map(str::to_string))
            } else {
                None
            },
        };

        let mut children = anchor.children;
        if !inject_first_interactive(&mut children, &injection) {
            log::debug!("anchorless link: no interactive child, rendering children unchanged");
        }
        match children.len() {
            0 => Node::Empty,
            1 => children.remove(0),
            _ => Node::Fragment(children),
        }
    }
}

fn navigation_handlers(props: &Props) -> Vec<(String, Handler)> {
    props
        .iter()
        .filter(|(name, _)| NAVIGATION_HANDLERS.contains(*name))
        .filter_map(|(name, value)| value.as_handler().map(|h| (name.to_string(), h.clone())))
        .collect()
}

fn inject_first_interactive(nodes: &mut [Node], injection: &Injection) -> bool {
    for node in nodes {
        let injected = match node {
            Node::Element(element) if is_interactive(element) => {
                injection.apply(element);
                true
            }
            Node::Element(element) => inject_first_interactive(&mut element.children, injection),
            Node::Fragment(children) => inject_first_interactive(children, injection),
            Node::Text(_) | Node::Empty => false,
        };
        if injected {
            return true;
        }
    }
    false
}

/// Renders `link` with its anchor kept or replaced.
///
/// Elements that are not links are returned unchanged. The link component is
/// rendered without enclosing context.
pub fn use_anchorless_link(link: Element) -> Node {
    let Some(descriptor) = CompatLinkDescriptor::inspect(&link) else {
        return Node::Element(link);
    };

    let rendered = match &link.ty {
        ElementType::Component(component) => component.render(&link.props, &link.children, &RenderContext::new()),
        _ => {
            let mut layer = link.clone();
            layer.refs.clear();
            Node::Element(layer)
        }
    };

    let mut walk = Walk {
        descriptor,
        link_refs: link.refs,
        found: false,
    };
    let output = walk.node(rendered);
    if !walk.found {
        log::debug!("link {}: rendered no anchor", link.ty.name());
    }
    output
}

/// Applies [`use_anchorless_link`] to the first link among `nodes`. Later
/// links are left untouched.
pub fn unwrap_first_link(nodes: Vec<Node>) -> Vec<Node> {
    let mut done = false;
    nodes.into_iter().map(|node| unwrap_in(node, &mut done)).collect()
}

fn unwrap_in(node: Node, done: &mut bool) -> Node {
    if *done {
        return node;
    }
    match node {
        Node::Element(element) if CompatLinkDescriptor::inspect(&element).is_some() => {
            *done = true;
            use_anchorless_link(element)
        }
        Node::Element(mut element) => {
            element.children = element.children.into_iter().map(|c| unwrap_in(c, done)).collect();
            Node::Element(element)
        }
        Node::Fragment(children) => Node::Fragment(children.into_iter().map(|c| unwrap_in(c, done)).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::element::Event;
    use crate::link::is_client_link_element;
    use crate::render::render_to_host;
    use crate::testing::{Button, ClientLink};

    fn anchorless_link(pass_href: bool) -> Element {
        Element::component(ClientLink)
            .prop("href", "/docs")
            .prop("anchorless", true)
            .prop("passHref", pass_href)
    }

    #[test]
    fn test_regular_link_keeps_anchor_and_ref() {
        let slot = RefSlot::new();
        let link = Element::component(ClientLink)
            .prop("href", "/docs")
            .with_ref(&slot)
            .child("Docs");
        let host = render_to_host(&use_anchorless_link(link));

        insta::assert_snapshot!(host.to_string(), @r#"
        <a href="/docs" @onClick @onMouseEnter @onTouchStart>
          Docs
        </a>
        "#);
        assert_eq!(host.resolve(&slot).map(|e| e.tag.as_str()), Some("a"));
    }

    #[test]
    fn test_pass_href_promotes_button_to_anchor() {
        let link = anchorless_link(true).child(Element::component(Button).child("Read"));
        let host = render_to_host(&use_anchorless_link(link));

        let anchor = host.find("a").unwrap();
        assert_eq!(anchor.attr("href"), Some("/docs"));
        assert!(host.find("button").is_none());
    }

    #[test]
    fn test_without_pass_href_button_stays_button() {
        let link = anchorless_link(false).child(Element::component(Button).child("Read"));
        let host = render_to_host(&use_anchorless_link(link));

        let button = host.find("button").unwrap();
        assert_eq!(button.attr("href"), None);
        assert!(host.find("a").is_none());
        // Navigation still flows through the promoted child.
        let mut click = Event::new("click");
        assert!(button.dispatch("onClick", &mut click));
        assert!(click.is_default_prevented());
    }

    #[test]
    fn test_handlers_compose_and_refs_follow_child() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let link_ref = RefSlot::new();
        let button_ref = RefSlot::new();
        let link = anchorless_link(false).with_ref(&link_ref).child(
            Element::component(Button)
                .with_ref(&button_ref)
                .on("onClick", move |_| sink.borrow_mut().push("caller")),
        );
        let host = render_to_host(&use_anchorless_link(link));

        let button = host.find("button").unwrap();
        let mut click = Event::new("click");
        button.dispatch("onClick", &mut click);
        assert_eq!(*calls.borrow(), ["caller"]);
        assert!(click.is_default_prevented());
        assert_eq!(link_ref.get(), Some(button.id));
        assert_eq!(button_ref.get(), Some(button.id));
    }

    #[test]
    fn test_wrappers_preserved_around_promoted_child() {
        let link = anchorless_link(true).child(
            Element::host("div")
                .prop("class", "row")
                .child(Element::host("span").child("icon"))
                .child(Element::component(Button).child("Go")),
        );
        let host = render_to_host(&use_anchorless_link(link));

        insta::assert_snapshot!(host.to_string(), @r#"
        <div class="row">
          <span>
            icon
          </span>
          <a href="/docs" @onClick @onMouseEnter @onTouchStart>
            Go
          </a>
        </div>
        "#);
    }

    #[test]
    fn test_no_interactive_child_renders_children_unchanged() {
        let link = anchorless_link(true).child("plain text");
        let host = render_to_host(&use_anchorless_link(link));
        assert_eq!(host.to_string().trim(), "plain text");
    }

    #[test]
    fn test_only_first_link_unwrapped() {
        let nodes = vec![
            anchorless_link(true).child(Element::component(Button).child("One")).into(),
            anchorless_link(true).child(Element::component(Button).child("Two")).into(),
        ];
        let out = unwrap_first_link(nodes);
        assert!(!is_client_link_element(&out[0]));
        assert!(is_client_link_element(&out[1]));
    }
}
