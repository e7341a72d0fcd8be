//! Expands an element tree into host nodes.
//!
//! Components are rendered, providers and passthrough layers dissolve into
//! their children, and every ref slot is bound to the id of the host node it
//! ends up attached to. The result prints as HTML-like text for snapshots.

use std::collections::BTreeMap;
use std::fmt;

use crate::element::{Element, ElementType, Event, Handler, Node, NodeId, PropValue, RefSlot, RenderContext};

#[derive(Clone, Debug)]
pub struct HostElement {
    pub id: NodeId,
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub handlers: BTreeMap<String, Handler>,
    pub children: Vec<HostNode>,
}

impl HostElement {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Runs the handler registered under `prop`, e.g. `onClick`.
    pub fn dispatch(&self, prop: &str, event: &mut Event) -> bool {
        match self.handlers.get(prop) {
            Some(handler) => {
                handler.call(event);
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Debug)]
pub enum HostNode {
    Element(HostElement),
    Text(String),
}

impl HostNode {
    /// The first element with `tag`, depth first.
    pub fn find(&self, tag: &str) -> Option<&HostElement> {
        match self {
            Self::Element(e) if e.tag == tag => Some(e),
            Self::Element(e) => e.children.iter().find_map(|c| c.find(tag)),
            Self::Text(_) => None,
        }
    }

    pub fn find_by_id(&self, id: NodeId) -> Option<&HostElement> {
        match self {
            Self::Element(e) if e.id == id => Some(e),
            Self::Element(e) => e.children.iter().find_map(|c| c.find_by_id(id)),
            Self::Text(_) => None,
        }
    }
}

fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[HostNode], depth: usize) -> fmt::Result {
    for node in nodes {
        write_node(f, node, depth)?;
    }
    Ok(())
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &HostNode, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match node {
        HostNode::Text(text) => writeln!(f, "{indent}{text}"),
        HostNode::Element(e) => {
            write!(f, "{indent}<{}", e.tag)?;
            for (name, value) in &e.attrs {
                write!(f, " {name}=\"{value}\"")?;
            }
            for name in e.handlers.keys() {
                write!(f, " @{name}")?;
            }
            if e.children.is_empty() {
                return writeln!(f, " />");
            }
            writeln!(f, ">")?;
            write_nodes(f, &e.children, depth + 1)?;
            writeln!(f, "{indent}</{}>", e.tag)
        }
    }
}

/// A rendered forest of host nodes.
#[derive(Clone, Debug, Default)]
pub struct HostTree {
    pub roots: Vec<HostNode>,
}

impl HostTree {
    pub fn find(&self, tag: &str) -> Option<&HostElement> {
        self.roots.iter().find_map(|n| n.find(tag))
    }

    pub fn find_by_id(&self, id: NodeId) -> Option<&HostElement> {
        self.roots.iter().find_map(|n| n.find_by_id(id))
    }

    /// The host element a ref slot was bound to.
    pub fn resolve(&self, slot: &RefSlot) -> Option<&HostElement> {
        slot.get().and_then(|id| self.find_by_id(id))
    }
}

impl fmt::Display for HostTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.roots, 0)
    }
}

struct Renderer {
    next_id: NodeId,
    ctx: RenderContext,
}

impl Renderer {
    fn node(&mut self, node: &Node, out: &mut Vec<HostNode>, refs: &mut Vec<RefSlot>) {
        match node {
            Node::Empty => {}
            Node::Text(text) => out.push(HostNode::Text(text.clone())),
            Node::Fragment(children) => {
                for child in children {
                    self.node(child, out, refs);
                }
            }
            Node::Element(element) => self.element(element, out, refs),
        }
    }

    /// `pending` holds refs forwarded from enclosing layers; they bind to
    /// the first host element rendered.
    fn element(&mut self, element: &Element, out: &mut Vec<HostNode>, pending: &mut Vec<RefSlot>) {
        pending.extend(element.refs.iter().cloned());
        match &element.ty {
            ElementType::Host(tag) => {
                self.next_id += 1;
                let id = self.next_id;
                for slot in pending.drain(..) {
                    slot.bind(id);
                }
                let mut attrs = BTreeMap::new();
                let mut handlers = BTreeMap::new();
                for (name, value) in element.props.iter() {
                    match value {
                        PropValue::Str(s) => {
                            attrs.insert(name.to_string(), s.clone());
                        }
                        PropValue::Bool(true) => {
                            attrs.insert(name.to_string(), "true".to_string());
                        }
                        PropValue::Bool(false) => {}
                        PropValue::Handler(h) => {
                            handlers.insert(name.to_string(), h.clone());
                        }
                    }
                }
                let mut children = Vec::new();
                let mut none = Vec::new();
                for child in &element.children {
                    self.node(child, &mut children, &mut none);
                }
                out.push(HostNode::Element(HostElement {
                    id,
                    tag: tag.clone(),
                    attrs,
                    handlers,
                    children,
                }));
            }
            ElementType::Component(component) => {
                let rendered = component.render(&element.props, &element.children, &self.ctx);
                self.node(&rendered, out, pending);
            }
            ElementType::Provider { context, value } => {
                self.ctx.push(context, value);
                for child in &element.children {
                    self.node(child, out, pending);
                }
                self.ctx.pop();
            }
            ElementType::Passthrough(_) => {
                for child in &element.children {
                    self.node(child, out, pending);
                }
            }
        }
    }
}

pub fn render_to_host(node: &Node) -> HostTree {
    let mut renderer = Renderer {
        next_id: 0,
        ctx: RenderContext::new(),
    };
    let mut roots = Vec::new();
    let mut pending = Vec::new();
    renderer.node(node, &mut roots, &mut pending);
    if !pending.is_empty() {
        log::debug!("render: {} ref(s) rendered no host element", pending.len());
    }
    HostTree { roots }
}
