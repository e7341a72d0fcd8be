//! Abstract element trees.
//!
//! A small stand-in for a UI runtime's element type: host elements, function
//! components, context providers, forward-ref style passthrough layers,
//! fragments and text. Link unwrapping is a pure transform over this tree.
//!
//! Trees are single-threaded values (`Rc`), matching a UI event loop.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Identifies a rendered host node.
pub type NodeId = u64;

/// A synthetic UI event passed to handlers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    default_prevented: bool,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// An event handler. Cloning shares the same callback.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&mut Event)>);

impl Handler {
    pub fn new(f: impl Fn(&mut Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &mut Event) {
        (self.0)(event)
    }

    /// A handler running `first` and then `then`.
    pub fn compose(first: &Handler, then: &Handler) -> Handler {
        let first = first.clone();
        let then = then.clone();
        Handler::new(move |event| {
            first.call(event);
            then.call(event);
        })
    }

    pub fn ptr_eq(&self, other: &Handler) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

#[derive(Clone, Debug)]
pub enum PropValue {
    Str(String),
    Bool(bool),
    Handler(Handler),
}

impl PropValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_handler(&self) -> Option<&Handler> {
        match self {
            Self::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// Loose truthiness for boolean-ish props: `true`, or any string other
    /// than `""` and `"false"`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Str(s) => !s.is_empty() && s != "false",
            Self::Handler(_) => true,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Handler> for PropValue {
    fn from(h: Handler) -> Self {
        Self::Handler(h)
    }
}

/// Element props, ordered by name.
#[derive(Clone, Debug, Default)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropValue::as_str)
    }

    pub fn handler(&self, name: &str) -> Option<&Handler> {
        self.get(name).and_then(PropValue::as_handler)
    }

    /// Whether a boolean-ish prop is set.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(PropValue::is_truthy)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        self.0.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A shared ref slot. The renderer stores the host node id it attached to.
#[derive(Clone, Debug, Default)]
pub struct RefSlot(Rc<Cell<Option<NodeId>>>);

impl RefSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<NodeId> {
        self.0.get()
    }

    pub fn bind(&self, id: NodeId) {
        self.0.set(Some(id));
    }

    pub fn ptr_eq(&self, other: &RefSlot) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Values visible to components through enclosing providers.
#[derive(Debug, Default)]
pub struct RenderContext {
    stack: RefCell<Vec<(String, String)>>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The innermost provided value for `context`.
    pub fn get(&self, context: &str) -> Option<String> {
        self.stack
            .borrow()
            .iter()
            .rev()
            .find(|(name, _)| name == context)
            .map(|(_, value)| value.clone())
    }

    pub(crate) fn push(&self, context: &str, value: &str) {
        self.stack.borrow_mut().push((context.to_string(), value.to_string()));
    }

    pub(crate) fn pop(&self) {
        self.stack.borrow_mut().pop();
    }
}

/// A function component.
pub trait Component {
    fn name(&self) -> &str;

    fn render(&self, props: &Props, children: &[Node], ctx: &RenderContext) -> Node;
}

#[derive(Clone)]
pub enum ElementType {
    /// A literal host element such as `a` or `button`.
    Host(String),
    Component(Rc<dyn Component>),
    /// Makes `value` visible to descendants under `context`.
    Provider { context: String, value: String },
    /// A layer that renders its children unchanged and forwards its refs,
    /// e.g. a forward-ref or memo wrapper.
    Passthrough(String),
}

impl ElementType {
    pub fn name(&self) -> &str {
        match self {
            Self::Host(tag) => tag,
            Self::Component(c) => c.name(),
            Self::Provider { context, .. } => context,
            Self::Passthrough(name) => name,
        }
    }

    pub fn is_host(&self, tag: &str) -> bool {
        matches!(self, Self::Host(t) if t == tag)
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(tag) => write!(f, "Host({tag})"),
            Self::Component(c) => write!(f, "Component({})", c.name()),
            Self::Provider { context, value } => write!(f, "Provider({context}={value})"),
            Self::Passthrough(name) => write!(f, "Passthrough({name})"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Element {
    pub ty: ElementType,
    pub props: Props,
    pub children: Vec<Node>,
    pub refs: Vec<RefSlot>,
}

impl Element {
    pub fn new(ty: ElementType) -> Self {
        Self {
            ty,
            props: Props::new(),
            children: Vec::new(),
            refs: Vec::new(),
        }
    }

    pub fn host(tag: &str) -> Self {
        Self::new(ElementType::Host(tag.to_string()))
    }

    pub fn component(component: impl Component + 'static) -> Self {
        Self::new(ElementType::Component(Rc::new(component)))
    }

    pub fn provider(context: &str, value: &str) -> Self {
        Self::new(ElementType::Provider {
            context: context.to_string(),
            value: value.to_string(),
        })
    }

    pub fn passthrough(name: &str) -> Self {
        Self::new(ElementType::Passthrough(name.to_string()))
    }

    pub fn prop(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.props.insert(name, value);
        self
    }

    pub fn on(self, name: &str, handler: impl Fn(&mut Event) + 'static) -> Self {
        self.prop(name, Handler::new(handler))
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_ref(mut self, slot: &RefSlot) -> Self {
        self.refs.push(slot.clone());
        self
    }
}

#[derive(Clone, Debug)]
pub enum Node {
    Element(Element),
    Text(String),
    Fragment(Vec<Node>),
    Empty,
}

impl Node {
    pub fn text(s: &str) -> Self {
        Self::Text(s.to_string())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Self::Fragment(nodes)
    }
}
