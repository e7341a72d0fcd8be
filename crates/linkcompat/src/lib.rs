//! # linkcompat - Router-agnostic links
//!
//! Utilities that make framework links (`href`-based and `to`-based)
//! behave uniformly:
//!
//! - **Paths**: relative resolution and `exact`/`partial` matching ([`path`])
//! - **Elements**: an abstract element tree to transform ([`element`])
//! - **Detection**: link-family inspection ([`link`])
//! - **Unwrapping**: anchorless links that promote their child ([`anchorless`])
//! - **Matching**: whether the first link among children is active ([`matching`])
//! - **Rendering**: host trees for assertions and snapshots ([`render`])
//!
//! ## Quick Start
//!
//! ```rust
//! use linkcompat::{Element, MatchStrategy, use_anchorless_link, use_link_path_match, render_to_host};
//! use linkcompat::testing::{Button, ClientLink};
//!
//! let link = Element::component(ClientLink)
//!     .prop("href", "/docs")
//!     .prop("anchorless", true)
//!     .prop("passHref", true)
//!     .child(Element::component(Button).child("Docs"));
//!
//! assert_eq!(use_link_path_match(&[link.clone().into()], "/docs/intro", MatchStrategy::Partial), Some(true));
//!
//! let host = render_to_host(&use_anchorless_link(link));
//! assert_eq!(host.find("a").and_then(|a| a.attr("href")), Some("/docs"));
//! ```

pub mod anchorless;
pub mod element;
pub mod error;
pub mod link;
pub mod matching;
pub mod path;
pub mod render;
pub mod testing;

pub use anchorless::{unwrap_first_link, use_anchorless_link};
pub use element::{Component, Element, ElementType, Event, Handler, Node, NodeId, PropValue, Props, RefSlot, RenderContext};
pub use error::LinkError;
pub use link::{CompatLinkDescriptor, LinkTarget, find_first_link, is_client_link_element, is_interactive};
pub use matching::use_link_path_match;
pub use path::{CurrentPath, MatchStrategy, evaluate_path_match, resolve_absolute_path_from_relative};
pub use render::{HostElement, HostNode, HostTree, render_to_host};
