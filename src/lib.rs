//! # interstate-rs
//!
//! Umbrella crate for the interaction-state workspace:
//!
//! - [`interstate`]: animation-synchronized state lifecycles (active,
//!   collapse, disabled, read-only, focus, hover, press, view)
//! - [`statecss`]: state class names, CSS variables and selector filters
//! - [`linkcompat`]: router-agnostic link unwrapping and path matching
//!
//! ```rust
//! use interstate_rs::interstate::{ActiveState, StateOptions};
//! use interstate_rs::linkcompat::{MatchStrategy, evaluate_path_match};
//!
//! let tab = ActiveState::new(StateOptions::new(false), 7);
//! assert!(!tab.value());
//! assert!(evaluate_path_match("/docs/intro", "/docs", MatchStrategy::Partial));
//! ```

pub use interstate;
pub use linkcompat;
pub use statecss;
