//! # statecss - State styling backend
//!
//! The interaction states in `interstate` never build CSS themselves. They
//! only need a backend that can say "set variable X to Y when state class Z
//! is present". This crate is that backend, kept deliberately small:
//!
//! - **Variables**: scoped custom properties ([`VarScope`], [`CssVar`])
//! - **Classes**: state-indicating class names ([`ClassName`])
//! - **Styles**: inline style maps with stable identity ([`StyleMap`], [`StyleCell`])
//! - **Rules**: per-class variable switches rendered to CSS ([`StateSheet`])
//! - **Registries**: append-only animation references ([`AnimationRegistry`])
//! - **Caches**: option-keyed memoization with explicit invalidation ([`OptionsCache`])
//! - **Filters**: validated compound selectors ([`validate_selector`])
//!
//! ## Quick Start
//!
//! ```rust
//! use statecss::{ClassName, StateRule, StateSheet, VarScope};
//!
//! let scope = VarScope::new("act").unwrap();
//! let on = scope.var("on").unwrap();
//!
//! let sheet = StateSheet::new()
//!     .with(StateRule::new(ClassName::state("active")).set(&on, "1"))
//!     .with(StateRule::new(ClassName::state("inactive")).set(&on, "0"));
//!
//! assert!(sheet.to_css().contains(".is-active {\n    --act-on: 1;\n}"));
//! ```
//!
//! ## Modules
//!
//! - [`selectors`]: Filter selector parsing and matching
//! - [`vars`]: Custom property names
//! - [`class`]: State class names
//! - [`style`]: Style maps
//! - [`rules`]: State rules and sheets
//! - [`registry`]: Animation registries
//! - [`cache`]: Options caches
//! - [`error`]: Error types for configuration failures

pub mod cache;
pub mod class;
pub mod error;
pub mod registry;
pub mod rules;
pub mod selectors;
pub mod style;
pub mod vars;

pub use cache::OptionsCache;
pub use class::{ClassName, join_classes};
pub use error::CssError;
pub use registry::AnimationRegistry;
pub use rules::{StateRule, StateSheet};
pub use selectors::{ElementMeta, SelectorList, validate_selector};
pub use style::{StyleCell, StyleMap};
pub use vars::{CssVar, VarScope};
