//! # interstate - Animation-synchronized interaction states
//!
//! Every interaction state (active, collapse, disabled, read-only, focus,
//! hover, press, view index) is a logical value plus a phase that follows the
//! element's CSS animations. The visual state never flips until the
//! animation for the previous transition has finished, and a running
//! transition is never cut short.
//!
//! The states are sans-IO: hosts feed them change requests, native
//! animation events and the current instant, and read back phases, class
//! names and custom properties. [`StateDriver`] wraps any state for a tokio
//! host, delivering phase events on a channel and running the liveness timer.
//!
//! ## Quick Start
//!
//! ```rust
//! use interstate::{CollapsePhase, CollapseState, StateOptions, Trigger};
//! use tokio::time::Instant;
//!
//! let now = Instant::now();
//! let mut panel = CollapseState::new(StateOptions::new(false), 1);
//! assert_eq!(panel.classname().as_str(), "is-collapsed");
//!
//! panel.expand(Trigger::Pointer, now);
//! assert_eq!(panel.phase(), CollapsePhase::Expanding);
//! assert!(panel.value());
//! ```

pub mod binary;
pub mod config;
pub mod driver;
pub mod error;
pub mod lifecycle;
mod log_init;
mod macros;
pub mod pattern;
pub mod phase;
pub mod states;
mod store;
pub mod styles;
pub mod testing;
pub mod tracker;
pub mod view;

pub use binary::{BinaryKind, BinaryState};
pub use config::{ChangeHandler, ChangeNotice, Restriction, SettlePolicy, StateOptions, Trigger};
pub use driver::{EventOrigin, PhaseEnvelope, PhaseMachine, StateDriver};
pub use error::{Result, StateError};
pub use lifecycle::{Flight, Lifecycle, Transition};
pub use log_init::init_logger;
pub use pattern::AnimationPattern;
pub use phase::{BinaryPhase, PhaseEvent, PhaseEvents};
pub use states::active::{ActiveKind, ActivePhase, ActiveState};
pub use states::collapse::{CollapseKind, CollapsePhase, CollapseState};
pub use states::disabled::{DisabledKind, DisabledPhase, DisabledState};
pub use states::focus::{FocusKind, FocusPhase, FocusState};
pub use states::hover::{HoverKind, HoverPhase, HoverState};
pub use states::press::{PointerButton, PressKind, PressPhase, PressState};
pub use states::read_only::{ReadOnlyKind, ReadOnlyPhase, ReadOnlyState};
pub use styles::StateStyles;
pub use tracker::{AnimationEvent, AnimationEventKind, AnimationTracker, ElementId, EventTarget};
pub use view::{ViewOptions, ViewPhase, ViewRange, ViewState};

// Re-export the log crate so hosts can use interstate::log::debug!, etc.
pub use log;
pub use statecss;
