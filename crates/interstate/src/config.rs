//! Options shared by every interaction state.
//!
//! Each state accepts the same option shape: a controlled value, a default
//! for uncontrolled mode, a change handler, animation matching
//! configuration and cascaded restrictions.
//!
//! ```
//! use interstate::{ActiveState, StateOptions, Trigger};
//! use tokio::time::Instant;
//!
//! let options = StateOptions::new(false)
//!     .with_animation_bubbling(true)
//!     .with_on_change(|active, trigger| {
//!         assert!(active);
//!         assert_eq!(trigger, Trigger::Pointer);
//!     });
//!
//! let now = Instant::now();
//! let mut state = ActiveState::new(options, 1);
//! state.dispatch_change(true, Trigger::Pointer, now);
//! assert!(state.value());
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bitflags::bitflags;

use crate::error::Result;
use crate::pattern::AnimationPattern;
use crate::tracker::BubblingFilter;

bitflags! {
    /// Conditions cascaded in from companion states or ancestors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Restriction: u8 {
        /// The owning component (or an ancestor) is disabled.
        const DISABLED  = 0b0000_0001;
        /// The owning component (or an ancestor) is read-only.
        const READ_ONLY = 0b0000_0010;
    }
}

/// What caused a change request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    Pointer,
    Keyboard,
    Focus,
    Navigation,
    Programmatic,
}

/// How long a transition may wait for its first matching animation, and
/// how long a drained tracker must stay drained before the transition lands.
///
/// When no matching `animationstart` arrives within `start_grace` of the
/// transition beginning, the transition settles on its own. This keeps
/// states live when animations are disabled (`animation: none`, reduced
/// motion, test environments).
///
/// Once every matching animation has ended, the transition lands after
/// `settle_frame` unless another matching animation starts first. This
/// covers transitions made of animations that run one after another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlePolicy {
    pub start_grace: Duration,
    pub settle_frame: Duration,
}

impl SettlePolicy {
    /// Three frames at 60 Hz.
    pub const DEFAULT_START_GRACE: Duration = Duration::from_millis(50);

    /// One frame at 60 Hz.
    pub const DEFAULT_SETTLE_FRAME: Duration = Duration::from_millis(16);

    pub fn new(start_grace: Duration) -> Self {
        Self {
            start_grace,
            settle_frame: Self::DEFAULT_SETTLE_FRAME,
        }
    }

    pub fn with_settle_frame(mut self, settle_frame: Duration) -> Self {
        self.settle_frame = settle_frame;
        self
    }

    /// Settle as soon as the host polls, or as soon as the tracker drains;
    /// for hosts that never animate.
    pub fn immediate() -> Self {
        Self {
            start_grace: Duration::ZERO,
            settle_frame: Duration::ZERO,
        }
    }
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START_GRACE)
    }
}

pub type ChangeHandler<T> = Arc<dyn Fn(T, Trigger) + Send + Sync>;

/// A change handler call that has been queued for later delivery.
///
/// A [`StateDriver`](crate::StateDriver) queues these while it holds the
/// state and delivers them once it has let go, so a handler may drive the
/// same state again.
pub struct ChangeNotice(Box<dyn FnOnce() + Send>);

impl ChangeNotice {
    pub(crate) fn new<T: Send + 'static>(handler: &ChangeHandler<T>, value: T, trigger: Trigger) -> Self {
        let handler = Arc::clone(handler);
        Self(Box::new(move || handler(value, trigger)))
    }

    /// Calls the change handler.
    pub fn deliver(self) {
        (self.0)()
    }
}

impl fmt::Debug for ChangeNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeNotice(..)")
    }
}

pub struct StateOptions<T> {
    /// Controlled value. When set, the state never changes it.
    pub value: Option<T>,
    /// Seed for the internal value in uncontrolled mode.
    pub default_value: T,
    pub on_change: Option<ChangeHandler<T>>,
    /// `None` uses the state's default suffixes.
    pub animation_pattern: Option<AnimationPattern>,
    pub animation_bubbling: bool,
    pub bubbling_filter: Option<BubblingFilter>,
    pub cascade_disabled: bool,
    pub cascade_read_only: bool,
    pub settle_policy: SettlePolicy,
}

impl<T> StateOptions<T> {
    pub fn new(default_value: T) -> Self {
        Self {
            value: None,
            default_value,
            on_change: None,
            animation_pattern: None,
            animation_bubbling: false,
            bubbling_filter: None,
            cascade_disabled: false,
            cascade_read_only: false,
            settle_policy: SettlePolicy::default(),
        }
    }

    /// Puts the state in controlled mode.
    pub fn with_value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_default(mut self, default_value: T) -> Self {
        self.default_value = default_value;
        self
    }

    pub fn with_on_change(mut self, handler: impl Fn(T, Trigger) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(handler));
        self
    }

    pub fn with_animation_pattern(mut self, pattern: impl Into<AnimationPattern>) -> Self {
        self.animation_pattern = Some(pattern.into());
        self
    }

    pub fn with_animation_bubbling(mut self, bubbling: bool) -> Self {
        self.animation_bubbling = bubbling;
        self
    }

    /// Restricts bubbled animations to descendants matching `selector`.
    pub fn with_bubbling_filter(mut self, selector: &str) -> Result<Self> {
        self.bubbling_filter = Some(BubblingFilter::parse(selector)?);
        Ok(self)
    }

    pub fn with_cascade_disabled(mut self, disabled: bool) -> Self {
        self.cascade_disabled = disabled;
        self
    }

    pub fn with_cascade_read_only(mut self, read_only: bool) -> Self {
        self.cascade_read_only = read_only;
        self
    }

    pub fn with_settle_policy(mut self, policy: SettlePolicy) -> Self {
        self.settle_policy = policy;
        self
    }

    pub(crate) fn restriction(&self) -> Restriction {
        let mut restriction = Restriction::empty();
        restriction.set(Restriction::DISABLED, self.cascade_disabled);
        restriction.set(Restriction::READ_ONLY, self.cascade_read_only);
        restriction
    }
}

impl<T: Default> Default for StateOptions<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for StateOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateOptions")
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("on_change", &self.on_change.as_ref().map(|_| ".."))
            .field("animation_pattern", &self.animation_pattern)
            .field("animation_bubbling", &self.animation_bubbling)
            .field("bubbling_filter", &self.bubbling_filter)
            .field("cascade_disabled", &self.cascade_disabled)
            .field("cascade_read_only", &self.cascade_read_only)
            .field("settle_policy", &self.settle_policy)
            .finish()
    }
}
