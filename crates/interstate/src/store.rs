//! Value ownership shared by the binary and view states.
//!
//! Controlled mode: the consumer's prop is the value, and a change request
//! only calls the change handler. Uncontrolled mode: the value lives here,
//! seeded from the default, and a change request updates it before calling
//! the handler. A restricted state ignores requests entirely.
//!
//! The handler runs inline unless notices are deferred, in which case each
//! call is queued as a [`ChangeNotice`] for the owner to deliver.

use tokio::time::Instant;

use crate::config::{ChangeHandler, ChangeNotice, Restriction, StateOptions, Trigger};
use crate::lifecycle::{Lifecycle, Transitions};
use crate::pattern::AnimationPattern;
use crate::tracker::{AnimationEvent, AnimationTracker, ElementId};

pub(crate) struct StateCore<T> {
    controlled: Option<T>,
    internal: T,
    on_change: Option<ChangeHandler<T>>,
    defer_notices: bool,
    notices: Vec<ChangeNotice>,
    pub(crate) restriction: Restriction,
    pub(crate) tracker: AnimationTracker,
    pub(crate) lifecycle: Lifecycle<T>,
}

impl<T: Ord + Copy + std::fmt::Debug + Send + 'static> StateCore<T> {
    /// `initial` is the value the lifecycle starts resolved at.
    pub(crate) fn new(
        options: StateOptions<T>,
        default_pattern: AnimationPattern,
        element: ElementId,
        initial: impl FnOnce(T, Restriction) -> T,
    ) -> Self {
        let restriction = options.restriction();
        let pattern = options.animation_pattern.unwrap_or(default_pattern);
        let tracker = AnimationTracker::attach(element, pattern)
            .with_bubbling(options.animation_bubbling)
            .with_filter(options.bubbling_filter);
        let value = options.value.unwrap_or(options.default_value);

        Self {
            controlled: options.value,
            internal: options.default_value,
            on_change: options.on_change,
            defer_notices: false,
            notices: Vec::new(),
            restriction,
            tracker,
            lifecycle: Lifecycle::new(initial(value, restriction), options.settle_policy),
        }
    }

    pub(crate) fn value(&self) -> T {
        self.controlled.unwrap_or(self.internal)
    }

    pub(crate) fn is_controlled(&self) -> bool {
        self.controlled.is_some()
    }

    pub(crate) fn set_controlled(&mut self, value: Option<T>) {
        self.controlled = value;
    }

    /// Applies a change request. Returns true if it was accepted.
    pub(crate) fn request(&mut self, next: T, trigger: Trigger, frozen_by: Restriction) -> bool {
        if self.restriction.intersects(frozen_by) {
            log::debug!("state: change to {next:?} ignored, restricted by {:?}", self.restriction);
            return false;
        }
        if !self.tracker.is_live() || next == self.value() {
            return false;
        }
        if self.controlled.is_none() {
            self.internal = next;
        }
        if let Some(handler) = &self.on_change {
            let notice = ChangeNotice::new(handler, next, trigger);
            if self.defer_notices {
                self.notices.push(notice);
            } else {
                notice.deliver();
            }
        }
        true
    }

    pub(crate) fn defer_notices(&mut self) {
        self.defer_notices = true;
    }

    pub(crate) fn take_notices(&mut self) -> Vec<ChangeNotice> {
        std::mem::take(&mut self.notices)
    }

    pub(crate) fn observe(&mut self, actual: T, now: Instant) -> Transitions<T> {
        self.lifecycle.observe(actual, now)
    }

    pub(crate) fn animation(&mut self, event: &AnimationEvent, actual: T, now: Instant) -> Transitions<T> {
        let change = self.tracker.handle(event);
        self.lifecycle.on_tracker(change, actual, now)
    }

    pub(crate) fn poll(&mut self, actual: T, now: Instant) -> Transitions<T> {
        self.lifecycle.poll(actual, now)
    }

    pub(crate) fn unmount(&mut self) {
        self.tracker.detach();
        self.lifecycle.detach();
    }
}
