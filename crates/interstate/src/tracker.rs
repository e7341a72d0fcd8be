//! Animation Phase Tracker: which matching animations are running right now.
//!
//! ## Usage
//!
//! 1) Attach a tracker to the element that owns the state with
//!    [`AnimationTracker::attach`].
//! 2) Forward every `animationstart`, `animationend` and `animationcancel`
//!    event the element's listener receives to [`AnimationTracker::handle`].
//! 3) Query [`AnimationTracker::is_running`] or
//!    [`AnimationTracker::is_running_kind`].
//! 4) Call [`AnimationTracker::detach`] on unmount. Events arriving after
//!    that are ignored.
//!
//! ```
//! use interstate::tracker::{AnimationEvent, AnimationTracker, EventTarget, TrackerChange};
//!
//! let element = EventTarget::new(1, "button");
//! let mut tracker = AnimationTracker::attach(1, ["activating", "deactivating"].into());
//!
//! let change = tracker.handle(&AnimationEvent::start("btn-activating", element.clone()));
//! assert_eq!(change, TrackerChange::Started);
//! assert!(tracker.is_running_kind("activating"));
//!
//! tracker.handle(&AnimationEvent::end("btn-activating", element));
//! assert!(!tracker.is_running());
//! ```

use smallvec::SmallVec;
use statecss::{ElementMeta, SelectorList, validate_selector};

use crate::error::Result;
use crate::pattern::{AnimationPattern, suffix_matches};

/// Identifies an element within the host's tree.
pub type ElementId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationEventKind {
    Start,
    End,
    Cancel,
}

/// The element an animation event originated from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventTarget {
    pub element: ElementId,
    pub meta: ElementMeta,
}

impl EventTarget {
    pub fn new(element: ElementId, tag: &str) -> Self {
        Self {
            element,
            meta: ElementMeta::new(tag),
        }
    }

    pub fn with_meta(element: ElementId, meta: ElementMeta) -> Self {
        Self { element, meta }
    }
}

/// A native animation event as delivered to the bound element's listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationEvent {
    pub kind: AnimationEventKind,
    pub animation_name: String,
    pub target: EventTarget,
}

impl AnimationEvent {
    pub fn new(kind: AnimationEventKind, name: impl Into<String>, target: EventTarget) -> Self {
        Self {
            kind,
            animation_name: name.into(),
            target,
        }
    }

    pub fn start(name: impl Into<String>, target: EventTarget) -> Self {
        Self::new(AnimationEventKind::Start, name, target)
    }

    pub fn end(name: impl Into<String>, target: EventTarget) -> Self {
        Self::new(AnimationEventKind::End, name, target)
    }

    pub fn cancel(name: impl Into<String>, target: EventTarget) -> Self {
        Self::new(AnimationEventKind::Cancel, name, target)
    }
}

/// Restricts which descendants may report bubbled animations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BubblingFilter {
    source: String,
    selectors: SelectorList,
}

impl BubblingFilter {
    /// Validates `source` eagerly; an invalid selector is a configuration error.
    pub fn parse(source: &str) -> Result<Self> {
        let selectors = validate_selector(source)?;
        Ok(Self {
            source: source.to_string(),
            selectors,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn accepts(&self, meta: &ElementMeta) -> bool {
        self.selectors.matches(meta)
    }
}

/// What an event did to the run registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerChange {
    /// Foreign element, unknown name, untracked end, or detached tracker.
    Ignored,
    /// A matching animation is running.
    Started,
    /// A tracked animation stopped. `drained` is true when nothing matching
    /// is left running.
    Ended { drained: bool },
}

#[derive(Debug)]
pub struct AnimationTracker {
    element: ElementId,
    pattern: AnimationPattern,
    bubbling: bool,
    filter: Option<BubblingFilter>,
    running: SmallVec<[String; 2]>,
    live: bool,
}

impl AnimationTracker {
    pub fn attach(element: ElementId, pattern: AnimationPattern) -> Self {
        Self {
            element,
            pattern,
            bubbling: false,
            filter: None,
            running: SmallVec::new(),
            live: true,
        }
    }

    /// Accept events bubbled up from descendants.
    pub fn with_bubbling(mut self, bubbling: bool) -> Self {
        self.bubbling = bubbling;
        self
    }

    /// Only descendants matching `filter` may report. Implies bubbling.
    pub fn with_filter(mut self, filter: Option<BubblingFilter>) -> Self {
        if filter.is_some() {
            self.bubbling = true;
        }
        self.filter = filter;
        self
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    fn accepts_target(&self, target: &EventTarget) -> bool {
        if target.element == self.element {
            return true;
        }
        if !self.bubbling {
            return false;
        }
        self.filter
            .as_ref()
            .is_none_or(|filter| filter.accepts(&target.meta))
    }

    pub fn handle(&mut self, event: &AnimationEvent) -> TrackerChange {
        if !self.live {
            log::trace!(
                "tracker {}: detached, ignoring {:?} {}",
                self.element,
                event.kind,
                event.animation_name
            );
            return TrackerChange::Ignored;
        }
        if !self.accepts_target(&event.target) {
            return TrackerChange::Ignored;
        }

        let name = event.animation_name.as_str();
        match event.kind {
            AnimationEventKind::Start => {
                if !self.pattern.matches(name) {
                    return TrackerChange::Ignored;
                }
                if !self.running.iter().any(|n| n == name) {
                    self.running.push(name.to_string());
                }
                log::trace!("tracker {}: started {name}", self.element);
                TrackerChange::Started
            }
            AnimationEventKind::End | AnimationEventKind::Cancel => {
                let Some(index) = self.running.iter().position(|n| n == name) else {
                    log::trace!("tracker {}: untracked end for {name}", self.element);
                    return TrackerChange::Ignored;
                };
                self.running.remove(index);
                log::trace!("tracker {}: ended {name}", self.element);
                TrackerChange::Ended {
                    drained: self.running.is_empty(),
                }
            }
        }
    }

    /// At least one matching animation is running.
    pub fn is_running(&self) -> bool {
        !self.running.is_empty()
    }

    /// A running animation's name ends with `kind` at a word boundary.
    pub fn is_running_kind(&self, kind: &str) -> bool {
        self.running.iter().any(|name| suffix_matches(name, kind))
    }

    pub fn running(&self) -> impl Iterator<Item = &str> {
        self.running.iter().map(String::as_str)
    }

    /// Stops tracking. The registry is cleared and later events are no-ops.
    pub fn detach(&mut self) {
        self.live = false;
        self.running.clear();
    }
}
