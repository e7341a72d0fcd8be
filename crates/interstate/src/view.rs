//! View-index state for carousels, tabs and steppers.
//!
//! The same lifecycle as the binary states, over an integer index. A flight
//! toward a larger index is `Advancing`, toward a smaller one `Receding`.
//! While in flight both the departing and the arriving index must stay
//! mounted; [`ViewState::min_visible_view_index`] and
//! [`ViewState::max_visible_view_index`] bound that range.

use std::fmt;
use std::sync::Arc;

use statecss::{AnimationRegistry, ClassName, StateRule, StateSheet, StyleCell, StyleMap, VarScope};
use tokio::time::Instant;

use crate::config::{ChangeNotice, Restriction, StateOptions, Trigger};
use crate::store::StateCore;
use crate::driver::PhaseMachine;
use crate::error::{Result, StateError};
use crate::lifecycle::{Transition, Transitions};
use crate::phase::{PhaseEvent, PhaseEvents};
use crate::tracker::{AnimationEvent, AnimationTracker, ElementId};

const NAME: &str = "view";
const DEFAULT_PATTERN: [&str; 2] = ["advancing", "receding"];
const FROZEN_BY: Restriction = Restriction::DISABLED.union(Restriction::READ_ONLY);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewPhase {
    Settled,
    Advancing,
    Receding,
}

impl ViewPhase {
    pub const ALL: [ViewPhase; 3] = [Self::Settled, Self::Advancing, Self::Receding];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Settled => "settled",
            Self::Advancing => "advancing",
            Self::Receding => "receding",
        }
    }

    pub const fn class(self) -> &'static str {
        match self {
            Self::Settled => "is-view-settled",
            Self::Advancing => "is-view-advancing",
            Self::Receding => "is-view-receding",
        }
    }

    pub const fn is_transitioning(self) -> bool {
        !matches!(self, Self::Settled)
    }

    fn direction(from: i64, to: i64) -> Self {
        if to > from { Self::Advancing } else { Self::Receding }
    }
}

impl fmt::Display for ViewPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Admissible indices: `min..=max` in multiples of `step` above `min`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewRange {
    min: i64,
    max: i64,
    step: i64,
}

impl ViewRange {
    pub fn new(min: i64, max: i64, step: i64) -> Result<Self> {
        if min > max {
            return Err(StateError::InvalidRange { min, max });
        }
        if step <= 0 {
            return Err(StateError::InvalidStep(step));
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    /// Clamps into range, then snaps to the nearest step. Halfway values
    /// round up. A snap past `max` falls back one step.
    pub fn clamp(&self, index: i64) -> i64 {
        let clamped = index.clamp(self.min, self.max);
        let offset = i128::from(clamped) - i128::from(self.min);
        let step = i128::from(self.step);
        let mut snapped = (offset + step / 2) / step * step + i128::from(self.min);
        if snapped > i128::from(self.max) {
            snapped -= step;
        }
        // Within [min, max] after the fallback.
        i64::try_from(snapped).unwrap_or(self.max)
    }
}

impl Default for ViewRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: i64::MAX,
            step: 1,
        }
    }
}

#[derive(Debug, Default)]
pub struct ViewOptions {
    pub state: StateOptions<i64>,
    pub min: i64,
    pub max: Option<i64>,
    pub step: Option<i64>,
}

impl ViewOptions {
    pub fn new(default_index: i64) -> Self {
        Self::from(StateOptions::new(default_index))
    }

    pub fn with_min(mut self, min: i64) -> Self {
        self.min = min;
        self
    }

    pub fn with_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }

    /// Adjusts the wrapped state options.
    pub fn map_state(mut self, f: impl FnOnce(StateOptions<i64>) -> StateOptions<i64>) -> Self {
        self.state = f(self.state);
        self
    }

    pub fn range(&self) -> Result<ViewRange> {
        ViewRange::new(self.min, self.max.unwrap_or(i64::MAX), self.step.unwrap_or(1))
    }
}

impl From<StateOptions<i64>> for ViewOptions {
    fn from(state: StateOptions<i64>) -> Self {
        Self {
            state,
            min: 0,
            max: None,
            step: None,
        }
    }
}

pub struct ViewState {
    core: StateCore<i64>,
    range: ViewRange,
    scope: VarScope,
    style: StyleCell,
}

impl ViewState {
    /// Mounts a view state. Fails if the range or step is invalid.
    pub fn new(options: ViewOptions, element: ElementId) -> Result<Self> {
        let range = options.range()?;
        let mut state = options.state;
        state.value = state.value.map(|v| range.clamp(v));
        state.default_value = range.clamp(state.default_value);

        let core = StateCore::new(state, DEFAULT_PATTERN.into(), element, |value, _| value);
        let mut view = Self {
            core,
            range,
            scope: VarScope::from_static(NAME),
            style: StyleCell::default(),
        };
        view.refresh_style();
        Ok(view)
    }

    pub fn range(&self) -> ViewRange {
        self.range
    }

    pub fn view_index(&self) -> i64 {
        self.core.value()
    }

    pub fn is_controlled(&self) -> bool {
        self.core.is_controlled()
    }

    pub fn settled_view_index(&self) -> i64 {
        self.core.lifecycle.settled()
    }

    /// Index the current flight departed from, or the departure of the last
    /// completed flight.
    pub fn prev_view_index(&self) -> i64 {
        self.core.lifecycle.prev_settled()
    }

    pub fn phase(&self) -> ViewPhase {
        match self.core.lifecycle.flight() {
            Some(flight) => ViewPhase::direction(flight.from, flight.to),
            None => ViewPhase::Settled,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.core.lifecycle.flight().is_some()
    }

    pub fn min_visible_view_index(&self) -> i64 {
        match self.core.lifecycle.flight() {
            Some(flight) => flight.from.min(flight.to),
            None => self.core.lifecycle.settled(),
        }
    }

    pub fn max_visible_view_index(&self) -> i64 {
        match self.core.lifecycle.flight() {
            Some(flight) => flight.from.max(flight.to),
            None => self.core.lifecycle.settled(),
        }
    }

    pub fn classname(&self) -> ClassName {
        ClassName::state(&format!("{NAME}-{}", self.phase().name()))
    }

    pub fn style(&self) -> Arc<StyleMap> {
        self.style.get()
    }

    pub fn tracker(&self) -> &AnimationTracker {
        &self.core.tracker
    }

    /// Requests a new index. The index is clamped and snapped first.
    pub fn dispatch_view_index_change(&mut self, next: i64, trigger: Trigger, now: Instant) -> PhaseEvents<ViewPhase> {
        let next = self.range.clamp(next);
        if !self.core.request(next, trigger, FROZEN_BY) {
            return Vec::new();
        }
        self.sync(now)
    }

    pub fn next(&mut self, trigger: Trigger, now: Instant) -> PhaseEvents<ViewPhase> {
        let next = self.view_index().saturating_add(self.range.step);
        self.dispatch_view_index_change(next, trigger, now)
    }

    pub fn prev(&mut self, trigger: Trigger, now: Instant) -> PhaseEvents<ViewPhase> {
        let prev = self.view_index().saturating_sub(self.range.step);
        self.dispatch_view_index_change(prev, trigger, now)
    }

    pub fn set_controlled(&mut self, value: Option<i64>, now: Instant) -> PhaseEvents<ViewPhase> {
        self.core.set_controlled(value.map(|v| self.range.clamp(v)));
        self.sync(now)
    }

    pub fn set_restriction(&mut self, restriction: Restriction, now: Instant) -> PhaseEvents<ViewPhase> {
        self.core.restriction = restriction;
        self.sync(now)
    }

    pub fn handle_animation(&mut self, event: &AnimationEvent, now: Instant) -> PhaseEvents<ViewPhase> {
        let actual = self.view_index();
        let transitions = self.core.animation(event, actual, now);
        self.emit(transitions)
    }

    pub fn poll(&mut self, now: Instant) -> PhaseEvents<ViewPhase> {
        let actual = self.view_index();
        let transitions = self.core.poll(actual, now);
        self.emit(transitions)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.core.lifecycle.next_deadline()
    }

    pub fn unmount(&mut self) {
        log::debug!("{NAME}: unmounted");
        self.core.unmount();
    }

    fn sync(&mut self, now: Instant) -> PhaseEvents<ViewPhase> {
        let actual = self.view_index();
        let transitions = self.core.observe(actual, now);
        self.emit(transitions)
    }

    fn emit(&mut self, transitions: Transitions<i64>) -> PhaseEvents<ViewPhase> {
        let events: PhaseEvents<ViewPhase> = transitions
            .into_iter()
            .flat_map(|t| match t {
                Transition::Started { from, to } => [
                    PhaseEvent::End(ViewPhase::Settled),
                    PhaseEvent::Start(ViewPhase::direction(from, to)),
                ],
                Transition::Settled { from, to } => [
                    PhaseEvent::End(ViewPhase::direction(from, to)),
                    PhaseEvent::Start(ViewPhase::Settled),
                ],
            })
            .collect();
        for event in &events {
            log::debug!("{NAME}: {event}");
        }
        self.refresh_style();
        events
    }

    fn refresh_style(&mut self) {
        let presented = self.core.lifecycle.presented();
        let style = StyleMap::new()
            .with(&self.scope.var_static("index"), presented.to_string())
            .with(&self.scope.var_static("prev-index"), self.prev_view_index().to_string());
        self.style.update(style);
    }

    /// Per-phase animation selection, registering `--view-anim`.
    pub fn style_sheet(registry: &mut AnimationRegistry) -> StateSheet {
        let anim = VarScope::from_static(NAME).var_static("anim");
        registry.register(anim.clone());
        ViewPhase::ALL.into_iter().fold(StateSheet::new(), |sheet, phase| {
            let value = if phase.is_transitioning() {
                format!("var(--{NAME}-anim-{})", phase.name())
            } else {
                "none".to_string()
            };
            sheet.with(StateRule::new(ClassName::state(&format!("{NAME}-{}", phase.name()))).set(&anim, value))
        })
    }
}

impl fmt::Debug for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewState")
            .field("view_index", &self.view_index())
            .field("settled", &self.settled_view_index())
            .field("phase", &self.phase())
            .field("range", &self.range)
            .finish()
    }
}

impl PhaseMachine for ViewState {
    type Event = PhaseEvent<ViewPhase>;

    fn handle_animation(&mut self, event: &AnimationEvent, now: Instant) -> Vec<Self::Event> {
        ViewState::handle_animation(self, event, now)
    }

    fn poll(&mut self, now: Instant) -> Vec<Self::Event> {
        ViewState::poll(self, now)
    }

    fn next_deadline(&self) -> Option<Instant> {
        ViewState::next_deadline(self)
    }

    fn classname(&self) -> ClassName {
        ViewState::classname(self)
    }

    fn unmount(&mut self) {
        ViewState::unmount(self)
    }

    fn defer_notices(&mut self) {
        self.core.defer_notices();
    }

    fn take_notices(&mut self) -> Vec<ChangeNotice> {
        self.core.take_notices()
    }
}
