//! Two-valued interaction states.
//!
//! [`BinaryState`] binds the lifecycle engine to a [`BinaryKind`], which
//! supplies the domain names: the phase enum, the default animation
//! suffixes, and which cascaded restrictions freeze or force the state.
//!
//! ## Phases
//!
//! ```text
//!   Resolved(false) --dispatch(true)--> Transitioning(->true)
//!         ^                                     |
//!     animation settles                 animation settles
//!         |                                     v
//!   Transitioning(->false) <--dispatch(false)-- Resolved(true)
//! ```
//!
//! Dispatching while a transition is in flight never interrupts it. The
//! request is remembered and a fresh transition starts once the current one
//! has landed.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use statecss::{AnimationRegistry, ClassName, StateRule, StateSheet, StyleCell, StyleMap, VarScope};
use tokio::time::Instant;

use crate::config::{ChangeNotice, Restriction, StateOptions, Trigger};
use crate::store::StateCore;
use crate::driver::PhaseMachine;
use crate::lifecycle::{Transition, Transitions};
use crate::phase::{BinaryPhase, PhaseEvent, PhaseEvents};
use crate::tracker::{AnimationEvent, AnimationTracker, ElementId};

/// Domain naming for a two-valued state.
pub trait BinaryKind: 'static {
    /// Domain phase names, e.g. `Inactive | Activating | Active | Deactivating`.
    type Phase: Copy + fmt::Debug + fmt::Display + Eq + Send + From<BinaryPhase> + 'static;

    /// Prefix for custom properties and log records, e.g. `"active"`.
    const NAME: &'static str;

    /// Animation suffixes matched when no pattern is configured.
    const DEFAULT_PATTERN: &'static [&'static str];

    /// Cascaded restrictions that make change requests no-ops.
    const FROZEN_BY: Restriction;

    /// Requests for `false` still pass while frozen. Set for states that
    /// mirror transient input, so one engaged when the restriction arrived
    /// can still be let go.
    const RELEASES_WHEN_FROZEN: bool;

    /// Cascaded restrictions that force the state to `true`.
    const CASCADES: Restriction;

    /// Kebab-case name of a phase, used for `is-*` class names.
    fn phase_name(phase: BinaryPhase) -> &'static str;
}

pub struct BinaryState<K: BinaryKind> {
    core: StateCore<bool>,
    scope: VarScope,
    style: StyleCell,
    _kind: PhantomData<fn() -> K>,
}

impl<K: BinaryKind> BinaryState<K> {
    /// Mounts a state on `element`. The state starts resolved at its initial
    /// value; no transition plays on mount.
    pub fn new(options: StateOptions<bool>, element: ElementId) -> Self {
        let core = StateCore::new(options, K::DEFAULT_PATTERN.into(), element, |value, restriction| {
            value || restriction.intersects(K::CASCADES)
        });
        let mut state = Self {
            core,
            scope: VarScope::from_static(K::NAME),
            style: StyleCell::default(),
            _kind: PhantomData,
        };
        state.refresh_style();
        state
    }

    /// The logical value owned by this state (or its controlling prop).
    pub fn value(&self) -> bool {
        self.core.value()
    }

    /// The logical value after cascaded restrictions are applied.
    pub fn effective(&self) -> bool {
        self.core.value() || self.core.restriction.intersects(K::CASCADES)
    }

    pub fn is_controlled(&self) -> bool {
        self.core.is_controlled()
    }

    pub fn restriction(&self) -> Restriction {
        self.core.restriction
    }

    pub fn binary_phase(&self) -> BinaryPhase {
        match self.core.lifecycle.flight() {
            Some(flight) => BinaryPhase::transitioning_to(flight.to),
            None => BinaryPhase::resolved(self.core.lifecycle.settled()),
        }
    }

    pub fn phase(&self) -> K::Phase {
        self.binary_phase().into()
    }

    pub fn is_in_flight(&self) -> bool {
        self.core.lifecycle.flight().is_some()
    }

    /// The value the visuals have settled at or are heading to.
    pub fn presented(&self) -> bool {
        self.core.lifecycle.presented()
    }

    pub fn classname(&self) -> ClassName {
        ClassName::state(K::phase_name(self.binary_phase()))
    }

    /// Custom properties for the owning element. Identity only changes when
    /// the values change.
    pub fn style(&self) -> Arc<StyleMap> {
        self.style.get()
    }

    pub fn tracker(&self) -> &AnimationTracker {
        &self.core.tracker
    }

    /// Requests a new value.
    ///
    /// Uncontrolled states store it; controlled states only report it to the
    /// change handler. Restricted states ignore the request, except for
    /// releases of kinds that set [`BinaryKind::RELEASES_WHEN_FROZEN`].
    pub fn dispatch_change(&mut self, next: bool, trigger: Trigger, now: Instant) -> PhaseEvents<K::Phase> {
        let frozen_by = if K::RELEASES_WHEN_FROZEN && !next {
            Restriction::empty()
        } else {
            K::FROZEN_BY
        };
        if !self.core.request(next, trigger, frozen_by) {
            return Vec::new();
        }
        self.sync(now)
    }

    pub fn toggle(&mut self, trigger: Trigger, now: Instant) -> PhaseEvents<K::Phase> {
        let next = !self.value();
        self.dispatch_change(next, trigger, now)
    }

    /// Re-render with a new controlled prop (`None` switches to uncontrolled).
    pub fn set_controlled(&mut self, value: Option<bool>, now: Instant) -> PhaseEvents<K::Phase> {
        self.core.set_controlled(value);
        self.sync(now)
    }

    /// Re-render with new cascaded restrictions.
    pub fn set_restriction(&mut self, restriction: Restriction, now: Instant) -> PhaseEvents<K::Phase> {
        self.core.restriction = restriction;
        self.sync(now)
    }

    pub fn handle_animation(&mut self, event: &AnimationEvent, now: Instant) -> PhaseEvents<K::Phase> {
        let actual = self.effective();
        let transitions = self.core.animation(event, actual, now);
        self.emit(transitions)
    }

    pub fn poll(&mut self, now: Instant) -> PhaseEvents<K::Phase> {
        let actual = self.effective();
        let transitions = self.core.poll(actual, now);
        self.emit(transitions)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.core.lifecycle.next_deadline()
    }

    /// Stops tracking. Later events, polls and requests do nothing.
    pub fn unmount(&mut self) {
        log::debug!("{}: unmounted", K::NAME);
        self.core.unmount();
    }

    fn sync(&mut self, now: Instant) -> PhaseEvents<K::Phase> {
        let actual = self.effective();
        let transitions = self.core.observe(actual, now);
        self.emit(transitions)
    }

    fn emit(&mut self, transitions: Transitions<bool>) -> PhaseEvents<K::Phase> {
        let events: PhaseEvents<K::Phase> = transitions
            .into_iter()
            .flat_map(|t| {
                let (left, entered) = match t {
                    Transition::Started { from, to } => {
                        (BinaryPhase::resolved(from), BinaryPhase::transitioning_to(to))
                    }
                    Transition::Settled { to, .. } => {
                        (BinaryPhase::transitioning_to(to), BinaryPhase::resolved(to))
                    }
                };
                [
                    PhaseEvent::End(K::Phase::from(left)),
                    PhaseEvent::Start(K::Phase::from(entered)),
                ]
            })
            .collect();
        for event in &events {
            log::debug!("{}: {event}", K::NAME);
        }
        self.refresh_style();
        events
    }

    fn refresh_style(&mut self) {
        let flag = |on: bool| if on { "1" } else { "0" };
        let style = StyleMap::new()
            .with(&self.scope.var_static("state"), flag(self.presented()))
            .with(
                &self.scope.var_static("prev"),
                flag(self.core.lifecycle.prev_settled()),
            );
        self.style.update(style);
    }

    /// Per-phase animation selection for this kind.
    ///
    /// Registers `--{name}-anim` in `registry`. Transitional classes point it
    /// at `--{name}-anim-{phase}`; resolved classes set it to `none`.
    pub fn style_sheet(registry: &mut AnimationRegistry) -> StateSheet {
        let scope = VarScope::from_static(K::NAME);
        let anim = scope.var_static("anim");
        registry.register(anim.clone());

        let phases = [
            BinaryPhase::ResolvedFalse,
            BinaryPhase::TransitioningToTrue,
            BinaryPhase::ResolvedTrue,
            BinaryPhase::TransitioningToFalse,
        ];
        phases.into_iter().fold(StateSheet::new(), |sheet, phase| {
            let name = K::phase_name(phase);
            let value = if phase.is_transitioning() {
                format!("var(--{}-anim-{name})", K::NAME)
            } else {
                "none".to_string()
            };
            sheet.with(StateRule::new(ClassName::state(name)).set(&anim, value))
        })
    }
}

impl<K: BinaryKind> fmt::Debug for BinaryState<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryState")
            .field("kind", &K::NAME)
            .field("value", &self.value())
            .field("phase", &self.phase())
            .field("restriction", &self.restriction())
            .finish()
    }
}

impl<K: BinaryKind> PhaseMachine for BinaryState<K> {
    type Event = PhaseEvent<K::Phase>;

    fn handle_animation(&mut self, event: &AnimationEvent, now: Instant) -> Vec<Self::Event> {
        BinaryState::handle_animation(self, event, now)
    }

    fn poll(&mut self, now: Instant) -> Vec<Self::Event> {
        BinaryState::poll(self, now)
    }

    fn next_deadline(&self) -> Option<Instant> {
        BinaryState::next_deadline(self)
    }

    fn classname(&self) -> ClassName {
        BinaryState::classname(self)
    }

    fn unmount(&mut self) {
        BinaryState::unmount(self)
    }

    fn defer_notices(&mut self) {
        self.core.defer_notices();
    }

    fn take_notices(&mut self) -> Vec<ChangeNotice> {
        self.core.take_notices()
    }
}
