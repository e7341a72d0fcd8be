//! The lifecycle engine shared by every interaction state.
//!
//! A [`Lifecycle`] tracks the gap between the logical value a consumer asked
//! for and the value the visuals have settled at:
//!
//! - While `actual == settled` the state is resolved.
//! - When they diverge a flight starts from `settled` toward `actual`.
//! - A flight is never restarted or retargeted. Later changes to `actual`
//!   only take effect once the flight lands.
//! - A flight lands one settle frame after the tracker drains, having
//!   observed a matching animation, provided no other matching animation
//!   started in between. It also lands when no matching animation started
//!   within the settle grace. Landing moves `settled` to the flight's target,
//!   then a new flight starts immediately if `actual` has moved on.

use smallvec::SmallVec;
use tokio::time::Instant;

use crate::config::SettlePolicy;
use crate::tracker::TrackerChange;

/// An in-progress transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flight<T> {
    pub from: T,
    pub to: T,
    observed: bool,
    deadline: Instant,
    /// Set while the tracker is drained; the flight lands here.
    settle_at: Option<Instant>,
}

impl<T: Ord> Flight<T> {
    pub fn is_advancing(&self) -> bool {
        self.to > self.from
    }

    /// A matching animation has been seen running for this flight.
    pub fn is_observed(&self) -> bool {
        self.observed
    }

    /// The tracker drained and the flight lands at the returned instant.
    pub fn settling_at(&self) -> Option<Instant> {
        self.settle_at
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition<T> {
    Started { from: T, to: T },
    Settled { from: T, to: T },
}

pub type Transitions<T> = SmallVec<[Transition<T>; 2]>;

#[derive(Debug)]
pub struct Lifecycle<T> {
    settled: T,
    last_from: T,
    flight: Option<Flight<T>>,
    policy: SettlePolicy,
    live: bool,
}

impl<T: Ord + Copy + std::fmt::Debug> Lifecycle<T> {
    /// Starts resolved at `initial`; no transition plays on mount.
    pub fn new(initial: T, policy: SettlePolicy) -> Self {
        Self {
            settled: initial,
            last_from: initial,
            flight: None,
            policy,
            live: true,
        }
    }

    pub fn settled(&self) -> T {
        self.settled
    }

    pub fn flight(&self) -> Option<&Flight<T>> {
        self.flight.as_ref()
    }

    /// The value the current flight departed from, or the departure value
    /// of the last completed flight.
    pub fn prev_settled(&self) -> T {
        self.flight.map_or(self.last_from, |f| f.from)
    }

    /// The value the visuals are at or heading to.
    pub fn presented(&self) -> T {
        self.flight.map_or(self.settled, |f| f.to)
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Reconciles with the current logical value.
    pub fn observe(&mut self, actual: T, now: Instant) -> Transitions<T> {
        let mut out = Transitions::new();
        self.begin_if_diverged(actual, now, &mut out);
        out
    }

    fn begin_if_diverged(&mut self, actual: T, now: Instant, out: &mut Transitions<T>) {
        if !self.live || self.flight.is_some() || actual == self.settled {
            return;
        }
        self.flight = Some(Flight {
            from: self.settled,
            to: actual,
            observed: false,
            deadline: now + self.policy.start_grace,
            settle_at: None,
        });
        log::debug!("lifecycle: flight {:?} -> {:?}", self.settled, actual);
        out.push(Transition::Started {
            from: self.settled,
            to: actual,
        });
    }

    /// Applies a tracker change.
    pub fn on_tracker(&mut self, change: TrackerChange, actual: T, now: Instant) -> Transitions<T> {
        let mut out = Transitions::new();
        if !self.live {
            return out;
        }
        let Some(flight) = self.flight.as_mut() else {
            return out;
        };
        match change {
            TrackerChange::Ignored => {}
            TrackerChange::Started => {
                flight.observed = true;
                flight.settle_at = None;
            }
            // A stale animation draining before ours started says nothing
            // about this flight.
            TrackerChange::Ended { drained } if drained && flight.observed => {
                if self.policy.settle_frame.is_zero() {
                    self.land(actual, now, &mut out);
                } else {
                    flight.settle_at = Some(now + self.policy.settle_frame);
                }
            }
            TrackerChange::Ended { .. } => {}
        }
        out
    }

    /// Lands a flight whose settle frame has passed, or whose grace expired
    /// without a matching animation.
    pub fn poll(&mut self, actual: T, now: Instant) -> Transitions<T> {
        let mut out = Transitions::new();
        if !self.live {
            return out;
        }
        if let Some(flight) = self.flight {
            if flight.settle_at.is_some_and(|at| now >= at) {
                self.land(actual, now, &mut out);
            } else if !flight.observed && now >= flight.deadline {
                log::debug!("lifecycle: no animation for {:?}, settling", flight.to);
                self.land(actual, now, &mut out);
            }
        }
        out
    }

    fn land(&mut self, actual: T, now: Instant, out: &mut Transitions<T>) {
        let Some(flight) = self.flight.take() else {
            return;
        };
        self.last_from = flight.from;
        self.settled = flight.to;
        log::debug!("lifecycle: settled at {:?}", flight.to);
        out.push(Transition::Settled {
            from: flight.from,
            to: flight.to,
        });
        self.begin_if_diverged(actual, now, out);
    }

    /// The instant the host must poll at, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.live {
            return None;
        }
        let flight = self.flight?;
        match flight.settle_at {
            Some(at) => Some(at),
            None if !flight.observed => Some(flight.deadline),
            None => None,
        }
    }

    /// Freezes the lifecycle. Nothing transitions afterwards.
    pub fn detach(&mut self) {
        self.live = false;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn lifecycle() -> (Lifecycle<bool>, Instant) {
        (Lifecycle::new(false, SettlePolicy::default()), Instant::now())
    }

    #[test]
    fn test_equal_values_stay_resolved() {
        let (mut lc, now) = lifecycle();
        assert!(lc.observe(false, now).is_empty());
        assert!(lc.flight().is_none());
        assert_eq!(lc.next_deadline(), None);
    }

    #[test]
    fn test_divergence_starts_flight() {
        let (mut lc, now) = lifecycle();
        let out = lc.observe(true, now);
        assert_eq!(
            out.as_slice(),
            &[Transition::Started {
                from: false,
                to: true
            }]
        );
        assert!(lc.presented());
        assert!(!lc.settled());
        assert_eq!(lc.next_deadline(), Some(now + SettlePolicy::DEFAULT_START_GRACE));
    }

    #[test]
    fn test_flight_not_restarted() {
        let (mut lc, now) = lifecycle();
        lc.observe(true, now);
        assert!(lc.observe(false, now).is_empty());
        assert!(lc.observe(true, now).is_empty());
        assert_eq!(lc.flight().map(|f| f.to), Some(true));
    }

    #[test]
    fn test_grace_expiry_lands() {
        let (mut lc, now) = lifecycle();
        lc.observe(true, now);
        assert!(lc.poll(true, now + Duration::from_millis(10)).is_empty());
        let out = lc.poll(true, now + Duration::from_millis(50));
        assert_eq!(
            out.as_slice(),
            &[Transition::Settled {
                from: false,
                to: true
            }]
        );
        assert!(lc.settled());
    }

    #[test]
    fn test_observed_flight_ignores_grace() {
        let (mut lc, now) = lifecycle();
        lc.observe(true, now);
        lc.on_tracker(TrackerChange::Started, true, now);
        assert!(lc.flight().is_some_and(|f| f.is_observed()));
        assert_eq!(lc.next_deadline(), None);
        assert!(lc.poll(true, now + Duration::from_secs(5)).is_empty());

        let drained = now + Duration::from_secs(6);
        assert!(lc.on_tracker(TrackerChange::Ended { drained: true }, true, drained).is_empty());
        let settle = drained + SettlePolicy::DEFAULT_SETTLE_FRAME;
        assert_eq!(lc.next_deadline(), Some(settle));
        assert_eq!(lc.poll(true, settle).len(), 1);
        assert!(lc.settled());
    }

    #[test]
    fn test_sequential_animations_keep_flight_open() {
        let (mut lc, now) = lifecycle();
        lc.observe(true, now);
        lc.on_tracker(TrackerChange::Started, true, now);
        let first_end = now + Duration::from_millis(200);
        lc.on_tracker(TrackerChange::Ended { drained: true }, true, first_end);
        let settle_at = lc.flight().and_then(|f| f.settling_at());
        assert_eq!(settle_at, Some(first_end + SettlePolicy::DEFAULT_SETTLE_FRAME));

        // The next animation starts within the frame.
        let second_start = first_end + Duration::from_millis(8);
        assert!(lc.on_tracker(TrackerChange::Started, true, second_start).is_empty());
        assert_eq!(lc.next_deadline(), None);
        assert!(lc.poll(true, first_end + Duration::from_millis(40)).is_empty());
        assert!(lc.flight().is_some());

        let second_end = first_end + Duration::from_millis(300);
        lc.on_tracker(TrackerChange::Ended { drained: true }, true, second_end);
        assert!(lc.poll(true, second_end + Duration::from_millis(15)).is_empty());
        let out = lc.poll(true, second_end + Duration::from_millis(16));
        assert_eq!(
            out.as_slice(),
            &[Transition::Settled {
                from: false,
                to: true
            }]
        );
    }

    #[test]
    fn test_zero_settle_frame_lands_on_drain() {
        let mut lc = Lifecycle::new(false, SettlePolicy::default().with_settle_frame(Duration::ZERO));
        let now = Instant::now();
        lc.observe(true, now);
        lc.on_tracker(TrackerChange::Started, true, now);
        let out = lc.on_tracker(TrackerChange::Ended { drained: true }, true, now);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_unobserved_drain_ignored() {
        let (mut lc, now) = lifecycle();
        lc.observe(true, now);
        let out = lc.on_tracker(TrackerChange::Ended { drained: true }, true, now);
        assert!(out.is_empty());
        assert!(lc.flight().is_some());
    }

    #[test]
    fn test_reversal_lands_then_returns() {
        let (mut lc, now) = lifecycle();
        lc.observe(true, now);
        lc.on_tracker(TrackerChange::Started, false, now);
        assert!(lc.on_tracker(TrackerChange::Ended { drained: true }, false, now).is_empty());
        let out = lc.poll(false, now + SettlePolicy::DEFAULT_SETTLE_FRAME);
        assert_eq!(
            out.as_slice(),
            &[
                Transition::Settled {
                    from: false,
                    to: true
                },
                Transition::Started {
                    from: true,
                    to: false
                },
            ]
        );
        assert!(lc.prev_settled());
    }

    #[test]
    fn test_prev_settled_tracks_departures() {
        let mut lc = Lifecycle::new(0i64, SettlePolicy::immediate());
        let now = Instant::now();
        assert_eq!(lc.prev_settled(), 0);
        lc.observe(2, now);
        assert_eq!(lc.prev_settled(), 0);
        lc.poll(2, now);
        assert_eq!(lc.settled(), 2);
        assert_eq!(lc.prev_settled(), 0);
        lc.observe(3, now);
        assert_eq!(lc.prev_settled(), 2);
        assert!(lc.flight().is_some_and(|f| f.is_advancing()));
    }

    #[test]
    fn test_detached_lifecycle_is_frozen() {
        let (mut lc, now) = lifecycle();
        lc.observe(true, now);
        lc.detach();
        assert!(lc.poll(true, now + Duration::from_secs(1)).is_empty());
        assert_eq!(lc.next_deadline(), None);
        assert!(lc.observe(false, now).is_empty());
    }
}
