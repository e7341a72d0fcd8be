//! Async driver for interaction states.
//!
//! The states themselves are sans-IO: they take `now` explicitly and report
//! the next instant they need polling at. A [`StateDriver`] owns one state
//! and supplies the missing pieces for a tokio host:
//!
//! - Phase events are delivered as [`PhaseEnvelope`]s on an unbounded channel.
//! - The liveness fallback is scheduled as a timer task. Only one timer is
//!   pending per driver, and it is cancelled whenever the deadline moves.
//! - The current class name is published on a `watch` channel.
//! - [`StateDriver::unmount`] cancels the timer and detaches the tracker.
//!   Every asynchronous mutation checks the liveness flag first.
//! - The change handler runs after the state has been released, so it may
//!   call back into the driver (the usual controlled-mode loop).

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use statecss::ClassName;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::Instant;

use crate::config::ChangeNotice;
use crate::tracker::AnimationEvent;

/// A state machine a [`StateDriver`] can run.
pub trait PhaseMachine: Send + 'static {
    type Event: Send + fmt::Debug + 'static;

    fn handle_animation(&mut self, event: &AnimationEvent, now: Instant) -> Vec<Self::Event>;

    fn poll(&mut self, now: Instant) -> Vec<Self::Event>;

    fn next_deadline(&self) -> Option<Instant>;

    fn classname(&self) -> ClassName;

    fn unmount(&mut self);

    /// Queue change handler calls instead of running them inline.
    fn defer_notices(&mut self);

    /// Drains the queued change handler calls.
    fn take_notices(&mut self) -> Vec<ChangeNotice>;
}

/// What produced a phase event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOrigin {
    /// A change request or a re-render with new props.
    Render,
    /// A native animation event.
    Animation,
    /// The liveness fallback.
    Timer,
}

/// A phase event along with routing metadata.
#[derive(Clone, Debug)]
pub struct PhaseEnvelope<E> {
    pub event: E,
    pub origin: EventOrigin,
    /// Class name right after the event was applied.
    pub classname: ClassName,
}

impl<E> PhaseEnvelope<E> {
    pub fn new(event: E, origin: EventOrigin, classname: ClassName) -> Self {
        Self {
            event,
            origin,
            classname,
        }
    }
}

/// Handle to cancel a pending settle timer. Dropping it cancels the timer.
struct TimerHandle {
    deadline: Instant,
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl TimerHandle {
    fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

struct Inner<M: PhaseMachine> {
    machine: Mutex<M>,
    sender: mpsc::UnboundedSender<PhaseEnvelope<M::Event>>,
    live: AtomicBool,
    timer: Mutex<Option<TimerHandle>>,
    classname: watch::Sender<ClassName>,
}

/// Runs a [`PhaseMachine`] on the current tokio runtime.
///
/// Cloning shares the same state. Methods that may schedule a timer must be
/// called from within a tokio runtime.
pub struct StateDriver<M: PhaseMachine> {
    inner: Arc<Inner<M>>,
}

impl<M: PhaseMachine> Clone for StateDriver<M> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<M: PhaseMachine> StateDriver<M> {
    pub fn new(mut machine: M, sender: mpsc::UnboundedSender<PhaseEnvelope<M::Event>>) -> Self {
        machine.defer_notices();
        let (classname, _) = watch::channel(machine.classname());
        let driver = Self {
            inner: Arc::new(Inner {
                machine: Mutex::new(machine),
                sender,
                live: AtomicBool::new(true),
                timer: Mutex::new(None),
                classname,
            }),
        };
        let deadline = lock(&driver.inner.machine).next_deadline();
        reschedule(&driver.inner, deadline);
        driver
    }

    /// Creates a driver along with the receiving end of its event channel.
    pub fn channel(machine: M) -> (Self, mpsc::UnboundedReceiver<PhaseEnvelope<M::Event>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(machine, tx), rx)
    }

    pub fn is_live(&self) -> bool {
        self.inner.live.load(Ordering::Acquire)
    }

    /// Reads the machine.
    pub fn with<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        f(&lock(&self.inner.machine))
    }

    /// Mutates the machine, e.g. to dispatch a change or apply new props.
    ///
    /// The closure receives the current instant and returns the events its
    /// mutation produced. Does nothing after unmount. Change handler calls
    /// the mutation made are delivered after the machine is released.
    pub fn update(&self, f: impl FnOnce(&mut M, Instant) -> Vec<M::Event>) {
        if !self.is_live() {
            return;
        }
        let notices = {
            let mut machine = lock(&self.inner.machine);
            let events = f(&mut machine, Instant::now());
            deliver(&self.inner, &machine, events, EventOrigin::Render);
            machine.take_notices()
        };
        for notice in notices {
            notice.deliver();
        }
    }

    /// Feeds a native animation event.
    pub fn animation_event(&self, event: &AnimationEvent) {
        if !self.is_live() {
            log::trace!("driver: {:?} after unmount ignored", event.kind);
            return;
        }
        let mut machine = lock(&self.inner.machine);
        let events = machine.handle_animation(event, Instant::now());
        deliver(&self.inner, &machine, events, EventOrigin::Animation);
    }

    /// Subscribes to class name changes.
    pub fn classname_watch(&self) -> watch::Receiver<ClassName> {
        self.inner.classname.subscribe()
    }

    pub fn classname(&self) -> ClassName {
        self.inner.classname.borrow().clone()
    }

    /// Stops all further event delivery and cancels the pending timer.
    pub fn unmount(&self) {
        if !self.inner.live.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(mut timer) = lock(&self.inner.timer).take() {
            timer.cancel();
        }
        lock(&self.inner.machine).unmount();
    }
}

impl<M: PhaseMachine + fmt::Debug> fmt::Debug for StateDriver<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDriver")
            .field("live", &self.is_live())
            .field("machine", &*lock(&self.inner.machine))
            .finish()
    }
}

/// Publishes events and the class name, then re-arms the timer.
fn deliver<M: PhaseMachine>(inner: &Arc<Inner<M>>, machine: &M, events: Vec<M::Event>, origin: EventOrigin) {
    let classname = machine.classname();
    for event in events {
        log::trace!("driver: {event:?} ({origin:?})");
        let envelope = PhaseEnvelope::new(event, origin, classname.clone());
        if inner.sender.send(envelope).is_err() {
            log::debug!("driver: receiver dropped");
        }
    }
    inner.classname.send_if_modified(|current| {
        if *current == classname {
            return false;
        }
        *current = classname;
        true
    });
    reschedule(inner, machine.next_deadline());
}

fn reschedule<M: PhaseMachine>(inner: &Arc<Inner<M>>, deadline: Option<Instant>) {
    let mut slot = lock(&inner.timer);
    if slot.as_ref().map(|t| t.deadline) == deadline {
        return;
    }
    // Dropping the previous handle cancels it.
    *slot = deadline.map(|deadline| spawn_timer(Arc::downgrade(inner), deadline));
}

fn spawn_timer<M: PhaseMachine>(inner: Weak<Inner<M>>, deadline: Instant) -> TimerHandle {
    let (cancel_tx, mut cancel_rx) = oneshot::channel();

    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => {}
            _ = &mut cancel_rx => return,
        }
        let Some(inner) = inner.upgrade() else {
            return;
        };
        if !inner.live.load(Ordering::Acquire) {
            return;
        }
        // Forget our own handle so a re-arm at the same deadline spawns anew.
        if let Some(mut handle) = lock(&inner.timer).take() {
            handle.cancel_tx = None;
        }
        let mut machine = lock(&inner.machine);
        let events = machine.poll(Instant::now());
        deliver(&inner, &machine, events, EventOrigin::Timer);
    });

    TimerHandle {
        deadline,
        cancel_tx: Some(cancel_tx),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;
    use std::time::Duration;

    use super::*;
    use crate::phase::PhaseEvent;
    use crate::states::active::{ActivePhase, ActiveState};
    use crate::{StateOptions, Trigger};

    #[tokio::test(start_paused = true)]
    async fn test_timer_settles_without_animation() {
        let (driver, mut rx) = StateDriver::channel(ActiveState::new(StateOptions::new(false), 1));

        driver.update(|state, now| state.dispatch_change(true, Trigger::Pointer, now));
        let left = rx.recv().await.unwrap();
        assert_eq!(left.event, PhaseEvent::End(ActivePhase::Inactive));
        let start = rx.recv().await.unwrap();
        assert_eq!(start.event, PhaseEvent::Start(ActivePhase::Activating));
        assert_eq!(start.origin, EventOrigin::Render);
        assert_eq!(start.classname.as_str(), "is-activating");

        let end = rx.recv().await.unwrap();
        assert_eq!(end.event, PhaseEvent::End(ActivePhase::Activating));
        assert_eq!(end.origin, EventOrigin::Timer);
        let resolved = rx.recv().await.unwrap();
        assert_eq!(resolved.event, PhaseEvent::Start(ActivePhase::Active));
        assert_eq!(resolved.origin, EventOrigin::Timer);
        assert_eq!(driver.classname().as_str(), "is-active");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_cancels_timer() {
        let (driver, mut rx) = StateDriver::channel(ActiveState::new(StateOptions::new(false), 1));
        driver.update(|state, now| state.dispatch_change(true, Trigger::Pointer, now));
        let _ = rx.recv().await.unwrap();
        let _ = rx.recv().await.unwrap();

        driver.unmount();
        assert!(!driver.is_live());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(driver.with(|state| state.phase()), ActivePhase::Activating);
    }

    #[tokio::test(start_paused = true)]
    async fn test_classname_watch() {
        let (driver, _rx) = StateDriver::channel(ActiveState::new(StateOptions::new(false), 1));
        let mut watch = driver.classname_watch();
        assert_eq!(watch.borrow().as_str(), "is-inactive");

        driver.update(|state, now| state.dispatch_change(true, Trigger::Pointer, now));
        watch.changed().await.unwrap();
        assert_eq!(watch.borrow_and_update().as_str(), "is-activating");
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_handler_may_update_the_driver() {
        // The parent owns the value and feeds it back as the controlled prop.
        let parent: Arc<OnceLock<StateDriver<ActiveState>>> = Arc::new(OnceLock::new());
        let slot = parent.clone();
        let options = StateOptions::new(false)
            .with_value(false)
            .with_on_change(move |value, _| {
                if let Some(driver) = slot.get() {
                    driver.update(|state, now| state.set_controlled(Some(value), now));
                }
            });
        let (driver, mut rx) = StateDriver::channel(ActiveState::new(options, 1));
        assert!(parent.set(driver.clone()).is_ok());

        driver.update(|state, now| state.dispatch_change(true, Trigger::Pointer, now));

        assert!(driver.with(|state| state.value()));
        assert_eq!(driver.with(|state| state.phase()), ActivePhase::Activating);
        let left = rx.recv().await.unwrap();
        assert_eq!(left.event, PhaseEvent::End(ActivePhase::Inactive));
        let start = rx.recv().await.unwrap();
        assert_eq!(start.event, PhaseEvent::Start(ActivePhase::Activating));
    }
}
