use crate::Restriction;

crate::define_binary_state! {
    /// Active/inactive, e.g. a toggle button or a selected list item.
    ActiveState, ActiveKind, ActivePhase {
        name: "active",
        phases: [
            Inactive = "inactive",
            Activating = "activating",
            Active = "active",
            Deactivating = "deactivating",
        ],
        pattern: ["activating", "deactivating"],
        frozen_by: Restriction::DISABLED.union(Restriction::READ_ONLY),
        releases_when_frozen: false,
        cascades: Restriction::empty(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;
    use crate::phase::PhaseEvent;
    use crate::tracker::{AnimationEvent, EventTarget};
    use crate::{StateOptions, Trigger};

    fn target() -> EventTarget {
        EventTarget::new(7, "button")
    }

    #[test]
    fn test_initial_phase_resolved() {
        let state = ActiveState::new(StateOptions::new(true), 7);
        assert_eq!(state.phase(), ActivePhase::Active);
        assert_eq!(state.classname().as_str(), "is-active");
        assert!(!state.is_in_flight());
    }

    #[test]
    fn test_activation_follows_animation() {
        let now = Instant::now();
        let mut state = ActiveState::new(StateOptions::new(false), 7);

        let events = state.dispatch_change(true, Trigger::Pointer, now);
        assert_eq!(
            events,
            vec![PhaseEvent::End(ActivePhase::Inactive), PhaseEvent::Start(ActivePhase::Activating)]
        );
        assert_eq!(state.phase(), ActivePhase::Activating);

        let at = now + Duration::from_millis(16);
        assert!(state.handle_animation(&AnimationEvent::start("btn-activating", target()), at).is_empty());

        // Long after the grace period the animation is still running.
        assert!(state.poll(now + Duration::from_millis(400)).is_empty());
        assert_eq!(state.phase(), ActivePhase::Activating);

        let end = now + Duration::from_millis(500);
        assert!(state.handle_animation(&AnimationEvent::end("btn-activating", target()), end).is_empty());
        assert_eq!(state.next_deadline(), Some(end + Duration::from_millis(16)));

        let events = state.poll(end + Duration::from_millis(16));
        assert_eq!(
            events,
            vec![PhaseEvent::End(ActivePhase::Activating), PhaseEvent::Start(ActivePhase::Active)]
        );
        assert_eq!(state.phase(), ActivePhase::Active);
    }

    #[test]
    fn test_zero_length_transition_still_reports_resolved_phase() {
        let now = Instant::now();
        let mut state = ActiveState::new(StateOptions::new(false), 7);
        state.dispatch_change(true, Trigger::Pointer, now);
        state.dispatch_change(false, Trigger::Pointer, now);

        let names: Vec<String> = state
            .poll(now + Duration::from_millis(60))
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, ["activating:end", "active:start", "active:end", "deactivating:start"]);
    }

    #[test]
    fn test_restriction_mid_flight_lets_the_flight_land() {
        let now = Instant::now();
        let mut state = ActiveState::new(StateOptions::new(false), 7);
        state.dispatch_change(true, Trigger::Pointer, now);

        assert!(state.set_restriction(Restriction::DISABLED, now).is_empty());
        assert_eq!(state.phase(), ActivePhase::Activating);

        let events = state.poll(now + Duration::from_millis(50));
        assert_eq!(events.last(), Some(&PhaseEvent::Start(ActivePhase::Active)));
        assert!(state.value());

        assert!(state.dispatch_change(false, Trigger::Pointer, now).is_empty());
        assert!(state.toggle(Trigger::Keyboard, now).is_empty());
        assert!(state.value());
        assert_eq!(state.phase(), ActivePhase::Active);
    }

    #[test]
    fn test_bubbled_animations_in_sequence() {
        let now = Instant::now();
        let options = StateOptions::new(false).with_animation_bubbling(true);
        let mut state = ActiveState::new(options, 7);
        state.dispatch_change(true, Trigger::Pointer, now);

        let label = EventTarget::new(8, "span");
        let icon = EventTarget::new(9, "svg");
        let ms = |n| now + Duration::from_millis(n);
        state.handle_animation(&AnimationEvent::start("label-activating", label.clone()), ms(16));
        state.handle_animation(&AnimationEvent::end("label-activating", label), ms(216));

        // The icon picks up before the settle frame passes.
        state.handle_animation(&AnimationEvent::start("icon-activating", icon.clone()), ms(224));
        assert!(state.poll(ms(240)).is_empty());
        assert_eq!(state.phase(), ActivePhase::Activating);
        assert!(state.tracker().is_running_kind("activating"));

        state.handle_animation(&AnimationEvent::end("icon-activating", icon), ms(424));
        assert!(state.poll(ms(439)).is_empty());
        assert!(!state.poll(ms(440)).is_empty());
        assert_eq!(state.phase(), ActivePhase::Active);
    }

    #[test]
    fn test_restricted_dispatch_is_noop() {
        let now = Instant::now();
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = calls.clone();
        let options = StateOptions::new(false)
            .with_cascade_read_only(true)
            .with_on_change(move |_, _| {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            });
        let mut state = ActiveState::new(options, 7);

        assert!(state.dispatch_change(true, Trigger::Pointer, now).is_empty());
        assert!(!state.value());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);

        state.set_restriction(Restriction::empty(), now);
        state.dispatch_change(true, Trigger::Pointer, now);
        assert!(state.value());
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn test_names() {
        assert_eq!(ActivePhase::Deactivating.class(), "is-deactivating");
        assert!(ActivePhase::Activating.is_transitioning());
        assert!(!ActivePhase::Inactive.is_transitioning());
        assert_eq!(ActivePhase::Active.to_string(), "active");
    }
}
