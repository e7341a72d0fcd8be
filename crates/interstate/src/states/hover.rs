use tokio::time::Instant;

use crate::phase::PhaseEvents;
use crate::{Restriction, Trigger};

crate::define_binary_state! {
    /// Hovered/unhovered. Fed from `pointerenter`/`pointerleave`.
    HoverState, HoverKind, HoverPhase {
        name: "hover",
        phases: [
            Unhovered = "unhovered",
            Hovering = "hovering",
            Hovered = "hovered",
            Unhovering = "unhovering",
        ],
        pattern: ["hovering", "unhovering"],
        frozen_by: Restriction::DISABLED,
        releases_when_frozen: true,
        cascades: Restriction::empty(),
    }
}

impl HoverState {
    pub fn on_pointer_enter(&mut self, now: Instant) -> PhaseEvents<HoverPhase> {
        self.dispatch_change(true, Trigger::Pointer, now)
    }

    pub fn on_pointer_leave(&mut self, now: Instant) -> PhaseEvents<HoverPhase> {
        self.dispatch_change(false, Trigger::Pointer, now)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::StateOptions;
    use crate::phase::PhaseEvent;

    #[test]
    fn test_quick_pass_over_plays_both_directions() {
        let now = Instant::now();
        let mut state = HoverState::new(StateOptions::new(false), 4);

        let mut events = state.on_pointer_enter(now);
        events.extend(state.on_pointer_leave(now + Duration::from_millis(5)));
        events.extend(state.poll(now + Duration::from_millis(50)));
        assert_eq!(state.phase(), HoverPhase::Unhovering);
        events.extend(state.poll(now + Duration::from_millis(100)));

        let names: Vec<String> = events.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            [
                "unhovered:end",
                "hovering:start",
                "hovering:end",
                "hovered:start",
                "hovered:end",
                "unhovering:start",
                "unhovering:end",
                "unhovered:start",
            ]
        );
        assert_eq!(state.phase(), HoverPhase::Unhovered);
    }

    #[test]
    fn test_leave_passes_while_disabled() {
        let now = Instant::now();
        let mut state = HoverState::new(StateOptions::new(false), 4);
        state.on_pointer_enter(now);
        state.poll(now + Duration::from_millis(50));
        assert_eq!(state.phase(), HoverPhase::Hovered);

        state.set_restriction(Restriction::DISABLED, now);
        assert!(!state.on_pointer_leave(now).is_empty());
        state.poll(now + Duration::from_millis(100));

        state.set_restriction(Restriction::empty(), now);
        assert_eq!(state.phase(), HoverPhase::Unhovered);
    }
}
