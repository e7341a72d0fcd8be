use tokio::time::Instant;

use crate::phase::PhaseEvents;
use crate::{Restriction, Trigger};

crate::define_binary_state! {
    /// Pressed/released. Fed from primary-button pointer events and from
    /// Space/Enter while focused.
    PressState, PressKind, PressPhase {
        name: "press",
        phases: [
            Released = "released",
            Pressing = "pressing",
            Pressed = "pressed",
            Releasing = "releasing",
        ],
        pattern: ["pressing", "releasing"],
        frozen_by: Restriction::DISABLED.union(Restriction::READ_ONLY),
        releases_when_frozen: true,
        cascades: Restriction::empty(),
    }
}

/// Keys that press a button-like element.
pub const PRESS_KEYS: &[&str] = &[" ", "Enter"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(u8),
}

impl From<u8> for PointerButton {
    /// Maps a DOM `MouseEvent.button` value.
    fn from(button: u8) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            n => Self::Other(n),
        }
    }
}

impl PressState {
    pub fn on_pointer_down(&mut self, button: PointerButton, now: Instant) -> PhaseEvents<PressPhase> {
        if button != PointerButton::Primary {
            return Vec::new();
        }
        self.dispatch_change(true, Trigger::Pointer, now)
    }

    pub fn on_pointer_up(&mut self, button: PointerButton, now: Instant) -> PhaseEvents<PressPhase> {
        if button != PointerButton::Primary {
            return Vec::new();
        }
        self.dispatch_change(false, Trigger::Pointer, now)
    }

    /// Pointer left the element while pressed.
    pub fn on_pointer_cancel(&mut self, now: Instant) -> PhaseEvents<PressPhase> {
        self.dispatch_change(false, Trigger::Pointer, now)
    }

    pub fn on_key_down(&mut self, key: &str, now: Instant) -> PhaseEvents<PressPhase> {
        if !PRESS_KEYS.contains(&key) {
            return Vec::new();
        }
        self.dispatch_change(true, Trigger::Keyboard, now)
    }

    pub fn on_key_up(&mut self, key: &str, now: Instant) -> PhaseEvents<PressPhase> {
        if !PRESS_KEYS.contains(&key) {
            return Vec::new();
        }
        self.dispatch_change(false, Trigger::Keyboard, now)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::StateOptions;

    #[test]
    fn test_only_primary_button_presses() {
        let now = Instant::now();
        let mut state = PressState::new(StateOptions::new(false), 9);
        assert!(state.on_pointer_down(PointerButton::from(2), now).is_empty());
        assert!(!state.value());
        assert!(!state.on_pointer_down(PointerButton::from(0), now).is_empty());
        assert!(state.value());
    }

    #[test]
    fn test_keyboard_press_reports_trigger() {
        let now = Instant::now();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let options = StateOptions::new(false).with_on_change(move |value, trigger| {
            sink.lock().unwrap().push((value, trigger));
        });
        let mut state = PressState::new(options, 9);

        state.on_key_down("a", now);
        state.on_key_down("Enter", now);
        state.on_key_up("Enter", now);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(true, Trigger::Keyboard), (false, Trigger::Keyboard)]
        );
    }

    #[test]
    fn test_read_only_freezes_press() {
        let now = Instant::now();
        let mut state = PressState::new(StateOptions::new(false).with_cascade_read_only(true), 9);
        assert!(state.on_key_down(" ", now).is_empty());
        assert_eq!(state.phase(), PressPhase::Released);
    }

    #[test]
    fn test_disabled_while_pressed_still_releases() {
        let now = Instant::now();
        let mut state = PressState::new(StateOptions::new(false), 9);
        state.on_pointer_down(PointerButton::Primary, now);
        state.poll(now + Duration::from_millis(50));
        assert_eq!(state.phase(), PressPhase::Pressed);
        state.set_restriction(Restriction::DISABLED, now);

        let later = now + Duration::from_millis(60);
        assert!(!state.on_pointer_up(PointerButton::Primary, later).is_empty());
        assert!(!state.value());
        state.poll(later + Duration::from_millis(50));
        assert_eq!(state.phase(), PressPhase::Released);

        // Engaging is still frozen.
        assert!(state.on_key_down("Enter", now).is_empty());
        state.set_restriction(Restriction::empty(), now);
        assert_eq!(state.phase(), PressPhase::Released);
    }
}
