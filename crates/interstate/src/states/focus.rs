use tokio::time::Instant;

use crate::phase::PhaseEvents;
use crate::{Restriction, Trigger};

crate::define_binary_state! {
    /// Focused/blurred. Fed from native `focus`/`blur` events.
    FocusState, FocusKind, FocusPhase {
        name: "focus",
        phases: [
            Blurred = "blurred",
            Focusing = "focusing",
            Focused = "focused",
            Blurring = "blurring",
        ],
        pattern: ["focusing", "blurring"],
        frozen_by: Restriction::DISABLED,
        releases_when_frozen: true,
        cascades: Restriction::empty(),
    }
}

impl FocusState {
    pub fn on_focus(&mut self, now: Instant) -> PhaseEvents<FocusPhase> {
        self.dispatch_change(true, Trigger::Focus, now)
    }

    pub fn on_blur(&mut self, now: Instant) -> PhaseEvents<FocusPhase> {
        self.dispatch_change(false, Trigger::Focus, now)
    }
}
