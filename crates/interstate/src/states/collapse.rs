use tokio::time::Instant;

use crate::phase::PhaseEvents;
use crate::{Restriction, Trigger};

crate::define_binary_state! {
    /// Expanded/collapsed, e.g. an accordion section, a dropdown or a dialog.
    /// The state's value is `true` when expanded.
    CollapseState, CollapseKind, CollapsePhase {
        name: "expanded",
        phases: [
            Collapsed = "collapsed",
            Expanding = "expanding",
            Expanded = "expanded",
            Collapsing = "collapsing",
        ],
        pattern: ["expanding", "collapsing"],
        frozen_by: Restriction::DISABLED,
        releases_when_frozen: false,
        cascades: Restriction::empty(),
    }
}

impl CollapseState {
    pub fn expand(&mut self, trigger: Trigger, now: Instant) -> PhaseEvents<CollapsePhase> {
        self.dispatch_change(true, trigger, now)
    }

    pub fn collapse(&mut self, trigger: Trigger, now: Instant) -> PhaseEvents<CollapsePhase> {
        self.dispatch_change(false, trigger, now)
    }

    /// Content must stay mounted while expanded or animating.
    pub fn is_content_visible(&self) -> bool {
        self.phase() != CollapsePhase::Collapsed
    }
}
