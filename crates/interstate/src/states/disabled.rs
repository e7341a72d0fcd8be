use crate::Restriction;

crate::define_binary_state! {
    /// Enabled/disabled. A disabled ancestor (`cascade_disabled`) disables
    /// this state regardless of its own value.
    DisabledState, DisabledKind, DisabledPhase {
        name: "disabled",
        phases: [
            Enabled = "enabled",
            Disabling = "disabling",
            Disabled = "disabled",
            Enabling = "enabling",
        ],
        pattern: ["disabling", "enabling"],
        frozen_by: Restriction::empty(),
        releases_when_frozen: false,
        cascades: Restriction::DISABLED,
    }
}

impl DisabledState {
    /// The restriction to cascade into companion states of the same component.
    pub fn as_restriction(&self) -> Restriction {
        if self.effective() {
            Restriction::DISABLED
        } else {
            Restriction::empty()
        }
    }
}
