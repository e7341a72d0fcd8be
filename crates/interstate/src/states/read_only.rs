use crate::Restriction;

crate::define_binary_state! {
    /// Editable/read-only. A read-only ancestor (`cascade_read_only`) makes
    /// this state read-only regardless of its own value.
    ReadOnlyState, ReadOnlyKind, ReadOnlyPhase {
        name: "read-only",
        phases: [
            Editable = "editable",
            Freezing = "freezing",
            ReadOnly = "read-only",
            Thawing = "thawing",
        ],
        pattern: ["freezing", "thawing"],
        frozen_by: Restriction::DISABLED,
        releases_when_frozen: false,
        cascades: Restriction::READ_ONLY,
    }
}

impl ReadOnlyState {
    pub fn as_restriction(&self) -> Restriction {
        if self.effective() {
            Restriction::READ_ONLY
        } else {
            Restriction::empty()
        }
    }
}
