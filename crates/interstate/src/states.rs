//! Concrete interaction states.
//!
//! Each module declares one two-valued state with [`define_binary_state!`]
//! and, where the state follows a native interaction, adapters translating
//! host input into change requests.
//!
//! | state | `true` means | frozen by | forced by |
//! |---|---|---|---|
//! | [`ActiveState`](active::ActiveState) | active | disabled, read-only | |
//! | [`CollapseState`](collapse::CollapseState) | expanded | disabled | |
//! | [`DisabledState`](disabled::DisabledState) | disabled | | cascaded disabled |
//! | [`ReadOnlyState`](read_only::ReadOnlyState) | read-only | disabled | cascaded read-only |
//! | [`FocusState`](focus::FocusState) | focused | disabled | |
//! | [`HoverState`](hover::HoverState) | hovered | disabled | |
//! | [`PressState`](press::PressState) | pressed | disabled, read-only | |
//!
//! [`define_binary_state!`]: crate::define_binary_state

pub mod active;
pub mod collapse;
pub mod disabled;
pub mod focus;
pub mod hover;
pub mod press;
pub mod read_only;
