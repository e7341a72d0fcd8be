//! Macros for declaring interaction states.
//!
//! Every two-valued state is the same machine under different names. This
//! module provides a macro that generates the phase enum, the kind marker
//! and the state alias from a short declaration.

/// Declares a two-valued interaction state.
///
/// # Usage
///
/// ```ignore
/// define_binary_state! {
///     /// Active/inactive, e.g. a toggle button.
///     ActiveState, ActiveKind, ActivePhase {
///         name: "active",
///         phases: [
///             Inactive = "inactive",
///             Activating = "activating",
///             Active = "active",
///             Deactivating = "deactivating",
///         ],
///         pattern: ["activating", "deactivating"],
///         frozen_by: Restriction::DISABLED,
///         releases_when_frozen: false,
///         cascades: Restriction::empty(),
///     }
/// }
/// ```
///
/// Phases are listed in the order resolved-false, transitioning-to-true,
/// resolved-true, transitioning-to-false.
#[macro_export]
macro_rules! define_binary_state {
    (
        $(#[$meta:meta])*
        $state:ident, $kind:ident, $phase:ident {
            name: $name:literal,
            phases: [
                $off:ident = $off_name:literal,
                $to_on:ident = $to_on_name:literal,
                $on:ident = $on_name:literal,
                $to_off:ident = $to_off_name:literal $(,)?
            ],
            pattern: [$($pattern:literal),+ $(,)?],
            frozen_by: $frozen:expr,
            releases_when_frozen: $releases:expr,
            cascades: $cascades:expr $(,)?
        }
    ) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $phase {
            $off,
            $to_on,
            $on,
            $to_off,
        }

        impl $phase {
            pub const fn name(self) -> &'static str {
                match self {
                    Self::$off => $off_name,
                    Self::$to_on => $to_on_name,
                    Self::$on => $on_name,
                    Self::$to_off => $to_off_name,
                }
            }

            pub const fn class(self) -> &'static str {
                match self {
                    Self::$off => concat!("is-", $off_name),
                    Self::$to_on => concat!("is-", $to_on_name),
                    Self::$on => concat!("is-", $on_name),
                    Self::$to_off => concat!("is-", $to_off_name),
                }
            }

            pub const fn is_transitioning(self) -> bool {
                matches!(self, Self::$to_on | Self::$to_off)
            }
        }

        impl ::std::convert::From<$crate::BinaryPhase> for $phase {
            fn from(phase: $crate::BinaryPhase) -> Self {
                match phase {
                    $crate::BinaryPhase::ResolvedFalse => Self::$off,
                    $crate::BinaryPhase::TransitioningToTrue => Self::$to_on,
                    $crate::BinaryPhase::ResolvedTrue => Self::$on,
                    $crate::BinaryPhase::TransitioningToFalse => Self::$to_off,
                }
            }
        }

        impl ::std::fmt::Display for $phase {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $kind;

        impl $crate::BinaryKind for $kind {
            type Phase = $phase;
            const NAME: &'static str = $name;
            const DEFAULT_PATTERN: &'static [&'static str] = &[$($pattern),+];
            const FROZEN_BY: $crate::Restriction = $frozen;
            const RELEASES_WHEN_FROZEN: bool = $releases;
            const CASCADES: $crate::Restriction = $cascades;

            fn phase_name(phase: $crate::BinaryPhase) -> &'static str {
                $phase::from(phase).name()
            }
        }

        $(#[$meta])*
        pub type $state = $crate::BinaryState<$kind>;
    };
}
