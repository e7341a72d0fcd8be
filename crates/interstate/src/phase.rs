//! Transition phases and the events announcing them.

use std::fmt;

/// The four phases of a two-valued state, independent of domain naming.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryPhase {
    ResolvedFalse,
    TransitioningToTrue,
    ResolvedTrue,
    TransitioningToFalse,
}

impl BinaryPhase {
    pub fn resolved(value: bool) -> Self {
        if value {
            Self::ResolvedTrue
        } else {
            Self::ResolvedFalse
        }
    }

    pub fn transitioning_to(value: bool) -> Self {
        if value {
            Self::TransitioningToTrue
        } else {
            Self::TransitioningToFalse
        }
    }

    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::TransitioningToTrue | Self::TransitioningToFalse)
    }
}

/// Entry into or exit from a phase.
///
/// Every phase a state passes through, resolved or transitional, is
/// bracketed by one `Start(p)` and one `End(p)`. The phase a state mounts in
/// is entered without a `Start`. Phase changes are always reported as the
/// `End` of the old phase followed by the `Start` of the new one, so a
/// resolved phase that is left at once still gets its pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhaseEvent<P> {
    Start(P),
    End(P),
}

impl<P: Copy> PhaseEvent<P> {
    pub fn phase(&self) -> P {
        match self {
            Self::Start(p) | Self::End(p) => *p,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, Self::Start(_))
    }
}

impl<P: fmt::Display> fmt::Display for PhaseEvent<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(p) => write!(f, "{p}:start"),
            Self::End(p) => write!(f, "{p}:end"),
        }
    }
}

pub type PhaseEvents<P> = Vec<PhaseEvent<P>>;
