//! Posture state machine
//!
//! Every combatant is always in exactly one posture. Transitions are
//! driven exclusively by the resolution engine via `PostureEvent`.

use serde::{Deserialize, Serialize};

/// Tactical posture affecting damage taken and available reactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Posture {
    /// Baseline defensive footing
    #[default]
    Guarded,
    /// Moving after an action, can evade
    Mobile,
    /// Mid-technique, cannot evade
    Casting,
    /// Caught out, takes bonus damage until the next resolved action
    Exposed,
}

impl Posture {
    /// Vulnerable postures take the increased damage multiplier
    pub fn vulnerable(&self) -> bool {
        matches!(self, Posture::Exposed | Posture::Casting)
    }

    /// Only mobile combatants roll evasion
    pub fn can_evade(&self) -> bool {
        matches!(self, Posture::Mobile)
    }
}

/// Events that trigger posture transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostureEvent {
    /// A guard-reinforcing technique resolved
    ResolvedReinforcing,
    /// Any other technique resolved
    ResolvedOther,
    /// A delayed technique began casting
    BeganCasting,
    /// The in-progress cast was struck and lost
    CastInterrupted,
    /// Caught by a trap or hazard
    CaughtOut,
}

impl Posture {
    /// Apply a transition event to get the next posture
    pub fn apply(self, event: PostureEvent) -> Posture {
        use Posture::*;
        use PostureEvent::*;

        match (self, event) {
            (_, ResolvedReinforcing) => Guarded,
            (_, ResolvedOther) => Mobile,
            (_, BeganCasting) => Casting,
            (_, CastInterrupted) => Exposed,
            (_, CaughtOut) => Exposed,
        }
    }
}
