//! Desperation detection and tactical stance derivation

use crate::core::constants::{
    AGGRESSIVE_AGGRESSION_MIN, AGGRESSIVE_RESOLVE_MIN, DEFENSIVE_AGGRESSION_MAX,
    DEFENSIVE_RESOLVE_MAX, DESPERATION_AGGRESSION_BONUS, DESPERATION_HEALTH_RATIO,
    DESPERATION_RESOLVE_FLOOR, STANCE_AGGRESSION_FLOOR,
};
use crate::model::combatant::Combatant;

/// Broad tactical disposition for the current decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TacticalStance {
    Aggressive,
    Balanced,
    Defensive,
}

impl TacticalStance {
    pub fn label(&self) -> &'static str {
        match self {
            TacticalStance::Aggressive => "Aggressive",
            TacticalStance::Balanced => "Balanced",
            TacticalStance::Defensive => "Defensive",
        }
    }
}

/// A cornered fighter stops holding back
pub fn is_desperate(combatant: &Combatant) -> bool {
    combatant.vitals.health.ratio() < DESPERATION_HEALTH_RATIO
        || combatant.resolve < DESPERATION_RESOLVE_FLOOR
}

/// Aggression after the desperation bonus, floored
pub fn effective_aggression(combatant: &Combatant, desperate: bool) -> f32 {
    let bonus = if desperate {
        DESPERATION_AGGRESSION_BONUS
    } else {
        0.0
    };
    (combatant.aggression + bonus).max(STANCE_AGGRESSION_FLOOR)
}

/// Derive the stance from the resolve/aggression dials
pub fn derive_stance(combatant: &Combatant, desperate: bool) -> TacticalStance {
    let aggression = effective_aggression(combatant, desperate);
    if combatant.resolve > AGGRESSIVE_RESOLVE_MIN && aggression > AGGRESSIVE_AGGRESSION_MIN {
        TacticalStance::Aggressive
    } else if combatant.resolve < DEFENSIVE_RESOLVE_MAX && aggression < DEFENSIVE_AGGRESSION_MAX {
        TacticalStance::Defensive
    } else {
        TacticalStance::Balanced
    }
}
