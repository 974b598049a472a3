//! Defender reaction sub-protocol
//!
//! Consulted by the resolution engine before damage applies. A reaction
//! resolves the defender's technique in place of the incoming hit; it is
//! only consulted at reaction depth zero, so counters never chain.

use rand::rngs::StdRng;
use rand::Rng;

use crate::catalog::{EffectKind, Rank, Technique, TechniqueCatalog, SUBSTITUTION};
use crate::core::constants::{
    PROJECTILE_REACTION_CHANCE, SUBSTITUTION_CHAKRA_RATIO_MIN, SUBSTITUTION_CHANCE,
    THREAT_POWER_THRESHOLD,
};
use crate::decision::legality;
use crate::model::battlefield::RangeBand;
use crate::model::combatant::Combatant;
use crate::session::hooks::CombatHooks;

/// An attack worth burning a substitution on
pub fn is_threatening(incoming: &Technique) -> bool {
    incoming.base_power >= THREAT_POWER_THRESHOLD || incoming.rank >= Rank::C
}

/// Decide whether the defender preempts the incoming offensive action
pub fn consider_reaction(
    catalog: &TechniqueCatalog,
    defender: &Combatant,
    incoming: &Technique,
    range: RangeBand,
    rng: &mut StdRng,
    hooks: &dyn CombatHooks,
) -> Option<&'static Technique> {
    // Substitution against anything threatening
    if is_threatening(incoming) {
        if let Some(substitution) = catalog.get(SUBSTITUTION) {
            if legality::usable(substitution, defender, range, hooks)
                && defender.vitals.chakra.ratio() > SUBSTITUTION_CHAKRA_RATIO_MIN
                && rng.gen::<f32>() < SUBSTITUTION_CHANCE
            {
                return Some(substitution);
            }
        }
    }

    // A projectile-family attack can be answered with a prepared defense
    if incoming.is_projectile_family() {
        let defense = catalog.all().iter().find(|tech| {
            tech.is_defensive()
                && matches!(
                    tech.effect_kind,
                    Some(EffectKind::Barrier) | Some(EffectKind::Evasion)
                )
                && legality::usable(tech, defender, range, hooks)
        });
        if let Some(defense) = defense {
            if rng.gen::<f32>() < PROJECTILE_REACTION_CHANCE {
                return Some(defense);
            }
        }
    }

    None
}
