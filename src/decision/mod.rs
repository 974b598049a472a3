//! Decision engine - picks exactly one legal technique per turn
//!
//! Layered selection: legality, phase restriction, guard-spam control,
//! desperation, stance, then the ordered intention chain with a failsafe.

pub mod intentions;
pub mod legality;
pub mod phase;
pub mod reaction;
pub mod stance;

use rand::rngs::StdRng;
use rand::Rng;

use crate::catalog::{Technique, TechniqueCatalog, GUARD};
use crate::core::constants::{
    DESPERATION_IGNORE_GUARD_CHANCE, GUARD_BASE_CHANCE, GUARD_REPEAT_PENALTY,
    GUARD_STAMINA_CUTOFF,
};
use crate::model::battlefield::Battlefield;
use crate::model::combatant::Combatant;
use crate::model::tags::{PersonalTag, TAG_DESPERATE};
use crate::session::hooks::CombatHooks;

pub use intentions::{dispatch, IntentionCtx, IntentionRule, INTENTIONS};
pub use phase::CombatPhase;
pub use stance::TacticalStance;

/// The outcome of one decision pass
#[derive(Debug, Clone, Copy)]
pub struct Decision {
    pub technique: &'static Technique,
    pub intention: &'static str,
    /// First entry into desperation this combat; the caller announces it
    pub entered_desperation: bool,
}

/// Select exactly one legal technique for the actor this turn
pub fn choose_action(
    catalog: &TechniqueCatalog,
    actor: &mut Combatant,
    target: &Combatant,
    battlefield: &Battlefield,
    phase: CombatPhase,
    rng: &mut StdRng,
    hooks: &dyn CombatHooks,
) -> Decision {
    let guard = catalog.guard();
    let usable = legality::usable_set(catalog, actor, battlefield.range, hooks);

    // Desperation is re-derived every decision; the tag marks first entry
    let desperate = stance::is_desperate(actor);
    let entered_desperation = desperate && !actor.has_tag(TAG_DESPERATE);
    if entered_desperation {
        actor.push_tag(PersonalTag::unbounded(TAG_DESPERATE));
    }

    // Guard-spam control: fresh legs never guard, and a desperate fighter
    // usually refuses to turtle
    if actor.vitals.stamina.ratio() <= GUARD_STAMINA_CUTOFF {
        let ignore_guard = desperate && rng.gen::<f32>() < DESPERATION_IGNORE_GUARD_CHANCE;
        if !ignore_guard {
            let recent_guards = actor.recent_uses(GUARD) as f32;
            let guard_chance = (GUARD_BASE_CHANCE - GUARD_REPEAT_PENALTY * recent_guards).max(0.0);
            if rng.gen::<f32>() < guard_chance {
                tracing::debug!(actor = %actor.name, "guard check fired");
                return Decision {
                    technique: guard,
                    intention: "Guard Recovery",
                    entered_desperation,
                };
            }
        }
    }

    let tactical_stance = stance::derive_stance(actor, desperate);

    let ctx = IntentionCtx {
        catalog,
        actor,
        target,
        battlefield,
        phase,
        stance: tactical_stance,
        usable: &usable,
    };
    if let Some((technique, intention)) = intentions::dispatch(&ctx, rng) {
        tracing::debug!(
            actor = %actor.name,
            phase = phase.label(),
            stance = tactical_stance.label(),
            intention,
            technique = technique.name,
            "action chosen"
        );
        return Decision {
            technique,
            intention,
            entered_desperation,
        };
    }

    // Failsafe: something offensive, else anything but Guard, else Guard
    let technique = intentions::pick_best(
        &usable
            .iter()
            .copied()
            .filter(|tech| tech.is_offensive())
            .collect::<Vec<_>>(),
    )
    .or_else(|| usable.iter().copied().find(|tech| tech.name != GUARD))
    .unwrap_or(guard);

    tracing::debug!(actor = %actor.name, technique = technique.name, "failsafe action");
    Decision {
        technique,
        intention: "Failsafe",
        entered_desperation,
    }
}
