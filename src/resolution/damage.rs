//! Damage math - pure functions over attacker/target state

use crate::catalog::{Keyword, Technique};
use crate::core::constants::{
    DESPERATION_DAMAGE_MULT, DISGUISED_DAMAGE_MULT, FOLLOW_UP_DAMAGE_MULT,
    MELEE_STRENGTH_SCALING, RANGED_INTELLECT_SCALING, RESOLVE_DAMAGE_BASE,
    RESOLVE_DAMAGE_FOLLOW_UP, RESOLVE_DAMAGE_VULNERABLE, VULNERABLE_DAMAGE_MULT,
};
use crate::model::combatant::Combatant;
use crate::model::stats::StatBlock;
use crate::model::tags::{TAG_AIRBORNE, TAG_DISGUISED};

/// Multiplier stack for one hit, with the resolve damage it implies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageProfile {
    pub multiplier: f32,
    pub resolve_damage: f32,
    /// The attacker's Disguised tag is spent by this hit
    pub reveals_disguise: bool,
}

/// Compose the damage multiplier for an attacker/target pair.
///
/// Order matters only for the resolve-damage tiers: the follow-up case
/// supersedes the vulnerable case, which supersedes the base.
pub fn damage_profile(
    attacker: &Combatant,
    target: &Combatant,
    technique: &Technique,
    attacker_desperate: bool,
) -> DamageProfile {
    let mut multiplier = 1.0;
    let mut resolve_damage = RESOLVE_DAMAGE_BASE;

    let reveals_disguise = attacker.has_tag(TAG_DISGUISED);
    if reveals_disguise {
        multiplier *= DISGUISED_DAMAGE_MULT;
    }

    if attacker_desperate {
        multiplier *= DESPERATION_DAMAGE_MULT;
    }

    if target.posture.vulnerable() {
        multiplier *= VULNERABLE_DAMAGE_MULT;
        resolve_damage = RESOLVE_DAMAGE_VULNERABLE;
    }

    if target.has_tag(TAG_AIRBORNE) && technique.has_keyword(Keyword::FollowUp) {
        multiplier *= FOLLOW_UP_DAMAGE_MULT;
        resolve_damage = RESOLVE_DAMAGE_FOLLOW_UP;
    }

    DamageProfile {
        multiplier,
        resolve_damage,
        reveals_disguise,
    }
}

/// Base damage before multipliers. Melee scales on strength, everything
/// else on intellect. `power_scale` carries barrier attenuation.
pub fn base_damage(technique: &Technique, attacker_stats: &StatBlock, power_scale: f32) -> f32 {
    let stat_component = if technique.is_melee() {
        attacker_stats.strength * MELEE_STRENGTH_SCALING
    } else {
        attacker_stats.intellect * RANGED_INTELLECT_SCALING
    };
    technique.base_power as f32 * power_scale + stat_component
}

pub fn final_damage(base: f32, multiplier: f32) -> f32 {
    (base * multiplier).round()
}
