//! Ordered tactical intention rules
//!
//! Each intention is a named condition plus a candidate filter. The
//! dispatcher walks the list top to bottom and takes the first rule
//! whose condition holds and whose candidates survive the phase filter.
//! The order of `INTENTIONS` is a load-bearing contract.

use rand::rngs::StdRng;
use rand::Rng;

use crate::catalog::{Technique, TechniqueCatalog, GUARD};
use crate::core::constants::{
    DIVERSION_CHAKRA_RATIO_MIN, DIVERSION_INTENTION_CHANCE, HARASS_INTENTION_CHANCE,
    HEAVY_MELEE_POWER_FLOOR, RECENT_REPEAT_THRESHOLD, TRAP_INTENTION_CHANCE,
};
use crate::decision::phase::{phase_filter, CombatPhase};
use crate::decision::stance::TacticalStance;
use crate::model::battlefield::{Battlefield, RangeBand};
use crate::model::combatant::Combatant;
use crate::model::posture::Posture;
use crate::model::tags::{TAG_AIRBORNE, TAG_ILLUSORY_CLONES};

/// Everything an intention may look at
pub struct IntentionCtx<'a> {
    pub catalog: &'a TechniqueCatalog,
    pub actor: &'a Combatant,
    pub target: &'a Combatant,
    pub battlefield: &'a Battlefield,
    pub phase: CombatPhase,
    pub stance: TacticalStance,
    /// Legal techniques at the current range, catalog order
    pub usable: &'a [&'static Technique],
}

impl IntentionCtx<'_> {
    fn range(&self) -> RangeBand {
        self.battlefield.range
    }

    fn offensive(&self) -> Vec<&'static Technique> {
        self.usable.iter().copied().filter(|t| t.is_offensive()).collect()
    }

    fn advances(&self) -> Vec<&'static Technique> {
        self.usable.iter().copied().filter(|t| t.is_advance()).collect()
    }

    fn retreats(&self) -> Vec<&'static Technique> {
        self.usable.iter().copied().filter(|t| t.is_retreat()).collect()
    }

    fn guard_only(&self) -> Vec<&'static Technique> {
        self.usable
            .iter()
            .copied()
            .filter(|t| t.name == GUARD)
            .collect()
    }

    /// How many recent target actions created distance
    fn target_recent_retreats(&self) -> usize {
        self.target.recent_matching(|name| {
            self.catalog.get(name).is_some_and(|t| t.is_retreat())
        })
    }
}

/// A named, ordered decision rule
pub struct IntentionRule {
    pub name: &'static str,
    pub applies: fn(&IntentionCtx, &mut StdRng) -> bool,
    pub filter: fn(&IntentionCtx, &mut StdRng) -> Vec<&'static Technique>,
}

fn chance(rng: &mut StdRng, probability: f32) -> bool {
    rng.gen::<f32>() < probability
}

fn first_nonempty(sets: Vec<Vec<&'static Technique>>) -> Vec<&'static Technique> {
    sets.into_iter().find(|set| !set.is_empty()).unwrap_or_default()
}

/// The intention chain, priority order
pub static INTENTIONS: &[IntentionRule] = &[
    IntentionRule {
        name: "Counter Kiting",
        applies: |ctx, _| {
            ctx.target_recent_retreats() >= RECENT_REPEAT_THRESHOLD
                && ctx.range() != RangeBand::Engaged
        },
        filter: |ctx, _| {
            let supplementary: Vec<&'static Technique> = ctx
                .usable
                .iter()
                .copied()
                .filter(|t| t.is_supplementary())
                .collect();
            first_nonempty(vec![supplementary, ctx.guard_only()])
        },
    },
    IntentionRule {
        name: "Exploit Airborne Target",
        applies: |ctx, _| ctx.target.has_tag(TAG_AIRBORNE),
        filter: |ctx, _| {
            ctx.usable
                .iter()
                .copied()
                .filter(|t| t.has_keyword(crate::catalog::Keyword::FollowUp))
                .collect()
        },
    },
    IntentionRule {
        name: "Exploit Exposed Target",
        applies: |ctx, _| ctx.target.posture == Posture::Exposed,
        filter: |ctx, _| ctx.offensive(),
    },
    IntentionRule {
        name: "Interrupt Casting",
        applies: |ctx, _| {
            ctx.target.posture == Posture::Casting && ctx.range() == RangeBand::Engaged
        },
        filter: |ctx, _| ctx.offensive(),
    },
    IntentionRule {
        name: "Long Range: Close Distance",
        applies: |ctx, _| ctx.range() == RangeBand::Long,
        filter: |ctx, _| {
            let ranged_offense: Vec<&'static Technique> = ctx
                .usable
                .iter()
                .copied()
                .filter(|t| t.is_offensive() && !t.is_melee())
                .collect();
            // Everything in the usable set is already valid at long range
            first_nonempty(vec![ctx.advances(), ranged_offense, ctx.usable.to_vec()])
        },
    },
    IntentionRule {
        name: "Set Trap",
        applies: |ctx, rng| {
            ctx.range() != RangeBand::Engaged
                && ctx.stance != TacticalStance::Aggressive
                && chance(rng, TRAP_INTENTION_CHANCE)
        },
        filter: |ctx, _| {
            ctx.usable
                .iter()
                .copied()
                .filter(|t| t.is_trap_setter())
                .collect()
        },
    },
    IntentionRule {
        name: "Ranged Harassment",
        applies: |ctx, rng| {
            ctx.range() != RangeBand::Engaged
                && (ctx.phase == CombatPhase::FeelingOut || ctx.target.posture.vulnerable())
                && chance(rng, HARASS_INTENTION_CHANCE)
        },
        filter: |ctx, _| {
            ctx.usable
                .iter()
                .copied()
                .filter(|t| t.is_thrown_tool())
                .collect()
        },
    },
    IntentionRule {
        name: "Short Range: Tactical Combat",
        applies: |ctx, _| ctx.range() == RangeBand::Short,
        filter: |ctx, rng| {
            // Non-aggressive fighters with chakra to spare may screen
            // themselves before committing
            if ctx.stance != TacticalStance::Aggressive
                && ctx.actor.vitals.chakra.ratio() > DIVERSION_CHAKRA_RATIO_MIN
                && !ctx.battlefield.has(TAG_ILLUSORY_CLONES)
                && chance(rng, DIVERSION_INTENTION_CHANCE)
            {
                let diversions: Vec<&'static Technique> = ctx
                    .usable
                    .iter()
                    .copied()
                    .filter(|t| t.is_diversion())
                    .collect();
                if !diversions.is_empty() {
                    return diversions;
                }
            }
            match ctx.stance {
                TacticalStance::Aggressive => {
                    first_nonempty(vec![ctx.advances(), ctx.offensive()])
                }
                TacticalStance::Defensive => {
                    let low_power: Vec<&'static Technique> = ctx
                        .usable
                        .iter()
                        .copied()
                        .filter(|t| t.is_offensive() && t.base_power < HEAVY_MELEE_POWER_FLOOR)
                        .collect();
                    first_nonempty(vec![ctx.retreats(), low_power])
                }
                TacticalStance::Balanced => ctx.offensive(),
            }
        },
    },
    IntentionRule {
        name: "Engaged Range: Melee Combat",
        applies: |ctx, _| ctx.range() == RangeBand::Engaged,
        filter: |ctx, _| match ctx.stance {
            TacticalStance::Aggressive => {
                let heavy: Vec<&'static Technique> = ctx
                    .usable
                    .iter()
                    .copied()
                    .filter(|t| t.is_heavy_melee())
                    .collect();
                first_nonempty(vec![heavy, ctx.offensive()])
            }
            TacticalStance::Defensive => first_nonempty(vec![ctx.retreats(), ctx.offensive()]),
            TacticalStance::Balanced => ctx.offensive(),
        },
    },
    IntentionRule {
        name: "Break Guard Stalemate",
        applies: |ctx, _| ctx.target.recent_uses(GUARD) >= RECENT_REPEAT_THRESHOLD,
        filter: |ctx, _| ctx.offensive(),
    },
    IntentionRule {
        name: "Stance Fallback",
        applies: |_, _| true,
        filter: |ctx, _| match ctx.stance {
            TacticalStance::Aggressive => ctx.offensive(),
            TacticalStance::Defensive => {
                let defensive: Vec<&'static Technique> = ctx
                    .usable
                    .iter()
                    .copied()
                    .filter(|t| t.is_defensive())
                    .collect();
                first_nonempty(vec![defensive, ctx.usable.to_vec()])
            }
            TacticalStance::Balanced => ctx.usable.to_vec(),
        },
    },
];

/// Highest base power wins; ties go to the earliest catalog entry
pub fn pick_best(candidates: &[&'static Technique]) -> Option<&'static Technique> {
    let mut best: Option<&'static Technique> = None;
    for candidate in candidates {
        match best {
            Some(current) if candidate.base_power <= current.base_power => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Walk the intention chain and produce the chosen technique
pub fn dispatch(
    ctx: &IntentionCtx,
    rng: &mut StdRng,
) -> Option<(&'static Technique, &'static str)> {
    for rule in INTENTIONS {
        if !(rule.applies)(ctx, rng) {
            continue;
        }
        let candidates = (rule.filter)(ctx, rng);
        let admitted = phase_filter(ctx.phase, &candidates, rng);
        if let Some(technique) = pick_best(&admitted) {
            return Some((technique, rule.name));
        }
    }
    None
}
