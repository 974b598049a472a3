//! Combat tuning constants - all probability/threshold values in one place
//!
//! These are preserved reference values. Changing them shifts pacing and
//! balance, not architecture.

use crate::core::types::Tick;

// Scheduler
pub const TICK_INTERVAL_MS: u64 = 1800;
pub const ACTION_GAUGE_THRESHOLD: f32 = 100.0;
pub const ACTION_GAUGE_AGILITY_DIVISOR: f32 = 2.0;
pub const ACTION_HISTORY_CAP: usize = 5;

// Phase detection (aggregate health ratio across all combatants)
pub const FEELING_OUT_HEALTH_RATIO: f32 = 0.8;
pub const FEELING_OUT_MAX_TICKS: Tick = 20;
pub const ESCALATION_HEALTH_RATIO: f32 = 0.4;
pub const CLIMAX_HEALTH_RATIO: f32 = 0.15;
pub const ESCALATION_B_RANK_CHANCE: f32 = 0.25;

// Guard behavior
pub const GUARD_STAMINA_CUTOFF: f32 = 0.40;
pub const GUARD_BASE_CHANCE: f32 = 0.50;
pub const GUARD_REPEAT_PENALTY: f32 = 0.25;
pub const GUARD_STAMINA_RESTORE_FRACTION: f32 = 0.10;
pub const GUARD_RESOLVE_GAIN: f32 = 3.0;

// Desperation
pub const DESPERATION_HEALTH_RATIO: f32 = 0.3;
pub const DESPERATION_RESOLVE_FLOOR: f32 = 25.0;
pub const DESPERATION_AGGRESSION_BONUS: f32 = 20.0;
pub const DESPERATION_DAMAGE_MULT: f32 = 1.25;
pub const DESPERATION_IGNORE_GUARD_CHANCE: f32 = 0.70;

// Stance derivation
pub const STANCE_AGGRESSION_FLOOR: f32 = 35.0;
pub const AGGRESSIVE_RESOLVE_MIN: f32 = 60.0;
pub const AGGRESSIVE_AGGRESSION_MIN: f32 = 65.0;
pub const DEFENSIVE_RESOLVE_MAX: f32 = 40.0;
pub const DEFENSIVE_AGGRESSION_MAX: f32 = 45.0;

// Intention rolls
pub const RECENT_REPEAT_THRESHOLD: usize = 2;
pub const TRAP_INTENTION_CHANCE: f32 = 0.25;
pub const HARASS_INTENTION_CHANCE: f32 = 0.60;
pub const DIVERSION_INTENTION_CHANCE: f32 = 0.35;
pub const DIVERSION_CHAKRA_RATIO_MIN: f32 = 0.3;

// Reactions
pub const THREAT_POWER_THRESHOLD: u32 = 25;
pub const SUBSTITUTION_CHANCE: f32 = 0.70;
pub const SUBSTITUTION_CHAKRA_RATIO_MIN: f32 = 0.20;
pub const PROJECTILE_REACTION_CHANCE: f32 = 0.50;

// Battlefield hazards
pub const CLONE_DECOY_CHANCE: f32 = 0.50;
pub const TRAP_DEFAULT_POWER: u32 = 30;

// Damage resolution
pub const EVASION_FACTOR: f32 = 0.01;
pub const DISGUISED_DAMAGE_MULT: f32 = 1.75;
pub const VULNERABLE_DAMAGE_MULT: f32 = 1.5;
pub const FOLLOW_UP_DAMAGE_MULT: f32 = 2.0;
pub const RESOLVE_DAMAGE_BASE: f32 = 5.0;
pub const RESOLVE_DAMAGE_VULNERABLE: f32 = 15.0;
pub const RESOLVE_DAMAGE_FOLLOW_UP: f32 = 20.0;
pub const MELEE_STRENGTH_SCALING: f32 = 0.5;
pub const RANGED_INTELLECT_SCALING: f32 = 0.5;

// Morale/aggression shifts on resolution outcomes
pub const HIT_ATTACKER_AGGRESSION_GAIN: f32 = 15.0;
pub const HIT_ATTACKER_RESOLVE_GAIN: f32 = 5.0;
pub const HIT_TARGET_AGGRESSION_LOSS: f32 = 10.0;
pub const MISS_ATTACKER_AGGRESSION_LOSS: f32 = 15.0;
pub const MISS_TARGET_AGGRESSION_GAIN: f32 = 10.0;
pub const MISS_TARGET_RESOLVE_GAIN: f32 = 5.0;
pub const INTERRUPT_RESOLVE_LOSS: f32 = 30.0;
pub const INTERRUPT_AGGRESSION_LOSS: f32 = 20.0;
pub const TRAP_OWNER_RESOLVE_GAIN: f32 = 20.0;
pub const TRAP_VICTIM_RESOLVE_LOSS: f32 = 25.0;

// Barrier interaction
pub const BARRIER_BYPASS_BASE: f32 = 0.15;
pub const BARRIER_BYPASS_PER_RANK: f32 = 0.30;
pub const BARRIER_PENETRATION_PER_RANK: f32 = 0.20;
pub const BARRIER_DEFLECTED_POWER_FRACTION: f32 = 0.25;

// Legality and costs
pub const MOVEMENT_DISCOUNT_AGILITY: f32 = 0.005;
pub const MOVEMENT_DISCOUNT_STAMINA: f32 = 0.002;
pub const HAND_SEAL_DIVISOR: u32 = 20;
pub const MELEE_GATE_TIER_ONE: u32 = 5;
pub const MELEE_GATE_TIER_TWO: u32 = 10;
pub const MELEE_GATE_TIER_THREE: u32 = 15;

// Classification floors
pub const FINISHER_POWER_FLOOR: u32 = 30;
pub const HEAVY_MELEE_POWER_FLOOR: u32 = 20;

// Tag durations
pub const AIRBORNE_DURATION: Tick = 2;

// Applied to the player on defeat
pub const INCAPACITATION_INJURY: &str = "Knocked Unconscious";
