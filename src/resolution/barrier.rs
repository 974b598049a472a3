//! Barrier interaction ladder
//!
//! A standing Wall/Dome contests every projectile-family attack:
//! nullify below its rank, then a bypass roll, then a penetration roll
//! that can shatter it outright.

use rand::rngs::StdRng;
use rand::Rng;

use crate::catalog::Rank;
use crate::core::constants::{
    BARRIER_BYPASS_BASE, BARRIER_BYPASS_PER_RANK, BARRIER_DEFLECTED_POWER_FRACTION,
    BARRIER_PENETRATION_PER_RANK,
};

/// How an attack fared against a standing barrier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierOutcome {
    /// Attack rank below barrier rank: nothing gets through
    Nullified,
    /// Failed the bypass roll
    Deflected,
    /// Penetrated and destroyed the barrier; full damage proceeds
    Shattered,
    /// Got past but left the barrier standing; power reduced
    Weakened,
}

impl BarrierOutcome {
    /// Power fraction surviving to the damage step, if any
    pub fn power_scale(&self) -> Option<f32> {
        match self {
            BarrierOutcome::Nullified | BarrierOutcome::Deflected => None,
            BarrierOutcome::Shattered => Some(1.0),
            BarrierOutcome::Weakened => Some(BARRIER_DEFLECTED_POWER_FRACTION),
        }
    }
}

/// Contest an attack of `attack_rank` against a barrier of `barrier_rank`
pub fn contest(attack_rank: Rank, barrier_rank: Rank, rng: &mut StdRng) -> BarrierOutcome {
    if attack_rank < barrier_rank {
        return BarrierOutcome::Nullified;
    }

    let rank_difference = (attack_rank.tier() - barrier_rank.tier()) as f32;
    let bypass_chance = BARRIER_BYPASS_BASE + BARRIER_BYPASS_PER_RANK * rank_difference;
    if rng.gen::<f32>() >= bypass_chance {
        return BarrierOutcome::Deflected;
    }

    let penetration_chance = BARRIER_PENETRATION_PER_RANK * rank_difference;
    if rng.gen::<f32>() < penetration_chance {
        BarrierOutcome::Shattered
    } else {
        BarrierOutcome::Weakened
    }
}
