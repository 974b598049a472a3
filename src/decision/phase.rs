//! Combat phase detection and phase-appropriate filtering
//!
//! The phase is a coarse classification of combat progress derived from
//! aggregate health, elapsed ticks and whether anyone has escalated yet.

use rand::rngs::StdRng;
use rand::Rng;

use crate::catalog::{Rank, Technique};
use crate::core::constants::{
    CLIMAX_HEALTH_RATIO, ESCALATION_B_RANK_CHANCE, ESCALATION_HEALTH_RATIO,
    FEELING_OUT_HEALTH_RATIO, FEELING_OUT_MAX_TICKS,
};
use crate::core::types::Tick;
use crate::model::combatant::Combatant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatPhase {
    FeelingOut,
    Escalation,
    Climax,
    Resolution,
}

impl CombatPhase {
    pub fn label(&self) -> &'static str {
        match self {
            CombatPhase::FeelingOut => "Feeling Out",
            CombatPhase::Escalation => "Escalation",
            CombatPhase::Climax => "Climax",
            CombatPhase::Resolution => "Resolution",
        }
    }
}

/// Total current health over total max health, across every combatant
pub fn aggregate_health_ratio(combatants: &[Combatant]) -> f32 {
    let total_max: f32 = combatants.iter().map(|c| c.vitals.health.max()).sum();
    if total_max <= 0.0 {
        return 0.0;
    }
    let total_current: f32 = combatants.iter().map(|c| c.vitals.health.current()).sum();
    total_current / total_max
}

/// Classify the current phase
pub fn detect(health_ratio: f32, tick: Tick, high_rank_used: bool) -> CombatPhase {
    if health_ratio > FEELING_OUT_HEALTH_RATIO && tick < FEELING_OUT_MAX_TICKS {
        CombatPhase::FeelingOut
    } else if health_ratio > ESCALATION_HEALTH_RATIO && !high_rank_used {
        CombatPhase::Escalation
    } else if health_ratio > CLIMAX_HEALTH_RATIO {
        CombatPhase::Climax
    } else {
        CombatPhase::Resolution
    }
}

/// Restrict a candidate set to phase-appropriate techniques.
///
/// Escalation rolls B-rank admission per candidate. Resolution prefers
/// finishers but falls back to the whole set when none qualify.
pub fn phase_filter(
    phase: CombatPhase,
    candidates: &[&'static Technique],
    rng: &mut StdRng,
) -> Vec<&'static Technique> {
    match phase {
        CombatPhase::FeelingOut => candidates
            .iter()
            .copied()
            .filter(|tech| tech.rank <= Rank::D)
            .collect(),
        CombatPhase::Escalation => candidates
            .iter()
            .copied()
            .filter(|tech| match tech.rank {
                Rank::A | Rank::S => false,
                Rank::B => rng.gen::<f32>() < ESCALATION_B_RANK_CHANCE,
                _ => true,
            })
            .collect(),
        CombatPhase::Climax => candidates.to_vec(),
        CombatPhase::Resolution => {
            let finishers: Vec<&'static Technique> = candidates
                .iter()
                .copied()
                .filter(|tech| tech.is_finisher())
                .collect();
            if finishers.is_empty() {
                candidates.to_vec()
            } else {
                finishers
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TechniqueCatalog;
    use rand::SeedableRng;

    #[test]
    fn test_phase_progression() {
        assert_eq!(detect(1.0, 5, false), CombatPhase::FeelingOut);
        // Time alone moves the fight out of the opening
        assert_eq!(detect(1.0, 25, false), CombatPhase::Escalation);
        assert_eq!(detect(0.6, 10, false), CombatPhase::Escalation);
        // A high-rank technique ends the escalation phase
        assert_eq!(detect(0.6, 10, true), CombatPhase::Climax);
        assert_eq!(detect(0.3, 40, true), CombatPhase::Climax);
        assert_eq!(detect(0.1, 60, true), CombatPhase::Resolution);
    }

    #[test]
    fn test_zero_health_is_resolution() {
        assert_eq!(detect(0.0, 0, false), CombatPhase::Resolution);
    }

    #[test]
    fn test_feeling_out_restricts_to_low_rank() {
        let catalog = TechniqueCatalog::new();
        let mut rng = StdRng::seed_from_u64(7);
        let all: Vec<&'static Technique> = catalog.all().iter().collect();
        let filtered = phase_filter(CombatPhase::FeelingOut, &all, &mut rng);
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|tech| tech.rank <= Rank::D));
    }

    #[test]
    fn test_escalation_never_admits_top_ranks() {
        let catalog = TechniqueCatalog::new();
        let all: Vec<&'static Technique> = catalog.all().iter().collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let filtered = phase_filter(CombatPhase::Escalation, &all, &mut rng);
            assert!(filtered
                .iter()
                .all(|tech| !matches!(tech.rank, Rank::A | Rank::S)));
        }
    }

    #[test]
    fn test_climax_admits_everything() {
        let catalog = TechniqueCatalog::new();
        let mut rng = StdRng::seed_from_u64(7);
        let all: Vec<&'static Technique> = catalog.all().iter().collect();
        let filtered = phase_filter(CombatPhase::Climax, &all, &mut rng);
        assert_eq!(filtered.len(), all.len());
    }

    #[test]
    fn test_resolution_prefers_finishers_with_fallback() {
        let catalog = TechniqueCatalog::new();
        let mut rng = StdRng::seed_from_u64(7);
        let all: Vec<&'static Technique> = catalog.all().iter().collect();
        let filtered = phase_filter(CombatPhase::Resolution, &all, &mut rng);
        assert!(filtered.iter().all(|tech| tech.is_finisher()));

        // No finisher among candidates -> the whole set comes back
        let guard_only: Vec<&'static Technique> =
            vec![catalog.get(crate::catalog::GUARD).unwrap()];
        let fallback = phase_filter(CombatPhase::Resolution, &guard_only, &mut rng);
        assert_eq!(fallback.len(), 1);
    }
}
