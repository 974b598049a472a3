//! Technique usability predicate
//!
//! A technique must pass every gate here before the decision engine may
//! consider it: consumables, known-set membership, proficiency gates,
//! resource sufficiency and range validity.

use crate::catalog::{Technique, BASELINE};
use crate::core::constants::{MOVEMENT_DISCOUNT_AGILITY, MOVEMENT_DISCOUNT_STAMINA};
use crate::model::battlefield::RangeBand;
use crate::model::combatant::Combatant;
use crate::session::hooks::CombatHooks;

/// Effective stamina cost after the movement discount.
///
/// Movement techniques are cheaper for fast, conditioned fighters:
/// max(1, floor(base * (1 - (0.005*agility + 0.002*stamina)))).
pub fn stamina_cost(technique: &Technique, actor: &Combatant) -> f32 {
    if !technique.is_movement() || technique.stamina_cost == 0 {
        return technique.stamina_cost as f32;
    }
    let discount =
        MOVEMENT_DISCOUNT_AGILITY * actor.stats.agility + MOVEMENT_DISCOUNT_STAMINA * actor.stats.stamina;
    let discounted = (technique.stamina_cost as f32 * (1.0 - discount)).floor();
    discounted.max(1.0)
}

/// Is the technique part of the innate baseline subset?
pub fn is_baseline(technique: &Technique) -> bool {
    BASELINE.contains(&technique.name)
}

/// The full usability predicate
pub fn usable(
    technique: &Technique,
    actor: &Combatant,
    range: RangeBand,
    hooks: &dyn CombatHooks,
) -> bool {
    // Consumable availability - NPCs are assumed stocked
    if let Some(item) = technique.effect.consumes_item {
        if actor.is_player && hooks.item_count(item) < 1 {
            return false;
        }
    }

    // Innate baseline, or learned at proficiency >= 1
    if !is_baseline(technique) && !actor.knows(technique.name) {
        return false;
    }

    // Proficiency gates on the upgraded melee moves
    if let Some(gate) = technique.taijutsu_gate {
        if actor.taijutsu_level < gate {
            return false;
        }
    }

    // Resource sufficiency
    if !actor.vitals.stamina.can_afford(stamina_cost(technique, actor)) {
        return false;
    }
    if !actor.vitals.chakra.can_afford(technique.chakra_cost as f32) {
        return false;
    }

    // Declared range sets bind; absence means valid everywhere
    technique.valid_at(range)
}

/// Every technique the actor could legally use right now, catalog order
pub fn usable_set(
    catalog: &crate::catalog::TechniqueCatalog,
    actor: &Combatant,
    range: RangeBand,
    hooks: &dyn CombatHooks,
) -> Vec<&'static Technique> {
    catalog
        .all()
        .iter()
        .filter(|tech| usable(tech, actor, range, hooks))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TechniqueCatalog, DASH, GUARD, STRIKE};
    use crate::model::stats::{CharacterSheet, StatBlock};
    use crate::session::hooks::NullHooks;

    fn fighter(stats: StatBlock) -> Combatant {
        let catalog = TechniqueCatalog::new();
        let sheet = CharacterSheet::new("Test", stats);
        Combatant::from_player(&sheet, &catalog).unwrap()
    }

    #[test]
    fn test_movement_discount_formula() {
        let catalog = TechniqueCatalog::new();
        let dash = catalog.get(DASH).unwrap();
        let mut stats = StatBlock::default();
        stats.agility = 40.0;
        stats.stamina = 50.0;
        let actor = fighter(stats);
        // 10 * (1 - (0.005*40 + 0.002*50)) = 10 * 0.7 = 7
        assert_eq!(stamina_cost(dash, &actor), 7.0);
    }

    #[test]
    fn test_movement_discount_floors_at_one() {
        let catalog = TechniqueCatalog::new();
        let dash = catalog.get(DASH).unwrap();
        let mut stats = StatBlock::default();
        stats.agility = 150.0;
        stats.stamina = 150.0;
        let actor = fighter(stats);
        assert_eq!(stamina_cost(dash, &actor), 1.0);
    }

    #[test]
    fn test_non_movement_pays_full_price() {
        let catalog = TechniqueCatalog::new();
        let strike = catalog.get(STRIKE).unwrap();
        let actor = fighter(StatBlock::default());
        assert_eq!(stamina_cost(strike, &actor), strike.stamina_cost as f32);
    }

    #[test]
    fn test_taijutsu_gate_blocks() {
        let catalog = TechniqueCatalog::new();
        let heavy = catalog.get("Heavy Strike").unwrap();
        let hooks = NullHooks;
        let mut actor = fighter(StatBlock::default());
        actor.taijutsu_level = 4;
        assert!(!usable(heavy, &actor, RangeBand::Engaged, &hooks));
        actor.taijutsu_level = 5;
        assert!(usable(heavy, &actor, RangeBand::Engaged, &hooks));
    }

    #[test]
    fn test_unknown_jutsu_unusable() {
        let catalog = TechniqueCatalog::new();
        let fire_bolt = catalog.get("Fire Bolt").unwrap();
        let hooks = NullHooks;
        let actor = fighter(StatBlock::default());
        assert!(!usable(fire_bolt, &actor, RangeBand::Mid, &hooks));
    }

    #[test]
    fn test_range_set_binds() {
        let catalog = TechniqueCatalog::new();
        let strike = catalog.get(STRIKE).unwrap();
        let hooks = NullHooks;
        let actor = fighter(StatBlock::default());
        assert!(usable(strike, &actor, RangeBand::Engaged, &hooks));
        assert!(!usable(strike, &actor, RangeBand::Long, &hooks));
    }

    #[test]
    fn test_exhausted_stamina_blocks() {
        let catalog = TechniqueCatalog::new();
        let strike = catalog.get(STRIKE).unwrap();
        let guard = catalog.get(GUARD).unwrap();
        let hooks = NullHooks;
        let mut actor = fighter(StatBlock::default());
        actor.vitals.stamina.spend(1000.0);
        assert!(!usable(strike, &actor, RangeBand::Engaged, &hooks));
        // Guard costs nothing and is always available
        assert!(usable(guard, &actor, RangeBand::Engaged, &hooks));
    }

    #[test]
    fn test_usable_set_keeps_catalog_order() {
        let catalog = TechniqueCatalog::new();
        let hooks = NullHooks;
        let actor = fighter(StatBlock::default());
        let set = usable_set(&catalog, &actor, RangeBand::Short, &hooks);
        let positions: Vec<usize> = set
            .iter()
            .map(|tech| {
                catalog
                    .all()
                    .iter()
                    .position(|entry| entry.name == tech.name)
                    .unwrap()
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}
