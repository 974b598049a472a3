//! Stat blocks, clamped resource pools and the player snapshot

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Raw character stats read at combatant creation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatBlock {
    pub strength: f32,
    pub agility: f32,
    pub stamina: f32,
    pub chakra_pool: f32,
    pub intellect: f32,
    pub perception: f32,
    pub willpower: f32,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            strength: 10.0,
            agility: 10.0,
            stamina: 10.0,
            chakra_pool: 10.0,
            intellect: 10.0,
            perception: 10.0,
            willpower: 10.0,
        }
    }
}

/// A single current/max resource pool.
///
/// All mutation goes through `spend`/`damage`/`restore`, which clamp to
/// [0, max]. Nothing else may write `current` directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    current: f32,
    max: f32,
}

impl ResourcePool {
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn at(current: f32, max: f32) -> Self {
        Self {
            current: current.clamp(0.0, max),
            max,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Fraction remaining. A zero-max pool reads as empty, never NaN.
    pub fn ratio(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.current / self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn spend(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    pub fn damage(&mut self, amount: f32) {
        self.spend(amount);
    }

    pub fn restore(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.current >= cost
    }
}

/// The three combat resources, as one clamped bundle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: ResourcePool,
    pub chakra: ResourcePool,
    pub stamina: ResourcePool,
}

impl Vitals {
    pub fn full(health: f32, chakra: f32, stamina: f32) -> Self {
        Self {
            health: ResourcePool::full(health),
            chakra: ResourcePool::full(chakra),
            stamina: ResourcePool::full(stamina),
        }
    }
}

/// Snapshot of the persistent character taken at combat start.
///
/// The engine reads this once when building the player combatant and
/// writes final vitals back through the session hooks at combat end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub name: String,
    pub stats: StatBlock,
    pub vitals: Vitals,
    /// Learned jutsu, name -> proficiency (>= 1 means known)
    pub known_jutsu: AHashMap<String, u32>,
    pub taijutsu_level: u32,
    pub hand_seal_level: u32,
    pub resolve: f32,
    pub aggression: f32,
}

impl CharacterSheet {
    pub fn new(name: impl Into<String>, stats: StatBlock) -> Self {
        Self {
            name: name.into(),
            stats,
            vitals: Vitals::full(100.0, 100.0, 100.0),
            known_jutsu: AHashMap::new(),
            taijutsu_level: 0,
            hand_seal_level: 0,
            resolve: 50.0,
            aggression: 50.0,
        }
    }

    pub fn with_jutsu(mut self, name: impl Into<String>, proficiency: u32) -> Self {
        self.known_jutsu.insert(name.into(), proficiency);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_clamps_both_ends() {
        let mut pool = ResourcePool::full(100.0);
        pool.restore(50.0);
        assert_eq!(pool.current(), 100.0);
        pool.spend(250.0);
        assert_eq!(pool.current(), 0.0);
        pool.restore(30.0);
        assert_eq!(pool.current(), 30.0);
    }

    #[test]
    fn test_zero_max_ratio_is_zero() {
        let pool = ResourcePool::full(0.0);
        assert_eq!(pool.ratio(), 0.0);
        assert!(!pool.ratio().is_nan());
    }

    #[test]
    fn test_at_clamps_current_to_max() {
        let pool = ResourcePool::at(150.0, 100.0);
        assert_eq!(pool.current(), 100.0);
        let pool = ResourcePool::at(-5.0, 100.0);
        assert_eq!(pool.current(), 0.0);
    }

    #[test]
    fn test_sheet_jutsu_builder() {
        let sheet = CharacterSheet::new("Test", StatBlock::default())
            .with_jutsu("Fire Bolt", 3)
            .with_jutsu("Water Wall", 1);
        assert_eq!(sheet.known_jutsu.get("Fire Bolt"), Some(&3));
        assert_eq!(sheet.known_jutsu.len(), 2);
    }
}
