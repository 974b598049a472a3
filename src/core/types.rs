//! Core type definitions used throughout the combat engine

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Combat tick counter (simulation time unit)
pub type Tick = u64;

/// Unique identifier for combatants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub Uuid);

impl CombatantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CombatantId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combatant_id_unique() {
        let a = CombatantId::new();
        let b = CombatantId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_combatant_id_hash() {
        use std::collections::HashMap;
        let id = CombatantId::new();
        let mut map: HashMap<CombatantId, &str> = HashMap::new();
        map.insert(id, "player");
        assert_eq!(map.get(&id), Some(&"player"));
    }
}
