//! Opponent archetype data loaded from TOML
//!
//! Archetypes describe combat-ready NPC fighters. Built-in constructors
//! cover the stock roster; `load_archetype` reads overrides from
//! `data/opponents/{name}.toml`.

use std::fs;
use std::path::PathBuf;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::model::stats::StatBlock;

/// Combat-ready opponent data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpponentArchetype {
    /// Display name (set from filename when loaded from disk)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stats: StatBlock,
    pub health: f32,
    pub chakra: f32,
    pub stamina: f32,
    /// Learned jutsu, name -> proficiency
    #[serde(default)]
    pub known_jutsu: AHashMap<String, u32>,
    #[serde(default)]
    pub taijutsu_level: u32,
    #[serde(default)]
    pub hand_seal_level: u32,
    #[serde(default = "default_dial")]
    pub resolve: f32,
    #[serde(default = "default_dial")]
    pub aggression: f32,
}

fn default_dial() -> f32 {
    50.0
}

impl OpponentArchetype {
    /// A common thug: strong arm, no jutsu to speak of
    pub fn bandit() -> Self {
        Self {
            name: "Bandit".to_string(),
            stats: StatBlock {
                strength: 14.0,
                agility: 9.0,
                stamina: 12.0,
                chakra_pool: 4.0,
                intellect: 6.0,
                perception: 8.0,
                willpower: 8.0,
            },
            health: 90.0,
            chakra: 20.0,
            stamina: 110.0,
            known_jutsu: AHashMap::new(),
            taijutsu_level: 6,
            hand_seal_level: 0,
            resolve: 45.0,
            aggression: 70.0,
        }
    }

    /// A trained deserter with a small ninjutsu kit
    pub fn rogue_genin() -> Self {
        Self {
            name: "Rogue Genin".to_string(),
            stats: StatBlock {
                strength: 10.0,
                agility: 13.0,
                stamina: 10.0,
                chakra_pool: 12.0,
                intellect: 11.0,
                perception: 11.0,
                willpower: 9.0,
            },
            health: 85.0,
            chakra: 80.0,
            stamina: 90.0,
            known_jutsu: AHashMap::from_iter([
                ("Fire Bolt".to_string(), 3),
                ("Substitution Technique".to_string(), 2),
                ("Illusory Clones".to_string(), 2),
            ]),
            taijutsu_level: 4,
            hand_seal_level: 15,
            resolve: 55.0,
            aggression: 55.0,
        }
    }

    /// A veteran with barriers, mist cover and heavy ninjutsu
    pub fn missing_nin() -> Self {
        Self {
            name: "Missing-nin".to_string(),
            stats: StatBlock {
                strength: 12.0,
                agility: 15.0,
                stamina: 13.0,
                chakra_pool: 18.0,
                intellect: 14.0,
                perception: 14.0,
                willpower: 12.0,
            },
            health: 120.0,
            chakra: 140.0,
            stamina: 110.0,
            known_jutsu: AHashMap::from_iter([
                ("Fire Bolt".to_string(), 5),
                ("Flame Wave".to_string(), 4),
                ("Dragon Flame Barrage".to_string(), 2),
                ("Water Wall".to_string(), 3),
                ("Hidden Mist".to_string(), 3),
                ("Substitution Technique".to_string(), 4),
                ("Paper Bomb Trap".to_string(), 2),
            ]),
            taijutsu_level: 11,
            hand_seal_level: 40,
            resolve: 70.0,
            aggression: 60.0,
        }
    }

    /// Built-in archetype by name, if one exists
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "bandit" => Some(Self::bandit()),
            "rogue_genin" => Some(Self::rogue_genin()),
            "missing_nin" => Some(Self::missing_nin()),
            _ => None,
        }
    }

    pub fn builtin_names() -> &'static [&'static str] {
        &["bandit", "rogue_genin", "missing_nin"]
    }
}

/// Load an archetype from `data/opponents/{name}.toml`
pub fn load_archetype(name: &str) -> Result<OpponentArchetype> {
    let path = archetype_path(name);
    let contents = fs::read_to_string(&path)?;
    let mut archetype: OpponentArchetype = toml::from_str(&contents)?;
    if archetype.name.is_empty() {
        archetype.name = name.to_string();
    }
    Ok(archetype)
}

/// Load from disk, falling back to the built-in roster
pub fn resolve_archetype(name: &str) -> Result<OpponentArchetype> {
    match load_archetype(name) {
        Ok(archetype) => Ok(archetype),
        Err(load_err) => OpponentArchetype::builtin(name).ok_or_else(|| {
            tracing::error!(%name, error = %load_err, "archetype not on disk and not built in");
            crate::core::error::CombatError::UnknownOpponent(name.to_string())
        }),
    }
}

fn archetype_path(name: &str) -> PathBuf {
    PathBuf::from("data/opponents").join(format!("{}.toml", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TechniqueCatalog;
    use crate::model::combatant::Combatant;

    #[test]
    fn test_builtin_roster_resolves() {
        for name in OpponentArchetype::builtin_names() {
            assert!(OpponentArchetype::builtin(name).is_some());
        }
        assert!(OpponentArchetype::builtin("tax_collector").is_none());
    }

    #[test]
    fn test_builtin_jutsu_exist_in_catalog() {
        let catalog = TechniqueCatalog::new();
        for name in OpponentArchetype::builtin_names() {
            let arch = OpponentArchetype::builtin(name).unwrap();
            let combatant = Combatant::from_archetype(&arch, &catalog);
            assert!(combatant.is_ok(), "archetype {} fails validation", name);
        }
    }

    #[test]
    fn test_load_shipped_bandit() {
        let archetype = load_archetype("bandit").expect("shipped bandit.toml should parse");
        assert_eq!(archetype.name, "Bandit");
        assert!(archetype.health > 0.0);
    }

    #[test]
    fn test_resolve_falls_back_to_builtin() {
        // missing_nin has no TOML on disk
        let archetype = resolve_archetype("missing_nin").unwrap();
        assert_eq!(archetype.name, "Missing-nin");
        assert!(resolve_archetype("tax_collector").is_err());
    }
}
