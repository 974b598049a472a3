//! Runtime combatant state
//!
//! A combatant is built once at combat start from a player sheet or an
//! opponent archetype, mutated every tick, and discarded at combat end.

use std::collections::VecDeque;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::TechniqueCatalog;
use crate::core::constants::ACTION_HISTORY_CAP;
use crate::core::error::{CombatError, Result};
use crate::core::types::CombatantId;
use crate::model::archetypes::OpponentArchetype;
use crate::model::posture::{Posture, PostureEvent};
use crate::model::stats::{CharacterSheet, StatBlock, Vitals};
use crate::model::tags::PersonalTag;

/// An in-progress delayed technique
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastState {
    pub technique: String,
    /// Stored target; supplementary casts may have none
    pub target: Option<CombatantId>,
    pub ticks_remaining: u32,
}

/// Per-fighter runtime state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub is_player: bool,
    pub stats: StatBlock,
    pub vitals: Vitals,
    /// Learned jutsu, name -> proficiency (>= 1 means known)
    pub known_jutsu: AHashMap<String, u32>,
    pub taijutsu_level: u32,
    pub hand_seal_level: u32,
    /// Accumulates agility/2 per tick; an action fires at the threshold
    pub gauge: f32,
    pub posture: Posture,
    pub tags: Vec<PersonalTag>,
    /// Morale/composure dial, 0-100
    pub resolve: f32,
    /// Aggression dial, 0-100
    pub aggression: f32,
    pub cast: Option<CastState>,
    /// Recent action names, newest last, used for pattern detection
    pub history: VecDeque<String>,
}

impl Combatant {
    /// Build the player combatant from a live character snapshot
    pub fn from_player(sheet: &CharacterSheet, catalog: &TechniqueCatalog) -> Result<Self> {
        let combatant = Self {
            id: CombatantId::new(),
            name: sheet.name.clone(),
            is_player: true,
            stats: sheet.stats,
            vitals: sheet.vitals,
            known_jutsu: sheet.known_jutsu.clone(),
            taijutsu_level: sheet.taijutsu_level,
            hand_seal_level: sheet.hand_seal_level,
            gauge: 0.0,
            posture: Posture::default(),
            tags: Vec::new(),
            resolve: sheet.resolve.clamp(0.0, 100.0),
            aggression: sheet.aggression.clamp(0.0, 100.0),
            cast: None,
            history: VecDeque::with_capacity(ACTION_HISTORY_CAP),
        };
        combatant.validate(catalog)?;
        Ok(combatant)
    }

    /// Build an opponent combatant from archetype data
    pub fn from_archetype(arch: &OpponentArchetype, catalog: &TechniqueCatalog) -> Result<Self> {
        let combatant = Self {
            id: CombatantId::new(),
            name: arch.name.clone(),
            is_player: false,
            stats: arch.stats,
            vitals: Vitals::full(arch.health, arch.chakra, arch.stamina),
            known_jutsu: arch
                .known_jutsu
                .iter()
                .map(|(name, level)| (name.clone(), *level))
                .collect(),
            taijutsu_level: arch.taijutsu_level,
            hand_seal_level: arch.hand_seal_level,
            gauge: 0.0,
            posture: Posture::default(),
            tags: Vec::new(),
            resolve: arch.resolve.clamp(0.0, 100.0),
            aggression: arch.aggression.clamp(0.0, 100.0),
            cast: None,
            history: VecDeque::with_capacity(ACTION_HISTORY_CAP),
        };
        combatant.validate(catalog)?;
        Ok(combatant)
    }

    /// Both player and NPC sources must produce the same canonical shape
    fn validate(&self, catalog: &TechniqueCatalog) -> Result<()> {
        if self.vitals.health.max() <= 0.0 {
            return Err(CombatError::InvalidCombatant {
                name: self.name.clone(),
                reason: "health cap must be positive".into(),
            });
        }
        if self.vitals.chakra.max() < 0.0 || self.vitals.stamina.max() < 0.0 {
            return Err(CombatError::InvalidCombatant {
                name: self.name.clone(),
                reason: "resource caps must not be negative".into(),
            });
        }
        for name in self.known_jutsu.keys() {
            if !catalog.contains(name) {
                return Err(CombatError::InvalidCombatant {
                    name: self.name.clone(),
                    reason: format!("unknown jutsu '{}'", name),
                });
            }
        }
        Ok(())
    }

    pub fn is_alive(&self) -> bool {
        !self.vitals.health.is_empty()
    }

    pub fn knows(&self, technique: &str) -> bool {
        self.known_jutsu.get(technique).is_some_and(|level| *level >= 1)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }

    pub fn find_tag(&self, name: &str) -> Option<&PersonalTag> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    pub fn push_tag(&mut self, tag: PersonalTag) {
        self.tags.push(tag);
    }

    pub fn remove_tag(&mut self, name: &str) -> Option<PersonalTag> {
        let idx = self.tags.iter().position(|tag| tag.name == name)?;
        Some(self.tags.remove(idx))
    }

    /// Decrement tag durations, dropping expired tags silently
    pub fn decay_tags(&mut self) {
        self.tags.retain_mut(|tag| !tag.tick_down());
    }

    pub fn apply_posture(&mut self, event: PostureEvent) {
        self.posture = self.posture.apply(event);
    }

    /// How many of the last few actions were this technique
    pub fn recent_uses(&self, technique: &str) -> usize {
        self.history.iter().filter(|name| *name == technique).count()
    }

    /// How many of the last few actions satisfy the predicate
    pub fn recent_matching(&self, pred: impl Fn(&str) -> bool) -> usize {
        self.history.iter().filter(|name| pred(name)).count()
    }

    pub fn push_history(&mut self, technique: &str) {
        if self.history.len() == ACTION_HISTORY_CAP {
            self.history.pop_front();
        }
        self.history.push_back(technique.to_string());
    }

    pub fn shift_resolve(&mut self, delta: f32) {
        self.resolve = (self.resolve + delta).clamp(0.0, 100.0);
    }

    pub fn shift_aggression(&mut self, delta: f32) {
        self.aggression = (self.aggression + delta).clamp(0.0, 100.0);
    }
}

/// Disjoint mutable access to two combatants in the session list
pub fn pair_mut(
    combatants: &mut [Combatant],
    a: usize,
    b: usize,
) -> (&mut Combatant, &mut Combatant) {
    assert_ne!(a, b, "a combatant cannot target itself");
    if a < b {
        let (left, right) = combatants.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = combatants.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
