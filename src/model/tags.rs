//! Timed status markers on combatants and the battlefield

use serde::{Deserialize, Serialize};

use crate::catalog::Rank;
use crate::core::types::{CombatantId, Tick};

// Tag names the rules engine matches on
pub const TAG_DESPERATE: &str = "Desperate";
pub const TAG_AIRBORNE: &str = "Airborne";
pub const TAG_LAUNCHED: &str = "Launched";
pub const TAG_DISGUISED: &str = "Disguised";
pub const TAG_DISORIENTED: &str = "Disoriented";
pub const TAG_TRAP_SET: &str = "Trap Set";
pub const TAG_ILLUSORY_CLONES: &str = "Illusory Clones";
pub const TAG_HIDDEN_PAPER_BOMB: &str = "Hidden Paper Bomb";

/// A status tag carried by a single combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalTag {
    pub name: String,
    /// `None` means the tag never expires on its own
    pub remaining: Option<Tick>,
    /// Extra data, e.g. armed trap power
    pub power: Option<u32>,
}

impl PersonalTag {
    pub fn timed(name: impl Into<String>, duration: Tick) -> Self {
        Self {
            name: name.into(),
            remaining: Some(duration),
            power: None,
        }
    }

    pub fn unbounded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remaining: None,
            power: None,
        }
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.power = Some(power);
        self
    }

    /// Decrement one tick of duration. Returns true when the tag expires.
    pub fn tick_down(&mut self) -> bool {
        match self.remaining.as_mut() {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            None => false,
        }
    }
}

/// A shared area tag on the battlefield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaTag {
    pub name: String,
    pub remaining: Tick,
    /// Barrier strength for Wall/Dome comparisons
    pub rank: Option<Rank>,
    /// Hazard payload, e.g. hidden bomb damage
    pub power: Option<u32>,
    /// Trap tags are keyed by owner; everything else is unowned
    pub owner: Option<CombatantId>,
}

impl AreaTag {
    pub fn new(name: impl Into<String>, remaining: Tick) -> Self {
        Self {
            name: name.into(),
            remaining,
            rank: None,
            power: None,
            owner: None,
        }
    }

    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.power = Some(power);
        self
    }

    pub fn owned_by(mut self, owner: CombatantId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn is_barrier(&self) -> bool {
        self.rank.is_some() && (self.name.contains("Wall") || self.name.contains("Dome"))
    }
}
