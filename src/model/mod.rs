//! Combatant and battlefield runtime models

pub mod archetypes;
pub mod battlefield;
pub mod combatant;
pub mod posture;
pub mod stats;
pub mod tags;

pub use archetypes::OpponentArchetype;
pub use battlefield::{Battlefield, RangeBand};
pub use combatant::{pair_mut, CastState, Combatant};
pub use posture::{Posture, PostureEvent};
pub use stats::{CharacterSheet, ResourcePool, StatBlock, Vitals};
pub use tags::{AreaTag, PersonalTag};
