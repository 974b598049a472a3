//! External collaborator seams
//!
//! The engine consumes inventory, injury and presentation services
//! through this trait. It has no opinion on how any of them work.

use crate::catalog::ItemKind;
use crate::session::events::LogStyle;

/// Services the combat engine calls out to
pub trait CombatHooks {
    /// "Has at least `count` of `item`" - consulted for the player only
    fn item_count(&self, item: ItemKind) -> u32;

    /// Remove `count` of `item` from the player inventory.
    /// Returns false when the stock was insufficient.
    fn consume_item(&mut self, item: ItemKind, count: u32) -> bool;

    /// Apply a named injury to the player (called exactly once, on defeat)
    fn apply_injury(&mut self, injury: &str);

    /// Append a user-visible narrative line
    fn narrate(&mut self, style: LogStyle, text: &str);

    /// State changed, re-render
    fn state_changed(&mut self);

    /// Flip the surrounding application's combat-mode flag
    fn set_combat_mode(&mut self, in_combat: bool);

    /// Copy the player's final vitals back onto the persistent character
    fn sync_player_vitals(&mut self, health: f32, chakra: f32, stamina: f32);
}

/// No-op hooks with a bottomless inventory, for tests and headless runs
#[derive(Debug, Default)]
pub struct NullHooks;

impl CombatHooks for NullHooks {
    fn item_count(&self, _item: ItemKind) -> u32 {
        u32::MAX
    }

    fn consume_item(&mut self, _item: ItemKind, _count: u32) -> bool {
        true
    }

    fn apply_injury(&mut self, _injury: &str) {}

    fn narrate(&mut self, _style: LogStyle, _text: &str) {}

    fn state_changed(&mut self) {}

    fn set_combat_mode(&mut self, _in_combat: bool) {}

    fn sync_player_vitals(&mut self, _health: f32, _chakra: f32, _stamina: f32) {}
}
