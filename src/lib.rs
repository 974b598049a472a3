//! Shinobi Combat - tick-based combat resolution engine
//!
//! Arbitrates two or more combatants exchanging techniques until one
//! side is defeated: a real-time tick scheduler, a layered decision AI,
//! a rules engine for technique legality, and a stateful battlefield
//! with area effects, status tags and interrupts. Character growth,
//! inventory and presentation are external collaborators reached
//! through the session hooks.

pub mod catalog;
pub mod core;
pub mod decision;
pub mod model;
pub mod resolution;
pub mod session;
