//! Typed combat event log
//!
//! Every user-visible happening is pushed here and mirrored to the
//! narrative sink with a style tag. The session keeps the full log.

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Style tag attached to each narrative line; rendering is not our concern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogStyle {
    Banner,
    Action,
    Damage,
    Status,
    Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEventKind {
    CombatStarted,
    TechniqueUsed { actor: String, technique: String },
    CastBegan { actor: String, technique: String },
    StillCasting { actor: String, technique: String },
    CastInterrupted { victim: String },
    DecoyStruck { actor: String },
    Damage { target: String, amount: u32 },
    Missed { actor: String, target: String },
    Guarded { actor: String },
    BarrierBlocked { technique: String },
    BarrierShattered { barrier: String },
    BarrierWeathered { barrier: String },
    TagApplied { target: String, tag: String },
    AreaTagRaised { tag: String },
    AreaTagExpired { tag: String },
    TrapSprung { victim: String },
    DisguiseRevealed { actor: String },
    Desperation { actor: String },
    RangeChanged { range: String },
    ItemSpent { actor: String, item: String },
    Victory,
    Defeat,
    CombatEnded,
}

impl CombatEventKind {
    pub fn style(&self) -> LogStyle {
        use CombatEventKind::*;
        match self {
            CombatStarted | CombatEnded => LogStyle::Banner,
            TechniqueUsed { .. } | CastBegan { .. } | StillCasting { .. } | Guarded { .. }
            | ItemSpent { .. } => LogStyle::Action,
            Damage { .. } | TrapSprung { .. } | DecoyStruck { .. } | Missed { .. } => {
                LogStyle::Damage
            }
            CastInterrupted { .. }
            | BarrierBlocked { .. }
            | BarrierShattered { .. }
            | BarrierWeathered { .. }
            | TagApplied { .. }
            | AreaTagRaised { .. }
            | AreaTagExpired { .. }
            | DisguiseRevealed { .. }
            | Desperation { .. }
            | RangeChanged { .. } => LogStyle::Status,
            Victory | Defeat => LogStyle::Outcome,
        }
    }
}

/// One logged combat event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEvent {
    pub tick: Tick,
    pub kind: CombatEventKind,
    pub text: String,
}
