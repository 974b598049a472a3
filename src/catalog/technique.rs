//! Technique schema - the shape of every catalog entry
//!
//! Techniques are immutable content. Classification helpers live here so
//! the decision and resolution layers never match on raw fields.

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    FINISHER_POWER_FLOOR, HAND_SEAL_DIVISOR, HEAVY_MELEE_POWER_FLOOR,
};
use crate::core::types::Tick;
use crate::model::battlefield::RangeBand;

/// Technique rank tier. Ordering is total: E < D < C < B < A < S.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    E = 0,
    D = 1,
    C = 2,
    B = 3,
    A = 4,
    S = 5,
}

impl Rank {
    pub fn tier(&self) -> u8 {
        *self as u8
    }

    /// High-rank techniques drive phase escalation
    pub fn is_high(&self) -> bool {
        matches!(self, Rank::B | Rank::A | Rank::S)
    }
}

/// Every technique resolves to exactly one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechniqueKind {
    Offensive,
    Defensive,
    Supplementary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Wind,
    Lightning,
}

/// Effect-kind classification used by reactions and barrier checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Projectile,
    MultiProjectile,
    AoE,
    LineAoE,
    Evasion,
    Barrier,
    Mental,
    Diversion,
    Trap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delivery {
    Melee,
    Ranged,
}

/// Casting complexity maps to resolution delay ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastComplexity {
    None,
    Simple,
    Moderate,
    Complex,
    High,
}

impl CastComplexity {
    pub fn base_delay_ticks(&self) -> u32 {
        match self {
            CastComplexity::None => 0,
            CastComplexity::Simple => 1,
            CastComplexity::Moderate => 2,
            CastComplexity::Complex | CastComplexity::High => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Powerful,
    FollowUp,
    Genjutsu,
}

/// Consumable items referenced by techniques
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Shuriken,
    Kunai,
    PaperBomb,
}

impl ItemKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemKind::Shuriken => "Shuriken",
            ItemKind::Kunai => "Kunai",
            ItemKind::PaperBomb => "Paper Bomb",
        }
    }
}

/// Range-band change caused by a movement technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeShift {
    Closer(u8),
    Farther(u8),
}

/// A personal tag a technique may apply (to its target or its user)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedTag {
    pub name: &'static str,
    /// Trigger chance, rolled once at application time
    pub chance: f32,
    pub duration: Tick,
    pub power: Option<u32>,
}

/// A battlefield area tag a technique may raise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaTagSpec {
    pub name: &'static str,
    pub duration: Tick,
    /// Barrier strength, where applicable
    pub rank: Option<Rank>,
    pub power: Option<u32>,
}

/// Optional effect descriptors attached to a technique
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechniqueEffect {
    pub range_shift: Option<RangeShift>,
    pub battlefield_tag: Option<AreaTagSpec>,
    pub target_tag: Option<AppliedTag>,
    pub self_tag: Option<AppliedTag>,
    pub consumes_item: Option<ItemKind>,
}

impl TechniqueEffect {
    pub const NONE: TechniqueEffect = TechniqueEffect {
        range_shift: None,
        battlefield_tag: None,
        target_tag: None,
        self_tag: None,
        consumes_item: None,
    };
}

/// An immutable catalog entry
#[derive(Debug, Clone, Copy)]
pub struct Technique {
    pub name: &'static str,
    pub rank: Rank,
    pub kind: TechniqueKind,
    pub element: Option<Element>,
    pub effect_kind: Option<EffectKind>,
    pub delivery: Delivery,
    pub complexity: CastComplexity,
    pub chakra_cost: u32,
    pub stamina_cost: u32,
    pub base_power: u32,
    /// Minimum taijutsu proficiency, for the gated melee upgrades
    pub taijutsu_gate: Option<u32>,
    /// `None` means valid at every range band
    pub valid_ranges: Option<&'static [RangeBand]>,
    pub keywords: &'static [Keyword],
    pub effect: TechniqueEffect,
}

impl Technique {
    pub fn is_offensive(&self) -> bool {
        self.kind == TechniqueKind::Offensive
    }

    pub fn is_defensive(&self) -> bool {
        self.kind == TechniqueKind::Defensive
    }

    pub fn is_supplementary(&self) -> bool {
        self.kind == TechniqueKind::Supplementary
    }

    pub fn is_melee(&self) -> bool {
        self.delivery == Delivery::Melee
    }

    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    /// Movement techniques shift the range band and get stamina discounts
    pub fn is_movement(&self) -> bool {
        self.kind == TechniqueKind::Supplementary && self.effect.range_shift.is_some()
    }

    pub fn is_advance(&self) -> bool {
        matches!(self.effect.range_shift, Some(RangeShift::Closer(_)))
    }

    pub fn is_retreat(&self) -> bool {
        matches!(self.effect.range_shift, Some(RangeShift::Farther(_)))
    }

    /// Thrown-tool harassment: ranged, consumable-backed attacks
    pub fn is_thrown_tool(&self) -> bool {
        self.is_offensive()
            && self.delivery == Delivery::Ranged
            && self.effect.consumes_item.is_some()
    }

    /// Family of effects that barriers stop and defenders can react to
    pub fn is_projectile_family(&self) -> bool {
        matches!(
            self.effect_kind,
            Some(EffectKind::Projectile)
                | Some(EffectKind::MultiProjectile)
                | Some(EffectKind::AoE)
                | Some(EffectKind::LineAoE)
        )
    }

    pub fn is_trap_setter(&self) -> bool {
        self.effect_kind == Some(EffectKind::Trap)
    }

    pub fn is_diversion(&self) -> bool {
        self.effect_kind == Some(EffectKind::Diversion)
    }

    pub fn is_heavy_melee(&self) -> bool {
        self.is_offensive() && self.is_melee() && self.base_power >= HEAVY_MELEE_POWER_FLOOR
    }

    pub fn is_finisher(&self) -> bool {
        self.is_offensive()
            && (self.has_keyword(Keyword::Powerful) || self.base_power >= FINISHER_POWER_FLOOR)
    }

    pub fn valid_at(&self, band: RangeBand) -> bool {
        self.valid_ranges.map_or(true, |ranges| ranges.contains(&band))
    }

    /// Ticks the technique spends casting, after hand-seal training
    pub fn cast_ticks(&self, hand_seal_level: u32) -> u32 {
        let base = self.complexity.base_delay_ticks();
        if base == 0 {
            return 0;
        }
        base.saturating_sub(hand_seal_level / HAND_SEAL_DIVISOR).max(1)
    }

    /// Techniques that keep the user's guard up on resolution
    pub fn reinforces_posture(&self) -> bool {
        self.kind == TechniqueKind::Defensive
    }
}
