//! Static technique definitions - the catalog every combatant draws from
//!
//! Bulk numbers here are content, not architecture. Order matters: ties on
//! base power resolve to the earliest entry.

use crate::catalog::technique::{
    AppliedTag, AreaTagSpec, CastComplexity, Delivery, EffectKind, Element, ItemKind, Keyword,
    RangeShift, Rank, Technique, TechniqueEffect, TechniqueKind,
};
use crate::model::battlefield::RangeBand;
use crate::model::tags::{
    TAG_DISGUISED, TAG_DISORIENTED, TAG_HIDDEN_PAPER_BOMB, TAG_ILLUSORY_CLONES, TAG_LAUNCHED,
    TAG_TRAP_SET,
};

// Techniques the rules engine references by name
pub const STRIKE: &str = "Strike";
pub const GUARD: &str = "Guard";
pub const DASH: &str = "Dash";
pub const CREATE_DISTANCE: &str = "Create Distance";
pub const SUBSTITUTION: &str = "Substitution Technique";

/// Innate baseline moves every combatant can attempt (gates permitting)
pub static BASELINE: &[&str] = &[
    STRIKE,
    GUARD,
    DASH,
    CREATE_DISTANCE,
    "Shuriken Throw",
    "Kunai Throw",
    "Heavy Strike",
    "Whirlwind Kick",
    "Gale Palm Barrage",
    "Falling Crash",
];

pub static TECHNIQUE_LIBRARY: &[Technique] = &[
    // === BASELINE ===
    Technique {
        name: STRIKE,
        rank: Rank::E,
        kind: TechniqueKind::Offensive,
        element: None,
        effect_kind: None,
        delivery: Delivery::Melee,
        complexity: CastComplexity::None,
        chakra_cost: 0,
        stamina_cost: 4,
        base_power: 15,
        taijutsu_gate: None,
        valid_ranges: Some(&[RangeBand::Engaged, RangeBand::Short]),
        keywords: &[],
        effect: TechniqueEffect::NONE,
    },
    Technique {
        name: GUARD,
        rank: Rank::E,
        kind: TechniqueKind::Defensive,
        element: None,
        effect_kind: None,
        delivery: Delivery::Melee,
        complexity: CastComplexity::None,
        chakra_cost: 0,
        stamina_cost: 0,
        base_power: 0,
        taijutsu_gate: None,
        valid_ranges: None,
        keywords: &[],
        effect: TechniqueEffect::NONE,
    },
    Technique {
        name: DASH,
        rank: Rank::E,
        kind: TechniqueKind::Supplementary,
        element: None,
        effect_kind: None,
        delivery: Delivery::Melee,
        complexity: CastComplexity::None,
        chakra_cost: 0,
        stamina_cost: 10,
        base_power: 0,
        taijutsu_gate: None,
        valid_ranges: Some(&[RangeBand::Short, RangeBand::Mid, RangeBand::Long]),
        keywords: &[],
        effect: TechniqueEffect {
            range_shift: Some(RangeShift::Closer(1)),
            ..TechniqueEffect::NONE
        },
    },
    Technique {
        name: CREATE_DISTANCE,
        rank: Rank::E,
        kind: TechniqueKind::Supplementary,
        element: None,
        effect_kind: None,
        delivery: Delivery::Melee,
        complexity: CastComplexity::None,
        chakra_cost: 0,
        stamina_cost: 10,
        base_power: 0,
        taijutsu_gate: None,
        valid_ranges: Some(&[RangeBand::Engaged, RangeBand::Short, RangeBand::Mid]),
        keywords: &[],
        effect: TechniqueEffect {
            range_shift: Some(RangeShift::Farther(1)),
            ..TechniqueEffect::NONE
        },
    },
    Technique {
        name: "Shuriken Throw",
        rank: Rank::E,
        kind: TechniqueKind::Offensive,
        element: None,
        effect_kind: Some(EffectKind::Projectile),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::None,
        chakra_cost: 0,
        stamina_cost: 3,
        base_power: 10,
        taijutsu_gate: None,
        valid_ranges: Some(&[RangeBand::Short, RangeBand::Mid, RangeBand::Long]),
        keywords: &[],
        effect: TechniqueEffect {
            consumes_item: Some(ItemKind::Shuriken),
            ..TechniqueEffect::NONE
        },
    },
    Technique {
        name: "Kunai Throw",
        rank: Rank::E,
        kind: TechniqueKind::Offensive,
        element: None,
        effect_kind: Some(EffectKind::Projectile),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::None,
        chakra_cost: 0,
        stamina_cost: 3,
        base_power: 12,
        taijutsu_gate: None,
        valid_ranges: Some(&[RangeBand::Short, RangeBand::Mid]),
        keywords: &[],
        effect: TechniqueEffect {
            consumes_item: Some(ItemKind::Kunai),
            ..TechniqueEffect::NONE
        },
    },
    // === GATED MELEE UPGRADES ===
    Technique {
        name: "Heavy Strike",
        rank: Rank::D,
        kind: TechniqueKind::Offensive,
        element: None,
        effect_kind: None,
        delivery: Delivery::Melee,
        complexity: CastComplexity::None,
        chakra_cost: 0,
        stamina_cost: 10,
        base_power: 25,
        taijutsu_gate: Some(5),
        valid_ranges: Some(&[RangeBand::Engaged]),
        keywords: &[],
        effect: TechniqueEffect::NONE,
    },
    Technique {
        name: "Whirlwind Kick",
        rank: Rank::C,
        kind: TechniqueKind::Offensive,
        element: None,
        effect_kind: None,
        delivery: Delivery::Melee,
        complexity: CastComplexity::None,
        chakra_cost: 0,
        stamina_cost: 16,
        base_power: 32,
        taijutsu_gate: Some(10),
        valid_ranges: Some(&[RangeBand::Engaged]),
        keywords: &[],
        effect: TechniqueEffect {
            target_tag: Some(AppliedTag {
                name: TAG_LAUNCHED,
                chance: 0.35,
                duration: 2,
                power: None,
            }),
            ..TechniqueEffect::NONE
        },
    },
    Technique {
        name: "Gale Palm Barrage",
        rank: Rank::B,
        kind: TechniqueKind::Offensive,
        element: None,
        effect_kind: None,
        delivery: Delivery::Melee,
        complexity: CastComplexity::None,
        chakra_cost: 0,
        stamina_cost: 24,
        base_power: 48,
        taijutsu_gate: Some(15),
        valid_ranges: Some(&[RangeBand::Engaged]),
        keywords: &[Keyword::Powerful],
        effect: TechniqueEffect::NONE,
    },
    Technique {
        name: "Falling Crash",
        rank: Rank::C,
        kind: TechniqueKind::Offensive,
        element: None,
        effect_kind: None,
        delivery: Delivery::Melee,
        complexity: CastComplexity::None,
        chakra_cost: 0,
        stamina_cost: 14,
        base_power: 30,
        taijutsu_gate: None,
        valid_ranges: Some(&[RangeBand::Engaged, RangeBand::Short]),
        keywords: &[Keyword::FollowUp],
        effect: TechniqueEffect::NONE,
    },
    // === NINJUTSU ===
    Technique {
        name: "Fire Bolt",
        rank: Rank::D,
        kind: TechniqueKind::Offensive,
        element: Some(Element::Fire),
        effect_kind: Some(EffectKind::Projectile),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::Simple,
        chakra_cost: 10,
        stamina_cost: 0,
        base_power: 20,
        taijutsu_gate: None,
        valid_ranges: Some(&[RangeBand::Short, RangeBand::Mid, RangeBand::Long]),
        keywords: &[],
        effect: TechniqueEffect::NONE,
    },
    Technique {
        name: "Flame Wave",
        rank: Rank::C,
        kind: TechniqueKind::Offensive,
        element: Some(Element::Fire),
        effect_kind: Some(EffectKind::AoE),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::Moderate,
        chakra_cost: 20,
        stamina_cost: 0,
        base_power: 30,
        taijutsu_gate: None,
        valid_ranges: Some(&[RangeBand::Short, RangeBand::Mid]),
        keywords: &[],
        effect: TechniqueEffect::NONE,
    },
    Technique {
        name: "Piercing Gale",
        rank: Rank::C,
        kind: TechniqueKind::Offensive,
        element: Some(Element::Wind),
        effect_kind: Some(EffectKind::LineAoE),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::Moderate,
        chakra_cost: 18,
        stamina_cost: 0,
        base_power: 28,
        taijutsu_gate: None,
        valid_ranges: Some(&[RangeBand::Mid, RangeBand::Long]),
        keywords: &[],
        effect: TechniqueEffect::NONE,
    },
    Technique {
        name: "Dragon Flame Barrage",
        rank: Rank::A,
        kind: TechniqueKind::Offensive,
        element: Some(Element::Fire),
        effect_kind: Some(EffectKind::MultiProjectile),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::Complex,
        chakra_cost: 40,
        stamina_cost: 0,
        base_power: 60,
        taijutsu_gate: None,
        valid_ranges: Some(&[RangeBand::Mid, RangeBand::Long]),
        keywords: &[Keyword::Powerful],
        effect: TechniqueEffect::NONE,
    },
    Technique {
        name: "Lightning Edge",
        rank: Rank::A,
        kind: TechniqueKind::Offensive,
        element: Some(Element::Lightning),
        effect_kind: None,
        delivery: Delivery::Melee,
        complexity: CastComplexity::Complex,
        chakra_cost: 35,
        stamina_cost: 10,
        base_power: 70,
        taijutsu_gate: None,
        valid_ranges: Some(&[RangeBand::Engaged]),
        keywords: &[Keyword::Powerful],
        effect: TechniqueEffect::NONE,
    },
    Technique {
        name: "Tempest Severance",
        rank: Rank::S,
        kind: TechniqueKind::Offensive,
        element: Some(Element::Wind),
        effect_kind: Some(EffectKind::LineAoE),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::High,
        chakra_cost: 60,
        stamina_cost: 0,
        base_power: 90,
        taijutsu_gate: None,
        valid_ranges: None,
        keywords: &[Keyword::Powerful],
        effect: TechniqueEffect::NONE,
    },
    Technique {
        name: "False Surroundings",
        rank: Rank::C,
        kind: TechniqueKind::Offensive,
        element: None,
        effect_kind: Some(EffectKind::Mental),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::Moderate,
        chakra_cost: 20,
        stamina_cost: 0,
        base_power: 8,
        taijutsu_gate: None,
        valid_ranges: None,
        keywords: &[Keyword::Genjutsu],
        effect: TechniqueEffect {
            target_tag: Some(AppliedTag {
                name: TAG_DISORIENTED,
                chance: 0.6,
                duration: 3,
                power: None,
            }),
            ..TechniqueEffect::NONE
        },
    },
    // === DEFENSE & EVASION ===
    Technique {
        name: "Water Wall",
        rank: Rank::C,
        kind: TechniqueKind::Defensive,
        element: Some(Element::Water),
        effect_kind: Some(EffectKind::Barrier),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::Simple,
        chakra_cost: 15,
        stamina_cost: 0,
        base_power: 0,
        taijutsu_gate: None,
        valid_ranges: None,
        keywords: &[],
        effect: TechniqueEffect {
            battlefield_tag: Some(AreaTagSpec {
                name: "Water Wall",
                duration: 4,
                rank: Some(Rank::C),
                power: None,
            }),
            ..TechniqueEffect::NONE
        },
    },
    Technique {
        name: "Stone Dome",
        rank: Rank::B,
        kind: TechniqueKind::Defensive,
        element: Some(Element::Earth),
        effect_kind: Some(EffectKind::Barrier),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::Moderate,
        chakra_cost: 25,
        stamina_cost: 0,
        base_power: 0,
        taijutsu_gate: None,
        valid_ranges: None,
        keywords: &[],
        effect: TechniqueEffect {
            battlefield_tag: Some(AreaTagSpec {
                name: "Stone Dome",
                duration: 5,
                rank: Some(Rank::B),
                power: None,
            }),
            ..TechniqueEffect::NONE
        },
    },
    Technique {
        name: SUBSTITUTION,
        rank: Rank::D,
        kind: TechniqueKind::Defensive,
        element: None,
        effect_kind: Some(EffectKind::Evasion),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::None,
        chakra_cost: 8,
        stamina_cost: 0,
        base_power: 0,
        taijutsu_gate: None,
        valid_ranges: None,
        keywords: &[],
        effect: TechniqueEffect::NONE,
    },
    // === DIVERSION & TRAPS ===
    Technique {
        name: "Illusory Clones",
        rank: Rank::D,
        kind: TechniqueKind::Supplementary,
        element: None,
        effect_kind: Some(EffectKind::Diversion),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::Simple,
        chakra_cost: 12,
        stamina_cost: 0,
        base_power: 0,
        taijutsu_gate: None,
        valid_ranges: None,
        keywords: &[],
        effect: TechniqueEffect {
            battlefield_tag: Some(AreaTagSpec {
                name: TAG_ILLUSORY_CLONES,
                duration: 4,
                rank: None,
                power: None,
            }),
            ..TechniqueEffect::NONE
        },
    },
    Technique {
        name: "Hidden Mist",
        rank: Rank::C,
        kind: TechniqueKind::Supplementary,
        element: Some(Element::Water),
        effect_kind: Some(EffectKind::Diversion),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::Moderate,
        chakra_cost: 15,
        stamina_cost: 0,
        base_power: 0,
        taijutsu_gate: None,
        valid_ranges: None,
        keywords: &[],
        effect: TechniqueEffect {
            battlefield_tag: Some(AreaTagSpec {
                name: "Hidden Mist",
                duration: 5,
                rank: None,
                power: None,
            }),
            self_tag: Some(AppliedTag {
                name: TAG_DISGUISED,
                chance: 1.0,
                duration: 5,
                power: None,
            }),
            ..TechniqueEffect::NONE
        },
    },
    Technique {
        name: "Paper Bomb Trap",
        rank: Rank::D,
        kind: TechniqueKind::Supplementary,
        element: None,
        effect_kind: Some(EffectKind::Trap),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::Simple,
        chakra_cost: 5,
        stamina_cost: 0,
        base_power: 0,
        taijutsu_gate: None,
        valid_ranges: None,
        keywords: &[],
        effect: TechniqueEffect {
            self_tag: Some(AppliedTag {
                name: TAG_TRAP_SET,
                chance: 1.0,
                duration: 6,
                power: Some(30),
            }),
            consumes_item: Some(ItemKind::PaperBomb),
            ..TechniqueEffect::NONE
        },
    },
    Technique {
        name: "Concealed Explosive",
        rank: Rank::D,
        kind: TechniqueKind::Supplementary,
        element: None,
        effect_kind: Some(EffectKind::Trap),
        delivery: Delivery::Ranged,
        complexity: CastComplexity::Simple,
        chakra_cost: 5,
        stamina_cost: 0,
        base_power: 0,
        taijutsu_gate: None,
        valid_ranges: None,
        keywords: &[],
        effect: TechniqueEffect {
            battlefield_tag: Some(AreaTagSpec {
                name: TAG_HIDDEN_PAPER_BOMB,
                duration: 8,
                rank: None,
                power: Some(30),
            }),
            consumes_item: Some(ItemKind::PaperBomb),
            ..TechniqueEffect::NONE
        },
    },
];
