//! Technique catalog - static registry of every usable combat action

pub mod data;
pub mod technique;

pub use data::{BASELINE, CREATE_DISTANCE, DASH, GUARD, STRIKE, SUBSTITUTION, TECHNIQUE_LIBRARY};
pub use technique::{
    AppliedTag, AreaTagSpec, CastComplexity, Delivery, EffectKind, Element, ItemKind, Keyword,
    RangeShift, Rank, Technique, TechniqueEffect, TechniqueKind,
};

use ahash::AHashMap;

/// Name-indexed view over the static technique library
#[derive(Debug, Clone)]
pub struct TechniqueCatalog {
    by_name: AHashMap<&'static str, usize>,
    guard_idx: usize,
}

impl TechniqueCatalog {
    pub fn new() -> Self {
        let by_name: AHashMap<&'static str, usize> = TECHNIQUE_LIBRARY
            .iter()
            .enumerate()
            .map(|(idx, tech)| (tech.name, idx))
            .collect();
        let guard_idx = by_name.get(GUARD).copied().unwrap_or(0);
        Self { by_name, guard_idx }
    }

    pub fn get(&self, name: &str) -> Option<&'static Technique> {
        self.by_name.get(name).map(|idx| &TECHNIQUE_LIBRARY[*idx])
    }

    /// The fallback technique used when a reference fails to resolve
    pub fn guard(&self) -> &'static Technique {
        &TECHNIQUE_LIBRARY[self.guard_idx]
    }

    pub fn all(&self) -> &'static [Technique] {
        TECHNIQUE_LIBRARY
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }
}

impl Default for TechniqueCatalog {
    fn default() -> Self {
        Self::new()
    }
}
