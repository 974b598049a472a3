//! Shared battlefield state - range band and area tags

use serde::{Deserialize, Serialize};

use crate::catalog::technique::RangeShift;
use crate::model::tags::AreaTag;

/// Abstract distance between the combatants.
///
/// Ordering follows distance: Engaged < Short < Mid < Long.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum RangeBand {
    Engaged = 0,
    Short = 1,
    Mid = 2,
    Long = 3,
}

impl RangeBand {
    pub fn closer(self) -> Self {
        match self {
            RangeBand::Long => RangeBand::Mid,
            RangeBand::Mid => RangeBand::Short,
            RangeBand::Short | RangeBand::Engaged => RangeBand::Engaged,
        }
    }

    pub fn farther(self) -> Self {
        match self {
            RangeBand::Engaged => RangeBand::Short,
            RangeBand::Short => RangeBand::Mid,
            RangeBand::Mid | RangeBand::Long => RangeBand::Long,
        }
    }

    pub fn apply_shift(self, shift: RangeShift) -> Self {
        match shift {
            RangeShift::Closer(steps) => (0..steps).fold(self, |band, _| band.closer()),
            RangeShift::Farther(steps) => (0..steps).fold(self, |band, _| band.farther()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RangeBand::Engaged => "Engaged",
            RangeBand::Short => "Short",
            RangeBand::Mid => "Mid",
            RangeBand::Long => "Long",
        }
    }
}

/// Battlefield state visible to every combatant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Battlefield {
    pub range: RangeBand,
    pub area_tags: Vec<AreaTag>,
}

impl Battlefield {
    /// Combat opens at long range with a clean field
    pub fn new() -> Self {
        Self {
            range: RangeBand::Long,
            area_tags: Vec::new(),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.area_tags.iter().any(|tag| tag.name == name)
    }

    pub fn find(&self, name: &str) -> Option<&AreaTag> {
        self.area_tags.iter().find(|tag| tag.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut AreaTag> {
        self.area_tags.iter_mut().find(|tag| tag.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<AreaTag> {
        let idx = self.area_tags.iter().position(|tag| tag.name == name)?;
        Some(self.area_tags.remove(idx))
    }

    /// Apply an area tag. Duplicate names are ignored, except that
    /// owner-keyed tags may coexist one per owner.
    pub fn apply_tag(&mut self, tag: AreaTag) -> bool {
        let duplicate = self
            .area_tags
            .iter()
            .any(|existing| existing.name == tag.name && existing.owner == tag.owner);
        if duplicate {
            return false;
        }
        self.area_tags.push(tag);
        true
    }

    /// Decrement all durations, removing and returning tags that expired
    pub fn decay(&mut self) -> Vec<AreaTag> {
        let mut expired = Vec::new();
        let mut kept = Vec::with_capacity(self.area_tags.len());
        for mut tag in self.area_tags.drain(..) {
            tag.remaining = tag.remaining.saturating_sub(1);
            if tag.remaining == 0 {
                expired.push(tag);
            } else {
                kept.push(tag);
            }
        }
        self.area_tags = kept;
        expired
    }

    /// The active barrier tag, if a ranked Wall/Dome is standing
    pub fn active_barrier(&self) -> Option<&AreaTag> {
        self.area_tags.iter().find(|tag| tag.is_barrier())
    }
}

impl Default for Battlefield {
    fn default() -> Self {
        Self::new()
    }
}
