//! Per-turn record of conquered sectors
//!
//! Orders resolve in submission order, and the first unit to conquer a
//! sector in a turn holds it: a later unit of another nation passes through
//! without converting it again before the next turn.

use ahash::AHashMap;
use serde::Serialize;

use crate::campaign::map::SectorCoord;
use crate::core::types::{NationId, UnitId};

/// Ownership transfer performed during a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Conquest {
    pub coord: SectorCoord,
    pub previous_owner: Option<NationId>,
}

impl Conquest {
    pub fn was_neutral(&self) -> bool {
        self.previous_owner.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConquestClaim {
    pub nation: NationId,
    pub unit: UnitId,
}

#[derive(Debug, Clone, Default)]
pub struct ConquestLedger {
    claims: AHashMap<SectorCoord, ConquestClaim>,
}

impl ConquestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a sector for a nation; false if another nation got there first
    pub fn claim(&mut self, coord: SectorCoord, nation: NationId, unit: UnitId) -> bool {
        match self.claims.get(&coord) {
            Some(existing) => existing.nation == nation,
            None => {
                self.claims.insert(coord, ConquestClaim { nation, unit });
                true
            }
        }
    }

    /// Whether `claim` would succeed for this nation, without claiming
    pub fn is_open_to(&self, coord: SectorCoord, nation: NationId) -> bool {
        self.claims.get(&coord).map_or(true, |existing| existing.nation == nation)
    }

    pub fn claim_at(&self, coord: &SectorCoord) -> Option<&ConquestClaim> {
        self.claims.get(coord)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Forget all claims at the end of a turn
    pub fn clear(&mut self) {
        self.claims.clear();
    }
}
