//! Unit persistence contract
//!
//! The movement core loads the unit it moves and saves it back once; it
//! never retries a failed save, the error goes to the caller. Embarked
//! units saved after their carrier are reported as left behind instead.

use ahash::{AHashMap, AHashSet};

use super::units::{MobileUnit, UnitKind};
use crate::core::error::{Result, WarfrontError};
use crate::core::types::UnitId;

/// Storage of mobile units
pub trait UnitStore {
    /// Look up a unit of the given kind; a unit of another kind is not a match
    fn find_by_id(&self, kind: UnitKind, id: UnitId) -> Option<MobileUnit>;

    /// Persist the unit, replacing any previous record with the same id
    fn save(&mut self, unit: MobileUnit) -> Result<()>;

    /// Units currently embarked on the given carrier
    fn carried_by(&self, carrier: UnitId) -> Vec<MobileUnit>;
}

/// In-memory unit store
#[derive(Debug, Clone, Default)]
pub struct InMemoryUnitStore {
    units: AHashMap<UnitId, MobileUnit>,
    saves: usize,
    failing: bool,
    failing_units: AHashSet<UnitId>,
}

impl InMemoryUnitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, unit: MobileUnit) {
        self.units.insert(unit.id, unit);
    }

    pub fn get(&self, id: UnitId) -> Option<&MobileUnit> {
        self.units.get(&id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Make every following save fail (simulates a storage outage)
    pub fn fail_saves(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Make saves of one unit fail while the others still succeed
    pub fn fail_saves_of(&mut self, id: UnitId) {
        self.failing_units.insert(id);
    }

    pub fn units(&self) -> impl Iterator<Item = &MobileUnit> {
        self.units.values()
    }
}

impl UnitStore for InMemoryUnitStore {
    fn find_by_id(&self, kind: UnitKind, id: UnitId) -> Option<MobileUnit> {
        self.units.get(&id).filter(|u| u.kind == kind).cloned()
    }

    fn save(&mut self, unit: MobileUnit) -> Result<()> {
        if self.failing || self.failing_units.contains(&unit.id) {
            return Err(WarfrontError::Store(format!("cannot persist {}", unit.id)));
        }
        self.units.insert(unit.id, unit);
        self.saves += 1;
        Ok(())
    }

    fn carried_by(&self, carrier: UnitId) -> Vec<MobileUnit> {
        let mut cargo: Vec<_> = self
            .units
            .values()
            .filter(|u| u.carrier == Some(carrier))
            .cloned()
            .collect();
        cargo.sort_by_key(|u| u.id);
        cargo
    }
}
