//! Per-kind movement policy
//!
//! The traversal loop in `engine` knows nothing about unit kinds. Every
//! kind-specific decision goes through one of these hooks, so a new kind
//! only needs a new policy.

use rand::RngCore;

use crate::campaign::diplomacy::Diplomacy;
use crate::campaign::map::Sector;
use crate::campaign::store::UnitStore;
use crate::campaign::units::{Domain, MobileUnit, UnitKind};
use crate::campaign::weather::Season;
use crate::core::config::{AttritionConfig, MovementConfig};
use crate::core::error::{Result, WarfrontError};
use crate::core::types::{NationId, UnitId};

/// Circumstances of a single sector crossing that attrition depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarchConditions {
    pub is_winter: bool,
    /// The unit will give battle in this sector this turn
    pub will_battle: bool,
}

pub trait MovementPolicy: Send + Sync {
    fn kind(&self) -> UnitKind;

    /// Land or sea unit
    fn domain(&self) -> Domain;

    /// Resolve the unit an order refers to
    fn mobile_unit(&self, store: &dyn UnitStore, id: UnitId) -> Result<MobileUnit> {
        store
            .find_by_id(self.kind(), id)
            .ok_or(WarfrontError::UnitNotFound { kind: self.kind(), id })
    }

    /// Name used in turn reports
    fn display_name(&self, unit: &MobileUnit) -> String;

    /// Movement points of a free (not embarked) unit
    fn base_allowance(&self, unit: &MobileUnit, config: &MovementConfig) -> u32;

    /// Points available this turn. Embarked units move with their carrier
    /// and have none of their own.
    fn movement_points(&self, unit: &MobileUnit, config: &MovementConfig) -> u32 {
        if unit.is_embarked() {
            return 0;
        }
        self.base_allowance(unit, config)
    }

    /// Points spent to enter a sector
    fn sector_cost(&self, _unit: &MobileUnit, sector: &Sector, season: Season, config: &MovementConfig) -> u32 {
        let cost = sector.terrain.movement_cost();
        if season.is_winter() {
            cost * config.winter_cost_percent / 100
        } else {
            cost
        }
    }

    /// Sectors the unit may convert with one order
    fn max_conquers(&self, unit: &MobileUnit, config: &MovementConfig) -> u32;

    /// How many of those may be neutral sectors
    fn max_neutral_conquers(&self, unit: &MobileUnit, config: &MovementConfig) -> u32;

    /// True when the unit moves with a superior and ignores its own orders
    fn is_bounded(&self, unit: &MobileUnit) -> bool;

    /// Losses suffered while crossing a sector
    fn attrition(
        &self,
        unit: &mut MobileUnit,
        sector: &Sector,
        march: MarchConditions,
        rng: &mut dyn RngCore,
        config: &AttritionConfig,
    );

    /// Damage suffered while crossing a storm sector
    fn cross_storm(&self, unit: &mut MobileUnit, sector: &Sector, rng: &mut dyn RngCore, config: &AttritionConfig);

    /// Whether a unit of `owner` may enter the sector
    fn can_cross(&self, owner: NationId, sector: &Sector, unit: &MobileUnit, diplomacy: &Diplomacy) -> bool;

    fn can_conquer(&self, unit: &MobileUnit) -> bool;

    /// Carrying capacity; zero for units that are not sea transports
    fn calc_power(&self, unit: &MobileUnit) -> u32;

    /// Persist the unit after it moved
    fn update(&self, unit: &mut MobileUnit, store: &mut dyn UnitStore) -> Result<()> {
        unit.stationary_turns = 0;
        store.save(unit.clone())
    }
}
