//! Ships sailing on their own
//!
//! Ships keep to open sea and friendly ports, slow down as they take
//! damage, and risk storm damage on every stormy sector.

use rand::{Rng, RngCore};

use super::policy::{MarchConditions, MovementPolicy};
use crate::campaign::diplomacy::Diplomacy;
use crate::campaign::map::Sector;
use crate::campaign::units::{Domain, MobileUnit, UnitKind};
use crate::campaign::weather::Season;
use crate::core::config::{AttritionConfig, MovementConfig};
use crate::core::types::NationId;

#[derive(Debug, Clone, Copy, Default)]
pub struct ShipPolicy;

impl MovementPolicy for ShipPolicy {
    fn kind(&self) -> UnitKind {
        UnitKind::Ship
    }

    fn domain(&self) -> Domain {
        Domain::Sea
    }

    fn display_name(&self, unit: &MobileUnit) -> String {
        format!("Ship ({})", unit.name)
    }

    /// Allowance scales with the ship's condition
    fn base_allowance(&self, unit: &MobileUnit, config: &MovementConfig) -> u32 {
        config.ship_points * u32::from(unit.condition.min(100)) / 100
    }

    /// Season does not change sailing costs
    fn sector_cost(&self, _unit: &MobileUnit, _sector: &Sector, _season: Season, config: &MovementConfig) -> u32 {
        config.sea_sector_cost
    }

    fn max_conquers(&self, _unit: &MobileUnit, _config: &MovementConfig) -> u32 {
        0
    }

    fn max_neutral_conquers(&self, _unit: &MobileUnit, _config: &MovementConfig) -> u32 {
        0
    }

    /// Ships in a fleet sail with the fleet
    fn is_bounded(&self, unit: &MobileUnit) -> bool {
        unit.superior.is_some()
    }

    fn attrition(
        &self,
        _unit: &mut MobileUnit,
        _sector: &Sector,
        _march: MarchConditions,
        _rng: &mut dyn RngCore,
        _config: &AttritionConfig,
    ) {
        // Losses at sea come from storms only
    }

    fn cross_storm(&self, unit: &mut MobileUnit, sector: &Sector, rng: &mut dyn RngCore, config: &AttritionConfig) {
        if rng.gen::<f32>() >= config.storm_damage_chance {
            return;
        }

        // Bounds may come from an unvalidated config
        let (low, high) = (config.storm_damage_min, config.storm_damage_max);
        let damage = rng.gen_range(low.min(high)..=low.max(high));
        unit.condition = unit.condition.saturating_sub(damage);

        tracing::debug!(
            "{} damaged by storm at {}: -{} condition, now {}%",
            unit.name,
            sector.coord,
            damage,
            unit.condition
        );
    }

    /// Open sea, or a port of our own or of an ally
    fn can_cross(&self, owner: NationId, sector: &Sector, _unit: &MobileUnit, diplomacy: &Diplomacy) -> bool {
        if sector.is_sea() {
            return true;
        }
        sector.has_port
            && sector
                .owner
                .is_some_and(|sector_owner| diplomacy.is_friendly(owner, sector_owner))
    }

    fn can_conquer(&self, _unit: &MobileUnit) -> bool {
        false
    }

    /// Cargo capacity, reduced by hull damage
    fn calc_power(&self, unit: &MobileUnit) -> u32 {
        unit.tonnage * u32::from(unit.condition.min(100)) / 100
    }
}
