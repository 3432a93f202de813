//! Spies: reconnaissance agents that slip through any land sector

use rand::RngCore;

use super::policy::{MarchConditions, MovementPolicy};
use crate::campaign::diplomacy::Diplomacy;
use crate::campaign::map::Sector;
use crate::campaign::units::{Domain, MobileUnit, UnitKind};
use crate::core::config::{AttritionConfig, MovementConfig};
use crate::core::types::NationId;

#[derive(Debug, Clone, Copy, Default)]
pub struct SpyPolicy;

impl MovementPolicy for SpyPolicy {
    fn kind(&self) -> UnitKind {
        UnitKind::Spy
    }

    fn domain(&self) -> Domain {
        Domain::Land
    }

    fn display_name(&self, unit: &MobileUnit) -> String {
        format!("Spy ({})", unit.name)
    }

    fn base_allowance(&self, _unit: &MobileUnit, config: &MovementConfig) -> u32 {
        config.spy_points
    }

    fn max_conquers(&self, _unit: &MobileUnit, _config: &MovementConfig) -> u32 {
        0
    }

    fn max_neutral_conquers(&self, _unit: &MobileUnit, _config: &MovementConfig) -> u32 {
        0
    }

    fn is_bounded(&self, _unit: &MobileUnit) -> bool {
        false
    }

    fn attrition(
        &self,
        _unit: &mut MobileUnit,
        _sector: &Sector,
        _march: MarchConditions,
        _rng: &mut dyn RngCore,
        _config: &AttritionConfig,
    ) {
        // Spies do not suffer from attrition
    }

    fn cross_storm(&self, _unit: &mut MobileUnit, _sector: &Sector, _rng: &mut dyn RngCore, _config: &AttritionConfig) {}

    fn can_cross(&self, _owner: NationId, sector: &Sector, _unit: &MobileUnit, _diplomacy: &Diplomacy) -> bool {
        // A spy is a land unit: the coast stops it, ownership and relations never do
        !sector.is_sea()
    }

    fn can_conquer(&self, _unit: &MobileUnit) -> bool {
        false
    }

    fn calc_power(&self, _unit: &MobileUnit) -> u32 {
        0
    }
}
