//! Baggage trains: supply wagons restricted to friendly ground

use rand::RngCore;

use super::policy::{MarchConditions, MovementPolicy};
use crate::campaign::diplomacy::Diplomacy;
use crate::campaign::map::Sector;
use crate::campaign::units::{Domain, MobileUnit, UnitKind};
use crate::core::config::{AttritionConfig, MovementConfig};
use crate::core::types::NationId;

#[derive(Debug, Clone, Copy, Default)]
pub struct BaggageTrainPolicy;

impl MovementPolicy for BaggageTrainPolicy {
    fn kind(&self) -> UnitKind {
        UnitKind::BaggageTrain
    }

    fn domain(&self) -> Domain {
        Domain::Land
    }

    fn display_name(&self, unit: &MobileUnit) -> String {
        format!("Baggage Train ({})", unit.name)
    }

    fn base_allowance(&self, _unit: &MobileUnit, config: &MovementConfig) -> u32 {
        config.baggage_train_points
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
    }

    fn cross_storm(&self, _unit: &mut MobileUnit, _sector: &Sector, _rng: &mut dyn RngCore, _config: &AttritionConfig) {}

    /// Own or allied land only
    fn can_cross(&self, owner: NationId, sector: &Sector, _unit: &MobileUnit, diplomacy: &Diplomacy) -> bool {
        !sector.is_sea()
            && sector
                .owner
                .is_some_and(|sector_owner| diplomacy.is_friendly(owner, sector_owner))
    }

    fn can_conquer(&self, _unit: &MobileUnit) -> bool {
        false
    }

    /// Wagons carry cargo overland without a tonnage limit
    fn calc_power(&self, _unit: &MobileUnit) -> u32 {
        0
    }
}
