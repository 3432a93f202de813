//! Commanders travelling on their own, without an army to lead

use rand::RngCore;

use super::policy::{MarchConditions, MovementPolicy};
use crate::campaign::diplomacy::Diplomacy;
use crate::campaign::map::Sector;
use crate::campaign::units::{Domain, MobileUnit, UnitKind};
use crate::core::config::{AttritionConfig, MovementConfig};
use crate::core::types::NationId;

#[derive(Debug, Clone, Copy, Default)]
pub struct CommanderPolicy;

impl MovementPolicy for CommanderPolicy {
    fn kind(&self) -> UnitKind {
        UnitKind::Commander
    }

    fn domain(&self) -> Domain {
        Domain::Land
    }

    fn display_name(&self, unit: &MobileUnit) -> String {
        format!("Commander ({})", unit.name)
    }

    fn base_allowance(&self, _unit: &MobileUnit, config: &MovementConfig) -> u32 {
        config.commander_points
    }

    fn max_conquers(&self, _unit: &MobileUnit, _config: &MovementConfig) -> u32 {
        0
    }

    fn max_neutral_conquers(&self, _unit: &MobileUnit, _config: &MovementConfig) -> u32 {
        0
    }

    /// A commander leading a corps or army moves with it
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
    }

    fn cross_storm(&self, _unit: &mut MobileUnit, _sector: &Sector, _rng: &mut dyn RngCore, _config: &AttritionConfig) {}

    /// Anywhere on land except the territory of a nation at war with us
    fn can_cross(&self, owner: NationId, sector: &Sector, _unit: &MobileUnit, diplomacy: &Diplomacy) -> bool {
        if sector.is_sea() {
            return false;
        }
        match sector.owner {
            Some(sector_owner) => !diplomacy.at_war(owner, sector_owner),
            None => true,
        }
    }

    fn can_conquer(&self, _unit: &MobileUnit) -> bool {
        false
    }

    fn calc_power(&self, _unit: &MobileUnit) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::diplomacy::Relation;
    use crate::campaign::map::{SectorCoord, Terrain};
    use crate::core::types::UnitId;

    fn commander() -> MobileUnit {
        MobileUnit::new(UnitId(4), UnitKind::Commander, "Davout", NationId(1), SectorCoord::new(0, 0))
    }

    #[test]
    fn test_commander_avoids_enemy_territory() {
        let diplomacy = Diplomacy::new()
            .with(NationId(1), NationId(2), Relation::War)
            .with(NationId(1), NationId(3), Relation::Trade);
        let enemy = Sector::new(SectorCoord::new(1, 0), Terrain::Plains).with_owner(NationId(2));
        let trader = Sector::new(SectorCoord::new(1, 1), Terrain::Plains).with_owner(NationId(3));
        let wild = Sector::new(SectorCoord::new(0, 1), Terrain::Forest);

        assert!(!CommanderPolicy.can_cross(NationId(1), &enemy, &commander(), &diplomacy));
        assert!(CommanderPolicy.can_cross(NationId(1), &trader, &commander(), &diplomacy));
        assert!(CommanderPolicy.can_cross(NationId(1), &wild, &commander(), &diplomacy));
    }

    #[test]
    fn test_attached_commander_is_bounded() {
        assert!(!CommanderPolicy.is_bounded(&commander()));
        assert!(CommanderPolicy.is_bounded(&commander().attached_to(UnitId(40))));
    }

    #[test]
    fn test_commander_never_conquers() {
        let unit = commander();
        let config = MovementConfig::default();
        assert!(!CommanderPolicy.can_conquer(&unit));
        assert_eq!(CommanderPolicy.max_conquers(&unit, &config), 0);
        assert_eq!(CommanderPolicy.display_name(&unit), "Commander (Davout)");
    }
}
