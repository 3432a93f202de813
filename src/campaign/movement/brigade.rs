//! Infantry and cavalry brigades
//!
//! The only units that conquer ground. Both arms share the rules below and
//! differ in their allowance.

use rand::{Rng, RngCore};

use super::policy::{MarchConditions, MovementPolicy};
use crate::campaign::diplomacy::Diplomacy;
use crate::campaign::map::Sector;
use crate::campaign::units::{Domain, MobileUnit, UnitKind};
use crate::core::config::{AttritionConfig, MovementConfig};
use crate::core::types::NationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arm {
    Infantry,
    Cavalry,
}

#[derive(Debug, Clone, Copy)]
pub struct BrigadePolicy {
    pub arm: Arm,
}

impl BrigadePolicy {
    pub const fn new(arm: Arm) -> Self {
        Self { arm }
    }

    fn strong_enough(&self, unit: &MobileUnit, config: &MovementConfig) -> bool {
        unit.headcount >= config.min_conquest_headcount
    }
}

impl MovementPolicy for BrigadePolicy {
    fn kind(&self) -> UnitKind {
        match self.arm {
            Arm::Infantry => UnitKind::InfantryBrigade,
            Arm::Cavalry => UnitKind::CavalryBrigade,
        }
    }

    fn domain(&self) -> Domain {
        Domain::Land
    }

    fn display_name(&self, unit: &MobileUnit) -> String {
        match self.arm {
            Arm::Infantry => format!("Infantry Brigade ({})", unit.name),
            Arm::Cavalry => format!("Cavalry Brigade ({})", unit.name),
        }
    }

    fn base_allowance(&self, _unit: &MobileUnit, config: &MovementConfig) -> u32 {
        match self.arm {
            Arm::Infantry => config.infantry_points,
            Arm::Cavalry => config.cavalry_points,
        }
    }

    fn max_conquers(&self, unit: &MobileUnit, config: &MovementConfig) -> u32 {
        if self.strong_enough(unit, config) {
            config.brigade_max_conquers
        } else {
            0
        }
    }

    fn max_neutral_conquers(&self, unit: &MobileUnit, config: &MovementConfig) -> u32 {
        if self.strong_enough(unit, config) {
            config.brigade_max_neutral_conquers
        } else {
            0
        }
    }

    /// Brigades attached to a corps march with the corps
    fn is_bounded(&self, unit: &MobileUnit) -> bool {
        unit.superior.is_some()
    }

    fn attrition(
        &self,
        unit: &mut MobileUnit,
        sector: &Sector,
        march: MarchConditions,
        rng: &mut dyn RngCore,
        config: &AttritionConfig,
    ) {
        if rng.gen::<f32>() >= config.chance {
            return;
        }

        let mut loss_pct = config.base_loss_pct;
        if march.is_winter {
            loss_pct += config.winter_loss_pct;
        }
        if march.will_battle {
            loss_pct *= config.imminent_battle_factor;
        }

        let lost = (unit.headcount as f32 * loss_pct / 100.0).ceil() as u32;
        unit.headcount = unit.headcount.saturating_sub(lost);

        tracing::debug!(
            "{} lost {} men to attrition at {} ({:.1}%)",
            unit.name,
            lost,
            sector.coord,
            loss_pct
        );
    }

    fn cross_storm(&self, _unit: &mut MobileUnit, _sector: &Sector, _rng: &mut dyn RngCore, _config: &AttritionConfig) {
        // Land units are never at sea
    }

    /// Neutral land, own and passage-granting nations, and enemies at war
    fn can_cross(&self, owner: NationId, sector: &Sector, _unit: &MobileUnit, diplomacy: &Diplomacy) -> bool {
        if sector.is_sea() {
            return false;
        }
        match sector.owner {
            Some(sector_owner) => {
                diplomacy.grants_passage(owner, sector_owner) || diplomacy.at_war(owner, sector_owner)
            }
            None => true,
        }
    }

    fn can_conquer(&self, _unit: &MobileUnit) -> bool {
        true
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
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const INFANTRY: BrigadePolicy = BrigadePolicy::new(Arm::Infantry);
    const CAVALRY: BrigadePolicy = BrigadePolicy::new(Arm::Cavalry);

    fn brigade(headcount: u32) -> MobileUnit {
        MobileUnit::new(UnitId(2), UnitKind::InfantryBrigade, "1er de Ligne", NationId(1), SectorCoord::new(0, 0))
            .with_headcount(headcount)
    }

    fn sure_attrition() -> AttritionConfig {
        AttritionConfig {
            chance: 1.0,
            base_loss_pct: 1.0,
            winter_loss_pct: 1.0,
            imminent_battle_factor: 2.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_arms_have_own_allowance() {
        let config = MovementConfig::default();
        assert_eq!(INFANTRY.movement_points(&brigade(800), &config), 60);
        assert_eq!(CAVALRY.movement_points(&brigade(800), &config), 80);
        assert_eq!(INFANTRY.kind(), UnitKind::InfantryBrigade);
        assert_eq!(CAVALRY.kind(), UnitKind::CavalryBrigade);
    }

    #[test]
    fn test_conquest_caps_require_strength() {
        let config = MovementConfig::default();
        assert_eq!(INFANTRY.max_conquers(&brigade(800), &config), 2);
        assert_eq!(INFANTRY.max_neutral_conquers(&brigade(800), &config), 1);
        assert_eq!(INFANTRY.max_conquers(&brigade(100), &config), 0);
        assert_eq!(INFANTRY.max_neutral_conquers(&brigade(100), &config), 0);
    }

    #[test]
    fn test_brigade_crossing_rules() {
        let diplomacy = Diplomacy::new()
            .with(NationId(1), NationId(2), Relation::War)
            .with(NationId(1), NationId(3), Relation::Trade)
            .with(NationId(1), NationId(4), Relation::Passage);
        let unit = brigade(800);
        let at = |owner: Option<u32>| {
            let mut s = Sector::new(SectorCoord::new(1, 1), Terrain::Plains);
            s.owner = owner.map(NationId);
            s
        };

        assert!(INFANTRY.can_cross(NationId(1), &at(Some(1)), &unit, &diplomacy));
        assert!(INFANTRY.can_cross(NationId(1), &at(Some(2)), &unit, &diplomacy));
        assert!(!INFANTRY.can_cross(NationId(1), &at(Some(3)), &unit, &diplomacy));
        assert!(INFANTRY.can_cross(NationId(1), &at(Some(4)), &unit, &diplomacy));
        assert!(INFANTRY.can_cross(NationId(1), &at(None), &unit, &diplomacy));

        let sea = Sector::new(SectorCoord::new(2, 2), Terrain::Ocean);
        assert!(!INFANTRY.can_cross(NationId(1), &sea, &unit, &diplomacy));
    }

    #[test]
    fn test_attrition_scales_with_winter_and_battle() {
        let sector = Sector::new(SectorCoord::new(1, 0), Terrain::Plains);
        let config = sure_attrition();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let mut summer = brigade(1000);
        INFANTRY.attrition(&mut summer, &sector, MarchConditions::default(), &mut rng, &config);
        assert_eq!(summer.headcount, 990);

        let mut winter = brigade(1000);
        let march = MarchConditions { is_winter: true, will_battle: false };
        INFANTRY.attrition(&mut winter, &sector, march, &mut rng, &config);
        assert_eq!(winter.headcount, 980);

        let mut to_battle = brigade(1000);
        let march = MarchConditions { is_winter: true, will_battle: true };
        INFANTRY.attrition(&mut to_battle, &sector, march, &mut rng, &config);
        assert_eq!(to_battle.headcount, 960);
    }

    #[test]
    fn test_no_attrition_when_chance_zero() {
        let sector = Sector::new(SectorCoord::new(1, 0), Terrain::Plains);
        let config = AttritionConfig { chance: 0.0, ..sure_attrition() };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut unit = brigade(1000);

        for _ in 0..50 {
            INFANTRY.attrition(&mut unit, &sector, MarchConditions::default(), &mut rng, &config);
        }

        assert_eq!(unit.headcount, 1000);
    }

    #[test]
    fn test_winter_raises_sector_cost() {
        use crate::campaign::weather::Season;
        let config = MovementConfig::default();
        let sector = Sector::new(SectorCoord::new(1, 0), Terrain::Plains);
        assert_eq!(INFANTRY.sector_cost(&brigade(800), &sector, Season::Summer, &config), 8);
        assert_eq!(INFANTRY.sector_cost(&brigade(800), &sector, Season::Winter, &config), 12);
    }
}
