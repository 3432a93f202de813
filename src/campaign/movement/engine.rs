//! Kind-agnostic traversal of a movement order
//!
//! The loop below never looks at a unit's kind. Costs, permissions,
//! attrition, storms and conquest caps all come from the unit's policy.

use serde::Serialize;

use super::conquest::Conquest;
use super::policy::MovementPolicy;
use crate::campaign::map::{SectorCoord, SectorProvider};
use crate::campaign::orders::{DecodedOrder, MovementOrder};
use crate::campaign::store::UnitStore;
use crate::campaign::turn::TurnContext;
use crate::campaign::units::MobileUnit;
use crate::core::error::{Result, WarfrontError};
use crate::core::types::{OrderId, UnitId};

/// Why traversal stopped. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Halt {
    /// Every sector of the path was entered (or the path was empty)
    Completed,
    /// Not enough points left to enter `at`
    InsufficientPoints { at: SectorCoord },
    /// The policy forbids entering `at`; the rest of the path is dropped
    IllegalCrossing { at: SectorCoord },
    /// The unit moves with its superior, not on its own orders
    Bounded,
    /// A transport carrying more than its capacity cannot sail
    Overloaded { load: u32, capacity: u32 },
}

/// Result of resolving one movement order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementOutcome {
    pub order: OrderId,
    pub unit: UnitId,
    pub name: String,
    pub start: SectorCoord,
    pub position: SectorCoord,
    /// Sectors actually entered, in order
    pub path: Vec<SectorCoord>,
    pub starting_points: u32,
    pub remaining_points: u32,
    pub conquests: Vec<Conquest>,
    pub halt: Halt,
    /// Transport capacity; zero for units that are not sea transports
    pub tonnage: u32,
    /// Whether the policy's update hook ran
    pub updated: bool,
    /// Embarked units carried along to the new position
    pub cargo: Vec<UnitId>,
    /// Embarked units whose save failed; they stay where the carrier started
    pub cargo_left_behind: Vec<UnitId>,
}

impl MovementOutcome {
    fn new(order: OrderId, unit: &MobileUnit, name: String, points: u32, tonnage: u32) -> Self {
        Self {
            order,
            unit: unit.id,
            name,
            start: unit.position,
            position: unit.position,
            path: Vec::new(),
            starting_points: points,
            remaining_points: points,
            conquests: Vec::new(),
            halt: Halt::Completed,
            tonnage,
            updated: false,
            cargo: Vec::new(),
            cargo_left_behind: Vec::new(),
        }
    }

    pub fn moved(&self) -> bool {
        !self.path.is_empty()
    }

    /// True when the path was cut short by a forbidden sector
    pub fn is_truncated(&self) -> bool {
        matches!(self.halt, Halt::IllegalCrossing { .. })
    }
}

/// Decode and resolve a raw order
pub fn resolve_order(
    order: &MovementOrder,
    store: &mut dyn UnitStore,
    map: &mut dyn SectorProvider,
    turn: &mut TurnContext,
) -> Result<MovementOutcome> {
    let decoded = order.decode()?;
    resolve(&decoded, store, map, turn)
}

/// Resolve a decoded order: move the unit as far along its path as its
/// policy allows, then persist it
pub fn resolve(
    order: &DecodedOrder,
    store: &mut dyn UnitStore,
    map: &mut dyn SectorProvider,
    turn: &mut TurnContext,
) -> Result<MovementOutcome> {
    let policy = order.kind.policy();
    let mut unit = policy.mobile_unit(store, order.unit_id)?;
    check_contiguous(order, &unit)?;

    let points = policy.movement_points(&unit, &turn.config.movement);
    let tonnage = policy.calc_power(&unit);
    let mut outcome = MovementOutcome::new(order.order, &unit, policy.display_name(&unit), points, tonnage);

    if order.path.is_empty() {
        return Ok(outcome);
    }

    if policy.is_bounded(&unit) {
        outcome.halt = Halt::Bounded;
        return Ok(outcome);
    }

    if tonnage > 0 {
        let load: u32 = store.carried_by(unit.id).iter().map(|c| c.tonnage).sum();
        if load > tonnage {
            outcome.halt = Halt::Overloaded { load, capacity: tonnage };
            return Ok(outcome);
        }
    }

    traverse(policy, order, &mut unit, map, turn, &mut outcome);

    if !outcome.moved() {
        return Ok(outcome);
    }

    // Nothing outside the unit changes until the unit itself is persisted
    policy.update(&mut unit, store)?;
    outcome.updated = true;
    commit_conquests(&unit, map, turn, &mut outcome);
    move_cargo(&unit, store, &mut outcome);

    tracing::info!(
        "{} moved {} -> {} ({} sectors, {} points left, {} conquered, {:?})",
        outcome.name,
        outcome.start,
        outcome.position,
        outcome.path.len(),
        outcome.remaining_points,
        outcome.conquests.len(),
        outcome.halt
    );

    Ok(outcome)
}

/// Each step must go to a neighbouring sector, starting next to the unit
fn check_contiguous(order: &DecodedOrder, unit: &MobileUnit) -> Result<()> {
    let mut previous = unit.position;
    for &hop in &order.path {
        if !previous.is_adjacent(&hop) {
            return Err(WarfrontError::MalformedOrder(format!(
                "{}: {} is not adjacent to {}",
                order.order, hop, previous
            )));
        }
        previous = hop;
    }
    Ok(())
}

fn traverse(
    policy: &dyn MovementPolicy,
    order: &DecodedOrder,
    unit: &mut MobileUnit,
    map: &mut dyn SectorProvider,
    turn: &mut TurnContext,
    outcome: &mut MovementOutcome,
) {
    let max_conquers = policy.max_conquers(unit, &turn.config.movement) as usize;
    let max_neutral = policy.max_neutral_conquers(unit, &turn.config.movement) as usize;
    let can_conquer = policy.can_conquer(unit);
    let mut neutral_conquered = 0;

    for &next in &order.path {
        let Some(sector) = map.sector_at(next).cloned() else {
            outcome.halt = Halt::IllegalCrossing { at: next };
            break;
        };

        if !policy.can_cross(unit.owner, &sector, unit, &turn.diplomacy) {
            outcome.halt = Halt::IllegalCrossing { at: next };
            break;
        }

        let cost = policy.sector_cost(unit, &sector, turn.season, &turn.config.movement);
        if cost > outcome.remaining_points {
            outcome.halt = Halt::InsufficientPoints { at: next };
            break;
        }

        outcome.remaining_points -= cost;
        unit.position = next;
        outcome.position = next;
        outcome.path.push(next);

        let march = turn.march_conditions(next);
        policy.attrition(unit, &sector, march, &mut turn.rng, &turn.config.attrition);
        if sector.storm {
            policy.cross_storm(unit, &sector, &mut turn.rng, &turn.config.attrition);
        }

        tracing::debug!(
            "{} entered {} for {} points ({} left)",
            outcome.name,
            next,
            cost,
            outcome.remaining_points
        );

        if !can_conquer || !sector.conquerable || sector.is_owned_by(unit.owner) {
            continue;
        }
        if outcome.conquests.len() >= max_conquers {
            continue;
        }

        let hostile = match sector.owner {
            Some(owner) => turn.diplomacy.at_war(unit.owner, owner),
            None => neutral_conquered < max_neutral,
        };
        let pending = outcome.conquests.iter().any(|c| c.coord == next);
        if !hostile || pending || !turn.conquests.is_open_to(next, unit.owner) {
            continue;
        }

        if sector.is_neutral() {
            neutral_conquered += 1;
        }
        outcome.conquests.push(Conquest { coord: next, previous_owner: sector.owner });
    }
}

/// Hand the sectors taken on the way to the unit's nation
fn commit_conquests(
    unit: &MobileUnit,
    map: &mut dyn SectorProvider,
    turn: &mut TurnContext,
    outcome: &mut MovementOutcome,
) {
    outcome
        .conquests
        .retain(|c| turn.conquests.claim(c.coord, unit.owner, unit.id));
    for conquest in &outcome.conquests {
        map.set_owner(conquest.coord, unit.owner);
        tracing::info!("{} conquered {} for {}", outcome.name, conquest.coord, unit.owner);
    }
}

/// Embarked units follow their carrier to its new position.
///
/// The carrier is already saved at this point, so a cargo save failure does
/// not undo the move: the unit is reported as left behind instead.
fn move_cargo(carrier: &MobileUnit, store: &mut dyn UnitStore, outcome: &mut MovementOutcome) {
    for mut cargo in store.carried_by(carrier.id) {
        let id = cargo.id;
        cargo.position = carrier.position;
        match store.save(cargo) {
            Ok(()) => outcome.cargo.push(id),
            Err(e) => {
                tracing::warn!("{} left behind at {}: {}", id, outcome.start, e);
                outcome.cargo_left_behind.push(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::diplomacy::{Diplomacy, Relation};
    use crate::campaign::map::{CampaignMap, Sector, Terrain};
    use crate::campaign::store::InMemoryUnitStore;
    use crate::campaign::units::UnitKind;
    use crate::core::config::WarfrontConfig;
    use crate::core::types::NationId;

    const FRANCE: NationId = NationId(1);
    const AUSTRIA: NationId = NationId(2);

    fn quiet_config() -> WarfrontConfig {
        let mut config = WarfrontConfig::new();
        config.attrition.chance = 0.0;
        config.attrition.storm_damage_chance = 0.0;
        config
    }

    fn turn() -> TurnContext {
        TurnContext::new(1, 6, 42).with_config(quiet_config())
    }

    fn order(kind: UnitKind, unit: u32, path: &[(i32, i32)]) -> DecodedOrder {
        DecodedOrder {
            order: OrderId(1),
            kind,
            unit_id: UnitId(unit),
            path: path.iter().map(|&(x, y)| SectorCoord::new(x, y)).collect(),
        }
    }

    fn spy_at(x: i32, y: i32) -> MobileUnit {
        MobileUnit::new(UnitId(1), UnitKind::Spy, "Fouché", FRANCE, SectorCoord::new(x, y))
    }

    #[test]
    fn test_three_mountain_sectors_leave_twenty_points() {
        let mut map = CampaignMap::new(5, 5, Terrain::Mountains);
        let mut store = InMemoryUnitStore::new();
        let mut unit = spy_at(0, 0);
        unit.stationary_turns = 4;
        store.insert(unit);

        let outcome = resolve(
            &order(UnitKind::Spy, 1, &[(1, 0), (2, 0), (3, 0)]),
            &mut store,
            &mut map,
            &mut turn(),
        )
        .unwrap();

        assert_eq!(outcome.starting_points, 80);
        assert_eq!(outcome.remaining_points, 20);
        assert_eq!(outcome.position, SectorCoord::new(3, 0));
        assert_eq!(outcome.halt, Halt::Completed);
        assert!(outcome.updated);
        assert_eq!(store.save_count(), 1);
        let saved = store.get(UnitId(1)).unwrap();
        assert_eq!(saved.stationary_turns, 0);
        assert_eq!(saved.position, SectorCoord::new(3, 0));
    }

    #[test]
    fn test_forbidden_second_hop_truncates() {
        let mut map = CampaignMap::new(5, 5, Terrain::Plains);
        map.set(Sector::new(SectorCoord::new(2, 0), Terrain::Ocean));
        let mut store = InMemoryUnitStore::new();
        store.insert(spy_at(0, 0));

        let outcome = resolve(
            &order(UnitKind::Spy, 1, &[(1, 0), (2, 0), (3, 0)]),
            &mut store,
            &mut map,
            &mut turn(),
        )
        .unwrap();

        assert_eq!(outcome.path, vec![SectorCoord::new(1, 0)]);
        assert_eq!(outcome.halt, Halt::IllegalCrossing { at: SectorCoord::new(2, 0) });
        assert!(outcome.is_truncated());
        assert_eq!(outcome.remaining_points, 72);
    }

    #[test]
    fn test_empty_path_leaves_unit_untouched() {
        let mut map = CampaignMap::new(3, 3, Terrain::Plains);
        let mut store = InMemoryUnitStore::new();
        let mut unit = spy_at(1, 1);
        unit.stationary_turns = 3;
        store.insert(unit.clone());

        let outcome = resolve(&order(UnitKind::Spy, 1, &[]), &mut store, &mut map, &mut turn()).unwrap();

        assert!(!outcome.moved());
        assert!(!outcome.updated);
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.get(UnitId(1)), Some(&unit));
    }

    #[test]
    fn test_unknown_unit() {
        let mut map = CampaignMap::new(3, 3, Terrain::Plains);
        let mut store = InMemoryUnitStore::new();
        store.insert(spy_at(0, 0));

        let result = resolve(&order(UnitKind::Ship, 1, &[(1, 0)]), &mut store, &mut map, &mut turn());

        assert!(matches!(
            result,
            Err(WarfrontError::UnitNotFound { kind: UnitKind::Ship, id: UnitId(1) })
        ));
    }

    #[test]
    fn test_gap_in_path_is_malformed() {
        let mut map = CampaignMap::new(5, 5, Terrain::Plains);
        let mut store = InMemoryUnitStore::new();
        store.insert(spy_at(0, 0));

        let result = resolve(&order(UnitKind::Spy, 1, &[(1, 0), (3, 0)]), &mut store, &mut map, &mut turn());

        assert!(matches!(result, Err(WarfrontError::MalformedOrder(_))));
        assert_eq!(store.get(UnitId(1)).unwrap().position, SectorCoord::new(0, 0));
    }

    #[test]
    fn test_runs_out_of_points() {
        let mut map = CampaignMap::new(6, 1, Terrain::Mountains);
        let mut store = InMemoryUnitStore::new();
        store.insert(spy_at(0, 0));

        let outcome = resolve(
            &order(UnitKind::Spy, 1, &[(1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]),
            &mut store,
            &mut map,
            &mut turn(),
        )
        .unwrap();

        assert_eq!(outcome.path.len(), 4);
        assert_eq!(outcome.remaining_points, 0);
        assert_eq!(outcome.halt, Halt::InsufficientPoints { at: SectorCoord::new(5, 0) });
    }

    #[test]
    fn test_embarked_unit_cannot_move_alone() {
        let mut map = CampaignMap::new(3, 3, Terrain::Plains);
        let mut store = InMemoryUnitStore::new();
        store.insert(spy_at(0, 0).embarked_on(UnitId(9)));

        let outcome = resolve(&order(UnitKind::Spy, 1, &[(1, 0)]), &mut store, &mut map, &mut turn()).unwrap();

        assert_eq!(outcome.starting_points, 0);
        assert!(!outcome.moved());
        assert_eq!(outcome.halt, Halt::InsufficientPoints { at: SectorCoord::new(1, 0) });
    }

    #[test]
    fn test_brigade_conquers_up_to_caps() {
        let mut map = CampaignMap::new(6, 1, Terrain::Plains);
        map.set_owner(SectorCoord::new(2, 0), AUSTRIA);
        map.set_owner(SectorCoord::new(3, 0), AUSTRIA);
        let mut store = InMemoryUnitStore::new();
        store.insert(MobileUnit::new(UnitId(5), UnitKind::CavalryBrigade, "Chasseurs", FRANCE, SectorCoord::new(0, 0)));
        let mut turn = turn().with_diplomacy(Diplomacy::new().with(FRANCE, AUSTRIA, Relation::War));

        let outcome = resolve(
            &order(UnitKind::CavalryBrigade, 5, &[(1, 0), (2, 0), (3, 0), (4, 0)]),
            &mut store,
            &mut map,
            &mut turn,
        )
        .unwrap();

        // Neutral (1,0), then enemy (2,0); cap of two reached before (3,0)
        assert_eq!(outcome.conquests.len(), 2);
        assert!(outcome.conquests[0].was_neutral());
        assert_eq!(outcome.conquests[1].previous_owner, Some(AUSTRIA));
        assert!(map.get(&SectorCoord::new(1, 0)).unwrap().is_owned_by(FRANCE));
        assert!(map.get(&SectorCoord::new(2, 0)).unwrap().is_owned_by(FRANCE));
        assert!(map.get(&SectorCoord::new(3, 0)).unwrap().is_owned_by(AUSTRIA));
        assert!(map.get(&SectorCoord::new(4, 0)).unwrap().is_neutral());
        assert_eq!(turn.conquests.len(), 2);
    }

    #[test]
    fn test_bounded_brigade_ignores_order() {
        let mut map = CampaignMap::new(3, 3, Terrain::Plains);
        let mut store = InMemoryUnitStore::new();
        store.insert(
            MobileUnit::new(UnitId(5), UnitKind::InfantryBrigade, "Grenadiers", FRANCE, SectorCoord::new(0, 0))
                .attached_to(UnitId(100)),
        );

        let outcome = resolve(&order(UnitKind::InfantryBrigade, 5, &[(1, 0)]), &mut store, &mut map, &mut turn()).unwrap();

        assert_eq!(outcome.halt, Halt::Bounded);
        assert!(!outcome.moved());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_ship_carries_cargo() {
        let mut map = CampaignMap::new(4, 1, Terrain::Ocean);
        let mut store = InMemoryUnitStore::new();
        store.insert(MobileUnit::new(UnitId(20), UnitKind::Ship, "Orient", FRANCE, SectorCoord::new(0, 0)).with_tonnage(400));
        store.insert(spy_at(0, 0).embarked_on(UnitId(20)).with_tonnage(10));

        let outcome = resolve(&order(UnitKind::Ship, 20, &[(1, 0), (2, 0)]), &mut store, &mut map, &mut turn()).unwrap();

        assert_eq!(outcome.tonnage, 400);
        assert_eq!(outcome.remaining_points, 80);
        assert_eq!(outcome.cargo, vec![UnitId(1)]);
        assert_eq!(store.get(UnitId(1)).unwrap().position, SectorCoord::new(2, 0));
    }

    #[test]
    fn test_overloaded_ship_stays() {
        let mut map = CampaignMap::new(4, 1, Terrain::Ocean);
        let mut store = InMemoryUnitStore::new();
        store.insert(MobileUnit::new(UnitId(20), UnitKind::Ship, "Orient", FRANCE, SectorCoord::new(0, 0)).with_tonnage(100));
        store.insert(spy_at(0, 0).embarked_on(UnitId(20)).with_tonnage(150));

        let outcome = resolve(&order(UnitKind::Ship, 20, &[(1, 0)]), &mut store, &mut map, &mut turn()).unwrap();

        assert_eq!(outcome.halt, Halt::Overloaded { load: 150, capacity: 100 });
        assert!(!outcome.moved());
    }

    #[test]
    fn test_save_failure_is_surfaced() {
        let mut map = CampaignMap::new(3, 3, Terrain::Plains);
        let mut store = InMemoryUnitStore::new();
        store.insert(spy_at(0, 0));
        store.fail_saves(true);

        let result = resolve(&order(UnitKind::Spy, 1, &[(1, 0)]), &mut store, &mut map, &mut turn());

        assert!(matches!(result, Err(WarfrontError::Store(_))));
    }
    #[test]
    fn test_failed_save_keeps_conquests_unapplied() {
        let mut map = CampaignMap::new(3, 1, Terrain::Plains);
        map.set_owner(SectorCoord::new(2, 0), AUSTRIA);
        let mut store = InMemoryUnitStore::new();
        store.insert(MobileUnit::new(UnitId(5), UnitKind::CavalryBrigade, "Chasseurs", FRANCE, SectorCoord::new(0, 0)));
        store.fail_saves(true);
        let mut turn = turn().with_diplomacy(Diplomacy::new().with(FRANCE, AUSTRIA, Relation::War));

        let result = resolve(
            &order(UnitKind::CavalryBrigade, 5, &[(1, 0), (2, 0)]),
            &mut store,
            &mut map,
            &mut turn,
        );

        assert!(matches!(result, Err(WarfrontError::Store(_))));
        assert!(map.get(&SectorCoord::new(1, 0)).unwrap().is_neutral());
        assert!(map.get(&SectorCoord::new(2, 0)).unwrap().is_owned_by(AUSTRIA));
        assert!(turn.conquests.is_empty());
        assert_eq!(store.get(UnitId(5)).unwrap().position, SectorCoord::new(0, 0));
    }

    #[test]
    fn test_cargo_save_failure_leaves_cargo_behind() {
        let mut map = CampaignMap::new(4, 1, Terrain::Ocean);
        let mut store = InMemoryUnitStore::new();
        store.insert(MobileUnit::new(UnitId(20), UnitKind::Ship, "Orient", FRANCE, SectorCoord::new(0, 0)).with_tonnage(400));
        store.insert(spy_at(0, 0).embarked_on(UnitId(20)).with_tonnage(10));
        store.insert(
            MobileUnit::new(UnitId(2), UnitKind::BaggageTrain, "Train", FRANCE, SectorCoord::new(0, 0))
                .embarked_on(UnitId(20))
                .with_tonnage(50),
        );
        store.fail_saves_of(UnitId(2));

        let outcome = resolve(&order(UnitKind::Ship, 20, &[(1, 0)]), &mut store, &mut map, &mut turn()).unwrap();

        assert!(outcome.updated);
        assert_eq!(outcome.cargo, vec![UnitId(1)]);
        assert_eq!(outcome.cargo_left_behind, vec![UnitId(2)]);
        assert_eq!(store.get(UnitId(20)).unwrap().position, SectorCoord::new(1, 0));
        assert_eq!(store.get(UnitId(1)).unwrap().position, SectorCoord::new(1, 0));
        assert_eq!(store.get(UnitId(2)).unwrap().position, SectorCoord::new(0, 0));
    }

    #[test]
    fn test_path_at_coordinate_extremes_is_malformed() {
        let mut map = CampaignMap::new(3, 3, Terrain::Plains);
        let mut store = InMemoryUnitStore::new();
        store.insert(spy_at(i32::MAX, 0));

        let far = MovementOrder::new(1, UnitKind::Spy, UnitId(1), &[SectorCoord::new(i32::MIN, 0)]);
        let result = resolve_order(&far, &mut store, &mut map, &mut turn());
        assert!(matches!(result, Err(WarfrontError::MalformedOrder(_))));

        let mut raw = MovementOrder::new(2, UnitKind::Spy, UnitId(1), &[]);
        raw.path_param = "-2147483648:-2147483648".to_string();
        let result = resolve_order(&raw, &mut store, &mut map, &mut turn());
        assert!(matches!(result, Err(WarfrontError::MalformedOrder(_))));
        assert_eq!(store.get(UnitId(1)).unwrap().position, SectorCoord::new(i32::MAX, 0));
    }
}
