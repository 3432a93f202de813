//! Turn-level processing of movement orders
//!
//! Orders are resolved one at a time in submission order. A failing order
//! is reported and the rest of the turn carries on.

use ahash::AHashSet;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use super::diplomacy::Diplomacy;
use super::map::{SectorCoord, SectorProvider};
use super::movement::{resolve_order, ConquestLedger, MarchConditions, MovementOutcome};
use super::orders::MovementOrder;
use super::store::UnitStore;
use super::weather::Season;
use crate::core::config::{config, WarfrontConfig};
use crate::core::error::Result;
use crate::core::types::{OrderId, Turn};

/// Everything an order needs to know about the turn it is resolved in
#[derive(Debug, Clone)]
pub struct TurnContext {
    pub turn: Turn,
    pub season: Season,
    pub diplomacy: Diplomacy,
    pub conquests: ConquestLedger,
    /// Sectors where a battle is expected this turn
    pub battle_sectors: AHashSet<SectorCoord>,
    pub rng: ChaCha8Rng,
    pub config: WarfrontConfig,
}

impl TurnContext {
    /// Same seed and turn always give the same random rolls
    pub fn new(turn: Turn, month: u32, seed: u64) -> Self {
        Self {
            turn,
            season: Season::from_month(month),
            diplomacy: Diplomacy::new(),
            conquests: ConquestLedger::new(),
            battle_sectors: AHashSet::new(),
            rng: ChaCha8Rng::seed_from_u64(seed ^ (u64::from(turn) << 32)),
            config: config().clone(),
        }
    }

    pub fn with_diplomacy(mut self, diplomacy: Diplomacy) -> Self {
        self.diplomacy = diplomacy;
        self
    }

    /// Use a config as is; callers holding an unchecked config should go
    /// through `try_with_config`
    pub fn with_config(mut self, config: WarfrontConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a config after checking it
    pub fn try_with_config(self, config: WarfrontConfig) -> Result<Self> {
        config.validate()?;
        Ok(self.with_config(config))
    }

    pub fn with_battle_at(mut self, coord: SectorCoord) -> Self {
        self.battle_sectors.insert(coord);
        self
    }

    pub fn march_conditions(&self, coord: SectorCoord) -> MarchConditions {
        MarchConditions {
            is_winter: self.season.is_winter(),
            will_battle: self.battle_sectors.contains(&coord),
        }
    }
}

/// Outcome of one order within a turn
#[derive(Debug)]
pub struct OrderReport {
    pub order: OrderId,
    pub result: Result<MovementOutcome>,
}

impl OrderReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Serializable summary of a report, for the turn runner output
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub order: OrderId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MovementOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&OrderReport> for ReportSummary {
    fn from(report: &OrderReport) -> Self {
        match &report.result {
            Ok(outcome) => Self { order: report.order, outcome: Some(outcome.clone()), error: None },
            Err(e) => Self { order: report.order, outcome: None, error: Some(e.to_string()) },
        }
    }
}

/// Resolve every order of the turn, earliest submission first
pub fn process_movement_orders(
    orders: &[MovementOrder],
    store: &mut dyn UnitStore,
    map: &mut dyn SectorProvider,
    turn: &mut TurnContext,
) -> Vec<OrderReport> {
    let mut queue: Vec<&MovementOrder> = orders.iter().collect();
    queue.sort_by_key(|o| o.submitted);

    tracing::info!("Turn {}: resolving {} movement orders", turn.turn, queue.len());

    queue
        .into_iter()
        .map(|order| {
            let result = resolve_order(order, store, map, turn);
            if let Err(e) = &result {
                tracing::warn!("{} rejected: {}", order.id, e);
            }
            OrderReport { order: order.id, result }
        })
        .collect()
}
