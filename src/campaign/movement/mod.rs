//! Movement resolution - one order, one unit, one pass over its path
//!
//! Unit kinds plug in through `MovementPolicy`; `engine` runs the same
//! traversal for all of them.

pub mod baggage;
pub mod brigade;
pub mod commander;
pub mod conquest;
pub mod engine;
pub mod policy;
pub mod ship;
pub mod spy;

pub use baggage::BaggageTrainPolicy;
pub use brigade::{Arm, BrigadePolicy};
pub use commander::CommanderPolicy;
pub use conquest::{Conquest, ConquestLedger};
pub use engine::{resolve, resolve_order, Halt, MovementOutcome};
pub use policy::{MarchConditions, MovementPolicy};
pub use ship::ShipPolicy;
pub use spy::SpyPolicy;

use crate::campaign::units::UnitKind;

static INFANTRY_BRIGADE: BrigadePolicy = BrigadePolicy::new(Arm::Infantry);
static CAVALRY_BRIGADE: BrigadePolicy = BrigadePolicy::new(Arm::Cavalry);

impl UnitKind {
    /// Movement policy for this kind of unit
    pub fn policy(&self) -> &'static dyn MovementPolicy {
        match self {
            UnitKind::Spy => &SpyPolicy,
            UnitKind::Commander => &CommanderPolicy,
            UnitKind::BaggageTrain => &BaggageTrainPolicy,
            UnitKind::InfantryBrigade => &INFANTRY_BRIGADE,
            UnitKind::CavalryBrigade => &CAVALRY_BRIGADE,
            UnitKind::Ship => &ShipPolicy,
        }
    }
}
