//! Campaign layer: the strategic map, its units and their movement orders

pub mod diplomacy;
pub mod map;
pub mod movement;
pub mod orders;
pub mod store;
pub mod turn;
pub mod units;
pub mod weather;

pub use diplomacy::{Diplomacy, Relation};
pub use map::{CampaignMap, Sector, SectorCoord, SectorProvider, Terrain};
pub use orders::{DecodedOrder, MovementOrder};
pub use store::{InMemoryUnitStore, UnitStore};
pub use turn::{process_movement_orders, OrderReport, TurnContext};
pub use units::{Domain, MobileUnit, UnitKind};
pub use weather::Season;
