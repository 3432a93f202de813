//! Tactical battles - battalions, round statistics and morale checks
//!
//! Only the morale side of a battle lives here. Whoever resolves combat
//! feeds the casualties of each round in through `TacticalBattle::record_round`
//! and asks for the morale check of the rounds that have one.

pub mod battalion;
pub mod constants;
pub mod morale;
pub mod statistics;
pub mod tactical;

// Re-exports for convenient access
pub use battalion::{Battalion, Side};
pub use constants::*;
pub use morale::{run_morale_round, MoraleCheck, MoraleState};
pub use statistics::{RoundStatistics, StatisticsSnapshot};
pub use tactical::{MoraleReport, TacticalBattle};
