//! Warfront - turn resolution core for a sector-based strategy game
//!
//! Two subsystems: movement orders resolved across the campaign map
//! (`campaign::movement`), and the round-by-round morale checks of
//! tactical battles (`battle`).

pub mod battle;
pub mod campaign;
pub mod core;
