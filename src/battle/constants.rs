//! Tactical battle constants - morale round schedule and bonuses
//!
//! Morale is tested three times per battle. Early tests carry a bonus that
//! shrinks as the battle wears on.

use crate::core::types::RoundIndex;

// Rounds on which morale is checked
pub const ROUND_MORALE_1: RoundIndex = 4;
pub const ROUND_MORALE_2: RoundIndex = 7;
pub const ROUND_MORALE_3: RoundIndex = 10;

// Bonus added to the morale score - ADDITIVE
pub const INITIAL_MORALE_BONUS: f64 = 20.0;
pub const MIDDLE_MORALE_BONUS: f64 = 10.0;
pub const LATE_MORALE_BONUS: f64 = 0.0;

/// Last round of a battle; whatever is still standing holds the field
pub const MAX_BATTLE_ROUNDS: RoundIndex = 12;
