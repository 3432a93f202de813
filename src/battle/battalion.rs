//! Battalions engaged in a tactical battle

use serde::{Deserialize, Serialize};

use crate::core::types::BattalionId;

/// Side of a tactical battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Attacker, Side::Defender];

    /// Index into per-side arrays
    pub fn index(&self) -> usize {
        match self {
            Side::Attacker => 0,
            Side::Defender => 1,
        }
    }

    pub fn enemy(&self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battalion {
    pub id: BattalionId,
    pub side: Side,
    pub headcount: u32,
    pub initial_headcount: u32,
    /// Base morale rating
    pub morale: f64,
    /// Experience level, each level adds to the morale score
    pub experience: u8,
    /// Set once the battalion breaks; never cleared during the battle
    pub failed_morale: bool,
}

impl Battalion {
    pub fn new(id: BattalionId, side: Side, headcount: u32, morale: f64) -> Self {
        Self {
            id,
            side,
            headcount,
            initial_headcount: headcount,
            morale,
            experience: 0,
            failed_morale: false,
        }
    }

    pub fn with_experience(mut self, experience: u8) -> Self {
        self.experience = experience;
        self
    }

    /// Lose men in combat
    pub fn take_losses(&mut self, lost: u32) -> u32 {
        let lost = lost.min(self.headcount);
        self.headcount -= lost;
        lost
    }

    /// Percentage of the starting strength lost so far
    pub fn loss_pct(&self) -> f64 {
        if self.initial_headcount == 0 {
            return 0.0;
        }
        let lost = self.initial_headcount.saturating_sub(self.headcount);
        f64::from(lost) * 100.0 / f64::from(self.initial_headcount)
    }

    /// Still fighting: has men and has not broken
    pub fn is_effective(&self) -> bool {
        !self.failed_morale && self.headcount > 0
    }

    pub fn mark_failed(&mut self) {
        self.failed_morale = true;
    }
}
