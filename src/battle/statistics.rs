//! Per-round battle statistics
//!
//! The battle records one `RoundStatistics` per round. Morale checks read
//! them through a `StatisticsSnapshot`, which is cheap to clone and can be
//! shared between worker threads.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::battalion::Side;
use crate::core::types::RoundIndex;

/// Figures for one round, indexed by `Side::index()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundStatistics {
    pub round: RoundIndex,
    pub casualties: [u32; 2],
    /// Battalions that broke this round
    pub broken: [u32; 2],
}

impl RoundStatistics {
    pub fn new(round: RoundIndex) -> Self {
        Self { round, ..Default::default() }
    }

    pub fn with_casualties(mut self, attacker: u32, defender: u32) -> Self {
        self.casualties = [attacker, defender];
        self
    }

    pub fn casualties_of(&self, side: Side) -> u32 {
        self.casualties[side.index()]
    }
}

/// Read-only view of all rounds recorded so far
#[derive(Debug, Clone, Default)]
pub struct StatisticsSnapshot {
    rounds: Arc<BTreeMap<RoundIndex, RoundStatistics>>,
}

impl StatisticsSnapshot {
    pub fn new(rounds: Arc<BTreeMap<RoundIndex, RoundStatistics>>) -> Self {
        Self { rounds }
    }

    pub fn from_rounds(rounds: impl IntoIterator<Item = RoundStatistics>) -> Self {
        let map = rounds.into_iter().map(|r| (r.round, r)).collect();
        Self { rounds: Arc::new(map) }
    }

    pub fn get(&self, round: RoundIndex) -> Option<&RoundStatistics> {
        self.rounds.get(&round)
    }

    /// Casualties of one side over every round up to and including `round`
    pub fn casualties_through(&self, side: Side, round: RoundIndex) -> u64 {
        self.rounds
            .range(..=round)
            .map(|(_, r)| u64::from(r.casualties_of(side)))
            .sum()
    }

    pub fn broken_through(&self, side: Side, round: RoundIndex) -> u32 {
        self.rounds.range(..=round).map(|(_, r)| r.broken[side.index()]).sum()
    }

    pub fn latest_round(&self) -> Option<RoundIndex> {
        self.rounds.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}
