//! Tactical battle state between rounds
//!
//! Damage is resolved elsewhere; the battle here keeps the battalions,
//! the round statistics fed to it, and runs the morale checks that fall
//! on each round.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use super::battalion::{Battalion, Side};
use super::constants::MAX_BATTLE_ROUNDS;
use super::morale::{run_morale_round, MoraleCheck, MoraleState};
use super::statistics::{RoundStatistics, StatisticsSnapshot};
use crate::core::config::{config, WarfrontConfig};
use crate::core::types::{BattalionId, RoundIndex};

/// What happened on one round's morale check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoraleReport {
    pub round: RoundIndex,
    pub bonus: f64,
    pub results: Vec<(BattalionId, MoraleState)>,
}

impl MoraleReport {
    pub fn failed(&self) -> impl Iterator<Item = BattalionId> + '_ {
        self.results
            .iter()
            .filter(|(_, state)| *state == MoraleState::Failed)
            .map(|(id, _)| *id)
    }
}

#[derive(Debug, Clone)]
pub struct TacticalBattle {
    battalions: Vec<Battalion>,
    rounds: Arc<BTreeMap<RoundIndex, RoundStatistics>>,
    config: WarfrontConfig,
}

impl TacticalBattle {
    pub fn new(battalions: Vec<Battalion>) -> Self {
        Self::with_config(battalions, config().clone())
    }

    pub fn with_config(battalions: Vec<Battalion>, config: WarfrontConfig) -> Self {
        Self {
            battalions,
            rounds: Arc::new(BTreeMap::new()),
            config,
        }
    }

    pub fn battalions(&self) -> &[Battalion] {
        &self.battalions
    }

    pub fn battalion_mut(&mut self, id: BattalionId) -> Option<&mut Battalion> {
        self.battalions.iter_mut().find(|b| b.id == id)
    }

    /// Battalions of a side still able to fight
    pub fn effective(&self, side: Side) -> impl Iterator<Item = &Battalion> + '_ {
        self.battalions
            .iter()
            .filter(move |b| b.side == side && b.is_effective())
    }

    /// Store the figures of a finished round, replacing any earlier record
    pub fn record_round(&mut self, stats: RoundStatistics) {
        Arc::make_mut(&mut self.rounds).insert(stats.round, stats);
    }

    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot::new(Arc::clone(&self.rounds))
    }

    pub fn morale_check_for(&self, round: RoundIndex) -> Option<MoraleCheck> {
        MoraleCheck::for_round(round)
    }

    /// Run the morale check of `round`, if one is scheduled, and count the
    /// battalions that broke in that round's statistics
    pub fn run_morale(&mut self, round: RoundIndex) -> Option<MoraleReport> {
        let check = self.morale_check_for(round)?;
        let snapshot = self.snapshot();
        let results = run_morale_round(&check, &mut self.battalions, &snapshot, &self.config);
        drop(snapshot);

        let mut broken = [0u32; 2];
        for (id, state) in &results {
            if *state != MoraleState::Failed {
                continue;
            }
            if let Some(b) = self.battalions.iter().find(|b| b.id == *id) {
                broken[b.side.index()] += 1;
            }
        }

        let rounds = Arc::make_mut(&mut self.rounds);
        let entry = rounds.entry(round).or_insert_with(|| RoundStatistics::new(round));
        for side in Side::BOTH {
            entry.broken[side.index()] += broken[side.index()];
        }

        tracing::info!(
            "Round {} morale check (+{}): {} tested, {} attacker and {} defender battalions broke",
            round,
            check.bonus,
            results.len(),
            broken[Side::Attacker.index()],
            broken[Side::Defender.index()]
        );

        Some(MoraleReport { round, bonus: check.bonus, results })
    }

    /// The side left holding the field, once the other has nothing standing
    pub fn victor(&self) -> Option<Side> {
        let attackers = self.effective(Side::Attacker).count();
        let defenders = self.effective(Side::Defender).count();
        match (attackers, defenders) {
            (0, 0) => None,
            (_, 0) => Some(Side::Attacker),
            (0, _) => Some(Side::Defender),
            _ => None,
        }
    }

    /// Over when a side is gone or the last round has been fought
    pub fn is_over(&self, round: RoundIndex) -> bool {
        round >= MAX_BATTLE_ROUNDS
            || self.effective(Side::Attacker).next().is_none()
            || self.effective(Side::Defender).next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::constants::{ROUND_MORALE_1, ROUND_MORALE_2};

    fn battle() -> TacticalBattle {
        TacticalBattle::with_config(
            vec![
                Battalion::new(BattalionId(1), Side::Attacker, 600, 35.0),
                Battalion::new(BattalionId(2), Side::Attacker, 600, 70.0),
                Battalion::new(BattalionId(3), Side::Defender, 600, 25.0),
            ],
            WarfrontConfig::new(),
        )
    }

    #[test]
    fn test_no_check_outside_morale_rounds() {
        let mut battle = battle();
        assert!(battle.run_morale(1).is_none());
        assert!(battle.snapshot().is_empty());
    }

    #[test]
    fn test_broken_battalions_leave_the_line() {
        let mut battle = battle();
        for round in 1..=ROUND_MORALE_1 {
            battle.record_round(RoundStatistics::new(round).with_casualties(10, 10));
        }

        // Even exchange, +20 bonus: only the 25 battalion falls short of 50
        let report = battle.run_morale(ROUND_MORALE_1).unwrap();
        assert_eq!(report.failed().collect::<Vec<_>>(), vec![BattalionId(3)]);
        assert_eq!(battle.effective(Side::Defender).count(), 0);
        assert_eq!(battle.snapshot().get(ROUND_MORALE_1).unwrap().broken, [0, 1]);
        assert_eq!(battle.victor(), Some(Side::Attacker));
        assert!(battle.is_over(ROUND_MORALE_1));
    }

    #[test]
    fn test_broken_battalion_not_tested_again() {
        let mut battle = battle();
        battle.run_morale(ROUND_MORALE_1);

        let report = battle.run_morale(ROUND_MORALE_2).unwrap();
        assert!(report.results.iter().all(|(id, _)| *id != BattalionId(3)));
        // 35 + 10 < 50
        assert_eq!(report.failed().collect::<Vec<_>>(), vec![BattalionId(1)]);
        assert_eq!(battle.effective(Side::Attacker).count(), 1);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_rounds() {
        let mut battle = battle();
        battle.record_round(RoundStatistics::new(1).with_casualties(5, 5));
        let before = battle.snapshot();

        battle.record_round(RoundStatistics::new(2).with_casualties(50, 0));

        assert_eq!(before.len(), 1);
        assert_eq!(battle.snapshot().len(), 2);
    }

    #[test]
    fn test_losses_through_battalion_handle() {
        let mut battle = battle();
        battle.battalion_mut(BattalionId(2)).unwrap().take_losses(600);
        assert_eq!(battle.effective(Side::Attacker).count(), 1);
        assert!(battle.battalion_mut(BattalionId(99)).is_none());
        assert!(!battle.is_over(3));
        assert!(battle.is_over(MAX_BATTLE_ROUNDS));
    }
}
