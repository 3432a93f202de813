//! Morale checks
//!
//! A morale check runs on a fixed round of the battle and tests every
//! battalion still fighting. The score is built from the battalion's own
//! state and the casualties both sides have taken so far; the round's
//! bonus is added and the total compared to the threshold. A battalion
//! that fails is broken for the rest of the battle.

use rayon::prelude::*;
use serde::Serialize;

use super::battalion::Battalion;
use super::constants::{
    INITIAL_MORALE_BONUS, LATE_MORALE_BONUS, MIDDLE_MORALE_BONUS, ROUND_MORALE_1, ROUND_MORALE_2, ROUND_MORALE_3,
};
use super::statistics::StatisticsSnapshot;
use crate::core::config::{MoraleConfig, WarfrontConfig};
use crate::core::types::{BattalionId, RoundIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MoraleState {
    #[default]
    Unresolved,
    Passed,
    Failed,
}

/// Morale test scheduled on a given round
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoraleCheck {
    pub round: RoundIndex,
    pub bonus: f64,
}

impl MoraleCheck {
    pub const fn new(round: RoundIndex, bonus: f64) -> Self {
        Self { round, bonus }
    }

    pub const fn initial() -> Self {
        Self::new(ROUND_MORALE_1, INITIAL_MORALE_BONUS)
    }

    pub const fn middle() -> Self {
        Self::new(ROUND_MORALE_2, MIDDLE_MORALE_BONUS)
    }

    /// No bonus left this late in the battle
    pub const fn late() -> Self {
        Self::new(ROUND_MORALE_3, LATE_MORALE_BONUS)
    }

    /// The check scheduled for `round`, if any
    pub fn for_round(round: RoundIndex) -> Option<Self> {
        [Self::initial(), Self::middle(), Self::late()]
            .into_iter()
            .find(|check| check.round == round)
    }

    /// Score before the round bonus
    pub fn base_score(&self, battalion: &Battalion, stats: &StatisticsSnapshot, config: &MoraleConfig) -> f64 {
        let mut score = battalion.morale + f64::from(battalion.experience) * config.experience_weight;
        score -= battalion.loss_pct() * config.casualty_weight;

        // The side that has bled more is shaken
        let own = stats.casualties_through(battalion.side, self.round) as f64;
        let enemy = stats.casualties_through(battalion.side.enemy(), self.round) as f64;
        if own > enemy {
            score -= (own - enemy) / (own + enemy) * config.side_loss_weight;
        }

        score
    }

    /// Test one battalion. A battalion that already broke stays broken.
    pub fn evaluate(&self, battalion: &mut Battalion, stats: &StatisticsSnapshot, config: &MoraleConfig) -> MoraleState {
        if battalion.failed_morale {
            return MoraleState::Failed;
        }

        let score = self.base_score(battalion, stats, config) + self.bonus;
        if score < config.threshold {
            battalion.mark_failed();
            tracing::debug!(
                "{} failed morale in round {} ({:.1} < {:.1})",
                battalion.id,
                self.round,
                score,
                config.threshold
            );
            MoraleState::Failed
        } else {
            MoraleState::Passed
        }
    }
}

/// Run a morale check over every battalion still fighting.
///
/// Broken battalions are skipped. Each battalion only touches its own
/// record, so large battles are evaluated in parallel.
pub fn run_morale_round(
    check: &MoraleCheck,
    battalions: &mut [Battalion],
    stats: &StatisticsSnapshot,
    config: &WarfrontConfig,
) -> Vec<(BattalionId, MoraleState)> {
    let morale = &config.morale;

    if battalions.len() >= config.parallel_threshold {
        battalions
            .par_iter_mut()
            .filter(|b| !b.failed_morale)
            .map(|b| (b.id, check.evaluate(b, stats, morale)))
            .collect()
    } else {
        battalions
            .iter_mut()
            .filter(|b| !b.failed_morale)
            .map(|b| (b.id, check.evaluate(b, stats, morale)))
            .collect()
    }
}
