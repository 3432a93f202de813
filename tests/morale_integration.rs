//! Battle morale integration tests

use warfront::battle::*;
use warfront::core::types::BattalionId;
use warfront::core::WarfrontConfig;

fn line(side: Side, first_id: u32, morale: &[f64]) -> Vec<Battalion> {
    morale
        .iter()
        .enumerate()
        .map(|(i, &m)| Battalion::new(BattalionId(first_id + i as u32), side, 600, m))
        .collect()
}

#[test]
fn test_bonus_scenario() {
    let config = WarfrontConfig::new();
    let stats = StatisticsSnapshot::default();

    let mut without = vec![Battalion::new(BattalionId(1), Side::Attacker, 500, 40.0)];
    let mut with = without.clone();

    let failed = run_morale_round(&MoraleCheck::new(5, 0.0), &mut without, &stats, &config);
    let passed = run_morale_round(&MoraleCheck::new(5, 15.0), &mut with, &stats, &config);

    assert_eq!(failed, vec![(BattalionId(1), MoraleState::Failed)]);
    assert_eq!(passed, vec![(BattalionId(1), MoraleState::Passed)]);
}

#[test]
fn test_full_battle_morale_schedule() {
    let mut battalions = line(Side::Attacker, 1, &[60.0, 50.0, 35.0]);
    battalions.extend(line(Side::Defender, 10, &[60.0, 60.0]));
    let mut battle = TacticalBattle::with_config(battalions, WarfrontConfig::new());

    let mut checks = Vec::new();
    for round in 1..=MAX_BATTLE_ROUNDS {
        // The attacker is losing the exchange badly
        battle.record_round(RoundStatistics::new(round).with_casualties(90, 10));
        if let Some(report) = battle.run_morale(round) {
            checks.push(report);
        }
        if battle.is_over(round) {
            break;
        }
    }

    let rounds: Vec<_> = checks.iter().map(|c| c.round).collect();
    assert_eq!(rounds, vec![ROUND_MORALE_1, ROUND_MORALE_2, ROUND_MORALE_3]);

    // Side penalty 0.8 * 20 = 16 for the attacker, none for the defender
    assert_eq!(checks[0].failed().collect::<Vec<_>>(), vec![BattalionId(3)]);
    assert_eq!(checks[1].failed().collect::<Vec<_>>(), vec![BattalionId(2)]);
    assert_eq!(checks[2].failed().collect::<Vec<_>>(), vec![BattalionId(1)]);

    // Once broken, never tested again
    assert_eq!(checks[1].results.len(), 4);
    assert_eq!(checks[2].results.len(), 3);

    assert_eq!(battle.victor(), Some(Side::Defender));
    let snapshot = battle.snapshot();
    assert_eq!(snapshot.broken_through(Side::Attacker, MAX_BATTLE_ROUNDS), 3);
    assert_eq!(snapshot.broken_through(Side::Defender, MAX_BATTLE_ROUNDS), 0);
}

#[test]
fn test_large_battle_runs_in_parallel() {
    let config = WarfrontConfig { parallel_threshold: 8, ..WarfrontConfig::new() };
    let morale: Vec<f64> = (0..100).map(|i| 20.0 + f64::from(i)).collect();
    let mut battalions = line(Side::Defender, 1, &morale);
    let stats = StatisticsSnapshot::default();

    let results = run_morale_round(&MoraleCheck::late(), &mut battalions, &stats, &config);

    assert_eq!(results.len(), 100);
    // Below 50 breaks, ids are returned in battalion order
    let failed: Vec<_> = results
        .iter()
        .filter(|(_, s)| *s == MoraleState::Failed)
        .map(|(id, _)| id.0)
        .collect();
    assert_eq!(failed, (1..=30).collect::<Vec<_>>());
    assert_eq!(battalions.iter().filter(|b| b.failed_morale).count(), 30);
}
