//! Headless Turn Runner
//!
//! Resolves one turn of movement orders and, optionally, the morale checks
//! of a tactical battle, then prints what happened.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use warfront::battle::{
    Battalion, MoraleReport, RoundStatistics, Side, TacticalBattle, MAX_BATTLE_ROUNDS,
};
use warfront::campaign::diplomacy::Treaty;
use warfront::campaign::turn::ReportSummary;
use warfront::campaign::weather::{mark_storms, roll_storms};
use warfront::campaign::{
    process_movement_orders, CampaignMap, Diplomacy, InMemoryUnitStore, MobileUnit, MovementOrder, Relation,
    Sector, SectorCoord, Terrain, TurnContext, UnitKind,
};
use warfront::core::types::{BattalionId, NationId, Turn, UnitId};
use warfront::core::{set_config, Result, WarfrontConfig};

/// Headless Turn Runner - resolve movement and morale for one turn
#[derive(Parser, Debug)]
#[command(name = "turn_runner")]
#[command(about = "Resolve a turn of movement orders and battle morale checks")]
struct Args {
    /// Scenario file (JSON); runs a built-in demo when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Debug, Deserialize)]
struct MapSpec {
    width: i32,
    height: i32,
    #[serde(default)]
    seed: u64,
    /// Sectors replacing the generated ones
    #[serde(default)]
    sectors: Vec<Sector>,
}

#[derive(Debug, Default, Deserialize)]
struct BattleSpec {
    battalions: Vec<Battalion>,
    #[serde(default)]
    rounds: Vec<RoundStatistics>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    turn: Turn,
    month: u32,
    map: MapSpec,
    #[serde(default)]
    treaties: Vec<Treaty>,
    units: Vec<MobileUnit>,
    orders: Vec<MovementOrder>,
    #[serde(default)]
    battle: Option<BattleSpec>,
}

/// JSON output structure
#[derive(Serialize)]
struct TurnResult {
    turn: Turn,
    seed: u64,
    storm_sectors: usize,
    orders: Vec<ReportSummary>,
    morale: Vec<MoraleReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    victor: Option<Side>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warfront=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(path) = &args.config {
        let config = WarfrontConfig::load(path)?;
        if set_config(config).is_err() {
            tracing::warn!("Config already initialized, ignoring {}", path.display());
        }
    }

    let scenario = match &args.scenario {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => demo_scenario(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!("Running turn {} with seed {}", scenario.turn, seed);

    let result = run(scenario, seed);

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        Format::Text => print_text(&result),
    }

    Ok(())
}

fn run(scenario: Scenario, seed: u64) -> TurnResult {
    let mut map = CampaignMap::generate_simple(scenario.map.width, scenario.map.height, scenario.map.seed);
    for sector in scenario.map.sectors {
        map.set(sector);
    }

    let mut diplomacy = Diplomacy::new();
    for treaty in &scenario.treaties {
        diplomacy.set(treaty.a, treaty.b, treaty.relation);
    }

    let mut store = InMemoryUnitStore::new();
    for unit in scenario.units {
        store.insert(unit);
    }

    let mut turn = TurnContext::new(scenario.turn, scenario.month, seed).with_diplomacy(diplomacy);
    let zones = roll_storms(&map, turn.season, &mut turn.rng);
    let storm_sectors = mark_storms(&mut map, &zones);

    let reports = process_movement_orders(&scenario.orders, &mut store, &mut map, &mut turn);
    let orders = reports.iter().map(ReportSummary::from).collect();

    let (morale, victor) = match scenario.battle {
        Some(spec) => run_battle(spec),
        None => (Vec::new(), None),
    };

    TurnResult { turn: scenario.turn, seed, storm_sectors, orders, morale, victor }
}

fn run_battle(spec: BattleSpec) -> (Vec<MoraleReport>, Option<Side>) {
    let mut battle = TacticalBattle::new(spec.battalions);
    let mut reports = Vec::new();

    for round in 1..=MAX_BATTLE_ROUNDS {
        if let Some(stats) = spec.rounds.iter().find(|r| r.round == round) {
            battle.record_round(*stats);
        }
        if let Some(report) = battle.run_morale(round) {
            reports.push(report);
        }
        if battle.is_over(round) {
            break;
        }
    }

    (reports, battle.victor())
}

fn print_text(result: &TurnResult) {
    println!("Turn {} (seed {})", result.turn, result.seed);
    println!("=============");
    println!("Storms over {} sea sectors", result.storm_sectors);

    for report in &result.orders {
        match (&report.outcome, &report.error) {
            (Some(o), _) => println!(
                "{}: {} {} -> {} via {} sectors, {}/{} points left, {} conquered, {:?}",
                report.order,
                o.name,
                o.start,
                o.position,
                o.path.len(),
                o.remaining_points,
                o.starting_points,
                o.conquests.len(),
                o.halt
            ),
            (None, Some(e)) => println!("{}: rejected ({})", report.order, e),
            (None, None) => println!("{}: no result", report.order),
        }
    }

    for report in &result.morale {
        let failed: Vec<String> = report.failed().map(|id| id.to_string()).collect();
        println!(
            "Round {} morale (+{}): {} tested, broken: [{}]",
            report.round,
            report.bonus,
            report.results.len(),
            failed.join(", ")
        );
    }

    if let Some(side) = result.victor {
        println!("{:?} holds the field", side);
    }
}

fn demo_scenario() -> Scenario {
    let france = NationId(1);
    let austria = NationId(2);
    let coord = SectorCoord::new;

    let mut sectors = Vec::new();
    for y in 0..6 {
        sectors.push(Sector::new(coord(0, y), Terrain::Ocean));
    }
    for x in 4..8 {
        sectors.push(Sector::new(coord(x, 3), Terrain::Plains).with_owner(austria));
    }
    sectors.push(Sector::new(coord(1, 2), Terrain::Plains).with_owner(france).with_port());

    let units = vec![
        MobileUnit::new(UnitId(1), UnitKind::Spy, "Schulmeister", france, coord(2, 2)),
        MobileUnit::new(UnitId(2), UnitKind::InfantryBrigade, "Old Guard", france, coord(2, 3)),
        MobileUnit::new(UnitId(3), UnitKind::Ship, "Orient", france, coord(0, 1)).with_tonnage(400),
        MobileUnit::new(UnitId(4), UnitKind::BaggageTrain, "Train", france, coord(0, 1))
            .embarked_on(UnitId(3))
            .with_tonnage(120),
    ];

    let orders = vec![
        MovementOrder::new(1, UnitKind::Spy, UnitId(1), &[coord(3, 2), coord(4, 2), coord(5, 2)]),
        MovementOrder::new(2, UnitKind::InfantryBrigade, UnitId(2), &[coord(3, 3), coord(4, 3), coord(5, 3)]),
        MovementOrder::new(3, UnitKind::Ship, UnitId(3), &[coord(0, 2), coord(0, 3), coord(0, 4)]),
        MovementOrder::new(4, UnitKind::Commander, UnitId(99), &[coord(1, 1)]),
    ];

    let battalions = (1..=6)
        .map(|i| {
            let side = if i <= 3 { Side::Attacker } else { Side::Defender };
            Battalion::new(BattalionId(i), side, 600, 30.0 + f64::from(i) * 6.0).with_experience((i % 3) as u8)
        })
        .collect();
    let rounds = (1..=MAX_BATTLE_ROUNDS)
        .map(|r| RoundStatistics::new(r).with_casualties(40 + u32::from(r) * 5, 30))
        .collect();

    Scenario {
        turn: 1,
        month: 11,
        map: MapSpec { width: 8, height: 6, seed: 1805, sectors },
        treaties: vec![Treaty { a: france, b: austria, relation: Relation::War }],
        units,
        orders,
        battle: Some(BattleSpec { battalions, rounds }),
    }
}
