//! Turn resolution configuration with documented constants
//!
//! All tunables are collected here with explanations of their purpose
//! and how they interact with each other. Every section can be overlaid
//! from a TOML file; missing keys keep their defaults.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WarfrontError};

/// Movement allowances, sector costs and conquest caps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // === BASE ALLOWANCES (movement points per turn) ===
    pub spy_points: u32,
    pub commander_points: u32,
    pub baggage_train_points: u32,
    pub infantry_points: u32,
    pub cavalry_points: u32,

    /// Allowance of a ship in perfect condition
    ///
    /// Damaged ships sail slower: the allowance scales linearly with
    /// condition, so a ship at 50% condition gets half of this.
    pub ship_points: u32,

    // === SECTOR COSTS ===
    /// Cost of one open-sea sector for sea-going units
    pub sea_sector_cost: u32,

    /// Land sector cost in winter, as a percentage of the terrain cost
    ///
    /// At 150, a plains sector that costs 8 in summer costs 12 in winter.
    pub winter_cost_percent: u32,

    // === CONQUEST ===
    /// Sectors a single brigade may convert per order (neutral included)
    pub brigade_max_conquers: u32,

    /// Of those, how many may be neutral (unowned) sectors
    pub brigade_max_neutral_conquers: u32,

    /// Brigades below this headcount are too weak to hold conquered ground
    pub min_conquest_headcount: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            spy_points: 80,
            commander_points: 80,
            baggage_train_points: 60,
            infantry_points: 60,
            cavalry_points: 80,
            ship_points: 100,
            sea_sector_cost: 10,
            winter_cost_percent: 150,
            brigade_max_conquers: 2,
            brigade_max_neutral_conquers: 1,
            min_conquest_headcount: 400,
        }
    }
}

/// March attrition and storm damage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttritionConfig {
    /// Probability that a sector crossing triggers attrition at all
    pub chance: f32,

    /// Headcount lost (percent) when attrition triggers
    pub base_loss_pct: f32,

    /// Extra headcount lost (percent) when marching in winter
    pub winter_loss_pct: f32,

    /// Multiplier applied to the loss when the unit is about to give battle
    ///
    /// Troops marching to a battle are pushed harder; 1.5 means 50% more
    /// stragglers than an ordinary march.
    pub imminent_battle_factor: f32,

    /// Probability that a ship is damaged when crossing a storm sector
    pub storm_damage_chance: f32,

    /// Condition points lost by a storm-damaged ship (inclusive range)
    pub storm_damage_min: u8,
    pub storm_damage_max: u8,
}

impl Default for AttritionConfig {
    fn default() -> Self {
        Self {
            chance: 0.3,
            base_loss_pct: 0.5,
            winter_loss_pct: 1.0,
            imminent_battle_factor: 1.5,
            storm_damage_chance: 0.5,
            storm_damage_min: 5,
            storm_damage_max: 20,
        }
    }
}

/// Morale check scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoraleConfig {
    /// Score a battalion must reach (bonus included) to hold
    pub threshold: f64,

    /// Score per experience level
    pub experience_weight: f64,

    /// Score lost per percent of the battalion's own strength lost
    pub casualty_weight: f64,

    /// Maximum score lost when the own side is losing the exchange
    ///
    /// Scaled by how lopsided the cumulative casualties are, so a side
    /// suffering all the losses pays the full amount.
    pub side_loss_weight: f64,
}

impl Default for MoraleConfig {
    fn default() -> Self {
        Self {
            threshold: 50.0,
            experience_weight: 2.0,
            casualty_weight: 0.5,
            side_loss_weight: 20.0,
        }
    }
}

/// Configuration for the turn resolution core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarfrontConfig {
    pub movement: MovementConfig,
    pub attrition: AttritionConfig,
    pub morale: MoraleConfig,

    // === PARALLELIZATION ===
    /// Minimum battalion count before morale rounds run on the rayon pool
    ///
    /// Below this, thread overhead exceeds the cost of the checks.
    pub parallel_threshold: usize,
}

impl Default for WarfrontConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            attrition: AttritionConfig::default(),
            morale: MoraleConfig::default(),
            parallel_threshold: 64,
        }
    }
}

impl WarfrontConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML, overlaying defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: WarfrontConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let m = &self.movement;
        if m.brigade_max_neutral_conquers > m.brigade_max_conquers {
            return Err(WarfrontError::Config(format!(
                "brigade_max_neutral_conquers ({}) should be <= brigade_max_conquers ({})",
                m.brigade_max_neutral_conquers, m.brigade_max_conquers
            )));
        }

        let allowances = [
            ("spy_points", m.spy_points),
            ("commander_points", m.commander_points),
            ("baggage_train_points", m.baggage_train_points),
            ("infantry_points", m.infantry_points),
            ("cavalry_points", m.cavalry_points),
            ("ship_points", m.ship_points),
        ];
        if let Some((name, _)) = allowances.iter().find(|(_, points)| *points == 0) {
            return Err(WarfrontError::Config(format!("movement.{} must be positive", name)));
        }

        if m.sea_sector_cost == 0 || m.winter_cost_percent < 100 {
            return Err(WarfrontError::Config(
                "sea_sector_cost must be positive and winter_cost_percent >= 100".into(),
            ));
        }

        let a = &self.attrition;
        for (name, p) in [("chance", a.chance), ("storm_damage_chance", a.storm_damage_chance)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(WarfrontError::Config(format!(
                    "attrition.{} ({}) must be within [0, 1]",
                    name, p
                )));
            }
        }

        if a.storm_damage_min > a.storm_damage_max {
            return Err(WarfrontError::Config(format!(
                "storm_damage_min ({}) should be <= storm_damage_max ({})",
                a.storm_damage_min, a.storm_damage_max
            )));
        }

        if self.morale.threshold <= 0.0 {
            return Err(WarfrontError::Config("morale.threshold must be positive".into()));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

static CONFIG: OnceLock<WarfrontConfig> = OnceLock::new();

/// Get the global config (initializes with defaults if not set)
pub fn config() -> &'static WarfrontConfig {
    CONFIG.get_or_init(WarfrontConfig::new)
}

/// Set the global config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: WarfrontConfig) -> std::result::Result<(), WarfrontConfig> {
    CONFIG.set(config)
}
