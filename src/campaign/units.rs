//! Mobile units of the campaign layer
//!
//! Every unit that can receive a movement order shares one record; what
//! differs between kinds lives in the movement policies.

use serde::{Deserialize, Serialize};

use super::map::SectorCoord;
use crate::core::types::{NationId, UnitId};

/// Kind of mobile unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Spy,
    Commander,
    BaggageTrain,
    InfantryBrigade,
    CavalryBrigade,
    Ship,
}

impl UnitKind {
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Spy,
        UnitKind::Commander,
        UnitKind::BaggageTrain,
        UnitKind::InfantryBrigade,
        UnitKind::CavalryBrigade,
        UnitKind::Ship,
    ];

    /// Order code used by the order source for this kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::Spy => "spy",
            Self::Commander => "commander",
            Self::BaggageTrain => "baggage",
            Self::InfantryBrigade => "infantry",
            Self::CavalryBrigade => "cavalry",
            Self::Ship => "ship",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code.trim())
    }
}

/// Whether a unit moves over land or over sea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Domain {
    Land,
    Sea,
}

/// A unit that can be ordered to move across sectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileUnit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub name: String,
    pub owner: NationId,
    pub position: SectorCoord,
    /// Ship or baggage train this unit is embarked on
    pub carrier: Option<UnitId>,
    /// Corps, army or fleet this unit is attached to
    pub superior: Option<UnitId>,
    /// Turns since the unit last moved
    pub stationary_turns: u32,
    /// Soldiers (brigades) or crew; 1 for single agents
    pub headcount: u32,
    /// Ship condition in percent
    pub condition: u8,
    /// Cargo weight when embarked, carrying capacity for ships
    pub tonnage: u32,
}

impl MobileUnit {
    pub fn new(id: UnitId, kind: UnitKind, name: &str, owner: NationId, position: SectorCoord) -> Self {
        let headcount = match kind {
            UnitKind::InfantryBrigade | UnitKind::CavalryBrigade => 800,
            UnitKind::Ship => 200,
            _ => 1,
        };
        Self {
            id,
            kind,
            name: name.to_string(),
            owner,
            position,
            carrier: None,
            superior: None,
            stationary_turns: 0,
            headcount,
            condition: 100,
            tonnage: 0,
        }
    }

    pub fn with_headcount(mut self, headcount: u32) -> Self {
        self.headcount = headcount;
        self
    }

    pub fn with_tonnage(mut self, tonnage: u32) -> Self {
        self.tonnage = tonnage;
        self
    }

    pub fn with_condition(mut self, condition: u8) -> Self {
        self.condition = condition.min(100);
        self
    }

    pub fn embarked_on(mut self, carrier: UnitId) -> Self {
        self.carrier = Some(carrier);
        self
    }

    pub fn attached_to(mut self, superior: UnitId) -> Self {
        self.superior = Some(superior);
        self
    }

    pub fn is_embarked(&self) -> bool {
        self.carrier.is_some_and(|c| c.0 != 0)
    }
}
