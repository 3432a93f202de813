//! Diplomatic relations between nations
//!
//! Relations decide which foreign sectors a unit may enter and which of
//! them it may conquer.

use serde::{Deserialize, Serialize};

use crate::core::types::NationId;

/// Relation between two nations, ordered from friendliest to most hostile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Relation {
    Alliance,
    /// Right of passage for troops, no military cooperation
    Passage,
    Trade,
    #[default]
    Neutral,
    War,
}

/// Relation declared between a pair of nations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treaty {
    pub a: NationId,
    pub b: NationId,
    pub relation: Relation,
}

/// All relations in play for a turn. Relations are symmetric.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diplomacy {
    treaties: Vec<Treaty>,
}

impl Diplomacy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relation between two nations, replacing any previous one
    pub fn set(&mut self, a: NationId, b: NationId, relation: Relation) {
        if a == b {
            return;
        }
        self.treaties.retain(|t| !Self::pair_matches(t, a, b));
        self.treaties.push(Treaty { a, b, relation });
    }

    pub fn with(mut self, a: NationId, b: NationId, relation: Relation) -> Self {
        self.set(a, b, relation);
        self
    }

    fn pair_matches(treaty: &Treaty, a: NationId, b: NationId) -> bool {
        (treaty.a == a && treaty.b == b) || (treaty.a == b && treaty.b == a)
    }

    /// Relation of `a` towards `b`; a nation is always allied with itself
    pub fn relation(&self, a: NationId, b: NationId) -> Relation {
        if a == b {
            return Relation::Alliance;
        }
        self.treaties
            .iter()
            .find(|t| Self::pair_matches(t, a, b))
            .map(|t| t.relation)
            .unwrap_or_default()
    }

    pub fn is_friendly(&self, a: NationId, b: NationId) -> bool {
        self.relation(a, b) == Relation::Alliance
    }

    pub fn grants_passage(&self, a: NationId, b: NationId) -> bool {
        self.relation(a, b) <= Relation::Passage
    }

    pub fn at_war(&self, a: NationId, b: NationId) -> bool {
        self.relation(a, b) == Relation::War
    }
}
