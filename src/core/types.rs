//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Campaign turn counter
pub type Turn = u32;

/// Tactical battle round index
pub type RoundIndex = u8;

/// Unique identifier for nations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NationId(pub u32);

impl NationId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for NationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nation#{}", self.0)
    }
}

/// Unique identifier for mobile units (spies, brigades, ships...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

/// Unique identifier for battalions engaged in a tactical battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BattalionId(pub u32);

impl BattalionId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for BattalionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "battalion#{}", self.0)
    }
}

/// Unique identifier for submitted orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nation_id_equality() {
        let a = NationId(1);
        let b = NationId::new(1);
        let c = NationId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unit_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<UnitId, &str> = HashMap::new();
        map.insert(UnitId(7), "spy");
        assert_eq!(map.get(&UnitId::new(7)), Some(&"spy"));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(UnitId(3).to_string(), "unit#3");
        assert_eq!(NationId(2).to_string(), "nation#2");
        assert_eq!(BattalionId(9).to_string(), "battalion#9");
        assert_eq!(OrderId(1).to_string(), "order#1");
    }
}
