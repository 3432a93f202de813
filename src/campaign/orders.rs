//! Movement orders as submitted by players
//!
//! Orders arrive with raw string parameters. Decoding them is a pure
//! parsing step: anything that does not parse is a malformed order.

use serde::{Deserialize, Serialize};

use super::map::SectorCoord;
use super::units::UnitKind;
use crate::core::error::{Result, WarfrontError};
use crate::core::types::{OrderId, UnitId};

/// A movement order with its raw parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementOrder {
    pub id: OrderId,
    /// Submission sequence number; earlier orders resolve first
    pub submitted: u64,
    /// Unit kind code, e.g. "spy" or "infantry"
    pub kind_code: String,
    /// Identifier of the unit to move
    pub unit_param: String,
    /// Sectors to traverse as "x:y/x:y/..."; empty when already there
    pub path_param: String,
}

impl MovementOrder {
    pub fn new(id: u32, kind: UnitKind, unit: UnitId, path: &[SectorCoord]) -> Self {
        Self {
            id: OrderId(id),
            submitted: id as u64,
            kind_code: kind.code().to_string(),
            unit_param: unit.0.to_string(),
            path_param: encode_path(path),
        }
    }

    pub fn submitted_at(mut self, submitted: u64) -> Self {
        self.submitted = submitted;
        self
    }

    /// Decode the raw parameters
    pub fn decode(&self) -> Result<DecodedOrder> {
        let kind = UnitKind::from_code(&self.kind_code).ok_or_else(|| {
            WarfrontError::MalformedOrder(format!(
                "{}: unknown unit kind '{}'",
                self.id, self.kind_code
            ))
        })?;

        let unit_id = self.unit_param.trim().parse::<u32>().map_err(|e| {
            WarfrontError::MalformedOrder(format!(
                "{}: bad unit id '{}': {}",
                self.id, self.unit_param, e
            ))
        })?;

        let path = decode_path(&self.path_param)
            .map_err(|msg| WarfrontError::MalformedOrder(format!("{}: {}", self.id, msg)))?;

        Ok(DecodedOrder {
            order: self.id,
            kind,
            unit_id: UnitId(unit_id),
            path,
        })
    }
}

/// A movement order after parameter decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedOrder {
    pub order: OrderId,
    pub kind: UnitKind,
    pub unit_id: UnitId,
    pub path: Vec<SectorCoord>,
}

pub fn encode_path(path: &[SectorCoord]) -> String {
    path.iter()
        .map(|c| format!("{}:{}", c.x, c.y))
        .collect::<Vec<_>>()
        .join("/")
}

fn decode_path(raw: &str) -> std::result::Result<Vec<SectorCoord>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    raw.split('/')
        .map(|hop| {
            let (x, y) = hop
                .split_once(':')
                .ok_or_else(|| format!("bad path step '{}'", hop))?;
            let x = x.trim().parse::<i32>().map_err(|e| format!("bad x in '{}': {}", hop, e))?;
            let y = y.trim().parse::<i32>().map_err(|e| format!("bad y in '{}': {}", hop, e))?;
            Ok(SectorCoord::new(x, y))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: &str, unit: &str, path: &str) -> MovementOrder {
        MovementOrder {
            id: OrderId(1),
            submitted: 1,
            kind_code: kind.to_string(),
            unit_param: unit.to_string(),
            path_param: path.to_string(),
        }
    }

    #[test]
    fn test_decode_valid_order() {
        let decoded = raw("spy", "12", "1:0/2:1").decode().unwrap();
        assert_eq!(decoded.kind, UnitKind::Spy);
        assert_eq!(decoded.unit_id, UnitId(12));
        assert_eq!(decoded.path, vec![SectorCoord::new(1, 0), SectorCoord::new(2, 1)]);
    }

    #[test]
    fn test_empty_path_decodes_to_no_hops() {
        let decoded = raw("ship", "3", "  ").decode().unwrap();
        assert!(decoded.path.is_empty());
    }

    #[test]
    fn test_unknown_kind_is_malformed() {
        let result = raw("balloon", "1", "");
        assert!(matches!(result.decode(), Err(WarfrontError::MalformedOrder(_))));
    }

    #[test]
    fn test_bad_unit_id_is_malformed() {
        assert!(matches!(raw("spy", "abc", "").decode(), Err(WarfrontError::MalformedOrder(_))));
        assert!(matches!(raw("spy", "-4", "").decode(), Err(WarfrontError::MalformedOrder(_))));
    }

    #[test]
    fn test_bad_path_is_malformed() {
        assert!(raw("spy", "1", "1:0/2").decode().is_err());
        assert!(raw("spy", "1", "1:x").decode().is_err());
        assert!(raw("spy", "1", "1:0//2:0").decode().is_err());
    }

    #[test]
    fn test_constructor_encodes_path() {
        let path = [SectorCoord::new(0, 1), SectorCoord::new(-1, 2)];
        let order = MovementOrder::new(5, UnitKind::CavalryBrigade, UnitId(8), &path);

        assert_eq!(order.path_param, "0:1/-1:2");
        let decoded = order.decode().unwrap();
        assert_eq!(decoded.kind, UnitKind::CavalryBrigade);
        assert_eq!(decoded.path, path.to_vec());
    }
}
