//! Seasons and storms for the campaign layer
//!
//! Winter raises land movement costs and march attrition. Storms are
//! rolled per turn into zones that flag the sea sectors they cover.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::map::{CampaignMap, SectorCoord};

/// Season affecting movement costs and attrition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Get season from calendar month (1-12); out-of-range months wrap
    pub fn from_month(month: u32) -> Self {
        match (month.max(1) - 1) % 12 + 1 {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    pub fn is_winter(&self) -> bool {
        matches!(self, Self::Winter)
    }
}

/// A storm raging over a square region of sea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StormZone {
    pub center: SectorCoord,
    pub radius: i32,
}

impl StormZone {
    pub fn new(center: SectorCoord, radius: i32) -> Self {
        Self { center, radius }
    }

    pub fn covers(&self, coord: &SectorCoord) -> bool {
        u32::try_from(self.radius).is_ok_and(|radius| self.center.distance(coord) <= radius)
    }
}

/// Reset storm flags and set them on every sea sector covered by a zone
///
/// Returns the number of sectors under storm.
pub fn mark_storms(map: &mut CampaignMap, zones: &[StormZone]) -> usize {
    let mut stormy = 0;
    for sector in map.sectors_mut() {
        sector.storm = sector.is_sea() && zones.iter().any(|z| z.covers(&sector.coord));
        if sector.storm {
            stormy += 1;
        }
    }
    stormy
}

/// Roll this turn's storm zones
///
/// Storms are more frequent in autumn and winter.
pub fn roll_storms<R: Rng + ?Sized>(
    map: &CampaignMap,
    season: Season,
    rng: &mut R,
) -> Vec<StormZone> {
    let count = match season {
        Season::Spring | Season::Summer => rng.gen_range(0..=1),
        Season::Autumn => rng.gen_range(1..=2),
        Season::Winter => rng.gen_range(1..=3),
    };

    if map.width <= 0 || map.height <= 0 {
        return Vec::new();
    }

    (0..count)
        .map(|_| {
            let center = SectorCoord::new(rng.gen_range(0..map.width), rng.gen_range(0..map.height));
            StormZone::new(center, rng.gen_range(1..=2))
        })
        .collect()
}
