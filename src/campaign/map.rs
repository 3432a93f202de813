//! Campaign map - sector grid of the strategic layer
//!
//! Units move between adjacent sectors. Sectors carry terrain, ownership
//! and the per-turn storm flag; ownership changes only through conquest.

use serde::{Deserialize, Serialize};

use crate::core::types::NationId;

/// Grid coordinate of a sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectorCoord {
    pub x: i32,
    pub y: i32,
}

impl SectorCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// All 8 surrounding sectors
    pub fn neighbors(&self) -> [SectorCoord; 8] {
        [
            SectorCoord::new(self.x - 1, self.y - 1),
            SectorCoord::new(self.x, self.y - 1),
            SectorCoord::new(self.x + 1, self.y - 1),
            SectorCoord::new(self.x - 1, self.y),
            SectorCoord::new(self.x + 1, self.y),
            SectorCoord::new(self.x - 1, self.y + 1),
            SectorCoord::new(self.x, self.y + 1),
            SectorCoord::new(self.x + 1, self.y + 1),
        ]
    }

    /// Distance in sector steps (diagonals count as one step)
    pub fn distance(&self, other: &SectorCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn is_adjacent(&self, other: &SectorCoord) -> bool {
        self.distance(other) == 1
    }
}

impl std::fmt::Display for SectorCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.x, self.y)
    }
}

/// Terrain types affecting movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Plains,
    Forest,
    Hills,
    Swamp,
    Desert,
    Mountains,
    Ocean,
}

impl Terrain {
    /// Movement points a land unit spends to enter this terrain
    pub fn movement_cost(&self) -> u32 {
        match self {
            Self::Plains => 8,
            Self::Forest => 12,
            Self::Hills => 14,
            Self::Swamp => 16,
            Self::Desert => 12,
            Self::Mountains => 20,
            Self::Ocean => 0, // Land units never enter open sea
        }
    }

    pub fn is_sea(&self) -> bool {
        matches!(self, Self::Ocean)
    }
}

/// A single sector of the campaign map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub coord: SectorCoord,
    pub terrain: Terrain,
    pub owner: Option<NationId>,
    /// Whether the sector's ownership can change hands through conquest
    pub conquerable: bool,
    /// Storm raging in this sector for the current turn
    pub storm: bool,
    pub has_port: bool,
}

impl Sector {
    pub fn new(coord: SectorCoord, terrain: Terrain) -> Self {
        Self {
            coord,
            terrain,
            owner: None,
            conquerable: !terrain.is_sea(),
            storm: false,
            has_port: false,
        }
    }

    pub fn with_owner(mut self, owner: NationId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_port(mut self) -> Self {
        self.has_port = true;
        self
    }

    pub fn is_sea(&self) -> bool {
        self.terrain.is_sea()
    }

    pub fn is_neutral(&self) -> bool {
        self.owner.is_none()
    }

    pub fn is_owned_by(&self, nation: NationId) -> bool {
        self.owner == Some(nation)
    }
}

/// Read access to sectors plus the single mutation the movement core needs
pub trait SectorProvider {
    fn sector_at(&self, coord: SectorCoord) -> Option<&Sector>;

    /// Transfer ownership after a conquest
    fn set_owner(&mut self, coord: SectorCoord, nation: NationId);
}

/// The campaign map: a dense width x height grid of sectors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignMap {
    pub width: i32,
    pub height: i32,
    sectors: Vec<Sector>,
}

impl CampaignMap {
    /// Create a map filled with the given terrain
    pub fn new(width: i32, height: i32, terrain: Terrain) -> Self {
        let mut sectors = Vec::with_capacity((width.max(0) * height.max(0)) as usize);
        for y in 0..height {
            for x in 0..width {
                sectors.push(Sector::new(SectorCoord::new(x, y), terrain));
            }
        }
        Self { width, height, sectors }
    }

    /// Generate a simple map with varied terrain
    pub fn generate_simple(width: i32, height: i32, seed: u64) -> Self {
        let mut map = Self::new(width, height, Terrain::Plains);

        for sector in &mut map.sectors {
            let hash = Self::simple_hash(sector.coord.x, sector.coord.y, seed);
            let terrain = match hash % 10 {
                0..=3 => Terrain::Plains,
                4 => Terrain::Forest,
                5 => Terrain::Hills,
                6 => Terrain::Mountains,
                7 => Terrain::Swamp,
                8 => Terrain::Desert,
                _ => Terrain::Ocean,
            };
            *sector = Sector::new(sector.coord, terrain);
        }

        map
    }

    fn simple_hash(x: i32, y: i32, seed: u64) -> u64 {
        let mut h = seed;
        h = h.wrapping_mul(31).wrapping_add(x as u64);
        h = h.wrapping_mul(31).wrapping_add(y as u64);
        h ^ (h >> 16)
    }

    fn index(&self, coord: &SectorCoord) -> Option<usize> {
        if coord.x < 0 || coord.y < 0 || coord.x >= self.width || coord.y >= self.height {
            return None;
        }
        Some((coord.y * self.width + coord.x) as usize)
    }

    /// Get a sector at the given coordinate
    pub fn get(&self, coord: &SectorCoord) -> Option<&Sector> {
        let i = self.index(coord)?;
        self.sectors.get(i)
    }

    /// Get a mutable sector at the given coordinate
    pub fn get_mut(&mut self, coord: &SectorCoord) -> Option<&mut Sector> {
        let i = self.index(coord)?;
        self.sectors.get_mut(i)
    }

    /// Replace the sector at its own coordinate
    pub fn set(&mut self, sector: Sector) {
        if let Some(slot) = self.get_mut(&sector.coord) {
            *slot = sector;
        }
    }

    /// Check if a coordinate is within the map bounds
    pub fn contains(&self, coord: &SectorCoord) -> bool {
        self.index(coord).is_some()
    }

    pub fn sectors(&self) -> impl Iterator<Item = &Sector> {
        self.sectors.iter()
    }

    pub fn sectors_mut(&mut self) -> impl Iterator<Item = &mut Sector> {
        self.sectors.iter_mut()
    }

    /// Number of sectors owned by a nation
    pub fn owned_by(&self, nation: NationId) -> usize {
        self.sectors.iter().filter(|s| s.is_owned_by(nation)).count()
    }
}

impl SectorProvider for CampaignMap {
    fn sector_at(&self, coord: SectorCoord) -> Option<&Sector> {
        self.get(&coord)
    }

    fn set_owner(&mut self, coord: SectorCoord, nation: NationId) {
        if let Some(sector) = self.get_mut(&coord) {
            sector.owner = Some(nation);
        }
    }
}
