use hexlogic::{HexCoords, HexMap, Scalar, Tile, TileLayout};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Walls used by the default scenario. Two staggered walls across a radius 5
/// disk, so that any path from top to bottom has to snake around both.
const DEFAULT_WALLS: &[(i64, i64, i64)] = &[
    (2, 0, -2),
    (1, 1, -2),
    (0, 2, -2),
    (-1, 3, -2),
    (-2, 4, -2),
    (-3, 5, -2),
    (-4, 6, -2),
    (-3, 1, 2),
    (-2, 0, 2),
    (-1, -1, 2),
    (0, -2, 2),
    (1, -3, 2),
    (2, -4, 2),
    (3, -5, 2),
];

/// A tile disk plus the queries to run on it. Everything is optional when
/// loading from a file; missing fields are taken from the default scenario.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Distance from the center of the disk to its edge (in tiles)
    #[validate(range(max = 1000))]
    pub radius: u16,

    /// Tiles that can't be entered. Blocked coordinates outside the disk are
    /// ignored.
    pub blocked: Vec<HexCoords>,

    /// Movement cost for every tile that isn't blocked
    pub movement_cost: Scalar,

    /// Where each search starts
    pub start: HexCoords,

    /// Where each search tries to get to
    pub goal: HexCoords,

    /// Number of steps to flood fill from the start
    #[validate(range(max = 1000))]
    pub flood_distance: u16,

    /// Tile size used for pixel output
    #[validate]
    pub layout: TileLayout,
}

impl ScenarioConfig {
    /// Generate the tiles described by this scenario
    pub fn tiles(&self) -> hexlogic::Result<Vec<Tile>> {
        let mut overrides: HexMap<Scalar> = HexMap::default();
        for coords in &self.blocked {
            overrides.insert(*coords, Scalar::Int(-1));
        }
        let mut tiles = Tile::disk_with(HexCoords::ORIGIN, self.radius, &overrides)?;
        for tile in tiles.iter_mut() {
            if !tile.movement_cost.is_negative() {
                tile.movement_cost = self.movement_cost;
            }
        }
        Ok(tiles)
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            radius: 5,
            blocked: DEFAULT_WALLS
                .iter()
                .filter_map(|&(q, r, s)| HexCoords::new(q, r, s).ok())
                .collect(),
            movement_cost: Tile::DEFAULT_MOVEMENT_COST,
            start: HexCoords::new(0, 5, -5).unwrap_or(HexCoords::ORIGIN),
            goal: HexCoords::new(0, -5, 5).unwrap_or(HexCoords::ORIGIN),
            flood_distance: 2,
            layout: TileLayout::default(),
        }
    }
}
