use serde::{Deserialize, Serialize};
use validator::Validate;

/// Name of the tile field that holds movement cost, unless configured
/// otherwise
pub const DEFAULT_MOVEMENT_FIELD: &str = "movement_cost";

/// Dimensions of a single tile in pixel space. This controls the projection
/// between cube coordinates and pixels, see [crate::hex_to_pixel] and
/// [crate::pixel_to_hex].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TileLayout {
    /// Width of a tile, from its leftmost to its rightmost vertex
    #[validate(range(min = 1))]
    pub tile_width: u32,

    /// Height of a tile, from the top side to the bottom side
    #[validate(range(min = 1))]
    pub tile_height: u32,
}

impl Default for TileLayout {
    fn default() -> Self {
        Self {
            tile_width: 64,
            tile_height: 64,
        }
    }
}

/// Configuration for [crate::dist_lim_flood_fill]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FloodFillConfig {
    /// The tile field to read movement cost from. Any tile with a negative
    /// value here blocks the fill.
    #[validate(length(min = 1))]
    pub movement_field: String,
}

impl Default for FloodFillConfig {
    fn default() -> Self {
        Self {
            movement_field: DEFAULT_MOVEMENT_FIELD.to_owned(),
        }
    }
}

/// Options shared by all three path searches on [crate::GraphMatrix]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// If enabled, the search gives up immediately (without any traversal)
    /// when either the start or the goal isn't accessible in the graph
    pub test_accessibility: bool,
}

impl SearchOptions {
    pub fn test_accessibility() -> Self {
        Self {
            test_accessibility: true,
        }
    }
}
