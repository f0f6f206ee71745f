//! This module holds the coordinate types of hexagon grids, and the math
//! around them.
//!
//! ## Coordinate Systems
//!
//! There are two coordinate systems in play:
//!
//! ### Cube Coordinates
//!
//! Cube coordinates define positions on the tile grid. This is the [cube
//! coordinate system defined by Amit Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-cube),
//! laid out with flat-topped hexagons.
//!
//! Each coordinate has three components (`q`, `r`, and `s`). **For every cube
//! coordinate, `q + r + s = 0`.** The third axis is redundant, but it makes
//! the math around hexagonal grids (distances, rotations, rounding) much
//! simpler. [HexCoords] enforces the constraint whenever one is built.
//!
//! A coordinate whose components are all whole numbers refers to the center
//! of a tile. Fractional coordinates can exist too (e.g. the intermediate
//! samples of [line_draw]); use [round_hex] to snap one to the nearest tile.
//!
//! ### Pixel Coordinates
//!
//! Pixel coordinates ([RectCoords]) are plain `(x, y)` screen positions, with
//! `+y` pointing down. The origin tile `(0, 0, 0)` is centered on the pixel
//! origin. The projection between the two systems depends on the tile size,
//! see [crate::TileLayout], [crate::hex_to_pixel] and [crate::pixel_to_hex].
//!
//! ## Input
//!
//! Functions in this module accept coordinates in many forms: tuples, the
//! typed structs, JSON values, or any object exposing named fields. See the
//! `coerce` module docs for how that works.

mod algebra;
mod coerce;
mod scalar;
mod unit;

pub use self::{algebra::*, coerce::*, scalar::*, unit::*};

use fnv::FnvBuildHasher;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

/// A set of cube coordinates
pub type HexSet = HashSet<HexCoords, FnvBuildHasher>;
/// A map of cube coordinates to some `T`
pub type HexMap<T> = HashMap<HexCoords, T, FnvBuildHasher>;
/// An ORDERED map of cube coordinates to some `T`. This has some extra memory
/// overhead, so we should only use it when we actually need the ordering.
pub type HexIndexMap<T> = IndexMap<HexCoords, T, FnvBuildHasher>;
/// An ORDERED set of cube coordinates
pub type HexIndexSet = IndexSet<HexCoords, FnvBuildHasher>;
