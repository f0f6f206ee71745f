//! Hexlogic is the coordinate and pathfinding kernel for hexagon tile grids.
//! It handles cube coordinates (and their projection to pixels), the usual
//! grid math (distances, neighbors, ranges, lines, flood fills), and a
//! weighted graph over a group of tiles with three path searches on top.
//! Rendering, map generation and game rules are up to the caller.
//!
//! ```
//! use hexlogic::{GraphMatrix, HexCoords, SearchOptions, Tile};
//!
//! let tiles = Tile::disk(HexCoords::ORIGIN, 3).unwrap();
//! let graph = GraphMatrix::new(&tiles).unwrap();
//! let path = graph
//!     .a_star_algorithm(&(0, 3, -3), &(0, -3, 3), SearchOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(path.len(), 7);
//! ```
//!
//! Almost every function accepts coordinates in whatever form is handy:
//! tuples, [HexCoords]/[RectCoords], JSON values, or any type implementing
//! [Fields]. See [hex] for details on the coordinate systems.

mod config;
mod error;
mod graph;
pub mod hex;
mod screen;
mod tile;
pub mod util;

pub use crate::{config::*, error::*, graph::*, hex::*, screen::*, tile::*};
