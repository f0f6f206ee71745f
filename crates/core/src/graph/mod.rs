//! A weighted directed graph over a group of tiles, and the path searches that
//! run on it.

mod search;

use crate::{
    config::DEFAULT_MOVEMENT_FIELD,
    error::Result,
    hex::{
        hex_coords, neighbors, scalar_field, AsCoords, Fields, HexCoords,
        HexIndexMap, HexIndexSet, HexSet, Scalar,
    },
    timed,
};
use log::debug;

/// A directed, weighted adjacency map between tiles. For every pair of
/// adjacent tiles `A` and `B` in the group it was built from, there are two
/// edges: `A → B` weighted by `B`'s movement cost, and `B → A` weighted by
/// `A`'s. I.e. the weight of an edge is the cost of moving _onto_ its
/// destination. A negative weight means the move is impossible.
///
/// Alongside the edges, the graph tracks which coordinates are **accessible**:
/// those with at least one non-negative edge leading into them.
///
/// The graph is a snapshot. It doesn't watch the tiles it was built from, so
/// if they change, it's up to the caller to update the graph to match (see
/// [Self::update_entry] and [Self::del_entry]).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphMatrix {
    /// Outbound edges for each coordinate. Ordered so that iteration (and
    /// therefore debug output) is stable.
    matrix: HexIndexMap<HexIndexMap<Scalar>>,
    accessible: HexSet,
}

impl GraphMatrix {
    /// The cost reported for a move that has no edge
    pub const IMPASSABLE: Scalar = Scalar::Int(-1);

    /// Build a graph from a group of tiles. Each tile needs `q`/`r`/`s`
    /// coordinate fields and a numeric `movement_cost` field. All tiles are
    /// validated before any edges are built.
    pub fn new<T: AsCoords + Fields>(tiles: &[T]) -> Result<Self> {
        timed!("Graph construction", {
            let mut costs: HexIndexMap<Scalar> = HexIndexMap::default();
            costs.reserve(tiles.len());
            for tile in tiles {
                let coords = hex_coords(tile)?;
                let cost = scalar_field(tile, DEFAULT_MOVEMENT_FIELD)?;
                costs.insert(coords, cost);
            }

            let mut graph = Self::default();
            for &coords in costs.keys() {
                for neighbor in neighbors(&coords)?.iter() {
                    // Only neighbors that are part of the group get an edge
                    if let Some(&cost) = costs.get(neighbor) {
                        graph
                            .matrix
                            .entry(coords)
                            .or_default()
                            .insert(*neighbor, cost);
                        if !cost.is_negative() {
                            graph.accessible.insert(*neighbor);
                        }
                    }
                }
            }

            debug!(
                "Built graph over {} tiles with {} edges ({} accessible)",
                tiles.len(),
                graph.edge_count(),
                graph.accessible.len()
            );
            Ok(graph)
        })
    }

    /// Insert a single directed edge, or overwrite its cost if it already
    /// exists. The reverse edge is not touched.
    pub fn update_entry(
        &mut self,
        from: &(impl AsCoords + ?Sized),
        to: &(impl AsCoords + ?Sized),
        movement_cost: impl Into<Scalar>,
    ) -> Result<()> {
        let from = hex_coords(from)?;
        let to = hex_coords(to)?;
        let movement_cost = movement_cost.into();

        self.matrix
            .entry(from)
            .or_default()
            .insert(to, movement_cost);
        if movement_cost.is_negative() {
            // This may have been the only way in
            self.refresh_accessibility(to);
        } else {
            self.accessible.insert(to);
        }
        Ok(())
    }

    /// Remove a single directed edge. Removing an edge that doesn't exist is
    /// not an error, it just does nothing. If this leaves `from` without any
    /// outbound edges, it's removed from the graph entirely.
    pub fn del_entry(
        &mut self,
        from: &(impl AsCoords + ?Sized),
        to: &(impl AsCoords + ?Sized),
    ) -> Result<()> {
        let from = hex_coords(from)?;
        let to = hex_coords(to)?;

        if let Some(row) = self.matrix.get_mut(&from) {
            if row.shift_remove(&to).is_some() {
                if row.is_empty() {
                    self.matrix.shift_remove(&from);
                }
                self.refresh_accessibility(to);
            }
        }
        Ok(())
    }

    /// Get every coordinate that can be reached from `from` via a single
    /// edge, in insertion order. Edges with negative costs are included.
    /// Returns `None` if `from` has no outbound edges at all.
    pub fn connected(
        &self,
        from: &(impl AsCoords + ?Sized),
    ) -> Result<Option<HexIndexSet>> {
        let from = hex_coords(from)?;
        Ok(self
            .edges_from(&from)
            .map(|row| row.keys().copied().collect()))
    }

    /// Get the cost of moving from one coordinate onto another. If there is
    /// no edge between them, [Self::IMPASSABLE] is returned rather than an
    /// error.
    pub fn get_movement_cost(
        &self,
        from: &(impl AsCoords + ?Sized),
        to: &(impl AsCoords + ?Sized),
    ) -> Result<Scalar> {
        let from = hex_coords(from)?;
        let to = hex_coords(to)?;
        Ok(self.cost(&from, &to))
    }

    /// [Self::get_movement_cost], for validated coordinates
    pub(crate) fn cost(&self, from: &HexCoords, to: &HexCoords) -> Scalar {
        self.edges_from(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(Self::IMPASSABLE)
    }

    /// Get all outbound edges of a coordinate, keyed by destination
    pub fn edges_from(&self, from: &HexCoords) -> Option<&HexIndexMap<Scalar>> {
        self.matrix.get(from)
    }

    /// Does this coordinate have any outbound edges?
    pub fn contains(&self, coords: &HexCoords) -> bool {
        self.matrix.contains_key(coords)
    }

    /// Can this coordinate be entered from at least one of its neighbors?
    pub fn is_accessible(&self, coords: &HexCoords) -> bool {
        self.accessible.contains(coords)
    }

    /// All accessible coordinates, in no particular order
    pub fn accessible(&self) -> impl Iterator<Item = &HexCoords> {
        self.accessible.iter()
    }

    /// Number of coordinates with outbound edges
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Total number of directed edges
    pub fn edge_count(&self) -> usize {
        self.matrix.values().map(|row| row.len()).sum()
    }

    /// Re-check whether any non-negative edge still leads into `coords`
    fn refresh_accessibility(&mut self, coords: HexCoords) {
        let reachable = self.matrix.values().any(|row| {
            row.get(&coords).map_or(false, |cost| !cost.is_negative())
        });
        if reachable {
            self.accessible.insert(coords);
        } else {
            self.accessible.remove(&coords);
        }
    }
}
