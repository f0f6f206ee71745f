use crate::{
    config::SearchOptions,
    error::Result,
    graph::GraphMatrix,
    hex::{hex_coords, hex_distance, neighbors, AsCoords, HexCoords, HexMap, Scalar},
    timed,
};
use log::{debug, trace};
use std::{
    cmp::Ordering,
    collections::{BinaryHeap, VecDeque},
};

/// An entry in the priority queue of a weighted search
#[derive(Copy, Clone, Debug)]
struct FrontierEntry {
    priority: Scalar,
    /// Insertion counter, so entries with equal priority come out first in,
    /// first out
    seq: u64,
    coords: HexCoords,
    /// Cost to reach `coords` at the time this entry was pushed
    cost: Scalar,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    /// Reversed, so that [BinaryHeap] pops the lowest priority first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The two weighted searches only differ in how they prioritize the frontier
#[derive(Copy, Clone, Debug)]
enum Heuristic {
    None,
    Distance,
}

impl Heuristic {
    fn estimate(self, coords: HexCoords, goal: HexCoords) -> Scalar {
        match self {
            Self::None => Scalar::ZERO,
            Self::Distance => hex_distance(goal, coords),
        }
    }
}

/// Walk back-pointers from the goal to the start, then flip it around
fn reconstruct_path(
    came_from: &HexMap<Option<HexCoords>>,
    goal: HexCoords,
) -> Vec<HexCoords> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&Some(previous)) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

impl GraphMatrix {
    /// Find a path from `start` to `goal` that takes the fewest steps,
    /// ignoring movement costs (other than that negative costs can't be
    /// crossed). Only edges between adjacent coordinates are followed, same
    /// as the weighted searches. Returns the full path, including both ends,
    /// or `None` if the goal can't be reached.
    pub fn breadth_first_search(
        &self,
        start: &(impl AsCoords + ?Sized),
        goal: &(impl AsCoords + ?Sized),
        options: SearchOptions,
    ) -> Result<Option<Vec<HexCoords>>> {
        let start = hex_coords(start)?;
        let goal = hex_coords(goal)?;
        if !self.search_allowed(start, goal, options) {
            return Ok(None);
        }

        Ok(timed!("Breadth-first search", {
            let mut queue = VecDeque::new();
            let mut came_from: HexMap<Option<HexCoords>> = HexMap::default();
            queue.push_back(start);
            came_from.insert(start, None);

            let mut found = false;
            while let Some(current) = queue.pop_front() {
                if current == goal {
                    found = true;
                    break;
                }
                let edges = match self.edges_from(&current) {
                    Some(edges) => edges,
                    None => continue,
                };
                // Expand in neighbor order, not edge insertion order. Edges
                // to non-adjacent coordinates are never followed.
                for &next in neighbors(&current)?.iter() {
                    let passable =
                        edges.get(&next).map_or(false, |cost| !cost.is_negative());
                    if !passable || came_from.contains_key(&next) {
                        continue;
                    }
                    trace!("Visiting {} from {}", next, current);
                    came_from.insert(next, Some(current));
                    queue.push_back(next);
                }
            }

            debug!(
                "Breadth-first search from {} to {} visited {} tiles",
                start,
                goal,
                came_from.len()
            );
            if found {
                Some(reconstruct_path(&came_from, goal))
            } else {
                None
            }
        }))
    }

    /// Find the cheapest path from `start` to `goal`, where the cost of a
    /// path is the sum of the costs of every tile it moves onto. Returns the
    /// full path, including both ends, or `None` if the goal can't be
    /// reached.
    pub fn dijkstras_algorithm(
        &self,
        start: &(impl AsCoords + ?Sized),
        goal: &(impl AsCoords + ?Sized),
        options: SearchOptions,
    ) -> Result<Option<Vec<HexCoords>>> {
        let start = hex_coords(start)?;
        let goal = hex_coords(goal)?;
        if !self.search_allowed(start, goal, options) {
            return Ok(None);
        }
        Ok(timed!("Dijkstra's algorithm", {
            self.weighted_search(start, goal, Heuristic::None)
        }))
    }

    /// Same as [Self::dijkstras_algorithm], but the search is guided towards
    /// the goal by the grid distance to it. This usually explores far fewer
    /// tiles. The path found is as cheap as Dijkstra's, as long as no tile
    /// costs less than 1 to enter, but may take a different route.
    pub fn a_star_algorithm(
        &self,
        start: &(impl AsCoords + ?Sized),
        goal: &(impl AsCoords + ?Sized),
        options: SearchOptions,
    ) -> Result<Option<Vec<HexCoords>>> {
        let start = hex_coords(start)?;
        let goal = hex_coords(goal)?;
        if !self.search_allowed(start, goal, options) {
            return Ok(None);
        }
        Ok(timed!("A* search", {
            self.weighted_search(start, goal, Heuristic::Distance)
        }))
    }

    /// Check the cheap reasons to skip a search entirely
    fn search_allowed(
        &self,
        start: HexCoords,
        goal: HexCoords,
        options: SearchOptions,
    ) -> bool {
        if options.test_accessibility
            && !(self.is_accessible(&start) && self.is_accessible(&goal))
        {
            debug!(
                "Skipping search from {} to {}, an endpoint is inaccessible",
                start, goal
            );
            return false;
        }
        true
    }

    fn weighted_search(
        &self,
        start: HexCoords,
        goal: HexCoords,
        heuristic: Heuristic,
    ) -> Option<Vec<HexCoords>> {
        let mut frontier = BinaryHeap::new();
        let mut seq: u64 = 0;
        let mut came_from: HexMap<Option<HexCoords>> = HexMap::default();
        let mut cost_so_far: HexMap<Scalar> = HexMap::default();

        frontier.push(FrontierEntry {
            priority: Scalar::ZERO,
            seq,
            coords: start,
            cost: Scalar::ZERO,
        });
        came_from.insert(start, None);
        cost_so_far.insert(start, Scalar::ZERO);

        let mut found = false;
        while let Some(FrontierEntry { coords, cost, .. }) = frontier.pop() {
            if coords == goal {
                found = true;
                break;
            }
            // Skip stale entries.
            if cost_so_far.get(&coords).map_or(false, |&best| cost > best) {
                continue;
            }

            // Coordinates here were validated on the way in, so this can't
            // fail. Anything that does is treated as a dead end.
            let adjacent = match neighbors(&coords) {
                Ok(adjacent) => adjacent,
                Err(_) => continue,
            };
            for &next in adjacent.iter() {
                let step = self.cost(&coords, &next);
                if step.is_negative() {
                    continue;
                }
                let new_cost = cost + step;
                if cost_so_far.get(&next).map_or(false, |&old| new_cost >= old)
                {
                    continue;
                }
                trace!("Relaxing {} via {} (cost {})", next, coords, new_cost);
                cost_so_far.insert(next, new_cost);
                came_from.insert(next, Some(coords));
                seq += 1;
                frontier.push(FrontierEntry {
                    priority: new_cost + heuristic.estimate(next, goal),
                    seq,
                    coords: next,
                    cost: new_cost,
                });
            }
        }

        debug!(
            "Weighted search ({:?}) from {} to {} reached {} tiles",
            heuristic,
            start,
            goal,
            cost_so_far.len()
        );
        if found {
            Some(reconstruct_path(&came_from, goal))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, Tile};
    use serde_json::json;

    fn hex(q: i64, r: i64, s: i64) -> HexCoords {
        HexCoords::new(q, r, s).unwrap()
    }

    fn line_graph() -> GraphMatrix {
        // Straight line of 4 tiles along q
        let tiles: Vec<Tile> = (0..4)
            .map(|i| Tile::new(hex(i, -i, 0), 1))
            .collect();
        GraphMatrix::new(&tiles).unwrap()
    }

    #[test]
    fn test_frontier_order() {
        let mut heap = BinaryHeap::new();
        let entries = [(3, 0), (1, 1), (1, 2), (2, 3)];
        for &(priority, seq) in entries.iter() {
            heap.push(FrontierEntry {
                priority: Scalar::Int(priority),
                seq,
                coords: HexCoords::ORIGIN,
                cost: Scalar::ZERO,
            });
        }
        let popped: Vec<u64> =
            std::iter::from_fn(|| heap.pop().map(|entry| entry.seq)).collect();
        assert_eq!(popped, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_start_is_goal() {
        let graph = line_graph();
        let options = SearchOptions::default();
        let expected = Some(vec![hex(1, -1, 0)]);
        assert_eq!(
            graph
                .breadth_first_search(&(1, -1, 0), &(1, -1, 0), options)
                .unwrap(),
            expected
        );
        assert_eq!(
            graph
                .dijkstras_algorithm(&(1, -1, 0), &(1, -1, 0), options)
                .unwrap(),
            expected
        );
        assert_eq!(
            graph
                .a_star_algorithm(&(1, -1, 0), &(1, -1, 0), options)
                .unwrap(),
            expected
        );
    }

    #[test]
    fn test_line() {
        let graph = line_graph();
        let options = SearchOptions::default();
        let expected: Vec<HexCoords> =
            (0..4).map(|i| hex(i, -i, 0)).collect();
        assert_eq!(
            graph
                .breadth_first_search(&(0, 0, 0), &(3, -3, 0), options)
                .unwrap()
                .unwrap(),
            expected
        );
        let mut reversed = expected.clone();
        reversed.reverse();
        assert_eq!(
            graph
                .a_star_algorithm(&(3, -3, 0), &(0, 0, 0), options)
                .unwrap()
                .unwrap(),
            reversed
        );
    }

    #[test]
    fn test_cheaper_detour() {
        // Going straight through the middle costs 10, going around costs 2
        let mut overrides = HexMap::default();
        overrides.insert(HexCoords::ORIGIN, Scalar::Int(10));
        let tiles = Tile::disk_with(HexCoords::ORIGIN, 1, &overrides).unwrap();
        let graph = GraphMatrix::new(&tiles).unwrap();
        let options = SearchOptions::default();

        // Fewest steps goes through the middle
        let path = graph
            .breadth_first_search(&(-1, 0, 1), &(1, 0, -1), options)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![hex(-1, 0, 1), hex(0, 0, 0), hex(1, 0, -1)]);

        for path in [
            graph.dijkstras_algorithm(&(-1, 0, 1), &(1, 0, -1), options),
            graph.a_star_algorithm(&(-1, 0, 1), &(1, 0, -1), options),
        ]
        .iter()
        {
            let path = path.as_ref().unwrap().as_ref().unwrap();
            assert_eq!(path.len(), 4);
            assert!(!path.contains(&HexCoords::ORIGIN));
        }
    }

    #[test]
    fn test_non_adjacent_edge() {
        // An edge between tiles that aren't neighbors is never followed, by
        // any of the searches
        let tiles = vec![
            Tile::new(HexCoords::ORIGIN, 1),
            Tile::new(hex(3, -3, 0), 1),
        ];
        let mut graph = GraphMatrix::new(&tiles).unwrap();
        graph.update_entry(&(0, 0, 0), &(3, -3, 0), 1).unwrap();
        assert!(graph.is_accessible(&hex(3, -3, 0)));

        let options = SearchOptions::default();
        assert_eq!(
            graph
                .breadth_first_search(&(0, 0, 0), &(3, -3, 0), options)
                .unwrap(),
            None
        );
        assert_eq!(
            graph
                .dijkstras_algorithm(&(0, 0, 0), &(3, -3, 0), options)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_bfs_order_survives_edge_reinsert() {
        let tiles = Tile::disk(HexCoords::ORIGIN, 2).unwrap();
        let mut graph = GraphMatrix::new(&tiles).unwrap();
        let options = SearchOptions::default();
        let expected = vec![hex(0, 0, 0), hex(1, 0, -1), hex(2, -1, -1)];
        assert_eq!(
            graph
                .breadth_first_search(&(0, 0, 0), &(2, -1, -1), options)
                .unwrap(),
            Some(expected.clone())
        );

        // Same graph, different row order
        graph.del_entry(&(0, 0, 0), &(1, 0, -1)).unwrap();
        graph.update_entry(&(0, 0, 0), &(1, 0, -1), 1).unwrap();
        assert_eq!(
            graph
                .breadth_first_search(&(0, 0, 0), &(2, -1, -1), options)
                .unwrap(),
            Some(expected)
        );
    }

    #[test]
    fn test_blocked() {
        // Blocking the middle of the line cuts it in two
        let tiles: Vec<Tile> = (0..4)
            .map(|i| Tile::new(hex(i, -i, 0), if i == 2 { -1 } else { 1 }))
            .collect();
        let graph = GraphMatrix::new(&tiles).unwrap();
        let options = SearchOptions::default();
        assert_eq!(
            graph
                .breadth_first_search(&(0, 0, 0), &(3, -3, 0), options)
                .unwrap(),
            None
        );
        assert_eq!(
            graph
                .dijkstras_algorithm(&(0, 0, 0), &(3, -3, 0), options)
                .unwrap(),
            None
        );
        assert_eq!(
            graph
                .a_star_algorithm(&(0, 0, 0), &(3, -3, 0), options)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_accessibility_option() {
        let tiles: Vec<Tile> = (0..3)
            .map(|i| Tile::new(hex(i, -i, 0), if i == 0 { -1 } else { 1 }))
            .collect();
        let graph = GraphMatrix::new(&tiles).unwrap();

        // The start can't be entered, but it can still be left
        let path = graph
            .dijkstras_algorithm(&(0, 0, 0), &(2, -2, 0), SearchOptions::default())
            .unwrap();
        assert_eq!(path.map(|path| path.len()), Some(3));

        let options = SearchOptions::test_accessibility();
        assert_eq!(
            graph
                .dijkstras_algorithm(&(0, 0, 0), &(2, -2, 0), options)
                .unwrap(),
            None
        );
        assert_eq!(
            graph
                .breadth_first_search(&(0, 0, 0), &(2, -2, 0), options)
                .unwrap(),
            None
        );
        // Even when start == goal
        assert_eq!(
            graph
                .a_star_algorithm(&(0, 0, 0), &(0, 0, 0), options)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_invalid_input() {
        let graph = line_graph();
        let options = SearchOptions::default();
        assert_eq!(
            graph
                .breadth_first_search(&(0, 0, 1), &(1, -1, 0), options)
                .unwrap_err()
                .kind(),
            ErrorKind::Constraint
        );
        assert_eq!(
            graph
                .a_star_algorithm(&(0, 0, 0), &json!({"q": 1, "r": -1}), options)
                .unwrap_err()
                .kind(),
            ErrorKind::Attribute
        );
        assert_eq!(
            graph
                .dijkstras_algorithm(&json!(true), &(0, 0, 0), options)
                .unwrap_err()
                .kind(),
            ErrorKind::Type
        );
    }
}
