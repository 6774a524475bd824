use anyhow::{bail, Result};
use fnv::FnvHashMap;

use crate::metric::weighted_distance;
use crate::room::Room;

/// Undirected weighted graph over the rooms of a map.
///
/// Rooms live in an arena in insertion order and are referred to by index
/// everywhere else. Adjacency is a list of `(room index, cost)` pairs per
/// room, in ascending index order, so iteration is deterministic. The graph
/// is immutable once built.
pub struct Graph {
    rooms: Vec<Room>,
    name_to_idx: FnvHashMap<String, usize>,
    adj: Vec<Vec<(usize, f64)>>,
    max_distance: f64,
    floor_weight: f64,
    edges: usize,
    rejected_pairs: usize,
}

/// Round a cost to 2 decimals. Applied once per pair, so both directions of
/// an edge store bit-identical values.
fn round_cost(cost: f64) -> f64 {
    (cost * 100.0).round() / 100.0
}

impl Graph {
    /// Weigh every unordered pair of rooms and keep the pairs whose cost
    /// stays within `max_distance`. Pairs beyond reach are counted, not
    /// reported as errors; the threshold is checked against the unrounded
    /// cost, the stored cost is rounded. Duplicate room names fail the
    /// build.
    pub fn build(rooms: Vec<Room>, max_distance: f64, floor_weight: f64) -> Result<Graph> {
        let mut name_to_idx = FnvHashMap::default();
        for (i, room) in rooms.iter().enumerate() {
            if name_to_idx.insert(room.name.clone(), i).is_some() {
                bail!("duplicate room name {:?}", room.name);
            }
        }

        let n = rooms.len();
        let mut adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        let mut edges = 0;
        let mut rejected_pairs = 0;

        for i in 0..n {
            for j in (i + 1)..n {
                let cost = weighted_distance(&rooms[i], &rooms[j], floor_weight);
                if cost > max_distance {
                    rejected_pairs += 1;
                    continue;
                }
                let cost = round_cost(cost);
                adj[i].push((j, cost));
                adj[j].push((i, cost));
                edges += 1;
            }
        }

        Ok(Graph {
            rooms,
            name_to_idx,
            adj,
            max_distance,
            floor_weight,
            edges,
            rejected_pairs,
        })
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, idx: usize) -> &Room {
        &self.rooms[idx]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_idx.get(name).copied()
    }

    pub fn neighbors(&self, idx: usize) -> &[(usize, f64)] {
        &self.adj[idx]
    }

    /// Cost of the edge between `u` and `v`, if they are connected.
    pub fn edge_cost(&self, u: usize, v: usize) -> Option<f64> {
        self.adj[u].iter().find(|&&(w, _)| w == v).map(|&(_, c)| c)
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Pairs that were left unconnected because their cost exceeded the
    /// maximum distance.
    pub fn rejected_pairs(&self) -> usize {
        self.rejected_pairs
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn floor_weight(&self) -> f64 {
        self.floor_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str, x: i32, y: i32, floor: i32) -> Room {
        Room::new(name, x, y, floor).unwrap()
    }

    fn triangle() -> Graph {
        let rooms = vec![room("A", 0, 0, 1), room("B", 3, 0, 1), room("C", 3, 4, 1)];
        Graph::build(rooms, 10.0, 1.0).unwrap()
    }

    #[test]
    fn triangle_edge_costs() {
        let g = triangle();
        assert_eq!(g.edge_cost(0, 1), Some(3.0));
        assert_eq!(g.edge_cost(1, 2), Some(4.0));
        assert_eq!(g.edge_cost(0, 2), Some(5.0));
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.rejected_pairs(), 0);
    }

    #[test]
    fn edges_are_symmetric() {
        let g = triangle();
        for u in 0..g.len() {
            for &(v, cost) in g.neighbors(u) {
                assert_eq!(g.edge_cost(v, u), Some(cost));
            }
        }
    }

    #[test]
    fn no_self_loops() {
        let g = triangle();
        for u in 0..g.len() {
            assert!(g.neighbors(u).iter().all(|&(v, _)| v != u));
            assert_eq!(g.edge_cost(u, u), None);
        }
    }

    #[test]
    fn floor_penalty_gates_the_edge() {
        let rooms = || vec![room("X", 0, 0, 1), room("Y", 0, 0, 3)];

        // 0 euclidean + 2 * (1-3)^2 = 8, within reach of 10.
        let near = Graph::build(rooms(), 10.0, 2.0).unwrap();
        assert_eq!(near.edge_cost(0, 1), Some(8.0));
        assert_eq!(near.rejected_pairs(), 0);

        // Same pair, maximum distance 5: no edge, one rejected pair.
        let far = Graph::build(rooms(), 5.0, 2.0).unwrap();
        assert_eq!(far.edge_cost(0, 1), None);
        assert_eq!(far.edge_count(), 0);
        assert_eq!(far.rejected_pairs(), 1);
    }

    #[test]
    fn costs_are_rounded_to_two_decimals() {
        // dist((0,0)-(1,1)) = 1.4142... -> 1.41 in both directions.
        let g = Graph::build(vec![room("A", 0, 0, 1), room("B", 1, 1, 1)], 10.0, 1.0).unwrap();
        assert_eq!(g.edge_cost(0, 1), Some(1.41));
        assert_eq!(g.edge_cost(1, 0), Some(1.41));
    }

    #[test]
    fn threshold_checks_the_unrounded_cost() {
        // dist((0,0)-(3,1)) = 3.1623..., which rounds to 3.16 but must
        // still be rejected by a maximum of 3.16.
        let g = Graph::build(vec![room("A", 0, 0, 1), room("B", 3, 1, 1)], 3.16, 1.0).unwrap();
        assert_eq!(g.edge_cost(0, 1), None);
        assert_eq!(g.rejected_pairs(), 1);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let rooms = vec![
            room("A", 0, 0, 1),
            room("B", 3, 0, 1),
            room("C", 3, 4, 2),
            room("D", 40, 40, 1),
        ];
        let a = Graph::build(rooms.clone(), 10.0, 1.5).unwrap();
        let b = Graph::build(rooms, 10.0, 1.5).unwrap();
        assert_eq!(a.adj, b.adj);
        assert_eq!(a.edge_count(), b.edge_count());
        assert_eq!(a.rejected_pairs(), b.rejected_pairs());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let rooms = vec![room("A", 0, 0, 1), room("A", 3, 0, 2)];
        assert!(Graph::build(rooms, 10.0, 1.0).is_err());
    }
}
