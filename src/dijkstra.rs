use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::graph::Graph;

#[derive(Copy, Clone, PartialEq, Eq)]
struct State {
    cost: OrderedFloat<f64>,
    room: usize,
}

// Min-heap by cost; ties on cost break toward the lower room index, so
// equal-cost alternatives resolve the same way on every run.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.room.cmp(&self.room))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra from `start` to `target` over the room graph. Returns the room
/// indices along the cheapest route, start and target inclusive, and its
/// total cost. An unreachable target yields an empty path and
/// `f64::INFINITY`; that is a normal outcome, not a fault.
///
/// Stops as soon as the target is popped: with non-negative edge costs its
/// distance is final at that point. `start` and `target` must be valid
/// indices into `graph`.
pub fn shortest_path(graph: &Graph, start: usize, target: usize) -> (Vec<usize>, f64) {
    let n = graph.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[start] = 0.0;
    heap.push(State {
        cost: OrderedFloat(0.0),
        room: start,
    });

    while let Some(State { cost, room }) = heap.pop() {
        if room == target {
            return (walk_back(&prev, start, target), dist[target]);
        }
        if visited[room] || cost.0 > dist[room] {
            continue;
        }
        visited[room] = true;

        for &(next, w) in graph.neighbors(room) {
            let next_cost = dist[room] + w;
            if next_cost < dist[next] {
                dist[next] = next_cost;
                prev[next] = Some(room);
                heap.push(State {
                    cost: OrderedFloat(next_cost),
                    room: next,
                });
            }
        }
    }

    // The heap drained without popping the target.
    (Vec::new(), f64::INFINITY)
}

/// Walk the predecessor chain from target back to start and reverse it.
fn walk_back(prev: &[Option<usize>], start: usize, target: usize) -> Vec<usize> {
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        match prev[current] {
            Some(p) => {
                path.push(p);
                current = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Format a route as `A -> B -> C (total cost 12.34)`.
pub fn format_route(graph: &Graph, path: &[usize], cost: f64) -> String {
    let names: Vec<&str> = path.iter().map(|&i| graph.room(i).name.as_str()).collect();
    format!("{} (total cost {:.2})", names.join(" -> "), cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Room;

    fn room(name: &str, x: i32, y: i32, floor: i32) -> Room {
        Room::new(name, x, y, floor).unwrap()
    }

    fn graph(rooms: Vec<Room>, max_distance: f64, floor_weight: f64) -> Graph {
        Graph::build(rooms, max_distance, floor_weight).unwrap()
    }

    #[test]
    fn direct_edge_beats_the_detour() {
        // A-B 3, B-C 4, A-C 5: going direct wins over 3 + 4 via B.
        let g = graph(
            vec![room("A", 0, 0, 1), room("B", 3, 0, 1), room("C", 3, 4, 1)],
            10.0,
            1.0,
        );
        let (path, cost) = shortest_path(&g, 0, 2);
        assert_eq!(path, vec![0, 2]);
        assert_eq!(cost, 5.0);
    }

    #[test]
    fn routes_through_an_intermediate_room() {
        // A-C is beyond the maximum distance, so the route goes via B.
        let g = graph(
            vec![room("A", 0, 0, 1), room("B", 3, 0, 1), room("C", 6, 0, 1)],
            4.0,
            1.0,
        );
        let (path, cost) = shortest_path(&g, 0, 2);
        assert_eq!(path, vec![0, 1, 2]);
        assert_eq!(cost, 6.0);
    }

    #[test]
    fn start_equals_target() {
        let g = graph(vec![room("A", 0, 0, 1), room("B", 3, 0, 1)], 10.0, 1.0);
        let (path, cost) = shortest_path(&g, 0, 0);
        assert_eq!(path, vec![0]);
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn unreachable_target_returns_empty_and_infinite() {
        let g = graph(vec![room("A", 0, 0, 1), room("B", 100, 100, 1)], 10.0, 1.0);
        let (path, cost) = shortest_path(&g, 0, 1);
        assert!(path.is_empty());
        assert!(cost.is_infinite());
    }

    #[test]
    fn climbs_one_floor_at_a_time_when_cheaper() {
        // Direct X-Y costs 2 * 2^2 = 8; via M it is 2 + 2 = 4.
        let g = graph(
            vec![room("X", 0, 0, 1), room("M", 0, 0, 2), room("Y", 0, 0, 3)],
            10.0,
            2.0,
        );
        let (path, cost) = shortest_path(&g, 0, 2);
        assert_eq!(path, vec![0, 1, 2]);
        assert_eq!(cost, 4.0);
    }

    #[test]
    fn equal_cost_ties_resolve_toward_lower_indices() {
        // Two cost-10 routes, S->A->T and S->B->T; A has the lower index
        // and must win on every run.
        let g = graph(
            vec![
                room("S", 0, 0, 1),
                room("A", 3, 4, 1),
                room("B", 4, 3, 1),
                room("T", 7, 7, 1),
            ],
            9.0,
            1.0,
        );
        assert_eq!(g.edge_cost(0, 3), None); // no direct shortcut
        let (path, cost) = shortest_path(&g, 0, 3);
        assert_eq!(path, vec![0, 1, 3]);
        assert_eq!(cost, 10.0);
    }
}
