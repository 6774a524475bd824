use std::collections::BTreeMap;

use crate::graph::Graph;

const GRID_W: usize = 60;
const GRID_H: usize = 16;

fn marker(i: usize) -> char {
    const MARKS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    MARKS[i % MARKS.len()] as char
}

/// Scale `v` from [min, max] onto [0, cells-1]. A floor whose rooms all
/// share a coordinate collapses onto one cell.
fn scale(v: i32, min: i32, max: i32, cells: usize) -> usize {
    let span = i64::from(max) - i64::from(min);
    if span == 0 {
        return 0;
    }
    let offset = i64::from(v) - i64::from(min);
    (offset * (cells as i64 - 1) / span) as usize
}

/// Render each floor of the map as an ASCII grid with one marker per room,
/// followed by a legend and the walkways that stay on that floor. Edges
/// that change floors are listed at the end. Overlapping rooms render as
/// `+`.
pub fn render_map(graph: &Graph) -> String {
    let mut floors: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, room) in graph.rooms().iter().enumerate() {
        floors.entry(room.floor).or_default().push(i);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Map built with maximum edge distance {} and floor weight {}\n\n",
        graph.max_distance(),
        graph.floor_weight()
    ));

    for (floor, members) in &floors {
        out.push_str(&format!("Floor {}\n", floor));

        let min_x = members.iter().map(|&i| graph.room(i).x).min().unwrap_or(0);
        let max_x = members.iter().map(|&i| graph.room(i).x).max().unwrap_or(0);
        let min_y = members.iter().map(|&i| graph.room(i).y).min().unwrap_or(0);
        let max_y = members.iter().map(|&i| graph.room(i).y).max().unwrap_or(0);

        let mut grid = vec![vec![' '; GRID_W]; GRID_H];
        for &i in members {
            let room = graph.room(i);
            let col = scale(room.x, min_x, max_x, GRID_W);
            let row = GRID_H - 1 - scale(room.y, min_y, max_y, GRID_H);
            grid[row][col] = if grid[row][col] == ' ' { marker(i) } else { '+' };
        }

        let border = "-".repeat(GRID_W);
        out.push_str(&format!("+{}+\n", border));
        for row in &grid {
            let line: String = row.iter().collect();
            out.push_str(&format!("|{}|\n", line));
        }
        out.push_str(&format!("+{}+\n", border));

        for &i in members {
            let room = graph.room(i);
            out.push_str(&format!(
                "  {} = {} at ({}, {})\n",
                marker(i),
                room.name,
                room.x,
                room.y
            ));
        }

        let mut any = false;
        for &u in members {
            for &(v, cost) in graph.neighbors(u) {
                if v > u && graph.room(v).floor == *floor {
                    if !any {
                        out.push_str("  Walkways:\n");
                        any = true;
                    }
                    out.push_str(&format!(
                        "    {} -- {}  {:.2}\n",
                        graph.room(u).name,
                        graph.room(v).name,
                        cost
                    ));
                }
            }
        }
        out.push('\n');
    }

    let mut any = false;
    for u in 0..graph.len() {
        for &(v, cost) in graph.neighbors(u) {
            if v > u && graph.room(u).floor != graph.room(v).floor {
                if !any {
                    out.push_str("Floor changes:\n");
                    any = true;
                }
                out.push_str(&format!(
                    "  {} (floor {}) -- {} (floor {})  {:.2}\n",
                    graph.room(u).name,
                    graph.room(u).floor,
                    graph.room(v).name,
                    graph.room(v).floor,
                    cost
                ));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Room;

    fn room(name: &str, x: i32, y: i32, floor: i32) -> Room {
        Room::new(name, x, y, floor).unwrap()
    }

    #[test]
    fn renders_each_floor_with_legend_and_edges() {
        let g = Graph::build(
            vec![room("A21", 0, 0, 1), room("B10", 3, 4, 1), room("C05", 0, 0, 2)],
            30.0,
            1.0,
        )
        .unwrap();
        let map = render_map(&g);
        assert!(map.contains("Floor 1"));
        assert!(map.contains("Floor 2"));
        assert!(map.contains("A21"));
        assert!(map.contains("Walkways:"));
        assert!(map.contains("Floor changes:"));
    }

    #[test]
    fn scale_handles_flat_spans() {
        assert_eq!(scale(5, 5, 5, 10), 0);
        assert_eq!(scale(0, 0, 10, 11), 0);
        assert_eq!(scale(10, 0, 10, 11), 10);
    }
}
