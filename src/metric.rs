use crate::room::Room;

/// Walking cost between two rooms: straight-line distance on the map plus
/// a penalty for changing floors. The penalty is
/// `floor_weight * (floor difference)^2`, so one long staircase costs more
/// than the same climb taken one floor at a time.
pub fn weighted_distance(a: &Room, b: &Room, floor_weight: f64) -> f64 {
    let dx = f64::from(b.x - a.x);
    let dy = f64::from(b.y - a.y);
    let euclidean = (dx * dx + dy * dy).sqrt();

    let floor_penalty = if a.floor == b.floor {
        0.0
    } else {
        let dfloor = f64::from(a.floor - b.floor);
        floor_weight * dfloor * dfloor
    };

    euclidean + floor_penalty
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str, x: i32, y: i32, floor: i32) -> Room {
        Room::new(name, x, y, floor).unwrap()
    }

    #[test]
    fn same_floor_is_plain_euclidean() {
        let a = room("A", 0, 0, 2);
        let b = room("B", 3, 4, 2);
        assert_eq!(weighted_distance(&a, &b, 5.0), 5.0);
    }

    #[test]
    fn floor_changes_add_the_squared_penalty() {
        let a = room("A", 0, 0, 1);
        let b = room("B", 3, 4, 3);
        assert_eq!(weighted_distance(&a, &b, 1.5), 5.0 + 1.5 * 4.0);
    }

    #[test]
    fn metric_is_symmetric() {
        let a = room("A", 2, 7, 1);
        let b = room("B", -3, 4, 4);
        assert_eq!(
            weighted_distance(&a, &b, 2.0),
            weighted_distance(&b, &a, 2.0)
        );
    }
}
