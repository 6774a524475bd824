use anyhow::{bail, Result};

/// A named room on the indoor map.
///
/// The name alone is a room's identity: two records with the same name are
/// the same room no matter where they sit. Coordinates are in map units,
/// the floor is a small signed integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub floor: i32,
}

impl Room {
    /// Leading and trailing whitespace is trimmed off the name; a name that
    /// is empty after trimming is rejected.
    pub fn new(name: &str, x: i32, y: i32, floor: i32) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            bail!("room name must be a non-empty string");
        }
        Ok(Self {
            name: name.to_string(),
            x,
            y,
            floor,
        })
    }
}
