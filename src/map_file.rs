use std::fs::File;
use std::io::Read;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use hashbrown::HashSet;

use crate::room::Room;

/// Symbols the map files sprinkle around values for emphasis. Stripped from
/// every field before parsing.
const DECORATIONS: &[char] = &['@', '#', '!', '$', '*'];

fn clean_field(raw: &str) -> String {
    raw.chars()
        .filter(|c| !DECORATIONS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn parse_int(raw: &str, what: &str, line: u64) -> Result<i32> {
    clean_field(raw)
        .parse::<i32>()
        .with_context(|| format!("line {}: {} {:?} is not an integer", line, what, raw))
}

/// Read `name;x;y;floor` records from a reader.
///
/// Malformed records, empty names, and duplicate names all fail the load;
/// an empty file is an error rather than an empty map.
pub fn read_rooms<R: Read>(reader: R) -> Result<Vec<Room>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut seen: HashSet<String> = HashSet::new();
    let mut rooms = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != 4 {
            bail!(
                "line {}: expected name;x;y;floor, got {} fields",
                line,
                record.len()
            );
        }

        let name = clean_field(&record[0]);
        let x = parse_int(&record[1], "x coordinate", line)?;
        let y = parse_int(&record[2], "y coordinate", line)?;
        let floor = parse_int(&record[3], "floor", line)?;

        let room = Room::new(&name, x, y, floor).with_context(|| format!("line {}", line))?;
        if !seen.insert(room.name.clone()) {
            bail!("line {}: duplicate room name {:?}", line, room.name);
        }
        rooms.push(room);
    }

    if rooms.is_empty() {
        bail!("map contains no rooms");
    }
    Ok(rooms)
}

/// Load a map file from disk.
pub fn load_map(path: &str) -> Result<Vec<Room>> {
    let file = File::open(path).with_context(|| format!("opening {}", path))?;
    read_rooms(file)
}
