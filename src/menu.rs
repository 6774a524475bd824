use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

use crate::dijkstra::{format_route, shortest_path};
use crate::graph::Graph;
use crate::map_file;
use crate::room::Room;
use crate::viz::render_map;

pub const RECOMMENDED_MAX_DISTANCE: f64 = 21.0;
pub const RECOMMENDED_FLOOR_WEIGHT: f64 = 1.0;

/// Interactive menu session. Owns the loaded rooms and the built graph
/// between actions and refuses out-of-order actions with a short notice.
///
/// Domain problems (missing file, bad record, unknown room) are printed
/// and the menu continues; only errors on stdin itself end the session.
pub struct Session {
    default_map: String,
    rooms: Option<Vec<Room>>,
    graph: Option<Graph>,
}

impl Session {
    pub fn new(default_map: String) -> Self {
        Self {
            default_map,
            rooms: None,
            graph: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        println!();
        println!("Recommended graph settings:");
        println!("  maximum edge distance: {}", RECOMMENDED_MAX_DISTANCE);
        println!("  floor weight: {}", RECOMMENDED_FLOOR_WEIGHT);
        println!("Press enter at the prompts of option 2 to accept them.");

        loop {
            print_menu();
            let choice = prompt("Select an option: ")?;
            match choice.as_str() {
                "1" => self.load()?,
                "2" => self.build()?,
                "3" => self.query()?,
                "4" => self.visualize(),
                "5" => {
                    println!("Exiting.");
                    return Ok(());
                }
                other => println!("Unknown option {:?}, pick 1-5.", other),
            }
        }
    }

    fn load(&mut self) -> Result<()> {
        let line = prompt(&format!("Map file [{}]: ", self.default_map))?;
        let path = if line.is_empty() {
            self.default_map.clone()
        } else {
            line
        };
        match map_file::load_map(&path) {
            Ok(rooms) => {
                println!("Loaded {} rooms from {}:", rooms.len(), path);
                for room in &rooms {
                    println!("  {} at ({}, {}) floor {}", room.name, room.x, room.y, room.floor);
                }
                self.rooms = Some(rooms);
                // Any previously built graph describes the old map.
                self.graph = None;
            }
            Err(err) => println!("Failed to load map: {:#}", err),
        }
        Ok(())
    }

    fn build(&mut self) -> Result<()> {
        let Some(rooms) = self.rooms.clone() else {
            println!("Load a map first (option 1).");
            return Ok(());
        };

        let max_distance = prompt_f64(
            &format!("Maximum edge distance [{}]: ", RECOMMENDED_MAX_DISTANCE),
            RECOMMENDED_MAX_DISTANCE,
        )?;
        let floor_weight = prompt_f64(
            &format!("Floor weight [{}]: ", RECOMMENDED_FLOOR_WEIGHT),
            RECOMMENDED_FLOOR_WEIGHT,
        )?;

        match Graph::build(rooms, max_distance, floor_weight) {
            Ok(graph) => {
                print_graph(&graph);
                self.graph = Some(graph);
            }
            Err(err) => println!("Failed to build graph: {:#}", err),
        }
        Ok(())
    }

    fn query(&self) -> Result<()> {
        let Some(graph) = &self.graph else {
            println!("Create the graph first (option 2).");
            return Ok(());
        };

        loop {
            let Some(start) = pick_room(graph, "starting")? else {
                return Ok(());
            };
            println!("Starting room: {}", graph.room(start).name);

            let Some(target) = pick_room(graph, "target")? else {
                return Ok(());
            };
            println!("Target room: {}", graph.room(target).name);

            let (path, cost) = shortest_path(graph, start, target);
            if path.is_empty() {
                println!(
                    "{} is unreachable from {}.",
                    graph.room(target).name,
                    graph.room(start).name
                );
            } else {
                println!("{}", format_route(graph, &path, cost));
            }
        }
    }

    fn visualize(&self) {
        match &self.graph {
            Some(graph) => print!("{}", render_map(graph)),
            None => println!("Create the graph first (option 2)."),
        }
    }
}

fn print_menu() {
    println!();
    println!("=========================");
    println!("          MENU");
    println!("=========================");
    println!("1) Load map");
    println!("2) Create graph");
    println!("3) Find the shortest path between two rooms");
    println!("4) Visualize map");
    println!("5) Exit");
    println!();
}

fn print_graph(graph: &Graph) {
    let names: Vec<&str> = graph.rooms().iter().map(|r| r.name.as_str()).collect();
    println!();
    println!("Rooms:");
    println!("  {}", names.join(", "));
    println!(
        "Connections ({} edges, {} pairs beyond reach):",
        graph.edge_count(),
        graph.rejected_pairs()
    );
    if graph.edge_count() == 0 {
        println!("  none");
    }
    for u in 0..graph.len() {
        for &(v, cost) in graph.neighbors(u) {
            if v > u {
                println!("  {} -- {}  {:.2}", graph.room(u).name, graph.room(v).name, cost);
            }
        }
    }
}

/// Prompt until the user names a room that exists. Empty input goes back
/// to the menu.
fn pick_room(graph: &Graph, which: &str) -> Result<Option<usize>> {
    loop {
        let line = prompt(&format!("Name of the {} room (enter to go back): ", which))?;
        if line.is_empty() {
            return Ok(None);
        }
        match graph.index_of(&line) {
            Some(idx) => return Ok(Some(idx)),
            None => {
                println!("No room called {:?}. Known rooms:", line);
                for room in graph.rooms() {
                    println!("  {}", room.name);
                }
            }
        }
    }
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        bail!("end of input");
    }
    Ok(line.trim().to_string())
}

/// Prompt for a non-negative number; empty input accepts the default.
fn prompt_f64(msg: &str, default: f64) -> Result<f64> {
    loop {
        let line = prompt(msg)?;
        if line.is_empty() {
            return Ok(default);
        }
        match line.parse::<f64>() {
            Ok(v) if v >= 0.0 => return Ok(v),
            _ => println!("Enter a non-negative number, or press enter for {}.", default),
        }
    }
}
