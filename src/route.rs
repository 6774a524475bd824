use std::time::SystemTime;

use anyhow::{Context, Result};
use clap::Parser;
use csv::Writer;
use medians::Medianf64;

mod dijkstra;
mod graph;
mod map_file;
mod metric;
mod room;

use graph::Graph;

#[derive(Parser, Debug)]
#[command(name = "route")]
#[command(about = "Build the walk graph from a room map and answer a single shortest-route query.", long_about = None)]
struct Cli {
    /// Path to the map file (name;x;y;floor records)
    #[arg(short, long)]
    map: String,

    /// Name of the starting room
    #[arg(short, long)]
    from: String,

    /// Name of the target room
    #[arg(short, long)]
    to: String,

    /// Maximum edge distance when connecting rooms
    #[arg(long, default_value_t = 21.0)]
    max_distance: f64,

    /// Penalty factor applied to squared floor differences
    #[arg(long, default_value_t = 1.0)]
    floor_weight: f64,

    /// Output CSV (step,room,x,y,floor,leg_cost,total_cost). If omitted, prints the route to stdout.
    #[arg(short, long)]
    out: Option<String>,

    /// Repeat the query this many times and report the median duration
    #[arg(long, default_value_t = 1)]
    runs: usize,
}

fn write_route_csv(path: &str, graph: &Graph, route: &[usize]) -> Result<()> {
    let mut wtr = Writer::from_path(path).with_context(|| format!("creating CSV {}", path))?;
    wtr.write_record(["step", "room", "x", "y", "floor", "leg_cost", "total_cost"])?;

    let mut total = 0.0_f64;
    for (step, &idx) in route.iter().enumerate() {
        let room = graph.room(idx);
        let leg = if step == 0 {
            0.0
        } else {
            graph.edge_cost(route[step - 1], idx).unwrap_or(0.0)
        };
        total += leg;
        wtr.write_record(&[
            step.to_string(),
            room.name.clone(),
            room.x.to_string(),
            room.y.to_string(),
            room.floor.to_string(),
            format!("{:.2}", leg),
            format!("{:.2}", total),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let rooms = map_file::load_map(&cli.map)?;
    println!("Loaded {} rooms from {}", rooms.len(), cli.map);

    let graph = Graph::build(rooms, cli.max_distance, cli.floor_weight)?;
    println!(
        "Graph: {} rooms, {} edges, {} pairs beyond reach",
        graph.len(),
        graph.edge_count(),
        graph.rejected_pairs()
    );

    let start = graph
        .index_of(&cli.from)
        .with_context(|| format!("unknown starting room {:?}", cli.from))?;
    let target = graph
        .index_of(&cli.to)
        .with_context(|| format!("unknown target room {:?}", cli.to))?;

    let now = SystemTime::now();
    let (path, cost) = dijkstra::shortest_path(&graph, start, target);
    if let Ok(elapsed) = now.elapsed() {
        println!("Query took {:.4} ms", elapsed.as_secs_f64() * 1000.0);
    }

    if cli.runs > 1 {
        let mut duration_millis = Vec::with_capacity(cli.runs);
        for _ in 0..cli.runs {
            let now = SystemTime::now();
            let _ = dijkstra::shortest_path(&graph, start, target);
            if let Ok(elapsed) = now.elapsed() {
                duration_millis.push(elapsed.as_secs_f64() * 1000.0);
            }
        }
        println!(
            "Median query time over {} runs: {:.4} ms",
            cli.runs,
            duration_millis.as_slice().medf_unchecked()
        );
    }

    if path.is_empty() {
        println!("{} is unreachable from {}", cli.to, cli.from);
        return Ok(());
    }

    if let Some(out_path) = cli.out {
        write_route_csv(&out_path, &graph, &path)?;
        println!("Wrote {} steps to {}", path.len(), out_path);
    } else {
        println!("{}", dijkstra::format_route(&graph, &path, cost));
    }

    Ok(())
}
