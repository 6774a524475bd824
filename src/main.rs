use anyhow::Result;
use clap::Parser;

mod dijkstra;
mod graph;
mod map_file;
mod menu;
mod metric;
mod room;
mod viz;

#[derive(Parser, Debug)]
#[command(name = "roomroute")]
#[command(about = "Interactive indoor navigation: load a room map, build the walk graph, query shortest routes.", long_about = None)]
struct Cli {
    /// Map file offered as the default when loading (name;x;y;floor records)
    #[arg(short, long, default_value_t = String::from("map.txt"))]
    map: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    menu::Session::new(cli.map).run()
}
