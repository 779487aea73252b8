//! Routes across a synthetic city grid with both algorithms and reports how
//! much work each one did.

use clap::Parser;

use road_search::algorithms::astar::astar;
use road_search::algorithms::dijkstra::dijkstra;
use road_search::geo::Point;
use road_search::graph::Arc;
use road_search::graph::Graph;
use road_search::graph::NodeId;
use road_search::query::CostMode;
use road_search::query::EventLog;
use road_search::query::Query;
use road_search::search::SearchResult;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Grid side, in nodes.
    #[arg(short, long, env = "GRID_SIDE", default_value_t = 32)]
    pub side: usize,

    /// Minimise travel time instead of length.
    #[arg(short, long, default_value_t = false)]
    pub time: bool,
}

/// A `side`x`side` grid of two-way streets with block-ish spacing.
fn build_grid(side: usize) -> Graph {
    let points: Vec<Point> = (0..side * side)
        .map(|i| {
            Point::new(
                43.60 + (i / side) as f64 * 0.002,
                1.44 + (i % side) as f64 * 0.002,
            )
        })
        .collect();

    let at = |row: usize, col: usize| NodeId::new((row * side + col) as u32);
    let mut arcs = Vec::new();
    let mut link = |a: NodeId, b: NodeId, speed: f64| {
        let length = points[a.index()].distance_to(&points[b.index()]) * 1.2;
        arcs.push(Arc::new(a, b, length, speed));
        arcs.push(Arc::new(b, a, length, speed));
    };
    for row in 0..side {
        for col in 0..side {
            // Alternating speeds give the searches something to choose.
            let speed = if (row + col) % 2 == 0 { 50.0 } else { 90.0 };
            if col + 1 < side {
                link(at(row, col), at(row, col + 1), speed);
            }
            if row + 1 < side {
                link(at(row, col), at(row + 1, col), speed);
            }
        }
    }

    Graph::new("grid", points, arcs).expect("grid arcs are in range")
}

fn report(name: &str, result: &SearchResult, log: &EventLog) {
    match result {
        SearchResult::Optimal(path) => {
            println!(
                "{name}: {} nodes, {:.0}m, {:.0}s at legal speeds ({} settled)",
                path.size(),
                path.length(),
                path.minimum_travel_time(),
                log.settled_count(),
            );
        }
        SearchResult::Infeasible => println!("{name}: infeasible"),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let graph = build_grid(args.side);
    let mode = if args.time {
        CostMode::Time
    } else {
        CostMode::Length
    };
    let origin = NodeId::new(0);
    let destination = NodeId::new((args.side * args.side - 1) as u32);
    let query = Query::new(origin, destination, mode);

    println!(
        "grid {}x{} ({} nodes), {origin} -> {destination}, {mode:?}",
        args.side,
        args.side,
        graph.size(),
    );

    let mut log = EventLog::new();
    match dijkstra(&graph, &query, &mut log) {
        Ok(result) => report("dijkstra", &result, &log),
        Err(err) => eprintln!("dijkstra failed: {err}"),
    }

    let mut log = EventLog::new();
    match astar(&graph, &query, &mut log) {
        Ok(result) => report("a*", &result, &log),
        Err(err) => eprintln!("a* failed: {err}"),
    }
}
