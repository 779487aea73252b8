use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use road_search::algorithms::astar::astar;
use road_search::algorithms::dijkstra::dijkstra;
use road_search::geo::Point;
use road_search::graph::Arc;
use road_search::graph::Graph;
use road_search::graph::NodeId;
use road_search::query::CostMode;
use road_search::query::Query;
use road_search::query::SilentObserver;

/// A `side`x`side` road grid with deterministically wiggled arc lengths.
fn city_grid(side: usize, seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let speeds = [50.0, 80.0, 110.0, 130.0];

    let points: Vec<Point> = (0..side * side)
        .map(|i| {
            Point::new(
                43.60 + (i / side) as f64 * 0.005,
                1.44 + (i % side) as f64 * 0.005,
            )
        })
        .collect();

    let at = |row: usize, col: usize| NodeId::new((row * side + col) as u32);
    let mut arcs = Vec::new();
    let mut link = |rng: &mut ChaCha8Rng, a: NodeId, b: NodeId| {
        let length =
            points[a.index()].distance_to(&points[b.index()]) * rng.random_range(1.0..1.4);
        let speed = speeds[rng.random_range(0..speeds.len())];
        arcs.push(Arc::new(a, b, length, speed));
        arcs.push(Arc::new(b, a, length, speed));
    };
    for row in 0..side {
        for col in 0..side {
            if col + 1 < side {
                link(&mut rng, at(row, col), at(row, col + 1));
            }
            if row + 1 < side {
                link(&mut rng, at(row, col), at(row + 1, col));
            }
        }
    }

    Graph::new("city-grid", points, arcs).expect("grid arcs are in range")
}

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Grid Routing");

    for side in [16usize, 32, 64] {
        let graph = city_grid(side, side as u64);
        let corner_to_corner = Query::new(
            NodeId::new(0),
            NodeId::new((side * side - 1) as u32),
            CostMode::Time,
        );

        group.bench_with_input(
            BenchmarkId::new("dijkstra", format!("{side}x{side}")),
            &graph,
            |b, graph| {
                b.iter(|| dijkstra(graph, &corner_to_corner, &mut SilentObserver).unwrap())
            },
        );
        group.bench_with_input(
            BenchmarkId::new("astar", format!("{side}x{side}")),
            &graph,
            |b, graph| b.iter(|| astar(graph, &corner_to_corner, &mut SilentObserver).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
