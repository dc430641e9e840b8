//! Ant-colony search on a generated network.
//!
//! Compares the stochastic search against exhaustive enumeration on a
//! network small enough for both.

use rust_decimal_macros::dec;
use transfer_planner::graph::catalog::RouteCatalog;
use transfer_planner::optimization::aco::{AcoConfig, AntColony};
use transfer_planner::optimization::exhaustive::PathFinder;
use transfer_planner::simulation::network::{generate_random_network, node_name, NetworkConfig};

fn main() {
    println!("╔════════════════════════════════════════════╗");
    println!("║  transfer-planner: Ant-Colony Search       ║");
    println!("╚════════════════════════════════════════════╝\n");

    let network = NetworkConfig {
        node_count: 25,
        routes_per_node: 4,
        seed: Some(2024),
        ..Default::default()
    };
    let catalog = RouteCatalog::new(generate_random_network(&network));
    let (origin, destination) = (node_name(0), node_name(24));
    let quantity = dec!(300);

    println!(
        "Network: {} nodes, {} routes. Moving {} from {} to {}.\n",
        catalog.node_count(),
        catalog.route_count(),
        quantity,
        origin,
        destination
    );

    println!("━━━ Exhaustive (up to 3 intermediate nodes) ━━━\n");
    let exact = PathFinder::new(&catalog)
        .find_best_paths(&origin, &destination, quantity, 3, 5)
        .expect("valid query");
    if exact.is_empty() {
        println!("  No path found.");
    }
    for (i, r) in exact.iter().enumerate() {
        println!("  {}. {}", i + 1, r);
    }

    println!("\n━━━ Ant colony (30 agents × 40 iterations) ━━━\n");
    let config = AcoConfig {
        agents: 30,
        iterations: 40,
        seed: Some(7),
        ..Default::default()
    };
    let approx = AntColony::new(&catalog, config)
        .and_then(|colony| colony.search(&origin, &destination, quantity))
        .expect("valid search");
    if approx.is_empty() {
        println!("  No path found.");
    }
    for (i, r) in approx.iter().enumerate() {
        println!("  {}. {}", i + 1, r);
    }
}
