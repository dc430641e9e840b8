//! Exhaustive least-cost routing example.
//!
//! Shows how repeating a multi-hop sequence in lockstep prices a delivery,
//! and how parallel carriers on the same hop rank as separate results.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use transfer_planner::core::carrier::Carrier;
use transfer_planner::core::node::NodeId;
use transfer_planner::core::route::{Route, RouteSet};
use transfer_planner::graph::catalog::RouteCatalog;
use transfer_planner::optimization::exhaustive::PathFinder;

fn route(from: &str, to: &str, carrier: &str, capacity: Decimal, cost: Decimal) -> Route {
    Route::new(
        NodeId::new(from),
        NodeId::new(to),
        Carrier::new(carrier),
        capacity,
        cost,
    )
    .expect("valid route")
}

fn main() {
    println!("╔════════════════════════════════════════════╗");
    println!("║  transfer-planner: Basic Routing Example   ║");
    println!("╚════════════════════════════════════════════╝\n");

    // --- Scenario 1: Lockstep repetitions ---
    println!("━━━ Scenario 1: Two-hop delivery of 90 units ━━━\n");

    let routes: RouteSet = vec![
        route("A", "C", "T1", dec!(50), dec!(500)),
        route("A", "D", "T1", dec!(60), dec!(600)),
        route("C", "E", "T1", dec!(30), dec!(300)),
    ]
    .into_iter()
    .collect();
    let catalog = RouteCatalog::new(routes);

    let ranked = PathFinder::new(&catalog)
        .find_best_paths(&"A".into(), &"E".into(), dec!(90), 1, 5)
        .expect("valid query");
    for (i, r) in ranked.iter().enumerate() {
        println!("  {}. {}", i + 1, r);
    }
    println!();

    // --- Scenario 2: Parallel carriers ---
    println!("━━━ Scenario 2: Competing carriers on one hop ━━━\n");

    let routes: RouteSet = vec![
        route("A", "C", "T2", dec!(50), dec!(520)),
        route("A", "C", "T1", dec!(50), dec!(500)),
        route("A", "B", "T1", dec!(100), dec!(120)),
        route("B", "C", "T1", dec!(25), dec!(90)),
    ]
    .into_iter()
    .collect();
    let catalog = RouteCatalog::new(routes);

    let ranked = PathFinder::new(&catalog)
        .find_best_paths(&"A".into(), &"C".into(), dec!(100), 2, 5)
        .expect("valid query");
    for (i, r) in ranked.iter().enumerate() {
        println!("  {}. {}", i + 1, r);
    }
}
