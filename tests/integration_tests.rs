use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use transfer_planner::core::balance::Balances;
use transfer_planner::core::carrier::Carrier;
use transfer_planner::core::error::{InvalidQuery, SearchError};
use transfer_planner::core::node::NodeId;
use transfer_planner::core::route::{Route, RouteSet};
use transfer_planner::graph::catalog::RouteCatalog;
use transfer_planner::optimization::aco::{search_best_paths_stochastic, AcoConfig, AntColony};
use transfer_planner::optimization::exhaustive::PathFinder;
use transfer_planner::optimization::supply::SupplyPlan;

fn route(from: &str, to: &str, carrier: &str, capacity: Decimal, cost: Decimal) -> Route {
    Route::new(
        NodeId::new(from),
        NodeId::new(to),
        Carrier::new(carrier),
        capacity,
        cost,
    )
    .unwrap()
}

fn catalog(routes: Vec<Route>) -> RouteCatalog {
    RouteCatalog::new(routes.into_iter().collect::<RouteSet>())
}

/// Regional distribution network used by several tests.
fn regional_network() -> RouteCatalog {
    catalog(vec![
        route("PORT", "HUB-N", "SEA", dec!(500), dec!(2_000)),
        route("PORT", "HUB-S", "RAIL", dec!(200), dec!(600)),
        route("PORT", "HUB-S", "ROAD", dec!(80), dec!(150)),
        route("HUB-N", "CITY", "ROAD", dec!(100), dec!(300)),
        route("HUB-S", "CITY", "ROAD", dec!(120), dec!(250)),
        route("HUB-S", "HUB-N", "RAIL", dec!(300), dec!(200)),
        route("PORT", "CITY", "AIR", dec!(40), dec!(900)),
    ])
}

#[test]
fn worked_example_two_hop_lockstep() {
    let c = catalog(vec![
        route("A", "C", "T1", dec!(50), dec!(500)),
        route("A", "D", "T1", dec!(60), dec!(600)),
        route("C", "E", "T1", dec!(30), dec!(300)),
    ]);
    let ranked = PathFinder::new(&c)
        .find_best_paths(&"A".into(), &"E".into(), dec!(90), 1, 5)
        .unwrap();

    let ace = ranked
        .iter()
        .find(|r| r.path == vec![NodeId::new("A"), NodeId::new("C"), NodeId::new("E")])
        .expect("A→C→E must be ranked");
    assert_eq!(ace.bottleneck_capacity, dec!(30));
    assert_eq!(ace.repetitions, dec!(3));
    assert_eq!(ace.total_cost, dec!(2400));
    assert_eq!(ace.total_delivered, dec!(90));
}

#[test]
fn unreachable_destination_is_empty_not_error() {
    let c = catalog(vec![
        route("A", "B", "T1", dec!(10), dec!(1)),
        route("B", "C", "T1", dec!(10), dec!(1)),
        route("Y", "Z", "T1", dec!(10), dec!(1)),
    ]);
    let ranked = PathFinder::new(&c)
        .find_best_paths(&"A".into(), &"Z".into(), dec!(10), 3, 5)
        .unwrap();
    assert!(ranked.is_empty());
}

#[test]
fn parallel_carriers_are_distinct_results() {
    let c = catalog(vec![
        route("A", "C", "T1", dec!(40), dec!(500)),
        route("A", "C", "T2", dec!(40), dec!(520)),
    ]);
    let ranked = PathFinder::new(&c)
        .find_best_paths(&"A".into(), &"C".into(), dec!(40), 0, 5)
        .unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].routes[0].carrier().as_str(), "T1");
    assert_eq!(ranked[1].routes[0].carrier().as_str(), "T2");
}

#[test]
fn regional_network_exact_ranking() {
    let c = regional_network();
    let ranked = PathFinder::new(&c)
        .find_best_paths(&"PORT".into(), &"CITY".into(), dec!(240), 2, 10)
        .unwrap();

    assert!(!ranked.is_empty());
    assert!(ranked.windows(2).all(|w| w[0].total_cost <= w[1].total_cost));
    assert!(ranked.iter().all(|r| r.total_delivered >= dec!(240)));

    let best = &ranked[0];
    let nodes: Vec<&str> = best.path.iter().map(|n| n.as_str()).collect();
    assert_eq!(nodes, vec!["PORT", "HUB-S", "CITY"]);
    assert_eq!(best.routes[0].carrier().as_str(), "ROAD");
    // Road PORT→HUB-S (cap 80) needs 3 trips: 3 × (150 + 250) = 1200,
    // beating rail at 2 × (600 + 250) = 1700.
    assert_eq!(best.repetitions, dec!(3));
    assert_eq!(best.total_cost, dec!(1200));
    assert!(ranked
        .iter()
        .any(|r| r.routes[0].carrier().as_str() == "RAIL" && r.total_cost == dec!(1700)));
}

#[test]
fn exact_and_stochastic_agree_on_small_network() {
    let c = regional_network();
    let exact = PathFinder::new(&c)
        .find_best_paths(&"PORT".into(), &"CITY".into(), dec!(240), 3, 5)
        .unwrap();

    let config = AcoConfig {
        agents: 20,
        iterations: 30,
        seed: Some(11),
        ..Default::default()
    };
    let approx = AntColony::new(&c, config)
        .unwrap()
        .search(&"PORT".into(), &"CITY".into(), dec!(240))
        .unwrap();

    assert_eq!(approx[0].total_cost, exact[0].total_cost);
    assert_eq!(approx[0].path, exact[0].path);
}

#[test]
fn stochastic_free_function_matches_shape() {
    let c = regional_network();
    let ranked = search_best_paths_stochastic(
        &c,
        &"PORT".into(),
        &"CITY".into(),
        dec!(100),
        10,
        10,
        1.0,
        2.0,
        0.2,
        100.0,
        3,
    )
    .unwrap();
    assert!(ranked.len() <= 3);
    for r in &ranked {
        assert_eq!(r.origin().as_str(), "PORT");
        assert_eq!(r.destination().as_str(), "CITY");
        assert_eq!(r.total_cost, r.routes.iter().map(|x| x.cost()).sum::<Decimal>() * r.repetitions);
    }
}

#[test]
fn invalid_queries_are_reported_before_search() {
    let c = regional_network();
    let finder = PathFinder::new(&c);
    assert_eq!(
        finder.find_best_paths(&"PORT".into(), &"CITY".into(), dec!(-1), 2, 5),
        Err(SearchError::InvalidQuery(InvalidQuery::NonPositiveQuantity(dec!(-1))))
    );
    assert_eq!(
        finder.find_best_paths(&"NOWHERE".into(), &"CITY".into(), dec!(1), 2, 5),
        Err(SearchError::InvalidQuery(InvalidQuery::UnknownNode(
            NodeId::new("NOWHERE")
        )))
    );
}

#[test]
fn unrestricted_source_tag_survives_ranking() {
    let c = catalog(vec![
        route("MINT", "BANK", Carrier::UNRESTRICTED_SOURCE, dec!(1_000), dec!(5)),
        route("BANK", "SHOP", "ARMORED", dec!(500), dec!(20)),
    ]);
    let ranked = PathFinder::new(&c)
        .find_best_paths(&"MINT".into(), &"SHOP".into(), dec!(600), 1, 5)
        .unwrap();
    assert_eq!(ranked.len(), 1);
    assert!(ranked[0].routes[0].carrier().is_unrestricted_source());
    assert_eq!(ranked[0].repetitions, dec!(2));
}

#[test]
fn supply_plan_over_regional_network() {
    let c = regional_network();
    let balances: Balances = vec![
        (NodeId::new("PORT"), dec!(300)),
        (NodeId::new("CITY"), dec!(-240)),
        (NodeId::new("HUB-N"), dec!(-60)),
    ]
    .into_iter()
    .collect();

    let plan = SupplyPlan::build(&c, &balances, 2, 3).unwrap();
    assert_eq!(plan.entries.len(), 2);
    // Largest shortfall first.
    assert_eq!(plan.entries[0].node.as_str(), "CITY");
    assert!(plan
        .entries
        .iter()
        .flat_map(|e| e.options.iter())
        .all(|o| o.origin().as_str() == "PORT"));
    assert_eq!(plan.uncovered().count(), 0);
}

#[test]
fn ranked_paths_serialize_to_json() {
    let c = regional_network();
    let ranked = PathFinder::new(&c)
        .find_best_paths(&"PORT".into(), &"CITY".into(), dec!(50), 1, 2)
        .unwrap();
    let json = serde_json::to_string(&ranked).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["path"][0], "PORT");
    assert!(parsed[0].get("total_cost").is_some());
    assert!(parsed[0]["routes"][0].get("carrier").is_some());
}
