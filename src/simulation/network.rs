//! Random route networks for stress tests and benchmarks.

use crate::core::carrier::Carrier;
use crate::core::node::NodeId;
use crate::core::route::{Route, RouteSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Configuration for generating a random route network.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub node_count: usize,
    /// Outgoing routes drawn per node. Duplicate pairs become parallel routes.
    pub routes_per_node: usize,
    /// Carrier tags to draw from.
    pub carriers: Vec<Carrier>,
    pub min_capacity: u32,
    pub max_capacity: u32,
    pub min_cost: u32,
    pub max_cost: u32,
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            node_count: 10,
            routes_per_node: 3,
            carriers: vec![Carrier::new("T1"), Carrier::new("T2")],
            min_capacity: 10,
            max_capacity: 100,
            min_cost: 50,
            max_cost: 1_000,
            seed: None,
        }
    }
}

/// Node name used by the generator for index `i`.
pub fn node_name(i: usize) -> NodeId {
    NodeId::new(format!("N{:03}", i))
}

/// Generate a random route network.
pub fn generate_random_network(config: &NetworkConfig) -> RouteSet {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut set = RouteSet::new();
    if config.node_count < 2 || config.carriers.is_empty() {
        return set;
    }

    let nodes: Vec<NodeId> = (0..config.node_count).map(node_name).collect();

    for (origin_idx, origin) in nodes.iter().enumerate() {
        for _ in 0..config.routes_per_node {
            let mut destination_idx = rng.gen_range(0..nodes.len());
            while destination_idx == origin_idx {
                destination_idx = rng.gen_range(0..nodes.len());
            }
            let carrier = &config.carriers[rng.gen_range(0..config.carriers.len())];
            let capacity = rng.gen_range(config.min_capacity..=config.max_capacity.max(config.min_capacity));
            let cost = rng.gen_range(config.min_cost..=config.max_cost.max(config.min_cost));

            // Endpoints differ and the cost is non-negative, so construction cannot fail.
            if let Ok(route) = Route::new(
                origin.clone(),
                nodes[destination_idx].clone(),
                carrier.clone(),
                Decimal::from(capacity),
                Decimal::from(cost),
            ) {
                set.add(route);
            }
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::catalog::RouteCatalog;
    use crate::optimization::exhaustive::PathFinder;
    use rust_decimal_macros::dec;

    #[test]
    fn test_random_network_generation() {
        let config = NetworkConfig {
            node_count: 5,
            routes_per_node: 3,
            seed: Some(1),
            ..Default::default()
        };
        let set = generate_random_network(&config);
        assert_eq!(set.len(), 15);
        assert!(set.routes().iter().all(|r| r.origin() != r.destination()));
        assert!(set.routes().iter().all(|r| !r.is_degenerate()));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = NetworkConfig {
            seed: Some(42),
            ..Default::default()
        };
        let a = generate_random_network(&config);
        let b = generate_random_network(&config);
        let shape = |s: &RouteSet| {
            s.routes()
                .iter()
                .map(|r| (r.origin().clone(), r.destination().clone(), r.cost()))
                .collect::<Vec<_>>()
        };
        assert_eq!(shape(&a), shape(&b));
    }

    #[test]
    fn test_random_network_search() {
        let config = NetworkConfig {
            node_count: 20,
            routes_per_node: 4,
            seed: Some(9),
            ..Default::default()
        };
        let catalog = RouteCatalog::new(generate_random_network(&config));
        let ranked = PathFinder::new(&catalog)
            .find_best_paths(&node_name(0), &node_name(19), dec!(250), 2, 10)
            .unwrap();
        assert!(ranked.len() <= 10);
        assert!(ranked.windows(2).all(|w| w[0].total_cost <= w[1].total_cost));
        assert!(ranked.iter().all(|r| r.total_delivered >= dec!(250)));
    }

    #[test]
    fn test_degenerate_config() {
        let config = NetworkConfig {
            node_count: 1,
            ..Default::default()
        };
        assert!(generate_random_network(&config).is_empty());
    }
}
