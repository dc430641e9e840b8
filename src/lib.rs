//! # transfer-planner
//!
//! Least-cost multi-hop transfer search over capacity-bounded route networks.
//!
//! Given a directed network of routes, each with a fixed per-use capacity
//! and a fixed per-use cost, this engine finds and ranks the cheapest ways
//! to move a required quantity from one node to another.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: nodes, carriers, routes, balances, errors
//! - **graph** — Route catalog, simple-path enumeration, carrier combinations
//! - **optimization** — Pricing, ranking, exhaustive search, ant-colony search, supply view
//! - **simulation** — Random network generation for stress testing

pub mod core;
pub mod graph;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::balance::Balances;
    pub use crate::core::cancel::CancellationToken;
    pub use crate::core::carrier::Carrier;
    pub use crate::core::error::{ConfigurationError, InvalidQuery, SearchError};
    pub use crate::core::node::NodeId;
    pub use crate::core::route::{Route, RouteSet};
    pub use crate::graph::catalog::RouteCatalog;
    pub use crate::optimization::aco::{search_best_paths_stochastic, AcoConfig, AntColony};
    pub use crate::optimization::exhaustive::PathFinder;
    pub use crate::optimization::ranking::RankedPath;
    pub use crate::optimization::supply::SupplyPlan;
}
