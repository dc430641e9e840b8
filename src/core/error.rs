use crate::core::node::NodeId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised before any search work starts.
///
/// Per-candidate problems (degenerate routes, dead-end walks) are never
/// reported through this type; they are dropped from the results and
/// counted in the debug log instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] InvalidQuery),
    #[error("invalid search configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("search cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidQuery {
    #[error("requested quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("evaporation rate must lie in [0, 1), got {0}")]
    EvaporationRate(f64),
    #[error("{name} must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },
    #[error("{name} must not be negative, got {value}")]
    NegativeParameter { name: &'static str, value: f64 },
    #[error("agent step ceiling must be at least 1")]
    ZeroStepCeiling,
}

/// Errors from constructing a route record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("route cost must not be negative, got {cost} for {origin} -> {destination}")]
    NegativeCost {
        origin: NodeId,
        destination: NodeId,
        cost: Decimal,
    },
    #[error("route from {0} to itself is not a transfer")]
    SelfLoop(NodeId),
}

pub type Result<T> = std::result::Result<T, SearchError>;
