use crate::core::carrier::Carrier;
use crate::core::error::RouteError;
use crate::core::node::NodeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directed transfer route between two nodes.
///
/// One use of the route moves up to `capacity` units from `origin` to
/// `destination` and costs `cost`, regardless of how much of the capacity
/// is actually used. Routes are immutable once created.
///
/// # Examples
///
/// ```
/// use transfer_planner::core::carrier::Carrier;
/// use transfer_planner::core::node::NodeId;
/// use transfer_planner::core::route::Route;
/// use rust_decimal_macros::dec;
///
/// let route = Route::new(
///     NodeId::new("A"),
///     NodeId::new("C"),
///     Carrier::new("T1"),
///     dec!(50),
///     dec!(500),
/// )
/// .unwrap();
///
/// assert_eq!(route.capacity(), dec!(50));
/// assert_eq!(route.cost(), dec!(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    id: Uuid,
    origin: NodeId,
    destination: NodeId,
    carrier: Carrier,
    /// Amount transportable per use. Non-positive values are accepted here
    /// and rejected at evaluation time.
    capacity: Decimal,
    /// Price of one use.
    cost: Decimal,
}

impl Route {
    /// Create a new route with a random identifier.
    pub fn new(
        origin: NodeId,
        destination: NodeId,
        carrier: Carrier,
        capacity: Decimal,
        cost: Decimal,
    ) -> Result<Self, RouteError> {
        Self::with_id(Uuid::new_v4(), origin, destination, carrier, capacity, cost)
    }

    /// Create a route with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        origin: NodeId,
        destination: NodeId,
        carrier: Carrier,
        capacity: Decimal,
        cost: Decimal,
    ) -> Result<Self, RouteError> {
        if origin == destination {
            return Err(RouteError::SelfLoop(origin));
        }
        if cost < Decimal::ZERO {
            return Err(RouteError::NegativeCost {
                origin,
                destination,
                cost,
            });
        }
        Ok(Self {
            id,
            origin,
            destination,
            carrier,
            capacity,
            cost,
        })
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn origin(&self) -> &NodeId {
        &self.origin
    }

    pub fn destination(&self) -> &NodeId {
        &self.destination
    }

    pub fn carrier(&self) -> &Carrier {
        &self.carrier
    }

    pub fn capacity(&self) -> Decimal {
        self.capacity
    }

    pub fn cost(&self) -> Decimal {
        self.cost
    }

    /// True when one use of the route can carry nothing.
    pub fn is_degenerate(&self) -> bool {
        self.capacity <= Decimal::ZERO
    }
}

/// An ordered collection of routes, as loaded from a route table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn add(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All unique nodes referenced in this set, sorted.
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self
            .routes
            .iter()
            .flat_map(|r| [r.origin().clone(), r.destination().clone()])
            .collect();
        nodes.sort();
        nodes.dedup();
        nodes
    }

    /// All unique carriers referenced in this set, sorted.
    pub fn carriers(&self) -> Vec<Carrier> {
        let mut carriers: Vec<Carrier> = self.routes.iter().map(|r| r.carrier().clone()).collect();
        carriers.sort();
        carriers.dedup();
        carriers
    }
}

impl FromIterator<Route> for RouteSet {
    fn from_iter<T: IntoIterator<Item = Route>>(iter: T) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RouteSet {
    type Item = Route;
    type IntoIter = std::vec::IntoIter<Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn route(from: &str, to: &str, carrier: &str) -> Route {
        Route::new(from.into(), to.into(), carrier.into(), dec!(10), dec!(5)).unwrap()
    }

    #[test]
    fn test_route_creation() {
        let r = route("A", "B", "T1");
        assert_eq!(r.origin().as_str(), "A");
        assert_eq!(r.destination().as_str(), "B");
        assert_eq!(r.carrier().as_str(), "T1");
        assert!(!r.is_degenerate());
    }

    #[test]
    fn test_route_rejects_negative_cost() {
        let err = Route::new("A".into(), "B".into(), "T1".into(), dec!(10), dec!(-1)).unwrap_err();
        assert!(matches!(err, RouteError::NegativeCost { .. }));
    }

    #[test]
    fn test_route_rejects_self_loop() {
        let err = Route::new("A".into(), "A".into(), "T1".into(), dec!(10), dec!(1)).unwrap_err();
        assert_eq!(err, RouteError::SelfLoop(NodeId::new("A")));
    }

    #[test]
    fn test_zero_capacity_is_accepted_but_degenerate() {
        let r = Route::new("A".into(), "B".into(), "T1".into(), Decimal::ZERO, dec!(1)).unwrap();
        assert!(r.is_degenerate());
    }

    #[test]
    fn test_route_set_nodes_and_carriers() {
        let set: RouteSet = vec![route("A", "B", "T2"), route("B", "C", "T1"), route("A", "B", "T1")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.nodes().len(), 3);
        assert_eq!(set.carriers(), vec![Carrier::new("T1"), Carrier::new("T2")]);
    }
}
