use crate::core::node::NodeId;
use crate::core::route::{Route, RouteSet};
use log::debug;
use petgraph::algo::has_path_connecting;
use petgraph::graphmap::DiGraphMap;
use std::collections::{BTreeSet, HashMap};

/// An immutable, indexed view over a set of transfer routes.
///
/// The catalog is built once and answers the two lookups every search
/// needs, "routes leaving X" and "routes between X and Y", from hash
/// indices. Parallel routes keep the order in which they were loaded, and
/// every search in this crate relies on that order for tie-breaking.
///
/// # Examples
///
/// ```
/// use transfer_planner::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let routes: RouteSet = vec![
///     Route::new("A".into(), "C".into(), "T1".into(), dec!(50), dec!(500)).unwrap(),
///     Route::new("A".into(), "C".into(), "T2".into(), dec!(50), dec!(520)).unwrap(),
///     Route::new("C".into(), "E".into(), "T1".into(), dec!(30), dec!(300)).unwrap(),
/// ]
/// .into_iter()
/// .collect();
///
/// let catalog = RouteCatalog::new(routes);
/// assert_eq!(catalog.routes_from(&NodeId::new("A")).len(), 2);
/// assert_eq!(catalog.routes_between(&"A".into(), &"C".into()).len(), 2);
/// assert!(catalog.routes_between(&"C".into(), &"A".into()).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RouteCatalog {
    routes: Vec<Route>,
    by_origin: HashMap<NodeId, Vec<Route>>,
    by_destination: HashMap<NodeId, Vec<Route>>,
    /// origin -> destination -> parallel routes
    by_hop: HashMap<NodeId, HashMap<NodeId, Vec<Route>>>,
    nodes: BTreeSet<NodeId>,
    /// Node ids mapped to the integer keys used in `graph`.
    node_index: HashMap<NodeId, u32>,
    graph: DiGraphMap<u32, ()>,
}

impl RouteCatalog {
    pub fn new(routes: RouteSet) -> Self {
        let mut catalog = Self {
            routes: Vec::with_capacity(routes.len()),
            by_origin: HashMap::new(),
            by_destination: HashMap::new(),
            by_hop: HashMap::new(),
            nodes: BTreeSet::new(),
            node_index: HashMap::new(),
            graph: DiGraphMap::new(),
        };
        let mut degenerate = 0usize;
        for route in routes {
            if route.is_degenerate() {
                degenerate += 1;
            }
            catalog.index(route);
        }
        debug!(
            "route catalog built: {} routes, {} nodes, {} degenerate",
            catalog.routes.len(),
            catalog.nodes.len(),
            degenerate
        );
        catalog
    }

    fn index(&mut self, route: Route) {
        let origin = route.origin().clone();
        let destination = route.destination().clone();

        let a = self.intern(&origin);
        let b = self.intern(&destination);
        self.graph.add_edge(a, b, ());

        self.by_origin
            .entry(origin.clone())
            .or_default()
            .push(route.clone());
        self.by_destination
            .entry(destination.clone())
            .or_default()
            .push(route.clone());
        self.by_hop
            .entry(origin)
            .or_default()
            .entry(destination)
            .or_default()
            .push(route.clone());
        self.routes.push(route);
    }

    fn intern(&mut self, node: &NodeId) -> u32 {
        if let Some(&idx) = self.node_index.get(node) {
            return idx;
        }
        let idx = self.node_index.len() as u32;
        self.node_index.insert(node.clone(), idx);
        self.nodes.insert(node.clone());
        self.graph.add_node(idx);
        idx
    }

    /// All routes leaving `node`, in load order.
    pub fn routes_from(&self, node: &NodeId) -> &[Route] {
        self.by_origin.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All routes arriving at `node`, in load order.
    pub fn routes_into(&self, node: &NodeId) -> &[Route] {
        self.by_destination
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All parallel routes from `a` to `b`, in load order.
    pub fn routes_between(&self, a: &NodeId, b: &NodeId) -> &[Route] {
        self.by_hop
            .get(a)
            .and_then(|targets| targets.get(b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The cheapest route from `a` to `b`. The first loaded wins ties.
    pub fn cheapest_between(&self, a: &NodeId, b: &NodeId) -> Option<&Route> {
        self.routes_between(a, b).iter().min_by_key(|r| r.cost())
    }

    /// Whether any route sequence, of any length, leads from `from` to `to`.
    pub fn is_reachable(&self, from: &NodeId, to: &NodeId) -> bool {
        match (self.node_index.get(from), self.node_index.get(to)) {
            (Some(&a), Some(&b)) => has_path_connecting(&self.graph, a, b, None),
            _ => false,
        }
    }

    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.nodes.contains(node)
    }

    /// All nodes, sorted.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Every distinct (origin, destination) pair served by at least one route, sorted.
    pub fn hop_keys(&self) -> Vec<(NodeId, NodeId)> {
        let mut keys: Vec<(NodeId, NodeId)> = self
            .by_hop
            .iter()
            .flat_map(|(origin, targets)| {
                targets
                    .keys()
                    .map(move |destination| (origin.clone(), destination.clone()))
            })
            .collect();
        keys.sort();
        keys
    }
}

impl From<RouteSet> for RouteCatalog {
    fn from(routes: RouteSet) -> Self {
        Self::new(routes)
    }
}
