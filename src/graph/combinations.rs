use crate::core::node::NodeId;
use crate::core::route::Route;
use crate::graph::catalog::RouteCatalog;
use serde::{Deserialize, Serialize};

/// A path with one concrete route chosen for every hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSequence {
    pub path: Vec<NodeId>,
    pub routes: Vec<Route>,
}

impl RouteSequence {
    /// Number of hops (routes) in the sequence.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Check that the routes chain exactly along the path.
    pub fn is_consistent(&self) -> bool {
        self.path.len() == self.routes.len() + 1
            && self.routes.iter().enumerate().all(|(i, r)| {
                r.origin() == &self.path[i] && r.destination() == &self.path[i + 1]
            })
    }
}

/// Expand a node path into every choice of concrete route per hop.
///
/// The result is the cartesian product of the parallel routes on each hop,
/// in catalog order with the first hop varying slowest. A hop with no
/// routes makes the whole path contribute nothing.
pub fn expand(catalog: &RouteCatalog, path: &[NodeId]) -> Vec<RouteSequence> {
    if path.len() < 2 {
        return Vec::new();
    }

    let options: Vec<&[Route]> = path
        .windows(2)
        .map(|hop| catalog.routes_between(&hop[0], &hop[1]))
        .collect();
    if options.iter().any(|o| o.is_empty()) {
        return Vec::new();
    }

    let mut partials: Vec<Vec<Route>> = vec![Vec::with_capacity(options.len())];
    for choices in &options {
        let mut next = Vec::with_capacity(partials.len() * choices.len());
        for partial in &partials {
            for route in choices.iter() {
                let mut extended = partial.clone();
                extended.push(route.clone());
                next.push(extended);
            }
        }
        partials = next;
    }

    partials
        .into_iter()
        .map(|routes| RouteSequence {
            path: path.to_vec(),
            routes,
        })
        .collect()
}

/// The sequence built from the cheapest route of every hop, if each hop has one.
pub fn cheapest_sequence(catalog: &RouteCatalog, path: &[NodeId]) -> Option<RouteSequence> {
    if path.len() < 2 {
        return None;
    }
    let routes = path
        .windows(2)
        .map(|hop| catalog.cheapest_between(&hop[0], &hop[1]).cloned())
        .collect::<Option<Vec<Route>>>()?;
    Some(RouteSequence {
        path: path.to_vec(),
        routes,
    })
}
