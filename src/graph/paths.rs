use crate::core::cancel::CancellationToken;
use crate::core::error::{Result, SearchError};
use crate::core::node::NodeId;
use crate::core::route::Route;
use crate::graph::catalog::RouteCatalog;
use log::debug;

/// An ordered sequence of distinct nodes, origin first, destination last.
pub type Path = Vec<NodeId>;

/// Enumerate every simple path from `origin` to `destination` that passes
/// through at most `max_intermediate_hops` intermediate nodes.
///
/// # Algorithm
///
/// Depth-first search with an explicit stack of partial paths. A partial
/// path is extended along every outgoing route to a node it does not
/// already contain. Reaching `destination` emits the path and ends that
/// branch. Parallel routes to the same neighbour are followed once, so
/// every node sequence is produced exactly once.
///
/// Output order is deterministic: children are visited in catalog load
/// order, as a recursive DFS would visit them.
pub fn enumerate_paths(
    catalog: &RouteCatalog,
    origin: &NodeId,
    destination: &NodeId,
    max_intermediate_hops: usize,
    cancel: &CancellationToken,
) -> Result<Vec<Path>> {
    let mut paths = Vec::new();
    if origin == destination || !catalog.is_reachable(origin, destination) {
        return Ok(paths);
    }

    let mut frames = 0usize;
    let mut stack: Vec<Path> = vec![vec![origin.clone()]];

    while let Some(path) = stack.pop() {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        frames += 1;

        let current = &path[path.len() - 1];
        if current == destination {
            paths.push(path);
            continue;
        }

        // The nodes of `path` after the origin are all intermediates, so a
        // new non-destination node is allowed only while that count stays
        // within the bound.
        let may_add_intermediate = path.len() <= max_intermediate_hops;
        let next_nodes = distinct_neighbours(catalog.routes_from(current), |r| r.destination());

        for next in next_nodes.into_iter().rev() {
            if path.contains(next) {
                continue;
            }
            if next != destination && !may_add_intermediate {
                continue;
            }
            let mut extended = path.clone();
            extended.push(next.clone());
            stack.push(extended);
        }
    }

    debug!(
        "enumerated {} paths {} -> {} (max {} intermediate, {} frames)",
        paths.len(),
        origin,
        destination,
        max_intermediate_hops,
        frames
    );
    Ok(paths)
}

/// Enumerate every simple path, from any origin, that ends at `destination`
/// and passes through at most `max_intermediate_hops` intermediate nodes.
///
/// The search walks the reverse index backwards from `destination`; every
/// node it reaches is a possible origin. Paths are returned origin first.
pub fn enumerate_paths_into(
    catalog: &RouteCatalog,
    destination: &NodeId,
    max_intermediate_hops: usize,
    cancel: &CancellationToken,
) -> Result<Vec<Path>> {
    let mut paths = Vec::new();
    let mut frames = 0usize;
    // Frames hold the path reversed: destination first, candidate origin last.
    let mut stack: Vec<Path> = vec![vec![destination.clone()]];

    while let Some(reversed) = stack.pop() {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        frames += 1;

        if reversed.len() > 1 {
            paths.push(reversed.iter().rev().cloned().collect());
        }

        // Stepping back one more node turns the current origin into an
        // intermediate; the reversed path minus destination and the new
        // origin is what counts against the bound.
        if reversed.len() > max_intermediate_hops + 1 {
            continue;
        }

        let current = &reversed[reversed.len() - 1];
        let previous = distinct_neighbours(catalog.routes_into(current), |r| r.origin());
        for prev in previous.into_iter().rev() {
            if reversed.contains(prev) {
                continue;
            }
            let mut extended = reversed.clone();
            extended.push(prev.clone());
            stack.push(extended);
        }
    }

    debug!(
        "enumerated {} inbound paths -> {} (max {} intermediate, {} frames)",
        paths.len(),
        destination,
        max_intermediate_hops,
        frames
    );
    Ok(paths)
}

/// Neighbour nodes of a route list, first occurrence order, duplicates removed.
fn distinct_neighbours<'a>(
    routes: &'a [Route],
    endpoint: impl Fn(&'a Route) -> &'a NodeId,
) -> Vec<&'a NodeId> {
    let mut out: Vec<&NodeId> = Vec::with_capacity(routes.len());
    for route in routes {
        let node = endpoint(route);
        if !out.contains(&node) {
            out.push(node);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::route::RouteSet;
    use rust_decimal_macros::dec;

    fn catalog(edges: &[(&str, &str)]) -> RouteCatalog {
        let routes: RouteSet = edges
            .iter()
            .map(|(a, b)| {
                Route::new((*a).into(), (*b).into(), "T1".into(), dec!(10), dec!(1)).unwrap()
            })
            .collect();
        RouteCatalog::new(routes)
    }

    fn names(paths: &[Path]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.iter().map(|n| n.as_str()).collect::<Vec<_>>().join(">"))
            .collect()
    }

    #[test]
    fn test_direct_and_two_hop() {
        let c = catalog(&[("A", "B"), ("B", "C"), ("A", "C")]);
        let paths =
            enumerate_paths(&c, &"A".into(), &"C".into(), 1, &CancellationToken::new()).unwrap();
        assert_eq!(names(&paths), vec!["A>B>C", "A>C"]);
    }

    #[test]
    fn test_zero_hops_only_direct() {
        let c = catalog(&[("A", "B"), ("B", "C"), ("A", "C")]);
        let paths =
            enumerate_paths(&c, &"A".into(), &"C".into(), 0, &CancellationToken::new()).unwrap();
        assert_eq!(names(&paths), vec!["A>C"]);
    }

    #[test]
    fn test_hop_bound_is_respected() {
        let c = catalog(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")]);
        let token = CancellationToken::new();
        assert!(enumerate_paths(&c, &"A".into(), &"E".into(), 2, &token)
            .unwrap()
            .is_empty());
        let paths = enumerate_paths(&c, &"A".into(), &"E".into(), 3, &token).unwrap();
        assert_eq!(names(&paths), vec!["A>B>C>D>E"]);
    }

    #[test]
    fn test_cycles_are_not_followed() {
        let c = catalog(&[("A", "B"), ("B", "A"), ("B", "C"), ("C", "B")]);
        let paths =
            enumerate_paths(&c, &"A".into(), &"C".into(), 5, &CancellationToken::new()).unwrap();
        assert_eq!(names(&paths), vec!["A>B>C"]);
    }

    #[test]
    fn test_parallel_routes_yield_one_node_sequence() {
        let c = catalog(&[("A", "B"), ("A", "B"), ("B", "C")]);
        let paths =
            enumerate_paths(&c, &"A".into(), &"C".into(), 1, &CancellationToken::new()).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_unreachable_destination() {
        let c = catalog(&[("A", "B")]);
        let token = CancellationToken::new();
        assert!(enumerate_paths(&c, &"A".into(), &"Z".into(), 3, &token)
            .unwrap()
            .is_empty());
        assert!(enumerate_paths(&c, &"A".into(), &"A".into(), 3, &token)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_cancelled_enumeration() {
        let c = catalog(&[("A", "B"), ("B", "C")]);
        let token = CancellationToken::new();
        token.cancel();
        let err = enumerate_paths(&c, &"A".into(), &"C".into(), 3, &token).unwrap_err();
        assert_eq!(err, SearchError::Cancelled);
    }

    #[test]
    fn test_inbound_paths() {
        let c = catalog(&[("A", "C"), ("B", "C"), ("D", "A"), ("C", "E")]);
        let token = CancellationToken::new();
        let direct = enumerate_paths_into(&c, &"C".into(), 0, &token).unwrap();
        assert_eq!(names(&direct), vec!["A>C", "B>C"]);
        let mut all = names(&enumerate_paths_into(&c, &"C".into(), 1, &token).unwrap());
        all.sort();
        assert_eq!(all, vec!["A>C", "B>C", "D>A>C"]);
    }
}
