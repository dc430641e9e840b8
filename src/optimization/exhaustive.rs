use crate::core::cancel::CancellationToken;
use crate::core::error::{InvalidQuery, Result, SearchError};
use crate::core::node::NodeId;
use crate::graph::catalog::RouteCatalog;
use crate::graph::combinations::expand;
use crate::graph::paths::{enumerate_paths, enumerate_paths_into, Path};
use crate::optimization::evaluation::EvaluationStats;
use crate::optimization::ranking::{rank, RankedPath};
use log::debug;
use rust_decimal::Decimal;

/// Exact least-cost search by exhaustive enumeration.
///
/// Every simple path within the hop bound is expanded into every carrier
/// combination, each combination is priced for the requested quantity, and
/// the results are ranked by total cost.
///
/// # Examples
///
/// ```
/// use transfer_planner::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let routes: RouteSet = vec![
///     Route::new("A".into(), "C".into(), "T1".into(), dec!(50), dec!(500)).unwrap(),
///     Route::new("A".into(), "D".into(), "T1".into(), dec!(60), dec!(600)).unwrap(),
///     Route::new("C".into(), "E".into(), "T1".into(), dec!(30), dec!(300)).unwrap(),
/// ]
/// .into_iter()
/// .collect();
/// let catalog = RouteCatalog::new(routes);
///
/// let ranked = PathFinder::new(&catalog)
///     .find_best_paths(&"A".into(), &"E".into(), dec!(90), 1, 5)
///     .unwrap();
///
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].repetitions, dec!(3));
/// assert_eq!(ranked[0].total_cost, dec!(2400));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'a> {
    catalog: &'a RouteCatalog,
}

impl<'a> PathFinder<'a> {
    pub fn new(catalog: &'a RouteCatalog) -> Self {
        Self { catalog }
    }

    /// Rank the cheapest ways to move `quantity` from `origin` to `destination`.
    ///
    /// An unreachable destination gives an empty list. A non-positive
    /// quantity or a node missing from the catalog is an error, reported
    /// before any search work.
    pub fn find_best_paths(
        &self,
        origin: &NodeId,
        destination: &NodeId,
        quantity: Decimal,
        max_intermediate_hops: usize,
        top_n: usize,
    ) -> Result<Vec<RankedPath>> {
        self.find_best_paths_with(
            origin,
            destination,
            quantity,
            max_intermediate_hops,
            top_n,
            &CancellationToken::new(),
        )
    }

    pub fn find_best_paths_with(
        &self,
        origin: &NodeId,
        destination: &NodeId,
        quantity: Decimal,
        max_intermediate_hops: usize,
        top_n: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<RankedPath>> {
        validate_query(self.catalog, &[origin, destination], quantity)?;

        let paths = enumerate_paths(
            self.catalog,
            origin,
            destination,
            max_intermediate_hops,
            cancel,
        )?;
        self.rank_paths(&paths, quantity, top_n, cancel)
    }

    /// Rank the cheapest ways to deliver `quantity` into `destination` from
    /// any origin that can reach it within the hop bound.
    pub fn find_best_sources(
        &self,
        destination: &NodeId,
        quantity: Decimal,
        max_intermediate_hops: usize,
        top_n: usize,
    ) -> Result<Vec<RankedPath>> {
        self.find_best_sources_with(
            destination,
            quantity,
            max_intermediate_hops,
            top_n,
            &CancellationToken::new(),
        )
    }

    pub fn find_best_sources_with(
        &self,
        destination: &NodeId,
        quantity: Decimal,
        max_intermediate_hops: usize,
        top_n: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<RankedPath>> {
        validate_query(self.catalog, &[destination], quantity)?;

        let paths = enumerate_paths_into(self.catalog, destination, max_intermediate_hops, cancel)?;
        self.rank_paths(&paths, quantity, top_n, cancel)
    }

    fn rank_paths(
        &self,
        paths: &[Path],
        quantity: Decimal,
        top_n: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<RankedPath>> {
        let mut stats = EvaluationStats::default();
        let mut candidates = Vec::new();

        for path in paths {
            if cancel.is_cancelled() {
                return Err(SearchError::Cancelled);
            }
            for sequence in expand(self.catalog, path) {
                if let Some(evaluation) = stats.evaluate(&sequence.routes, quantity) {
                    candidates.push(RankedPath::new(sequence, evaluation));
                }
            }
        }

        debug!(
            "priced {} combinations over {} paths ({} degenerate, {} overflowed)",
            stats.evaluated,
            paths.len(),
            stats.degenerate,
            stats.overflowed
        );
        Ok(rank(candidates, top_n))
    }
}

/// Reject malformed queries before any search starts.
pub(crate) fn validate_query(
    catalog: &RouteCatalog,
    nodes: &[&NodeId],
    quantity: Decimal,
) -> Result<()> {
    if quantity <= Decimal::ZERO {
        return Err(InvalidQuery::NonPositiveQuantity(quantity).into());
    }
    for node in nodes {
        if !catalog.contains_node(node) {
            return Err(InvalidQuery::UnknownNode((*node).clone()).into());
        }
    }
    Ok(())
}
