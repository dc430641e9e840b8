use crate::core::balance::Balances;
use crate::core::error::Result;
use crate::core::node::NodeId;
use crate::graph::catalog::RouteCatalog;
use crate::optimization::exhaustive::PathFinder;
use crate::optimization::ranking::RankedPath;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sourcing options for one node in deficit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyEntry {
    pub node: NodeId,
    /// Quantity the node is short (positive).
    pub shortfall: Decimal,
    /// Eligible single-path deliveries, cheapest first.
    pub options: Vec<RankedPath>,
}

impl SupplyEntry {
    pub fn best(&self) -> Option<&RankedPath> {
        self.options.first()
    }
}

/// Per-deficit view of the cheapest single-path sources.
///
/// For every node with a negative balance, ranks the paths that could
/// cover the whole shortfall from one origin. An origin is eligible when
/// its own surplus covers the shortfall, or when the first route leaving
/// it is tagged [`Carrier::UNRESTRICTED_SOURCE`](crate::core::carrier::Carrier::UNRESTRICTED_SOURCE).
///
/// Deficits are planned independently, so two entries may draw on the
/// same surplus. Solving all deficits jointly is a network-flow problem
/// and out of reach of this view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyPlan {
    pub entries: Vec<SupplyEntry>,
}

impl SupplyPlan {
    pub fn build(
        catalog: &RouteCatalog,
        balances: &Balances,
        max_intermediate_hops: usize,
        top_n: usize,
    ) -> Result<Self> {
        let finder = PathFinder::new(catalog);
        let mut entries = Vec::new();

        for (node, balance) in balances.deficits() {
            let shortfall = -balance;
            if !catalog.contains_node(&node) {
                warn!("deficit node {} has no routes; left uncovered", node);
                entries.push(SupplyEntry {
                    node,
                    shortfall,
                    options: Vec::new(),
                });
                continue;
            }

            let options: Vec<RankedPath> = finder
                .find_best_sources(&node, shortfall, max_intermediate_hops, usize::MAX)?
                .into_iter()
                .filter(|option| is_eligible(option, balances, shortfall))
                .take(top_n)
                .collect();

            debug!(
                "deficit {} ({}): {} eligible sources",
                node,
                shortfall,
                options.len()
            );
            entries.push(SupplyEntry {
                node,
                shortfall,
                options,
            });
        }

        Ok(Self { entries })
    }

    /// Deficits with no eligible source.
    pub fn uncovered(&self) -> impl Iterator<Item = &SupplyEntry> {
        self.entries.iter().filter(|e| e.options.is_empty())
    }

    /// Sum of the best option's cost over every covered deficit.
    /// `None` when the sum does not fit in a `Decimal`.
    pub fn best_total_cost(&self) -> Option<Decimal> {
        self.entries
            .iter()
            .filter_map(|e| e.best())
            .try_fold(Decimal::ZERO, |acc, option| acc.checked_add(option.total_cost))
    }
}

fn is_eligible(option: &RankedPath, balances: &Balances, shortfall: Decimal) -> bool {
    let unrestricted = option
        .routes
        .first()
        .map(|r| r.carrier().is_unrestricted_source())
        .unwrap_or(false);
    unrestricted || balances.get(option.origin()) >= shortfall
}

impl std::fmt::Display for SupplyPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Supply Plan ===")?;
        writeln!(f, "Deficits:        {}", self.entries.len())?;
        writeln!(f, "Uncovered:       {}", self.uncovered().count())?;
        match self.best_total_cost() {
            Some(cost) => writeln!(f, "Best-case cost:  {}", cost)?,
            None => writeln!(f, "Best-case cost:  (overflow)")?,
        }

        for entry in &self.entries {
            writeln!(f, "\n--- {} short {} ---", entry.node, entry.shortfall)?;
            if entry.options.is_empty() {
                writeln!(f, "  (no eligible source)")?;
            }
            for (i, option) in entry.options.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, option)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::carrier::Carrier;
    use crate::core::route::{Route, RouteSet};
    use rust_decimal_macros::dec;

    fn catalog() -> RouteCatalog {
        let r = |a: &str, b: &str, carrier: Carrier, cost: Decimal| {
            Route::new(a.into(), b.into(), carrier, dec!(100), cost).unwrap()
        };
        let routes: RouteSet = vec![
            r("A", "C", "T1".into(), dec!(10)),
            r("B", "C", "T1".into(), dec!(5)),
            r("M", "C", Carrier::unrestricted_source(), dec!(50)),
        ]
        .into_iter()
        .collect();
        RouteCatalog::new(routes)
    }

    #[test]
    fn test_surplus_and_unrestricted_sources() {
        let balances: Balances = vec![
            (NodeId::new("A"), dec!(80)),
            (NodeId::new("B"), dec!(20)),
            (NodeId::new("C"), dec!(-60)),
        ]
        .into_iter()
        .collect();

        let plan = SupplyPlan::build(&catalog(), &balances, 2, 5).unwrap();
        assert_eq!(plan.entries.len(), 1);

        let entry = &plan.entries[0];
        assert_eq!(entry.shortfall, dec!(60));
        // B is cheaper but holds only 20; M has no balance but an unrestricted route.
        let origins: Vec<&str> = entry.options.iter().map(|o| o.origin().as_str()).collect();
        assert_eq!(origins, vec!["A", "M"]);
        assert_eq!(plan.best_total_cost(), Some(dec!(10)));
        assert_eq!(plan.uncovered().count(), 0);
    }

    #[test]
    fn test_unknown_deficit_node_is_uncovered() {
        let balances: Balances = vec![(NodeId::new("Q"), dec!(-5))].into_iter().collect();
        let plan = SupplyPlan::build(&catalog(), &balances, 2, 5).unwrap();
        assert_eq!(plan.uncovered().count(), 1);
        assert!(plan.to_string().contains("no eligible source"));
    }

    #[test]
    fn test_best_total_cost_overflow() {
        let huge = Decimal::MAX / dec!(2) + Decimal::ONE;
        let routes: RouteSet = vec![
            Route::new("S".into(), "X".into(), "T1".into(), dec!(100), huge).unwrap(),
            Route::new("S".into(), "Y".into(), "T1".into(), dec!(100), huge).unwrap(),
        ]
        .into_iter()
        .collect();
        let balances: Balances = vec![
            (NodeId::new("S"), dec!(100)),
            (NodeId::new("X"), dec!(-10)),
            (NodeId::new("Y"), dec!(-10)),
        ]
        .into_iter()
        .collect();

        let plan = SupplyPlan::build(&RouteCatalog::new(routes), &balances, 0, 1).unwrap();
        assert_eq!(plan.entries.len(), 2);
        assert_eq!(plan.uncovered().count(), 0);
        assert_eq!(plan.best_total_cost(), None);
        assert!(plan.to_string().contains("(overflow)"));
    }
}
