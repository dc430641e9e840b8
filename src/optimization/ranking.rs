use crate::core::node::NodeId;
use crate::core::route::Route;
use crate::graph::combinations::RouteSequence;
use crate::optimization::evaluation::Evaluation;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// One ranked answer to a transfer query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPath {
    pub path: Vec<NodeId>,
    pub routes: Vec<Route>,
    pub bottleneck_capacity: Decimal,
    pub repetitions: Decimal,
    pub total_delivered: Decimal,
    pub total_cost: Decimal,
    pub unit_cost: Decimal,
}

impl RankedPath {
    pub fn new(sequence: RouteSequence, evaluation: Evaluation) -> Self {
        Self {
            path: sequence.path,
            routes: sequence.routes,
            bottleneck_capacity: evaluation.bottleneck_capacity,
            repetitions: evaluation.repetitions,
            total_delivered: evaluation.total_delivered,
            total_cost: evaluation.total_cost,
            unit_cost: evaluation.unit_cost,
        }
    }

    pub fn origin(&self) -> &NodeId {
        &self.path[0]
    }

    pub fn destination(&self) -> &NodeId {
        &self.path[self.path.len() - 1]
    }

    /// Number of hops.
    pub fn hops(&self) -> usize {
        self.routes.len()
    }
}

impl fmt::Display for RankedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<&str> = self.path.iter().map(|n| n.as_str()).collect();
        let carriers: Vec<&str> = self.routes.iter().map(|r| r.carrier().as_str()).collect();
        write!(
            f,
            "{} [{}]  cap {} x{} = {}  cost {} ({} / unit)",
            nodes.join(" → "),
            carriers.join(", "),
            self.bottleneck_capacity,
            self.repetitions,
            self.total_delivered,
            self.total_cost,
            self.unit_cost.round_dp(4)
        )
    }
}

/// Order candidates by total cost, drop duplicates and keep the best `top_n`.
///
/// The sort is stable, so equal costs keep the order in which the
/// candidates were produced. Two candidates are duplicates when they share
/// both node path and total cost; the same path with a different cost
/// (another carrier mix) is a distinct result.
pub fn rank(mut candidates: Vec<RankedPath>, top_n: usize) -> Vec<RankedPath> {
    candidates.sort_by(|a, b| a.total_cost.cmp(&b.total_cost));

    let mut seen: HashSet<(Vec<NodeId>, Decimal)> = HashSet::new();
    candidates.retain(|c| seen.insert((c.path.clone(), c.total_cost)));
    candidates.truncate(top_n);
    candidates
}

/// Bounded best-results list kept across iterations of a stochastic search.
///
/// Holds at most `capacity` entries with distinct node paths, ordered by
/// total cost. A new path enters while there is room, or by displacing the
/// current worst entry when it costs no more than it.
#[derive(Debug, Clone)]
pub struct BestList {
    capacity: usize,
    entries: Vec<RankedPath>,
}

impl BestList {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Offer a candidate. Returns whether it was admitted.
    pub fn offer(&mut self, candidate: RankedPath) -> bool {
        if self.capacity == 0 || self.entries.iter().any(|e| e.path == candidate.path) {
            return false;
        }
        if self.entries.len() < self.capacity {
            self.entries.push(candidate);
        } else {
            match self.entries.last_mut() {
                Some(worst) if candidate.total_cost <= worst.total_cost => *worst = candidate,
                _ => return false,
            }
        }
        self.entries.sort_by(|a, b| a.total_cost.cmp(&b.total_cost));
        true
    }

    pub fn best_cost(&self) -> Option<Decimal> {
        self.entries.first().map(|e| e.total_cost)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Final ranking of the accumulated entries.
    pub fn into_ranked(self) -> Vec<RankedPath> {
        rank(self.entries, self.capacity)
    }
}
