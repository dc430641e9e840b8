use crate::core::node::NodeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Signed quantity held by each node.
///
/// A positive balance is a surplus that can be shipped out, a negative
/// balance is a deficit that must be covered. The search core ignores
/// balances entirely; they only feed the supply planner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances {
    positions: HashMap<NodeId, Decimal>,
}

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, node: NodeId, amount: Decimal) {
        self.positions.insert(node, amount);
    }

    /// Balance of a node; unknown nodes hold zero.
    pub fn get(&self, node: &NodeId) -> Decimal {
        self.positions.get(node).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Nodes with a negative balance, largest shortfall first.
    /// Ties are broken by node id so the order is stable.
    pub fn deficits(&self) -> Vec<(NodeId, Decimal)> {
        let mut out: Vec<(NodeId, Decimal)> = self
            .positions
            .iter()
            .filter(|(_, amount)| **amount < Decimal::ZERO)
            .map(|(node, amount)| (node.clone(), *amount))
            .collect();
        out.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        out
    }

    pub fn has_surplus(&self, node: &NodeId) -> bool {
        self.get(node) > Decimal::ZERO
    }

    /// True when total supply exactly matches total demand.
    pub fn is_balanced(&self) -> bool {
        self.positions.values().sum::<Decimal>() == Decimal::ZERO
    }
}

impl FromIterator<(NodeId, Decimal)> for Balances {
    fn from_iter<T: IntoIterator<Item = (NodeId, Decimal)>>(iter: T) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}
