use crate::core::route::Route;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Throughput and cost of moving a quantity along one route sequence.
///
/// Every hop of the sequence is used in lockstep: one repetition moves
/// `bottleneck_capacity` units end to end and pays every hop once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Smallest per-use capacity along the sequence.
    pub bottleneck_capacity: Decimal,
    /// Uses of the whole sequence needed to move the requested quantity.
    pub repetitions: Decimal,
    /// Cost of one repetition (sum of hop costs).
    pub hop_cost: Decimal,
    pub total_cost: Decimal,
    /// Amount actually moved. May exceed the request; never less.
    pub total_delivered: Decimal,
    /// Reporting only. Rankings never look at it.
    pub unit_cost: Decimal,
}

/// Why a route sequence could not be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Empty sequence, or a bottleneck capacity that is not positive.
    Degenerate,
    /// A sum or product left the range of `Decimal`.
    Overflow,
}

/// Evaluate a route sequence for a requested quantity.
///
/// Sequences that cannot carry anything, or whose totals do not fit in a
/// `Decimal`, are rejected. Callers exclude them from rankings; they are
/// never priced at zero.
pub fn evaluate(routes: &[Route], quantity: Decimal) -> Result<Evaluation, Rejection> {
    let bottleneck_capacity = routes
        .iter()
        .map(|r| r.capacity())
        .min()
        .ok_or(Rejection::Degenerate)?;
    if bottleneck_capacity <= Decimal::ZERO || quantity <= Decimal::ZERO {
        return Err(Rejection::Degenerate);
    }

    let repetitions = quantity
        .checked_div(bottleneck_capacity)
        .ok_or(Rejection::Overflow)?
        .ceil();
    let hop_cost = routes
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.cost()))
        .ok_or(Rejection::Overflow)?;
    let total_cost = hop_cost.checked_mul(repetitions).ok_or(Rejection::Overflow)?;
    let total_delivered = bottleneck_capacity
        .checked_mul(repetitions)
        .ok_or(Rejection::Overflow)?;
    let unit_cost = total_cost
        .checked_div(total_delivered)
        .ok_or(Rejection::Overflow)?;

    Ok(Evaluation {
        bottleneck_capacity,
        repetitions,
        hop_cost,
        total_cost,
        total_delivered,
        unit_cost,
    })
}

/// Counters for one query, logged at debug level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationStats {
    pub evaluated: usize,
    pub degenerate: usize,
    pub overflowed: usize,
}

impl EvaluationStats {
    /// Evaluate and count the outcome.
    pub fn evaluate(&mut self, routes: &[Route], quantity: Decimal) -> Option<Evaluation> {
        self.evaluated += 1;
        match evaluate(routes, quantity) {
            Ok(evaluation) => Some(evaluation),
            Err(Rejection::Degenerate) => {
                self.degenerate += 1;
                None
            }
            Err(Rejection::Overflow) => {
                self.overflowed += 1;
                None
            }
        }
    }
}
