//! Ant-colony search for cheap transfer paths.
//!
//! Exhaustive enumeration grows exponentially with the hop bound. On large
//! networks this module samples paths instead: a colony of agents walks
//! from origin to destination choosing each hop at random, biased towards
//! hops that are cheap and that carried cheap paths in earlier iterations.
//!
//! # Algorithm
//!
//! 1. Every hop in the catalog starts with pheromone 1.0.
//! 2. Each iteration, every agent builds one simple path. At each node it
//!    picks an outgoing route to an unvisited node with probability
//!    proportional to `pheromone^alpha * (1 / cost)^beta`.
//! 3. Each completed path is priced with the cheapest route per hop, using
//!    the same bottleneck and repetition rules as the exact search.
//! 4. The iteration's paths are merged into a bounded best list.
//! 5. All pheromone evaporates by `evaporation_rate`, then the cheapest
//!    paths of the iteration deposit `deposit_constant / total_cost` on
//!    every hop they use.
//!
//! Agents of one iteration only read the pheromone table; it is written
//! between iterations. The table lives for one run and is dropped with it.

use crate::core::cancel::CancellationToken;
use crate::core::error::{ConfigurationError, Result, SearchError};
use crate::core::node::NodeId;
use crate::core::route::Route;
use crate::graph::catalog::RouteCatalog;
use crate::graph::combinations::cheapest_sequence;
use crate::graph::paths::Path;
use crate::optimization::evaluation::EvaluationStats;
use crate::optimization::exhaustive::validate_query;
use crate::optimization::ranking::{BestList, RankedPath};
use log::{debug, warn};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Floor applied to hop costs in the selection weight, so free routes get
/// a very large but finite attractiveness.
pub const MIN_HOP_COST: f64 = 1e-9;

const INITIAL_PHEROMONE: f64 = 1.0;

/// Parameters of one ant-colony run.
#[derive(Debug, Clone, PartialEq)]
pub struct AcoConfig {
    /// Agents launched per iteration.
    pub agents: usize,
    pub iterations: usize,
    /// Weight of pheromone in hop selection.
    pub alpha: f64,
    /// Weight of inverse cost in hop selection.
    pub beta: f64,
    /// Fraction of pheromone lost per iteration, in [0, 1).
    pub evaporation_rate: f64,
    /// Numerator of the per-path deposit.
    pub deposit_constant: f64,
    pub top_n: usize,
    /// How many of an iteration's cheapest paths deposit pheromone.
    pub elite_count: usize,
    /// Hops an agent may take before its walk is abandoned.
    /// `None` uses the catalog's node count.
    pub max_steps: Option<usize>,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            agents: 10,
            iterations: 50,
            alpha: 1.0,
            beta: 2.0,
            evaporation_rate: 0.1,
            deposit_constant: 100.0,
            top_n: 5,
            elite_count: 5,
            max_steps: None,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Check parameters that would make the run meaningless.
    ///
    /// Zero agents or zero iterations are valid and produce no results.
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("deposit_constant", self.deposit_constant),
            ("evaporation_rate", self.evaporation_rate),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFiniteParameter { name, value });
            }
        }
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("deposit_constant", self.deposit_constant),
        ] {
            if value < 0.0 {
                return Err(ConfigurationError::NegativeParameter { name, value });
            }
        }
        if !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err(ConfigurationError::EvaporationRate(self.evaporation_rate));
        }
        if self.max_steps == Some(0) {
            return Err(ConfigurationError::ZeroStepCeiling);
        }
        Ok(())
    }
}

/// Per-hop pheromone levels for a single run.
#[derive(Debug, Clone, Default)]
pub struct PheromoneTable {
    /// origin -> destination -> level
    levels: HashMap<NodeId, HashMap<NodeId, f64>>,
}

impl PheromoneTable {
    /// A table holding `initial` on every hop served by the catalog.
    pub fn uniform(catalog: &RouteCatalog, initial: f64) -> Self {
        let mut levels: HashMap<NodeId, HashMap<NodeId, f64>> = HashMap::new();
        for (origin, destination) in catalog.hop_keys() {
            levels.entry(origin).or_default().insert(destination, initial);
        }
        Self { levels }
    }

    /// Pheromone on the hop `a -> b`; zero for hops never seen.
    pub fn get(&self, a: &NodeId, b: &NodeId) -> f64 {
        self.levels
            .get(a)
            .and_then(|targets| targets.get(b))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.levels.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scale every level by `1 - rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for level in self.levels.values_mut().flat_map(HashMap::values_mut) {
            *level *= keep;
        }
    }

    /// Add `amount` to every hop along `path`.
    pub fn deposit(&mut self, path: &[NodeId], amount: f64) {
        for hop in path.windows(2) {
            *self
                .levels
                .entry(hop[0].clone())
                .or_default()
                .entry(hop[1].clone())
                .or_insert(0.0) += amount;
        }
    }
}

/// How one agent's walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Walk {
    Reached(Path),
    DeadEnd,
    StepLimit,
}

#[derive(Debug, Default)]
struct RunStats {
    reached: usize,
    dead_ends: usize,
    step_limits: usize,
}

/// A configured ant-colony search over one catalog.
#[derive(Debug, Clone)]
pub struct AntColony<'a> {
    catalog: &'a RouteCatalog,
    config: AcoConfig,
}

impl<'a> AntColony<'a> {
    pub fn new(catalog: &'a RouteCatalog, config: AcoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Search for cheap ways to move `quantity` from `origin` to `destination`.
    ///
    /// Agents that never reach the destination are discarded; if none ever
    /// does, the result is empty.
    pub fn search(
        &self,
        origin: &NodeId,
        destination: &NodeId,
        quantity: Decimal,
    ) -> Result<Vec<RankedPath>> {
        self.search_with(origin, destination, quantity, &CancellationToken::new())
    }

    pub fn search_with(
        &self,
        origin: &NodeId,
        destination: &NodeId,
        quantity: Decimal,
        cancel: &CancellationToken,
    ) -> Result<Vec<RankedPath>> {
        validate_query(self.catalog, &[origin, destination], quantity)?;
        if origin == destination {
            return Ok(Vec::new());
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let max_steps = self
            .config
            .max_steps
            .unwrap_or_else(|| self.catalog.node_count().max(1));

        let mut pheromones = PheromoneTable::uniform(self.catalog, INITIAL_PHEROMONE);
        let mut best = BestList::new(self.config.top_n);
        let mut stats = EvaluationStats::default();
        let mut run = RunStats::default();

        for iteration in 0..self.config.iterations {
            let mut found: Vec<RankedPath> = Vec::with_capacity(self.config.agents);

            for _ in 0..self.config.agents {
                if cancel.is_cancelled() {
                    warn!("ant colony cancelled at iteration {}", iteration);
                    return Err(SearchError::Cancelled);
                }
                let path = match self.walk(origin, destination, max_steps, &pheromones, &mut rng) {
                    Walk::Reached(path) => path,
                    Walk::DeadEnd => {
                        run.dead_ends += 1;
                        continue;
                    }
                    Walk::StepLimit => {
                        run.step_limits += 1;
                        continue;
                    }
                };
                run.reached += 1;
                let Some(sequence) = cheapest_sequence(self.catalog, &path) else {
                    continue;
                };
                if let Some(evaluation) = stats.evaluate(&sequence.routes, quantity) {
                    found.push(RankedPath::new(sequence, evaluation));
                }
            }

            found.sort_by(|a, b| a.total_cost.cmp(&b.total_cost));
            for candidate in &found {
                best.offer(candidate.clone());
            }

            pheromones.evaporate(self.config.evaporation_rate);
            for candidate in found.iter().take(self.config.elite_count) {
                if candidate.total_cost <= Decimal::ZERO {
                    continue;
                }
                if let Some(cost) = candidate.total_cost.to_f64() {
                    pheromones.deposit(&candidate.path, self.config.deposit_constant / cost);
                }
            }

            debug!(
                "iteration {}: {} paths, iteration best {:?}, overall best {:?}",
                iteration,
                found.len(),
                found.first().map(|c| c.total_cost),
                best.best_cost()
            );
        }

        debug!(
            "ant colony {} -> {}: {} walks reached, {} dead ends, {} hit the {}-step ceiling, {} degenerate, {} overflowed",
            origin,
            destination,
            run.reached,
            run.dead_ends,
            run.step_limits,
            max_steps,
            stats.degenerate,
            stats.overflowed
        );
        if run.step_limits > 0 {
            warn!(
                "{} agent walks exceeded the {}-step ceiling",
                run.step_limits, max_steps
            );
        }
        Ok(best.into_ranked())
    }

    /// Build one path by repeated weighted hop selection.
    fn walk<R: Rng>(
        &self,
        origin: &NodeId,
        destination: &NodeId,
        max_steps: usize,
        pheromones: &PheromoneTable,
        rng: &mut R,
    ) -> Walk {
        let mut path: Path = vec![origin.clone()];

        for _ in 0..max_steps {
            let current = &path[path.len() - 1];
            let candidates: Vec<&Route> = self
                .catalog
                .routes_from(current)
                .iter()
                .filter(|r| !path.contains(r.destination()))
                .collect();
            if candidates.is_empty() {
                return Walk::DeadEnd;
            }

            let chosen = candidates[self.select(&candidates, pheromones, rng)];
            let next = chosen.destination().clone();
            let arrived = &next == destination;
            path.push(next);
            if arrived {
                return Walk::Reached(path);
            }
        }
        Walk::StepLimit
    }

    /// Index of the sampled candidate.
    ///
    /// Weights are scaled by their maximum before sampling. Candidates whose
    /// weight overflowed to infinity win outright; when every weight is zero
    /// the pick is uniform.
    fn select<R: Rng>(
        &self,
        candidates: &[&Route],
        pheromones: &PheromoneTable,
        rng: &mut R,
    ) -> usize {
        let weights: Vec<f64> = candidates
            .iter()
            .map(|route| {
                let tau = pheromones.get(route.origin(), route.destination());
                let cost = route.cost().to_f64().unwrap_or(f64::MAX).max(MIN_HOP_COST);
                tau.powf(self.config.alpha) * (1.0 / cost).powf(self.config.beta)
            })
            .collect();

        let max = weights.iter().copied().fold(0.0_f64, f64::max);
        if max.is_infinite() {
            let dominant: Vec<usize> = weights
                .iter()
                .enumerate()
                .filter(|(_, w)| w.is_infinite())
                .map(|(i, _)| i)
                .collect();
            return dominant[rng.gen_range(0..dominant.len())];
        }
        if max > 0.0 {
            let scaled: Vec<f64> = weights.iter().map(|w| w / max).collect();
            if let Ok(distribution) = WeightedIndex::new(&scaled) {
                return distribution.sample(rng);
            }
        }
        rng.gen_range(0..candidates.len())
    }
}

/// Ant-colony search with the remaining parameters at their defaults.
#[allow(clippy::too_many_arguments)]
pub fn search_best_paths_stochastic(
    catalog: &RouteCatalog,
    origin: &NodeId,
    destination: &NodeId,
    quantity: Decimal,
    agents: usize,
    iterations: usize,
    alpha: f64,
    beta: f64,
    evaporation_rate: f64,
    deposit_constant: f64,
    top_n: usize,
) -> Result<Vec<RankedPath>> {
    let config = AcoConfig {
        agents,
        iterations,
        alpha,
        beta,
        evaporation_rate,
        deposit_constant,
        top_n,
        ..Default::default()
    };
    AntColony::new(catalog, config)?.search(origin, destination, quantity)
}
