//! Bounded stochastic search for a positive example
//!
//! Strategies are consumed in order. Each one gets up to `attempt_budget`
//! draws; every draw is classified and the first one carrying the positive
//! label ends the run. A strategy that runs dry hands over to the next, and
//! only running out of all of them is reported as exhaustion.

use crate::rng::SearchRng;
use crate::strategy::Strategy;
use forestgate_core::{Error, Label, Result};
use forestgate_model::Classifier;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Per-strategy attempt budget used when none is configured
pub const DEFAULT_ATTEMPT_BUDGET: u64 = 40_000;

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

/// Terminal outcome of a search run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchResult {
    /// A candidate was classified positive
    Found(FoundExample),

    /// Every strategy used its full budget without a positive
    Exhausted,

    /// The run was interrupted before reaching a verdict
    Stopped { reason: StopReason },
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn found(&self) -> Option<&FoundExample> {
        match self {
            Self::Found(example) => Some(example),
            _ => None,
        }
    }
}

/// The first positive candidate of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoundExample {
    /// The candidate vector
    pub vector: Vec<f64>,

    /// Name of the strategy that produced it
    pub strategy: String,

    /// 1-based attempt index within that strategy
    pub attempt: u64,
}

impl FoundExample {
    /// The vector rounded to `places` decimal places, for display
    pub fn rounded(&self, places: i32) -> Vec<f64> {
        let scale = 10f64.powi(places);
        self.vector.iter().map(|v| (v * scale).round() / scale).collect()
    }
}

/// Why a run stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The cancellation flag was raised
    Cancelled,
    /// The wall-clock budget ran out
    DeadlineExceeded,
}

/// Attempts spent on one strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyStats {
    pub name: String,
    pub attempts: u64,
}

/// Full account of a run
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub result: SearchResult,

    /// Total `classify` calls across all strategies
    pub classifications: u64,

    /// Strategies the run reached, in order; an entry may show zero
    /// attempts when the budget is zero or the run stopped before drawing
    pub strategies: Vec<StrategyStats>,

    pub elapsed_ms: u64,
}

/// Knobs for a search run
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum draws per strategy
    pub attempt_budget: u64,

    /// Label that counts as a hit
    pub positive_label: Label,

    /// Checked once per attempt
    pub cancel: Option<Arc<AtomicBool>>,

    /// Wall-clock budget for the whole run
    pub deadline: Option<Duration>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            positive_label: Label::Int(1),
            cancel: None,
            deadline: None,
        }
    }
}

impl SearchOptions {
    fn interruption(&self, started: Instant) -> Option<StopReason> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(StopReason::Cancelled);
            }
        }
        if let Some(deadline) = self.deadline {
            if started.elapsed() >= deadline {
                return Some(StopReason::DeadlineExceeded);
            }
        }
        None
    }
}

/// Search for a vector the classifier labels `1`.
///
/// `dimensionality` must equal the classifier's input width and every
/// sampled vector must have that length; anything else fails with
/// [`Error::InvalidDimensionality`] before the candidate is classified.
pub fn search_positive(
    classifier: &dyn Classifier,
    dimensionality: usize,
    strategies: &[Strategy],
    attempt_budget: u64,
    rng: &mut SearchRng,
) -> Result<SearchResult> {
    let options = SearchOptions {
        attempt_budget,
        ..Default::default()
    };
    execute(classifier, dimensionality, strategies, &options, rng).map(|report| report.result)
}

/// A configured search over a shared classifier
pub struct PositiveSearch {
    classifier: Arc<dyn Classifier>,
    strategies: Vec<Strategy>,
    options: SearchOptions,
    seed: u64,
}

impl PositiveSearch {
    pub fn new(classifier: Arc<dyn Classifier>, strategies: Vec<Strategy>) -> Self {
        Self {
            classifier,
            strategies,
            options: SearchOptions::default(),
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_attempt_budget(mut self, budget: u64) -> Self {
        self.options.attempt_budget = budget;
        self
    }

    pub fn with_positive_label(mut self, label: Label) -> Self {
        self.options.positive_label = label;
        self
    }

    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.options.cancel = Some(flag);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.options.deadline = Some(deadline);
        self
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Run from a fresh seed; repeated calls give identical reports apart
    /// from timing
    pub fn run(&self) -> Result<SearchReport> {
        let mut rng = SearchRng::seeded(self.seed);
        let dimensionality = self.classifier.n_features();
        execute(
            self.classifier.as_ref(),
            dimensionality,
            &self.strategies,
            &self.options,
            &mut rng,
        )
    }
}

fn execute(
    classifier: &dyn Classifier,
    dimensionality: usize,
    strategies: &[Strategy],
    options: &SearchOptions,
    rng: &mut SearchRng,
) -> Result<SearchReport> {
    let width = classifier.n_features();
    if width == 0 {
        return Err(Error::unavailable(format!(
            "{} does not report an input width",
            classifier.name()
        )));
    }
    if dimensionality != width {
        return Err(Error::dimensionality(width, dimensionality));
    }

    let started = Instant::now();
    let mut classifications = 0u64;
    let mut stats: Vec<StrategyStats> = Vec::with_capacity(strategies.len());

    let finish = |result, classifications, stats| SearchReport {
        result,
        classifications,
        strategies: stats,
        elapsed_ms: started.elapsed().as_millis() as u64,
    };

    for strategy in strategies {
        debug!(
            strategy = strategy.name(),
            budget = options.attempt_budget,
            "Sampling strategy"
        );
        stats.push(StrategyStats {
            name: strategy.name().to_string(),
            attempts: 0,
        });

        for attempt in 1..=options.attempt_budget {
            if let Some(reason) = options.interruption(started) {
                info!(?reason, classifications, "Search stopped early");
                return Ok(finish(SearchResult::Stopped { reason }, classifications, stats));
            }

            let vector = strategy.sample(dimensionality, rng);
            if vector.len() != dimensionality {
                return Err(Error::dimensionality(dimensionality, vector.len()));
            }

            let label = classifier.classify(&vector).map_err(|e| {
                Error::unavailable(format!("{} failed to classify: {}", classifier.name(), e))
            })?;
            classifications += 1;
            if let Some(current) = stats.last_mut() {
                current.attempts = attempt;
            }

            if label == options.positive_label {
                info!(
                    strategy = strategy.name(),
                    attempt,
                    classifications,
                    "Found positive example"
                );
                let found = FoundExample {
                    vector,
                    strategy: strategy.name().to_string(),
                    attempt,
                };
                return Ok(finish(SearchResult::Found(found), classifications, stats));
            }
        }

        debug!(strategy = strategy.name(), "Strategy exhausted");
    }

    Ok(finish(SearchResult::Exhausted, classifications, stats))
}
