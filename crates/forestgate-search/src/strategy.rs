//! Sampling strategies
//!
//! A strategy is a named sampler producing one candidate vector per call.
//! The built-in samplers are plain data ([`Distribution`]) so they can be
//! listed in a config file; anything else can implement [`Sampler`]
//! directly, closures included.

use crate::rng::SearchRng;
use forestgate_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Produces candidate feature vectors
pub trait Sampler: Send + Sync {
    /// Draw one candidate of `dimensionality` coordinates
    fn sample(&self, dimensionality: usize, rng: &mut SearchRng) -> Vec<f64>;
}

impl<F> Sampler for F
where
    F: Fn(usize, &mut SearchRng) -> Vec<f64> + Send + Sync,
{
    fn sample(&self, dimensionality: usize, rng: &mut SearchRng) -> Vec<f64> {
        self(dimensionality, rng)
    }
}

/// Half-open interval `[low, high)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

impl ValueRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    fn validate(&self, what: &str) -> Result<()> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low >= self.high {
            return Err(Error::config(format!(
                "{} range [{}, {}) is empty or not finite",
                what, self.low, self.high
            )));
        }
        Ok(())
    }

    fn draw(&self, rng: &mut SearchRng) -> f64 {
        rng.uniform(self.low, self.high)
    }
}

/// Built-in candidate distributions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Distribution {
    /// Every coordinate uniform in `[low, high)`
    Uniform { low: f64, high: f64 },

    /// Even-indexed coordinates from `even`, odd-indexed from `odd`
    Alternating { even: ValueRange, odd: ValueRange },

    /// Each coordinate from `primary` with `probability`, else `secondary`
    Mixture {
        probability: f64,
        primary: ValueRange,
        secondary: ValueRange,
    },
}

impl Distribution {
    /// Check that every range is non-empty and probabilities are in `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Uniform { low, high } => ValueRange::new(*low, *high).validate("uniform"),
            Self::Alternating { even, odd } => {
                even.validate("alternating even")?;
                odd.validate("alternating odd")
            }
            Self::Mixture {
                probability,
                primary,
                secondary,
            } => {
                if !(0.0..=1.0).contains(probability) {
                    return Err(Error::config(format!(
                        "mixture probability {} is outside [0, 1]",
                        probability
                    )));
                }
                primary.validate("mixture primary")?;
                secondary.validate("mixture secondary")
            }
        }
    }
}

impl Sampler for Distribution {
    fn sample(&self, dimensionality: usize, rng: &mut SearchRng) -> Vec<f64> {
        match self {
            Self::Uniform { low, high } => {
                (0..dimensionality).map(|_| rng.uniform(*low, *high)).collect()
            }
            Self::Alternating { even, odd } => (0..dimensionality)
                .map(|i| if i % 2 == 0 { even.draw(rng) } else { odd.draw(rng) })
                .collect(),
            Self::Mixture {
                probability,
                primary,
                secondary,
            } => (0..dimensionality)
                .map(|_| {
                    if rng.coin() < *probability {
                        primary.draw(rng)
                    } else {
                        secondary.draw(rng)
                    }
                })
                .collect(),
        }
    }
}

/// Strategy as written in a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategySpec {
    pub name: String,

    #[serde(flatten)]
    pub distribution: Distribution,
}

impl StrategySpec {
    pub fn new(name: impl Into<String>, distribution: Distribution) -> Self {
        Self {
            name: name.into(),
            distribution,
        }
    }
}

/// A named sampler, ready to run
#[derive(Clone)]
pub struct Strategy {
    name: String,
    sampler: Arc<dyn Sampler>,
}

impl Strategy {
    /// Wrap any sampler under a name
    pub fn new(name: impl Into<String>, sampler: impl Sampler + 'static) -> Self {
        Self {
            name: name.into(),
            sampler: Arc::new(sampler),
        }
    }

    /// Validate a config entry and turn it into a strategy
    pub fn from_spec(spec: StrategySpec) -> Result<Self> {
        spec.distribution
            .validate()
            .map_err(|e| Error::config(format!("strategy '{}': {}", spec.name, e)))?;
        Ok(Self::new(spec.name, spec.distribution))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Draw one candidate
    pub fn sample(&self, dimensionality: usize, rng: &mut SearchRng) -> Vec<f64> {
        self.sampler.sample(dimensionality, rng)
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

/// The four default strategies, from broad to specialized: `high`, `low`,
/// `mixed` and `bimodal`
pub fn default_strategy_specs() -> Vec<StrategySpec> {
    const HIGH: ValueRange = ValueRange::new(0.85, 1.0);
    const LOW: ValueRange = ValueRange::new(0.0, 0.2);

    vec![
        StrategySpec::new(
            "high",
            Distribution::Uniform {
                low: HIGH.low,
                high: HIGH.high,
            },
        ),
        StrategySpec::new(
            "low",
            Distribution::Uniform {
                low: LOW.low,
                high: LOW.high,
            },
        ),
        StrategySpec::new("mixed", Distribution::Alternating { even: HIGH, odd: LOW }),
        StrategySpec::new(
            "bimodal",
            Distribution::Mixture {
                probability: 0.7,
                primary: ValueRange::new(0.9, 1.0),
                secondary: ValueRange::new(0.0, 0.05),
            },
        ),
    ]
}

/// Build the default strategies
pub fn default_strategies() -> Vec<Strategy> {
    default_strategy_specs()
        .into_iter()
        .map(|spec| Strategy::new(spec.name, spec.distribution))
        .collect()
}

/// Validate and build strategies from config entries, keeping their order
pub fn build_strategies(specs: &[StrategySpec]) -> Result<Vec<Strategy>> {
    if specs.is_empty() {
        return Err(Error::config("at least one sampling strategy is required"));
    }
    specs.iter().cloned().map(Strategy::from_spec).collect()
}
