//! Search configuration

use crate::cli::Cli;
use crate::search::{DEFAULT_ATTEMPT_BUDGET, DEFAULT_SEED};
use crate::strategy::{default_strategy_specs, StrategySpec};
use forestgate_core::Label;
use forestgate_model::ModelConfigSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Model artifact to search against
    #[serde(default)]
    pub model: ModelConfigSpec,

    /// Seed for both random sources
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Maximum draws per strategy
    #[serde(default = "default_attempt_budget")]
    pub attempt_budget: u64,

    /// Label that counts as a hit
    #[serde(default)]
    pub positive_label: Label,

    /// Strategies, tried in order
    #[serde(default = "default_strategy_specs")]
    pub strategies: Vec<StrategySpec>,

    /// Optional wall-clock budget for the whole run
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

impl SearchConfig {
    /// Load configuration from file and environment, then apply CLI
    /// overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        let mut config: Self = config::Config::builder()
            .add_source(config::File::from(Path::new(config_path)).required(false))
            .add_source(
                config::Environment::with_prefix("FORESTGATE_SEARCH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        // Apply CLI overrides
        if let Some(model) = &cli.model {
            config.model.path = model.clone();
        }

        if let Some(seed) = cli.seed {
            config.seed = seed;
        }

        if let Some(attempts) = cli.attempts {
            config.attempt_budget = attempts;
        }

        if let Some(label) = &cli.positive_label {
            config.positive_label = label.clone();
        }

        if let Some(secs) = cli.deadline_secs {
            config.deadline_secs = Some(secs);
        }

        Ok(config)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            model: ModelConfigSpec::default(),
            seed: default_seed(),
            attempt_budget: default_attempt_budget(),
            positive_label: Label::default(),
            strategies: default_strategy_specs(),
            deadline_secs: None,
        }
    }
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_attempt_budget() -> u64 {
    DEFAULT_ATTEMPT_BUDGET
}
