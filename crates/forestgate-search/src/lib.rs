//! forestgate Search
//!
//! Brute-force search for a feature vector that a classifier labels as the
//! positive class. Candidates are drawn from an ordered list of sampling
//! strategies, each with a fixed attempt budget, from random sources seeded
//! once per run.

pub mod cli;
pub mod config;
pub mod report;
pub mod rng;
pub mod search;
pub mod strategy;

pub use cli::Cli;
pub use config::SearchConfig;
pub use report::{format_vector, render_text};
pub use rng::SearchRng;
pub use search::{
    search_positive, FoundExample, PositiveSearch, SearchOptions, SearchReport, SearchResult,
    StopReason, StrategyStats, DEFAULT_ATTEMPT_BUDGET, DEFAULT_SEED,
};
pub use strategy::{
    build_strategies, default_strategies, default_strategy_specs, Distribution, Sampler,
    Strategy, StrategySpec, ValueRange,
};
