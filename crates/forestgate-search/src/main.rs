//! forestgate Search
//!
//! Loads a model artifact and searches for an input it classifies as the
//! positive class, printing the first hit.

use anyhow::Result;
use clap::Parser;
use forestgate_model::{load_from_config, Classifier};
use forestgate_search::{build_strategies, render_text, Cli, PositiveSearch, SearchConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    let config = SearchConfig::load(&cli.config, &cli)?;
    let strategies = build_strategies(&config.strategies)?;
    info!(
        "Strategies: {}",
        strategies
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let model = load_from_config(&config.model)?;
    if !cli.json {
        println!("n_features: {}", model.n_features());
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping search...");
            flag.store(true, Ordering::Relaxed);
        }
    });

    let mut search = PositiveSearch::new(Arc::new(model), strategies)
        .with_seed(config.seed)
        .with_attempt_budget(config.attempt_budget)
        .with_positive_label(config.positive_label.clone())
        .with_cancellation(cancel);
    if let Some(deadline) = config.deadline() {
        search = search.with_deadline(deadline);
    }

    info!(
        "Searching with seed {} and {} attempts per strategy",
        config.seed, config.attempt_budget
    );
    let report = tokio::task::spawn_blocking(move || search.run()).await??;
    info!(
        "Search finished after {} classifications in {}ms",
        report.classifications, report.elapsed_ms
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report, &config.positive_label));
    }

    Ok(())
}

/// Initialize tracing/logging; logs go to stderr so stdout carries only the
/// result
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("forestgate=debug,forestgate_search=debug,forestgate_model=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("forestgate_search=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
