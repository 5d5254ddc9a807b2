use clap::Parser;
use forestgate_core::Label;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "forestgate-search")]
#[command(
    author,
    version,
    about = "Search for an input the model classifies as the positive class"
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/search.yaml")]
    pub config: String,

    /// Model artifact path
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Seed for both random sources
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Attempts per strategy
    #[arg(short = 'n', long)]
    pub attempts: Option<u64>,

    /// Label that counts as positive
    #[arg(long, value_parser = parse_label)]
    pub positive_label: Option<Label>,

    /// Stop after this many seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Integers become `Label::Int`, anything else `Label::Text`
fn parse_label(value: &str) -> Result<Label, std::convert::Infallible> {
    value.parse()
}
