//! CLI entry point for the mule-ring detection engine (§4.L).

use clap::Parser;
use mule_ring_detector::loader::load_transactions;
use mule_ring_detector::{EngineError, Engine};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mule_detect")]
#[command(about = "Graph-based money-muling and fraud-ring detection engine")]
#[command(version)]
struct Cli {
    /// Path to the input transaction CSV
    #[arg(short, long)]
    input: PathBuf,

    /// Path to write the JSON report (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("Analysis Failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), EngineError> {
    let cli = Cli::parse();

    tracing::info!(path = %cli.input.display(), "loading transactions");
    let transactions = load_transactions(&cli.input)?;

    tracing::info!("running analysis");
    let engine = Engine::new();
    let report = engine.analyze(&transactions)?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
