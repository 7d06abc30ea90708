//! ttt-oracle - query the solved game of tic-tac-toe.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tictactoe_oracle::{Board, Location, SolvedTable};
use tictactoe_oracle_cli::{
    Cli, Command, OracleConfig, OutputFormat, PositionReport, StatsReport, write_table,
};
use tracing::instrument;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = OracleConfig::load_or_default(&cli.config)?.apply_cli(&cli);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    config.log_summary(&cli.config);

    match cli.command {
        Command::Analyze { board, moves, .. } => run_analyze(config, board, moves),
        Command::Stats => run_stats(&config),
        Command::Export { output } => run_export(&output),
    }
}

/// Builds the requested position and prints its analysis.
#[instrument(skip(config))]
fn run_analyze(config: OracleConfig, board: Option<String>, moves: Vec<String>) -> Result<()> {
    let board = match board {
        Some(text) => text
            .parse::<Board>()
            .with_context(|| format!("Invalid board {text:?}"))?,
        None => {
            let locations = moves
                .iter()
                .map(|cell| cell.parse::<Location>())
                .collect::<Result<Vec<_>, _>>()
                .context("Invalid move list")?;
            Board::from_moves(locations).context("Illegal move sequence")?
        }
    };

    let report = PositionReport::new(SolvedTable::global(), board);
    match config.format() {
        OutputFormat::Text => println!("{}", report.to_text(*config.show_diagram())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

/// Prints table statistics.
#[instrument(skip(config))]
fn run_stats(config: &OracleConfig) -> Result<()> {
    let stats = StatsReport::new(SolvedTable::global());
    match config.format() {
        OutputFormat::Text => println!("{}", stats.to_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
    }
    Ok(())
}

/// Writes the solved table to `output` as JSON.
#[instrument(fields(output = %output.display()))]
fn run_export(output: &Path) -> Result<()> {
    let entries = write_table(SolvedTable::global(), output)?;
    println!("Wrote {entries} positions to {}", output.display());
    Ok(())
}
