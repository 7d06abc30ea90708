//! Command-line interface for ttt-oracle.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe oracle - query the solved game
#[derive(Parser, Debug)]
#[command(name = "ttt-oracle")]
#[command(about = "Solved tic-tac-toe: outcomes and best moves", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, default_value = "oracle.toml")]
    pub config: PathBuf,

    /// Output format (overrides the configuration file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a position: outcome, expected winner and every move
    Analyze {
        /// Board as nine symbols, e.g. "X.O.X...O" (rows may be separated by spaces)
        #[arg(conflicts_with = "moves", required_unless_present = "moves")]
        board: Option<String>,

        /// Build the position by playing these cells from the empty board
        #[arg(short, long, num_args = 1..)]
        moves: Vec<String>,

        /// Hide the board diagram
        #[arg(long)]
        no_diagram: bool,
    },

    /// Print table statistics by outcome and by piece count
    Stats,

    /// Write the whole solved table as JSON
    Export {
        /// Destination file
        #[arg(short, long, default_value = "solved.json")]
        output: PathBuf,
    },
}
