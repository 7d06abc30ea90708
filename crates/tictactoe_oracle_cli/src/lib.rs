//! Command-line front end for the tic-tac-toe oracle.
//!
//! # Architecture
//!
//! - **Cli**: clap argument definitions
//! - **Config**: TOML configuration with command-line overrides
//! - **Report**: text and JSON renderings of the solved table

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod report;

// Crate-level exports - Command line
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ConfigError, ConfigErrorKind, OracleConfig, OutputFormat};

// Crate-level exports - Reports
pub use report::{
    ExportError, ExportErrorKind, PositionReport, StatsReport, TableEntry, table_entries,
    write_table,
};
