//! Printable reports built from the solved table.

use derive_more::{Display, Error};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tictactoe_oracle::{Board, Location, Mark, MoveAnalysis, Outcome, SolvedTable};
use tracing::{info, instrument};

/// Full analysis of one position.
#[derive(Debug, Clone, Serialize)]
pub struct PositionReport {
    /// The position in compact notation.
    pub board: Board,
    /// Outcome of the position as it stands.
    pub outcome: Outcome,
    /// Side to move, if any.
    pub side_to_move: Mark,
    /// Outcome under optimal play.
    pub expected_winner: Outcome,
    /// Every square, in index order.
    pub moves: Vec<MoveAnalysis>,
    /// Moves that keep the expected result, in index order.
    pub best_moves: Vec<Location>,
}

impl PositionReport {
    /// Analyzes `board` against `table`.
    #[instrument(skip(table), fields(board = %board.to_compact()))]
    pub fn new(table: &SolvedTable, board: Board) -> Self {
        Self {
            board,
            outcome: board.outcome(),
            side_to_move: board.side_to_move(),
            expected_winner: table.expected_winner(&board),
            moves: table.analyze(&board),
            best_moves: table.best_moves(&board),
        }
    }

    /// Renders the report as text.
    pub fn to_text(&self, show_diagram: bool) -> String {
        let mut lines = Vec::new();
        if show_diagram {
            lines.push(self.board.diagram());
            lines.push(String::new());
        }
        lines.push(format!("Position:        {}", self.board.to_compact()));
        lines.push(format!("Outcome:         {}", self.outcome));
        lines.push(format!("Side to move:    {:?}", self.side_to_move));
        lines.push(format!("Expected winner: {}", self.expected_winner));

        let playable: Vec<String> = self
            .moves
            .iter()
            .filter(|m| *m.quality() != 0)
            .map(|m| {
                format!(
                    "  {}  {:<7} {:+}  ({})",
                    m.location(),
                    m.degree().to_string(),
                    m.quality(),
                    m.expectation()
                )
            })
            .collect();
        if !playable.is_empty() {
            lines.push("\nMoves:".to_string());
            lines.extend(playable);
        }

        let best: Vec<String> = self.best_moves.iter().map(|l| l.cell()).collect();
        lines.push(format!("\nBest moves:      {}", best.join(" ")));
        lines.join("\n")
    }
}

/// Table size broken down by outcome and by number of marks.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// Number of positions in the table.
    pub states: usize,
    /// Positions per optimal-play outcome.
    pub by_outcome: BTreeMap<String, usize>,
    /// Positions per number of marks on the board.
    pub by_marks: BTreeMap<usize, usize>,
}

impl StatsReport {
    /// Collects statistics from `table`.
    #[instrument(skip(table))]
    pub fn new(table: &SolvedTable) -> Self {
        Self {
            states: table.len(),
            by_outcome: table
                .outcome_counts()
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|(outcome, count)| (outcome.to_string(), count))
                .collect(),
            by_marks: table.rank_counts(),
        }
    }

    /// Renders the report as text.
    pub fn to_text(&self) -> String {
        let by_outcome = self
            .by_outcome
            .iter()
            .map(|(outcome, count)| format!("  {outcome:<10} {count:>5}"));
        let by_marks = self
            .by_marks
            .iter()
            .map(|(marks, count)| format!("  {marks:<10} {count:>5}"));

        std::iter::once(format!("States: {}", self.states))
            .chain(std::iter::once("\nBy expected outcome:".to_string()))
            .chain(by_outcome)
            .chain(std::iter::once("\nBy marks on board:".to_string()))
            .chain(by_marks)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One exported table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableEntry {
    /// The position in compact notation.
    pub board: Board,
    /// Outcome under optimal play.
    pub outcome: Outcome,
}

/// Every table row, sorted by compact board text.
#[instrument(skip(table))]
pub fn table_entries(table: &SolvedTable) -> Vec<TableEntry> {
    let mut entries: Vec<TableEntry> = table
        .iter()
        .map(|(board, outcome)| TableEntry {
            board: *board,
            outcome: *outcome,
        })
        .collect();
    entries.sort_by_key(|entry| entry.board.to_compact());
    entries
}

/// What went wrong while exporting the table.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ExportErrorKind {
    /// The rows could not be encoded as JSON.
    #[display("cannot encode solved table: {_0}")]
    Encode(String),
    /// The destination could not be written.
    #[display("cannot write solved table to {path}: {reason}")]
    Write {
        /// Destination path.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },
}

/// Export error with the location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct ExportError {
    /// What went wrong.
    pub kind: ExportErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ExportError {
    /// Creates an export error at the caller's location.
    #[track_caller]
    pub fn new(kind: ExportErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Writes every row of `table` to `path` as pretty JSON.
///
/// Returns the number of rows written.
#[instrument(skip(table), fields(path = %path.display()))]
pub fn write_table(table: &SolvedTable, path: &Path) -> Result<usize, ExportError> {
    let entries = table_entries(table);
    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| ExportError::new(ExportErrorKind::Encode(e.to_string())))?;
    std::fs::write(path, json).map_err(|e| {
        ExportError::new(ExportErrorKind::Write {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    })?;
    info!(entries = entries.len(), "Table exported");
    Ok(entries.len())
}
