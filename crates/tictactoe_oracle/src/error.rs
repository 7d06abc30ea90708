//! Error types for board and location construction.

use crate::location::Location;
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while building a location or a board.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum OracleErrorKind {
    /// An index, rank or file fell outside its range.
    #[display("{} {} is out of range (expected 1..={})", what, value, max)]
    OutOfRange {
        /// Which coordinate was rejected.
        what: &'static str,
        /// The rejected value.
        value: i64,
        /// Largest accepted value.
        max: u8,
    },

    /// Text could not be parsed.
    #[display("Cannot parse {:?}: {} expected", input, expected)]
    Format {
        /// The offending input.
        input: String,
        /// Description of the accepted syntax.
        expected: &'static str,
    },

    /// The target square already holds a mark.
    #[display("Square {} is already occupied", _0)]
    Occupied(Location),

    /// The game already has an outcome.
    #[display("Game is already over")]
    GameOver,

    /// The same square was given to both sides (or twice to one side).
    #[display("Square {} is claimed more than once", _0)]
    DuplicateCell(Location),
}

/// Oracle error with caller location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct OracleError {
    /// The error kind.
    pub kind: OracleErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl OracleError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument(level = "debug")]
    pub fn new(kind: OracleErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &OracleErrorKind {
        &self.kind
    }

    /// Returns true when the error reports an illegal move.
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self.kind,
            OracleErrorKind::Occupied(_) | OracleErrorKind::GameOver
        )
    }
}

impl From<OracleErrorKind> for OracleError {
    #[track_caller]
    fn from(kind: OracleErrorKind) -> Self {
        Self::new(kind)
    }
}
