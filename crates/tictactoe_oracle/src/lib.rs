//! Tic-tac-toe oracle - the game solved by retrograde analysis.
//!
//! Every position reachable from the empty board is enumerated and
//! assigned its outcome under optimal play. Queries then grade moves
//! against that table.
//!
//! # Architecture
//!
//! - **Location**: the nine cells, addressable by index, rank/file or label
//! - **Board**: immutable positions, move generation and terminal detection
//! - **Outcome**: results and the combinators that resolve competing children
//! - **Solver**: the once-built table of optimal outcomes
//! - **Query**: expected winner, move quality, best moves and move degree
//!
//! # Example
//!
//! ```
//! use tictactoe_oracle::{Board, Location, MoveExpectancy, Outcome};
//!
//! # fn example() -> Result<(), tictactoe_oracle::OracleError> {
//! let moves = ["a1", "a2", "a3", "b3"]
//!     .iter()
//!     .map(|cell| cell.parse::<Location>())
//!     .collect::<Result<Vec<_>, _>>()?;
//! let board = Board::from_moves(moves)?;
//!
//! assert_eq!(board.expected_winner(), Outcome::FirstWin);
//! assert_eq!(board.move_degree("b2".parse()?), MoveExpectancy::Win);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod error;
mod location;
mod notation;
mod outcome;
mod query;
mod solver;

// Crate-level exports - Errors
pub use error::{OracleError, OracleErrorKind};

// Crate-level exports - Board model
pub use board::{Board, Mark, ReachableStates};
pub use location::Location;

// Crate-level exports - Outcomes
pub use outcome::{MoveExpectancy, Outcome};

// Crate-level exports - Solver and queries
pub use query::MoveAnalysis;
pub use solver::SolvedTable;
