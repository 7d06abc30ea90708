//! Move analysis on top of the solved table.
//!
//! Every query degrades gracefully: unreachable positions and unplayable
//! moves come back as `Illegal` (or quality `0`) rather than as errors.

use crate::board::{Board, Mark};
use crate::location::Location;
use crate::outcome::{MoveExpectancy, Outcome};
use crate::solver::SolvedTable;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Everything the oracle knows about one candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct MoveAnalysis {
    /// The square played.
    location: Location,
    /// Expected result after the move.
    expectation: Outcome,
    /// `1` for a best move, `-1` for a worse one, `0` if unplayable.
    quality: i8,
    /// Result from the mover's point of view.
    degree: MoveExpectancy,
}

impl SolvedTable {
    /// Optimal-play outcome of `board`; `Illegal` if it is unreachable.
    #[instrument(skip(self), fields(board = %board.to_compact()))]
    pub fn expected_winner(&self, board: &Board) -> Outcome {
        self.get(board).unwrap_or_else(|| {
            debug!("Board is not reachable");
            Outcome::Illegal
        })
    }

    /// Optimal-play outcome after playing `location`.
    #[instrument(skip(self), fields(board = %board.to_compact(), location = %location))]
    pub fn move_expectation(&self, board: &Board, location: Location) -> Outcome {
        match board.apply_move(location) {
            Ok(next) => self.expected_winner(&next),
            Err(_) => Outcome::Illegal,
        }
    }

    /// `1` if `location` keeps the best achievable result, `-1` if it
    /// gives something up, `0` if it cannot be played.
    #[instrument(skip(self), fields(board = %board.to_compact(), location = %location))]
    pub fn move_quality(&self, board: &Board, location: Location) -> i8 {
        let actual = self.move_expectation(board, location);
        if actual == Outcome::Illegal {
            return 0;
        }
        if actual == self.expected_winner(board) {
            1
        } else {
            -1
        }
    }

    /// All moves of quality `1`, in index order of the squares.
    #[instrument(skip(self), fields(board = %board.to_compact()))]
    pub fn best_moves(&self, board: &Board) -> Vec<Location> {
        board
            .available_moves()
            .filter(|location| self.move_quality(board, *location) == 1)
            .collect()
    }

    /// Win, draw or lose for the side making the move at `location`.
    #[instrument(skip(self), fields(board = %board.to_compact(), location = %location))]
    pub fn move_degree(&self, board: &Board, location: Location) -> MoveExpectancy {
        if !board.is_legal_move(location, true) {
            return MoveExpectancy::Illegal;
        }

        let expectation = self.move_expectation(board, location);
        if expectation == Outcome::Illegal {
            return MoveExpectancy::Illegal;
        }

        MoveExpectancy::from_outcome(board.side_to_move(), expectation)
    }

    /// Analysis of every square, in index order.
    #[instrument(skip(self), fields(board = %board.to_compact()))]
    pub fn analyze(&self, board: &Board) -> Vec<MoveAnalysis> {
        Location::ALL
            .into_iter()
            .map(|location| {
                MoveAnalysis::new(
                    location,
                    self.move_expectation(board, location),
                    self.move_quality(board, location),
                    self.move_degree(board, location),
                )
            })
            .collect()
    }
}

impl Board {
    /// Optimal-play outcome from the shared table.
    pub fn expected_winner(&self) -> Outcome {
        SolvedTable::global().expected_winner(self)
    }

    /// Optimal-play outcome after `location`, from the shared table.
    pub fn move_expectation(&self, location: Location) -> Outcome {
        SolvedTable::global().move_expectation(self, location)
    }

    /// Move quality from the shared table.
    pub fn move_quality(&self, location: Location) -> i8 {
        SolvedTable::global().move_quality(self, location)
    }

    /// Best moves from the shared table.
    pub fn best_moves(&self) -> Vec<Location> {
        SolvedTable::global().best_moves(self)
    }

    /// Move degree from the shared table.
    pub fn move_degree(&self, location: Location) -> MoveExpectancy {
        SolvedTable::global().move_degree(self, location)
    }

    /// True when `side` cannot lose from here with best play.
    pub fn is_safe_for(&self, side: Mark) -> bool {
        match (side, self.expected_winner()) {
            (_, Outcome::Draw) => side != Mark::Empty,
            (Mark::First, Outcome::FirstWin) | (Mark::Second, Outcome::SecondWin) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(cell: &str) -> Location {
        cell.parse().unwrap()
    }

    #[test]
    fn test_unreachable_board_is_illegal() {
        let board: Board = "XXX\n...\n...".parse().unwrap();
        let table = SolvedTable::global();
        assert_eq!(table.expected_winner(&board), Outcome::Illegal);
        assert_eq!(table.move_quality(&board, loc("a1")), 0);
        assert!(table.best_moves(&board).is_empty());
    }

    #[test]
    fn test_occupied_square_quality_zero() {
        let board = Board::from_moves([loc("b2")]).unwrap();
        assert_eq!(board.move_quality(loc("b2")), 0);
        assert_eq!(board.move_expectation(loc("b2")), Outcome::Illegal);
        assert_eq!(board.move_degree(loc("b2")), MoveExpectancy::Illegal);
    }

    #[test]
    fn test_every_opening_move_draws() {
        let table = SolvedTable::global();
        for location in Location::ALL {
            assert_eq!(table.move_expectation(&Board::EMPTY, location), Outcome::Draw);
            assert_eq!(table.move_degree(&Board::EMPTY, location), MoveExpectancy::Draw);
        }
        assert_eq!(table.best_moves(&Board::EMPTY), Location::ALL.to_vec());
    }

    #[test]
    fn test_corner_reply_to_center_is_required() {
        // After X takes the centre, O must take a corner; edges lose.
        let board = Board::from_moves([loc("b2")]).unwrap();
        let best: Vec<String> = board.best_moves().iter().map(|l| l.cell()).collect();
        assert_eq!(best, ["a3", "c3", "a1", "c1"]);
        assert_eq!(board.move_degree(loc("b3")), MoveExpectancy::Lose);
        assert_eq!(board.move_quality(loc("b3")), -1);
    }

    #[test]
    fn test_analyze_covers_every_square() {
        let board = Board::from_moves([loc("b2")]).unwrap();
        let analysis = SolvedTable::global().analyze(&board);
        assert_eq!(analysis.len(), 9);
        let centre = analysis.iter().find(|a| *a.location() == loc("b2")).unwrap();
        assert_eq!(*centre.quality(), 0);
        assert_eq!(*centre.degree(), MoveExpectancy::Illegal);
        assert_eq!(
            analysis.iter().filter(|a| *a.quality() == 1).count(),
            4
        );
    }

    #[test]
    fn test_is_safe_for() {
        assert!(Board::EMPTY.is_safe_for(Mark::First));
        assert!(Board::EMPTY.is_safe_for(Mark::Second));
        let board = Board::from_moves([loc("b2"), loc("b3")]).unwrap();
        assert!(board.is_safe_for(Mark::First));
        assert!(!board.is_safe_for(Mark::Second));
    }
}
