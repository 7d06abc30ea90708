//! Immutable board states.

use crate::error::{OracleError, OracleErrorKind};
use crate::location::Location;
use crate::outcome::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, instrument, trace};

/// Contents of one cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Mark {
    /// No mark.
    #[default]
    Empty,
    /// Mark of the player who moves first (X).
    First,
    /// Mark of the player who moves second (O).
    Second,
}

impl Mark {
    /// Single-character symbol, using `empty` for an empty cell.
    pub fn to_char_or(self, empty: char) -> char {
        match self {
            Mark::First => 'X',
            Mark::Second => 'O',
            Mark::Empty => empty,
        }
    }

    /// Single-character symbol (`X`, `O` or `.`).
    pub fn to_char(self) -> char {
        self.to_char_or('.')
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Winning combinations, as zero-based slots.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // Rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // Columns
    [0, 4, 8], [2, 4, 6],             // Diagonals
];

/// A 3x3 tic-tac-toe board.
///
/// Boards are plain values: every move produces a new board and never
/// aliases the original. Equality and hashing are structural over the
/// nine cells, so boards can key a memoization table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Board {
    /// Marks in index order (slot 0 is location 1).
    marks: [Mark; 9],
}

impl Board {
    /// The empty starting board.
    pub const EMPTY: Board = Board {
        marks: [Mark::Empty; 9],
    };

    /// Builds a board directly from nine marks in index order.
    pub fn from_marks(marks: [Mark; 9]) -> Self {
        Self { marks }
    }

    /// Plays `moves` alternately from the empty board.
    ///
    /// Fails on the first move that lands on an occupied square or is
    /// played after the game has been decided.
    #[track_caller]
    #[instrument(skip(moves))]
    pub fn from_moves<I>(moves: I) -> Result<Self, OracleError>
    where
        I: IntoIterator<Item = Location>,
    {
        Self::EMPTY.apply_moves(moves, true)
    }

    /// Places `first` and `second` marks on an empty board.
    ///
    /// No turn-order check is made; the result may well be an illegal
    /// position. A square listed twice, in either set, is rejected.
    #[track_caller]
    #[instrument(skip(first, second))]
    pub fn from_sides<F, S>(first: F, second: S) -> Result<Self, OracleError>
    where
        F: IntoIterator<Item = Location>,
        S: IntoIterator<Item = Location>,
    {
        let mut claimed = HashSet::new();
        let mut board = Self::EMPTY;

        let first = first.into_iter().map(|loc| (loc, Mark::First));
        let second = second.into_iter().map(|loc| (loc, Mark::Second));
        for (loc, mark) in first.chain(second) {
            if !claimed.insert(loc) {
                debug!(%loc, "Square claimed twice");
                return Err(OracleError::new(OracleErrorKind::DuplicateCell(loc)));
            }
            board.marks[loc.slot()] = mark;
        }

        Ok(board)
    }

    /// Returns the mark at `location`.
    pub fn mark_at(&self, location: Location) -> Mark {
        self.marks[location.slot()]
    }

    /// Returns all nine marks in index order.
    pub fn marks(&self) -> &[Mark; 9] {
        &self.marks
    }

    /// Returns a copy of this board with `location` set to `mark`.
    pub fn with_mark(&self, location: Location, mark: Mark) -> Self {
        let mut next = *self;
        next.marks[location.slot()] = mark;
        next
    }

    fn count(&self, mark: Mark) -> usize {
        self.marks.iter().filter(|m| **m == mark).count()
    }

    /// Number of occupied squares.
    pub fn mark_count(&self) -> usize {
        self.marks.len() - self.count(Mark::Empty)
    }

    /// The eight lines (rows, columns, diagonals) as mark triples.
    pub fn lines(&self) -> impl Iterator<Item = [Mark; 3]> {
        let marks = self.marks;
        LINES.into_iter().map(move |[a, b, c]| [marks[a], marks[b], marks[c]])
    }

    fn completes_line(&self, mark: Mark) -> bool {
        self.lines().any(|line| line.iter().all(|m| *m == mark))
    }

    /// Game-theoretic status of this exact position (no look-ahead).
    #[instrument(level = "trace", skip(self), fields(board = %self.to_compact()))]
    pub fn outcome(&self) -> Outcome {
        let firsts = self.count(Mark::First);
        let seconds = self.count(Mark::Second);

        if firsts != seconds && firsts != seconds + 1 {
            return Outcome::Illegal;
        }

        let first_wins = self.completes_line(Mark::First);
        let second_wins = self.completes_line(Mark::Second);

        match (first_wins, second_wins) {
            (true, true) => Outcome::Illegal,
            (true, false) => Outcome::FirstWin,
            (false, true) => Outcome::SecondWin,
            (false, false) if firsts + seconds == self.marks.len() => Outcome::Draw,
            (false, false) => Outcome::InProgress,
        }
    }

    /// True unless the position violates turn order or both sides have won.
    pub fn is_legal(&self) -> bool {
        self.outcome() != Outcome::Illegal
    }

    /// Side whose turn it is; `Empty` once the game is over or the
    /// position is inconsistent.
    #[instrument(level = "trace", skip(self))]
    pub fn side_to_move(&self) -> Mark {
        if self.outcome() != Outcome::InProgress {
            return Mark::Empty;
        }

        let firsts = self.count(Mark::First);
        let seconds = self.count(Mark::Second);

        if firsts == seconds {
            Mark::First
        } else if firsts == seconds + 1 {
            Mark::Second
        } else {
            Mark::Empty
        }
    }

    /// The side holding a completed line, if any.
    pub fn winner(&self) -> Mark {
        match self.outcome() {
            Outcome::FirstWin => Mark::First,
            Outcome::SecondWin => Mark::Second,
            _ => Mark::Empty,
        }
    }

    /// One-based full-move number, or `None` for an illegal position.
    pub fn move_number(&self) -> Option<usize> {
        self.is_legal().then(|| self.count(Mark::First) + 1)
    }

    /// Whether a mark may be placed on `location`.
    ///
    /// With `check_outcome`, a decided game also makes every move illegal.
    #[instrument(level = "trace", skip(self))]
    pub fn is_legal_move(&self, location: Location, check_outcome: bool) -> bool {
        if self.mark_at(location) != Mark::Empty {
            return false;
        }
        !(check_outcome && self.outcome() != Outcome::InProgress)
    }

    /// Plays the side to move on `location`, returning the new board.
    #[track_caller]
    #[instrument(skip(self), fields(board = %self.to_compact(), location = %location))]
    pub fn apply_move(&self, location: Location) -> Result<Self, OracleError> {
        if self.mark_at(location) != Mark::Empty {
            return Err(OracleError::new(OracleErrorKind::Occupied(location)));
        }
        if self.outcome() != Outcome::InProgress {
            return Err(OracleError::new(OracleErrorKind::GameOver));
        }

        Ok(self.with_mark(location, self.side_to_move()))
    }

    /// Plays a sequence of moves in turn.
    ///
    /// Without `check_outcome`, moves after a decided game are still
    /// accepted as long as the target square is free.
    #[track_caller]
    #[instrument(skip(self, moves), fields(board = %self.to_compact()))]
    pub fn apply_moves<I>(&self, moves: I, check_outcome: bool) -> Result<Self, OracleError>
    where
        I: IntoIterator<Item = Location>,
    {
        let mut board = *self;

        for location in moves {
            if board.mark_at(location) != Mark::Empty {
                debug!(%location, "Move on occupied square");
                return Err(OracleError::new(OracleErrorKind::Occupied(location)));
            }
            if check_outcome && board.outcome() != Outcome::InProgress {
                debug!(%location, "Move after game over");
                return Err(OracleError::new(OracleErrorKind::GameOver));
            }
            board = board.with_mark(location, board.side_by_count());
        }

        Ok(board)
    }

    /// Side to move judged by piece counts alone, ignoring any outcome.
    fn side_by_count(&self) -> Mark {
        if self.count(Mark::First) > self.count(Mark::Second) {
            Mark::Second
        } else {
            Mark::First
        }
    }

    /// Free squares in index order.
    pub fn available_moves(self) -> impl Iterator<Item = Location> {
        Location::ALL
            .into_iter()
            .filter(move |loc| self.mark_at(*loc) == Mark::Empty)
    }

    /// Every position reachable in one move, in index order of the move.
    ///
    /// Yields nothing for a finished or inconsistent position. The
    /// iterator owns a copy of the board, so it can be re-created freely.
    pub fn successors(self) -> impl Iterator<Item = Board> {
        let side = self.side_to_move();
        self.available_moves()
            .filter(move |_| side != Mark::Empty)
            .map(move |loc| self.with_mark(loc, side))
    }

    /// Every non-terminal position one move earlier.
    ///
    /// Removes, one at a time, each mark of the side with more pieces and
    /// keeps the results that are still in progress. Yields nothing for
    /// illegal or empty boards.
    pub fn predecessors(self) -> impl Iterator<Item = Board> {
        let firsts = self.count(Mark::First);
        let seconds = self.count(Mark::Second);
        let removable = if !self.is_legal() || firsts + seconds == 0 {
            Mark::Empty
        } else if firsts > seconds {
            Mark::First
        } else {
            Mark::Second
        };

        Location::ALL
            .into_iter()
            .filter(move |loc| removable != Mark::Empty && self.mark_at(*loc) == removable)
            .map(move |loc| self.with_mark(loc, Mark::Empty))
            .filter(|parent| parent.outcome() == Outcome::InProgress)
    }

    /// Breadth-first enumeration of every position reachable from the
    /// empty board, layer by layer.
    pub fn reachable_states() -> ReachableStates {
        ReachableStates::new()
    }
}

/// Lazy breadth-first walk over the reachable state space.
///
/// Each layer is emitted in full while the next layer is collected into a
/// de-duplicating set. Layers are ordered, so enumeration is deterministic.
#[derive(Debug, Clone)]
pub struct ReachableStates {
    layer: std::vec::IntoIter<Board>,
    next: BTreeSet<Board>,
    depth: usize,
}

impl ReachableStates {
    fn new() -> Self {
        Self {
            layer: vec![Board::EMPTY].into_iter(),
            next: BTreeSet::new(),
            depth: 0,
        }
    }
}

impl Iterator for ReachableStates {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        loop {
            if let Some(board) = self.layer.next() {
                self.next.extend(board.successors());
                return Some(board);
            }

            if self.next.is_empty() {
                return None;
            }

            self.depth += 1;
            let layer: Vec<Board> = std::mem::take(&mut self.next).into_iter().collect();
            trace!(depth = self.depth, states = layer.len(), "Advancing BFS layer");
            self.layer = layer.into_iter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(cell: &str) -> Location {
        cell.parse().unwrap()
    }

    fn locs(cells: &[&str]) -> Vec<Location> {
        cells.iter().map(|c| loc(c)).collect()
    }

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        assert_eq!(board.outcome(), Outcome::InProgress);
        assert_eq!(board.side_to_move(), Mark::First);
        assert_eq!(board.mark_count(), 0);
        assert_eq!(board.move_number(), Some(1));
    }

    #[test]
    fn test_draw_game() {
        let board = Board::from_moves(locs(&[
            "a1", "a2", "a3", "b2", "b1", "c1", "b3", "c3", "c2",
        ]))
        .unwrap();
        assert_eq!(board.outcome(), Outcome::Draw);
        assert_eq!(board.side_to_move(), Mark::Empty);
        assert_eq!(board.successors().count(), 0);
    }

    #[test]
    fn test_first_wins_top_rank() {
        // X: a3 b3 c3, O: a1 b1
        let board = Board::from_moves(locs(&["a3", "a1", "b3", "b1", "c3"])).unwrap();
        assert_eq!(board.outcome(), Outcome::FirstWin);
        assert_eq!(board.winner(), Mark::First);
    }

    #[test]
    fn test_alternation_violation_is_illegal() {
        let board = Board::from_sides(locs(&["a1", "a2", "a3"]), locs(&[])).unwrap();
        assert_eq!(board.outcome(), Outcome::Illegal);
        assert_eq!(board.side_to_move(), Mark::Empty);
        assert_eq!(board.move_number(), None);

        let board = Board::from_sides(locs(&[]), locs(&["a1"])).unwrap();
        assert_eq!(board.outcome(), Outcome::Illegal);
    }

    #[test]
    fn test_double_win_is_illegal() {
        let board = Board::from_sides(
            locs(&["a3", "b3", "c3"]),
            locs(&["a1", "b1", "c1"]),
        )
        .unwrap();
        assert_eq!(board.outcome(), Outcome::Illegal);
    }

    #[test]
    fn test_from_sides_rejects_duplicates() {
        let err = Board::from_sides(locs(&["a1"]), locs(&["a1"])).unwrap_err();
        assert!(matches!(err.kind(), OracleErrorKind::DuplicateCell(l) if *l == loc("a1")));

        let err = Board::from_sides(locs(&["b2", "b2"]), []).unwrap_err();
        assert!(matches!(err.kind(), OracleErrorKind::DuplicateCell(_)));
    }

    #[test]
    fn test_apply_move_does_not_alias() {
        let before = Board::EMPTY;
        let after = before.apply_move(loc("b2")).unwrap();
        assert_eq!(before, Board::EMPTY);
        assert_eq!(after.mark_at(loc("b2")), Mark::First);
        assert_ne!(before, after);
    }

    #[test]
    fn test_apply_move_errors() {
        let board = Board::from_moves(locs(&["b2"])).unwrap();
        let err = board.apply_move(loc("b2")).unwrap_err();
        assert!(matches!(err.kind(), OracleErrorKind::Occupied(_)));

        let won = Board::from_moves(locs(&["a3", "a1", "b3", "b1", "c3"])).unwrap();
        let err = won.apply_move(loc("c1")).unwrap_err();
        assert!(matches!(err.kind(), OracleErrorKind::GameOver));
        assert!(err.is_illegal_move());
    }

    #[test]
    fn test_from_moves_stops_at_game_over() {
        let result = Board::from_moves(locs(&["a3", "a1", "b3", "b1", "c3", "c1"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_moves_without_outcome_check() {
        let won = Board::from_moves(locs(&["a3", "a1", "b3", "b1", "c3"])).unwrap();
        let board = won.apply_moves(locs(&["c1"]), false).unwrap();
        assert_eq!(board.mark_at(loc("c1")), Mark::Second);
        assert_eq!(board.outcome(), Outcome::Illegal);
    }

    #[test]
    fn test_is_legal_move() {
        let won = Board::from_moves(locs(&["a3", "a1", "b3", "b1", "c3"])).unwrap();
        assert!(!won.is_legal_move(loc("a3"), false));
        assert!(won.is_legal_move(loc("c1"), false));
        assert!(!won.is_legal_move(loc("c1"), true));
    }

    #[test]
    fn test_successors_follow_index_order() {
        let board = Board::from_moves(locs(&["b2"])).unwrap();
        let children: Vec<Board> = board.successors().collect();
        assert_eq!(children.len(), 8);

        let placed: Vec<u8> = children
            .iter()
            .map(|child| {
                Location::ALL
                    .into_iter()
                    .find(|l| board.mark_at(*l) != child.mark_at(*l))
                    .unwrap()
                    .index()
            })
            .collect();
        assert_eq!(placed, vec![1, 2, 3, 4, 6, 7, 8, 9]);
        assert!(children.iter().all(|c| c.mark_count() == 2));
        assert!(children.iter().all(|c| c.side_to_move() == Mark::First));
    }

    #[test]
    fn test_successors_are_restartable() {
        let board = Board::from_moves(locs(&["a1", "c3"])).unwrap();
        let first: Vec<Board> = board.successors().collect();
        let second: Vec<Board> = board.successors().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_predecessors() {
        let board = Board::from_moves(locs(&["a1", "b2", "c3"])).unwrap();
        let parents: Vec<Board> = board.predecessors().collect();
        assert_eq!(parents.len(), 2);
        assert!(parents.iter().all(|p| p.mark_count() == 2));
        assert!(parents.iter().all(|p| p.successors().any(|c| c == board)));

        assert_eq!(Board::EMPTY.predecessors().count(), 0);

        let illegal = Board::from_sides(locs(&["a1", "a2", "a3"]), locs(&[])).unwrap();
        assert_eq!(illegal.predecessors().count(), 0);
    }

    #[test]
    fn test_predecessors_exclude_terminal_parents() {
        // X: a3 b3 c3 b1, O: a1 c1 a2. X has won; removing b1 still
        // leaves the top rank complete, so only top-rank removals survive.
        let board = Board::from_sides(
            locs(&["a3", "b3", "c3", "b1"]),
            locs(&["a1", "c1", "a2"]),
        )
        .unwrap();
        assert_eq!(board.outcome(), Outcome::FirstWin);
        let parents: Vec<Board> = board.predecessors().collect();
        assert_eq!(parents.len(), 3);
        assert!(parents.iter().all(|p| p.outcome() == Outcome::InProgress));
    }

    #[test]
    fn test_reachable_state_count() {
        let states: Vec<Board> = Board::reachable_states().collect();
        assert_eq!(states.len(), 5478);
        assert_eq!(states[0], Board::EMPTY);
        assert!(states.iter().all(Board::is_legal));

        let unique: HashSet<Board> = states.iter().copied().collect();
        assert_eq!(unique.len(), states.len());
    }

    #[test]
    fn test_reachable_states_grow_by_layer() {
        let counts: Vec<usize> = Board::reachable_states().map(|b| b.mark_count()).collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(counts.iter().filter(|c| **c == 1).count(), 9);
        assert_eq!(counts.iter().filter(|c| **c == 2).count(), 72);
    }
}
