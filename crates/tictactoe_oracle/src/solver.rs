//! Retrograde solver.
//!
//! Every reachable position is enumerated once, then positions are
//! resolved from the fullest boards back to the empty one. Successors
//! always hold one more mark than their parent, so by the time a rank is
//! processed every child outcome is already final.

use crate::board::Board;
use crate::outcome::Outcome;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;
use std::time::Instant;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

static GLOBAL: OnceLock<SolvedTable> = OnceLock::new();

/// Optimal-play outcome of every reachable position.
///
/// The table is immutable once built and can be shared freely between
/// threads.
#[derive(Debug, Clone)]
pub struct SolvedTable {
    outcomes: HashMap<Board, Outcome>,
}

impl SolvedTable {
    /// Enumerates and solves the whole game.
    #[instrument]
    pub fn build() -> Self {
        let started = Instant::now();
        info!("Solving tic-tac-toe");

        let mut outcomes: HashMap<Board, Outcome> = Board::reachable_states()
            .map(|board| (board, Outcome::InProgress))
            .collect();

        let mut ranks: BTreeMap<usize, Vec<Board>> = BTreeMap::new();
        for board in outcomes.keys() {
            ranks.entry(board.mark_count()).or_default().push(*board);
        }

        for (marks, boards) in ranks.iter().rev() {
            debug!(marks, states = boards.len(), "Resolving rank");
            for board in boards {
                let resolved = Self::resolve(&outcomes, board);
                outcomes.insert(*board, resolved);
            }
        }

        info!(
            states = outcomes.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Solve complete"
        );
        Self { outcomes }
    }

    /// Shared table, built on first use.
    pub fn global() -> &'static SolvedTable {
        GLOBAL.get_or_init(Self::build)
    }

    /// Folds the already-final outcomes of `board`'s children.
    fn resolve(outcomes: &HashMap<Board, Outcome>, board: &Board) -> Outcome {
        let own = board.outcome();
        if own != Outcome::InProgress {
            return own;
        }

        let side = board.side_to_move();
        board
            .successors()
            .map(|child| outcomes.get(&child).copied().unwrap_or(Outcome::Illegal))
            .fold(Outcome::worst_for(side), |best, child| {
                Outcome::best_for(side, best, child)
            })
    }

    /// Recorded outcome for `board`, if it is reachable.
    pub fn get(&self, board: &Board) -> Option<Outcome> {
        self.outcomes.get(board).copied()
    }

    /// Number of positions in the table.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when the table holds no positions.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// All positions with their outcomes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Board, &Outcome)> {
        self.outcomes.iter()
    }

    /// Number of positions for every outcome, including zero counts.
    pub fn outcome_counts(&self) -> Vec<(Outcome, usize)> {
        Outcome::iter()
            .map(|outcome| {
                let count = self.outcomes.values().filter(|o| **o == outcome).count();
                (outcome, count)
            })
            .collect()
    }

    /// Number of positions for every mark count.
    pub fn rank_counts(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for board in self.outcomes.keys() {
            *counts.entry(board.mark_count()).or_insert(0) += 1;
        }
        counts
    }
}
