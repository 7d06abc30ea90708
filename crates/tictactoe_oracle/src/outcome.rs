//! Game outcomes and the combinators used to resolve them.

use crate::board::Mark;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Game-theoretic result of a position.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum Outcome {
    /// Not decided yet; the game continues.
    InProgress,
    /// The first player (X) wins.
    FirstWin,
    /// The second player (O) wins.
    SecondWin,
    /// Nobody wins.
    Draw,
    /// The position cannot arise in a legal game.
    Illegal,
}

impl Outcome {
    /// Swaps the two wins; every other outcome is unchanged.
    pub fn reverse(self) -> Self {
        match self {
            Outcome::FirstWin => Outcome::SecondWin,
            Outcome::SecondWin => Outcome::FirstWin,
            other => other,
        }
    }

    /// Picks the outcome the first player prefers.
    ///
    /// Priority: `FirstWin`, then `Draw`, then `InProgress`, then anything else.
    pub fn best_for_first(self, other: Self) -> Self {
        Self::prefer(self, other, Outcome::FirstWin)
    }

    /// Picks the outcome the second player prefers.
    ///
    /// Priority: `SecondWin`, then `Draw`, then `InProgress`, then anything else.
    pub fn best_for_second(self, other: Self) -> Self {
        Self::prefer(self, other, Outcome::SecondWin)
    }

    /// Picks the outcome `side` prefers. `Empty` returns `left` unchanged.
    #[instrument(level = "trace")]
    pub fn best_for(side: Mark, left: Self, right: Self) -> Self {
        match side {
            Mark::First => left.best_for_first(right),
            Mark::Second => left.best_for_second(right),
            Mark::Empty => left,
        }
    }

    /// Worst outcome for `side`, used to seed a fold over its options.
    pub fn worst_for(side: Mark) -> Self {
        match side {
            Mark::First => Outcome::SecondWin,
            Mark::Second => Outcome::FirstWin,
            Mark::Empty => Outcome::Illegal,
        }
    }

    /// True for outcomes that end the game.
    pub fn is_decided(self) -> bool {
        matches!(
            self,
            Outcome::FirstWin | Outcome::SecondWin | Outcome::Draw
        )
    }

    fn prefer(left: Self, right: Self, win: Self) -> Self {
        if left == right {
            return left;
        }
        for wanted in [win, Outcome::Draw, Outcome::InProgress] {
            if left == wanted {
                return left;
            }
            if right == wanted {
                return right;
            }
        }
        left
    }
}

/// How good a move is for the side making it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
pub enum MoveExpectancy {
    /// The mover wins with best play.
    Win,
    /// Best play leads to a draw.
    Draw,
    /// The mover loses against best play.
    Lose,
    /// The move cannot be played.
    Illegal,
}

impl MoveExpectancy {
    /// Reads `outcome` from the point of view of `side`.
    pub fn from_outcome(side: Mark, outcome: Outcome) -> Self {
        match (side, outcome) {
            (_, Outcome::Draw) if side != Mark::Empty => MoveExpectancy::Draw,
            (Mark::First, Outcome::FirstWin) | (Mark::Second, Outcome::SecondWin) => {
                MoveExpectancy::Win
            }
            (Mark::First, Outcome::SecondWin) | (Mark::Second, Outcome::FirstWin) => {
                MoveExpectancy::Lose
            }
            _ => MoveExpectancy::Illegal,
        }
    }
}
