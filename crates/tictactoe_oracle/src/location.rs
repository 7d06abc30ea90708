//! Board locations.
//!
//! A location has three equivalent projections:
//!
//! - an index in `1..=9`, row-major from the top-left corner;
//! - a `(rank, file)` pair, each in `1..=3`, with `index = 3 * (rank - 1) + file`;
//! - a chess-like cell label, `a3` for index 1 through `c1` for index 9.
//!
//! Labels count ranks from the bottom of the board, so rank 1 prints as
//! digit `3`. Raw index order is what move ordering is defined by.

use crate::error::{OracleError, OracleErrorKind};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::instrument;

/// One of the nine cells of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location {
    index: u8,
}

impl Location {
    /// All nine locations in index order.
    pub const ALL: [Location; 9] = [
        Location { index: 1 },
        Location { index: 2 },
        Location { index: 3 },
        Location { index: 4 },
        Location { index: 5 },
        Location { index: 6 },
        Location { index: 7 },
        Location { index: 8 },
        Location { index: 9 },
    ];

    /// Creates a location from an index in `1..=9`.
    #[track_caller]
    #[instrument(level = "trace")]
    pub fn from_index(index: i64) -> Result<Self, OracleError> {
        if !(1..=9).contains(&index) {
            return Err(OracleError::new(OracleErrorKind::OutOfRange {
                what: "index",
                value: index,
                max: 9,
            }));
        }
        Ok(Self { index: index as u8 })
    }

    /// Creates a location from a rank (row) and file (column), each in `1..=3`.
    #[track_caller]
    #[instrument(level = "trace")]
    pub fn new(rank: i64, file: i64) -> Result<Self, OracleError> {
        if !(1..=3).contains(&rank) {
            return Err(OracleError::new(OracleErrorKind::OutOfRange {
                what: "rank",
                value: rank,
                max: 3,
            }));
        }
        if !(1..=3).contains(&file) {
            return Err(OracleError::new(OracleErrorKind::OutOfRange {
                what: "file",
                value: file,
                max: 3,
            }));
        }
        Ok(Self {
            index: (3 * (rank - 1) + file) as u8,
        })
    }

    /// Index in `1..=9`.
    pub fn index(self) -> u8 {
        self.index
    }

    /// Zero-based slot used for board storage.
    pub(crate) fn slot(self) -> usize {
        usize::from(self.index - 1)
    }

    /// Rank (row) in `1..=3`.
    pub fn rank(self) -> u8 {
        (self.index - 1) / 3 + 1
    }

    /// File (column) in `1..=3`.
    pub fn file(self) -> u8 {
        (self.index - 1) % 3 + 1
    }

    /// Cell label, `a3` through `c1`.
    pub fn cell(self) -> String {
        let letter = char::from(b'a' + self.file() - 1);
        let digit = char::from(b'0' + 4 - self.rank());
        format!("{letter}{digit}")
    }
}

impl FromStr for Location {
    type Err = OracleError;

    /// Parses a cell label such as `b2`. Case and surrounding whitespace
    /// are ignored.
    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || {
            OracleError::new(OracleErrorKind::Format {
                input: s.to_string(),
                expected: "cell label a1..c3",
            })
        };

        let mut symbols = s.chars().filter(|c| !c.is_whitespace());
        let (Some(letter), Some(digit), None) = (symbols.next(), symbols.next(), symbols.next())
        else {
            return Err(format_error());
        };

        let file = match letter.to_ascii_lowercase() {
            'a' => 1,
            'b' => 2,
            'c' => 3,
            _ => return Err(format_error()),
        };
        let rank = match digit {
            '1' => 3,
            '2' => 2,
            '3' => 1,
            _ => return Err(format_error()),
        };

        Self::new(rank, file)
    }
}

impl TryFrom<(i64, i64)> for Location {
    type Error = OracleError;

    #[track_caller]
    fn try_from((rank, file): (i64, i64)) -> Result<Self, Self::Error> {
        Self::new(rank, file)
    }
}

impl TryFrom<String> for Location {
    type Error = OracleError;

    #[track_caller]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.cell()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cell())
    }
}

impl Ord for Location {
    /// Orders by cell label, ASCII case-insensitive.
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.cell().to_ascii_lowercase();
        let right = other.cell().to_ascii_lowercase();
        left.cmp(&right)
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
