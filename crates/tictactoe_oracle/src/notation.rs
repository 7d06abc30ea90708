//! Text encoding of boards.
//!
//! The exchange format is nine symbols in index order, usually written as
//! three rows of three. Whitespace is ignored on input and several
//! synonyms are accepted for each mark:
//!
//! | Mark     | Symbols         |
//! |----------|-----------------|
//! | `First`  | `x` `X` `1` `+` |
//! | `Second` | `o` `O` `0`     |
//! | `Empty`  | `.` `_` `-`     |

use crate::board::{Board, Mark};
use crate::error::{OracleError, OracleErrorKind};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use tracing::instrument;

const EXPECTED: &str = "nine symbols from X x 1 + O o 0 . _ -";

fn mark_from_symbol(symbol: char) -> Option<Mark> {
    match symbol {
        'x' | 'X' | '1' | '+' => Some(Mark::First),
        'o' | 'O' | '0' => Some(Mark::Second),
        '.' | '_' | '-' => Some(Mark::Empty),
        _ => None,
    }
}

impl Board {
    /// Nine symbols on a single line, e.g. `X.O.X..O.`.
    pub fn to_compact(&self) -> String {
        self.marks().iter().map(|m| m.to_char()).collect()
    }

    /// Parses a board, returning `None` instead of an error on bad input.
    pub fn try_parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    /// Renders the board with rank and file labels:
    ///
    /// ```text
    /// 3 | X O
    /// 2 |  X
    /// 1 |   O
    ///    -----
    ///     abc
    /// ```
    pub fn diagram(&self) -> String {
        let mut rows: Vec<String> = self
            .marks()
            .chunks(3)
            .zip(["3", "2", "1"])
            .map(|(row, digit)| {
                let cells: String = row.iter().map(|m| m.to_char_or(' ')).collect();
                format!("{digit} | {cells} ")
            })
            .collect();
        rows.push("   -----".to_string());
        rows.push("    abc ".to_string());
        rows.join("\n")
    }
}

impl std::fmt::Display for Board {
    /// Three rows of three symbols separated by newlines.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let compact = self.to_compact();
        write!(f, "{}\n{}\n{}", &compact[0..3], &compact[3..6], &compact[6..9])
    }
}

impl FromStr for Board {
    type Err = OracleError;

    #[track_caller]
    #[instrument(level = "debug")]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || {
            OracleError::new(OracleErrorKind::Format {
                input: s.to_string(),
                expected: EXPECTED,
            })
        };

        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).take(10).collect();
        if symbols.len() != 9 {
            return Err(format_error());
        }

        let mut marks = [Mark::Empty; 9];
        for (slot, symbol) in marks.iter_mut().zip(symbols) {
            *slot = mark_from_symbol(symbol).ok_or_else(format_error)?;
        }

        Ok(Board::from_marks(marks))
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_compact())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;

    #[test]
    fn test_parse_rows() {
        let board: Board = "X.O\n.X.\n..O".parse().unwrap();
        assert_eq!(board.mark_at(Location::from_index(1).unwrap()), Mark::First);
        assert_eq!(board.mark_at(Location::from_index(3).unwrap()), Mark::Second);
        assert_eq!(board.mark_at(Location::from_index(5).unwrap()), Mark::First);
        assert_eq!(board.mark_count(), 4);
    }

    #[test]
    fn test_synonyms() {
        let a: Board = "x_o -+- __0".parse().unwrap();
        let b: Board = "X.O.X...O".parse().unwrap();
        assert_eq!(a, b);
        let c: Board = "1.0.1...0".parse().unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn test_display_round_trip() {
        let board: Board = "XO.\n.X.\nO..".parse().unwrap();
        let text = board.to_string();
        assert_eq!(text, "XO.\n.X.\nO..");
        assert_eq!(text.parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_rejects_wrong_length_and_symbols() {
        assert!("X.O.X...".parse::<Board>().is_err());
        assert!("X.O.X...O.".parse::<Board>().is_err());
        assert!("X.O.X...Q".parse::<Board>().is_err());
        assert!("".parse::<Board>().is_err());
        assert!(Board::try_parse("   ").is_none());
    }

    #[test]
    fn test_diagram_labels() {
        let board: Board = "X..\n.O.\n..X".parse().unwrap();
        let diagram = board.diagram();
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines[0], "3 | X   ");
        assert_eq!(lines[1], "2 |  O  ");
        assert_eq!(lines[2], "1 |   X ");
        assert_eq!(lines[4], "    abc ");
    }

    #[test]
    fn test_serde_uses_compact_text() {
        let board: Board = "X.O\n...\n...".parse().unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "\"X.O......\"");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        assert!(serde_json::from_str::<Board>("\"XX\"").is_err());
    }
}
