use serde::{Deserialize, Serialize};

/// Outcome of a puzzle line. Once `Incorrect`, a line stays `Incorrect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    #[default]
    Incomplete,
    Correct,
    Incorrect,
}

/// A puzzle: starting FEN plus the scripted line in coordinate notation.
///
/// `moves[0]` is the opponent's set-up move; the solver plays the odd
/// indices and the opponent's scripted replies fill the even ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub fen: String,
    pub moves: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    #[serde(default)]
    pub completion: Completion,
}

impl Puzzle {
    pub fn new(fen: impl Into<String>, moves: Vec<String>) -> Self {
        Self {
            id: None,
            fen: fen.into(),
            moves,
            rating: None,
            completion: Completion::Incomplete,
        }
    }

    /// Build from a space separated move list, as puzzle databases store it.
    pub fn from_line(fen: &str, moves: &str) -> Self {
        Self::new(fen, moves.split_whitespace().map(String::from).collect())
    }

    pub fn expected_move(&self, index: usize) -> Option<&str> {
        self.moves.get(index).map(String::as_str)
    }

    pub fn is_final_move(&self, index: usize) -> bool {
        index + 1 == self.moves.len()
    }
}
