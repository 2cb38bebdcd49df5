//! Persisted puzzle session so a run survives restarts.

use std::path::Path;

use engine_registry::{LocalFile, RegistryError};
use puzzle_board::{Puzzle, PuzzleGenerator, PuzzleSession};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    pub puzzles: Vec<Puzzle>,
    pub current_puzzle: usize,
    pub current_move: usize,
}

impl Default for SavedSession {
    fn default() -> Self {
        Self {
            puzzles: Vec::new(),
            current_puzzle: 0,
            current_move: 1,
        }
    }
}

impl SavedSession {
    pub fn capture<G: PuzzleGenerator>(session: &PuzzleSession<G>) -> Self {
        Self {
            puzzles: session.puzzles().to_vec(),
            current_puzzle: session.current_puzzle(),
            current_move: session.current_move(),
        }
    }
}

pub fn load(path: &Path) -> Result<LocalFile<SavedSession>, RegistryError> {
    LocalFile::load(path, SavedSession::default())
}
