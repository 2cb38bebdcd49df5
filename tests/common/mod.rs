#![allow(dead_code)]

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use engine_registry::EngineForm;
use puzzle_board::{Puzzle, PuzzleError};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Black king walks, white pawn promotes on e8.
pub const PROMOTION_FEN: &str = "k7/4P3/8/8/8/8/8/K7 b - - 0 1";

/// Generate a unique suffix based on timestamp to avoid collisions.
pub fn unique_suffix() -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", std::process::id(), ts % 1_000_000_000)
}

/// Directory under the system temp dir, removed with everything in it on drop.
pub struct ScratchDir(PathBuf);

impl Deref for ScratchDir {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ScratchDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// Fresh, not yet created scratch directory.
pub fn scratch_dir(label: &str) -> ScratchDir {
    ScratchDir(std::env::temp_dir().join(format!("chess-desk-{label}-{}", unique_suffix())))
}

pub fn engine_form(name: &str, path: &str, elo: Option<u32>) -> EngineForm {
    EngineForm {
        name: name.to_string(),
        path: path.to_string(),
        image: None,
        elo,
    }
}

/// Italian opening line: solver plays black's e5 and Nc6.
pub fn opening_puzzle() -> Puzzle {
    Puzzle::from_line(START_FEN, "e2e4 e7e5 g1f3 b8c6")
}

pub fn promotion_puzzle() -> Puzzle {
    Puzzle::from_line(PROMOTION_FEN, "a8b8 e7e8q")
}

/// Generator that always hands out `puzzle`.
pub fn fixed_generator(puzzle: Puzzle) -> impl FnMut(&str) -> Result<Puzzle, PuzzleError> {
    move |_db| Ok(puzzle.clone())
}
