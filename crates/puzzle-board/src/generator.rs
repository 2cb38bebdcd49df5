use crate::error::PuzzleError;
use crate::puzzle::Puzzle;

/// Source of fresh puzzles, keyed by a puzzle-database identifier.
pub trait PuzzleGenerator {
    fn generate(&mut self, db: &str) -> Result<Puzzle, PuzzleError>;
}

impl<F> PuzzleGenerator for F
where
    F: FnMut(&str) -> Result<Puzzle, PuzzleError>,
{
    fn generate(&mut self, db: &str) -> Result<Puzzle, PuzzleError> {
        self(db)
    }
}
