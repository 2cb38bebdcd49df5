//! Puzzle source backed by the Lichess puzzle CSV export.
//!
//! Columns: `PuzzleId,FEN,Moves,Rating,RatingDeviation,Popularity,NbPlays,Themes,GameUrl,OpeningTags`.
//! Only the first four are read; the header row is optional.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::error::PuzzleError;
use crate::generator::PuzzleGenerator;
use crate::puzzle::Puzzle;

pub struct LichessDatabase {
    min_rating: u32,
    max_rating: u32,
    /// Parsed databases, keyed by file path
    cache: HashMap<PathBuf, Vec<Puzzle>>,
    rng: StdRng,
}

impl LichessDatabase {
    /// Database picking puzzles rated within `min_rating..=max_rating`.
    pub fn new(min_rating: u32, max_rating: u32) -> Self {
        Self::with_rng(min_rating, max_rating, StdRng::from_entropy())
    }

    /// Deterministic variant for reproducible runs.
    pub fn with_seed(min_rating: u32, max_rating: u32, seed: u64) -> Self {
        Self::with_rng(min_rating, max_rating, StdRng::seed_from_u64(seed))
    }

    fn with_rng(min_rating: u32, max_rating: u32, rng: StdRng) -> Self {
        Self {
            min_rating,
            max_rating,
            cache: HashMap::new(),
            rng,
        }
    }

    fn in_range(&self, puzzle: &Puzzle) -> bool {
        match puzzle.rating {
            Some(r) => (self.min_rating..=self.max_rating).contains(&r),
            None => true,
        }
    }
}

impl PuzzleGenerator for LichessDatabase {
    fn generate(&mut self, db: &str) -> Result<Puzzle, PuzzleError> {
        let path = Path::new(db);
        if !self.cache.contains_key(path) {
            let puzzles = load_csv(path)?;
            info!(db, count = puzzles.len(), "Loaded puzzle database");
            self.cache.insert(path.to_path_buf(), puzzles);
        }

        let candidates: Vec<&Puzzle> = self.cache[path]
            .iter()
            .filter(|p| self.in_range(p))
            .collect();

        let picked = candidates.choose(&mut self.rng).ok_or_else(|| {
            PuzzleError::Database(format!(
                "no puzzles rated {}-{} in {db}",
                self.min_rating, self.max_rating
            ))
        })?;

        Ok((*picked).clone())
    }
}

/// Read every well-formed puzzle from a Lichess CSV file.
pub fn load_csv(path: &Path) -> Result<Vec<Puzzle>, PuzzleError> {
    let text = fs::read_to_string(path)?;
    let mut puzzles = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("PuzzleId,") {
            continue;
        }
        match parse_csv_line(line) {
            Some(p) => puzzles.push(p),
            None => warn!(path = %path.display(), line = line_no + 1, "Skipping malformed puzzle row"),
        }
    }

    Ok(puzzles)
}

/// Parse one CSV row. Rows without an id, FEN or move list are rejected.
pub fn parse_csv_line(line: &str) -> Option<Puzzle> {
    let mut fields = line.split(',');
    let id = fields.next()?.trim();
    let fen = fields.next()?.trim();
    let moves = fields.next()?.trim();
    let rating = fields.next().and_then(|r| r.trim().parse().ok());

    if id.is_empty() || fen.is_empty() || moves.is_empty() {
        return None;
    }

    let mut puzzle = Puzzle::from_line(fen, moves);
    puzzle.id = Some(id.to_string());
    puzzle.rating = rating;
    Some(puzzle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_line() {
        let row = "00sHx,q3k1nr/1pp1nQpp/3p4/1P2p3/4P3/B1PP1b2/B5PP/5K2 b k - 0 17,e8d7 a2e6 d7d8 f7f8,1760,80,83,72,mate mateIn2 middlegame short,https://lichess.org/yyznGmXs/black#34,Italian_Game";
        let p = parse_csv_line(row).unwrap();
        assert_eq!(p.id.as_deref(), Some("00sHx"));
        assert_eq!(p.moves, vec!["e8d7", "a2e6", "d7d8", "f7f8"]);
        assert_eq!(p.rating, Some(1760));
    }

    #[test]
    fn test_parse_csv_line_rejects_short_rows() {
        assert!(parse_csv_line("abc").is_none());
        assert!(parse_csv_line("abc,,e2e4").is_none());
    }

    #[test]
    fn test_unrated_rows_pass_filter() {
        let db = LichessDatabase::with_seed(1000, 1200, 7);
        let p = parse_csv_line("id1,8/8/8/8/8/8/8/K6k w - - 0 1,a1a2 h1h2").unwrap();
        assert!(db.in_range(&p));
    }
}
