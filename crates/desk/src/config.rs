use std::env;
use std::path::PathBuf;

use engine_registry::default_opener;

/// Saved puzzle session, relative to the data directory.
pub const SESSION_FILE: &str = "puzzles/session.json";

/// Default Lichess puzzle export, relative to the data directory.
pub const PUZZLE_DB_FILE: &str = "puzzles/lichess_db_puzzle.csv";

#[derive(Clone, Debug)]
pub struct Config {
    /// Application directory holding engines/ and puzzles/
    pub data_dir: PathBuf,
    pub puzzle_db: PathBuf,
    pub min_rating: u32,
    pub max_rating: u32,
    /// Command used to open folders in the file browser
    pub opener: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("CHESS_DESK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let puzzle_db = lookup("PUZZLE_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(PUZZLE_DB_FILE));

        Self {
            puzzle_db,
            min_rating: lookup("PUZZLE_MIN_RATING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            max_rating: lookup("PUZZLE_MAX_RATING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            opener: lookup("CHESS_DESK_OPENER").unwrap_or_else(|| default_opener().to_string()),
            data_dir,
        }
    }

    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chess-desk")
}
