use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("Invalid move notation: {0}")]
    InvalidMove(String),

    #[error("Illegal move '{mv}' in position {fen}")]
    IllegalMove { mv: String, fen: String },
}
