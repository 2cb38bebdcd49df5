use chess_core::ChessError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PuzzleError {
    #[error(transparent)]
    Chess(#[from] ChessError),

    #[error("No puzzle loaded")]
    NoPuzzle,

    #[error("Puzzle index {index} out of range ({len} puzzles)")]
    PuzzleOutOfRange { index: usize, len: usize },

    #[error("A promotion choice is pending")]
    PromotionPending,

    #[error("No promotion is pending")]
    NoPendingPromotion,

    #[error("Invalid promotion piece: {0}")]
    InvalidPromotion(char),

    #[error("Puzzle database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
