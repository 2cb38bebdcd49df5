//! Puzzle records, the solving session state machine and puzzle sources.

pub mod board;
pub mod error;
pub mod generator;
pub mod lichess;
pub mod puzzle;
pub mod session;

pub use board::{replay, BoardView, Replay};
pub use error::PuzzleError;
pub use generator::PuzzleGenerator;
pub use lichess::LichessDatabase;
pub use puzzle::{Completion, Puzzle};
pub use session::{MoveOutcome, PendingPromotion, Phase, PuzzleSession};
