//! Thin adapter over `shakmaty` shared by the puzzle board and the front-end.

pub mod board;
pub mod error;
pub mod uci;

pub use board::{
    legal_dests, parse_position, position_fen, render_board, BoardColor, Dests, STANDARD_START_FEN,
};
pub use error::ChessError;
pub use uci::{find_legal_move, MoveKey, PROMOTION_ROLES};
