//! Position helpers: FEN in/out, legal destinations and a plain text board.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, File, Position, Rank, Square};

use crate::error::ChessError;
use crate::uci::MoveKey;

pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Legal destinations per origin square, keyed by square name (`"e2" -> ["e3", "e4"]`).
pub type Dests = BTreeMap<String, Vec<String>>;

/// Side colour as the board widget spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardColor {
    #[default]
    White,
    Black,
}

impl BoardColor {
    pub fn opposite(self) -> Self {
        match self {
            BoardColor::White => BoardColor::Black,
            BoardColor::Black => BoardColor::White,
        }
    }

    /// Rank a pawn of this colour promotes on.
    pub fn last_rank(self) -> Rank {
        match self {
            BoardColor::White => Rank::Eighth,
            BoardColor::Black => Rank::First,
        }
    }
}

impl From<Color> for BoardColor {
    fn from(color: Color) -> Self {
        match color {
            Color::White => BoardColor::White,
            Color::Black => BoardColor::Black,
        }
    }
}

impl fmt::Display for BoardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardColor::White => f.write_str("white"),
            BoardColor::Black => f.write_str("black"),
        }
    }
}

/// Parse a FEN string into a standard chess position.
pub fn parse_position(fen: &str) -> Result<Chess, ChessError> {
    let invalid = |reason: String| ChessError::InvalidFen {
        fen: fen.to_string(),
        reason,
    };

    let parsed: Fen = fen
        .trim()
        .parse()
        .map_err(|e: shakmaty::fen::ParseFenError| invalid(e.to_string()))?;
    parsed
        .into_position::<Chess>(CastlingMode::Standard)
        .map_err(|e| invalid(e.to_string()))
}

pub fn position_fen(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// Legal destinations for every origin square, in move-key form.
pub fn legal_dests(pos: &Chess) -> Dests {
    let mut dests = Dests::new();
    for m in pos.legal_moves() {
        let Some(key) = MoveKey::from_move(&m) else {
            continue;
        };
        let to = key.to.to_string();
        let entry = dests.entry(key.from.to_string()).or_default();
        // Four promotion moves share one destination
        if !entry.contains(&to) {
            entry.push(to);
        }
    }
    for targets in dests.values_mut() {
        targets.sort();
    }
    dests
}

/// Render the board as text from `orientation`'s side, upper case for white.
pub fn render_board(pos: &Chess, orientation: BoardColor) -> String {
    let board = pos.board();
    let ranks: Vec<u32> = match orientation {
        BoardColor::White => (0..8).rev().collect(),
        BoardColor::Black => (0..8).collect(),
    };
    let files: Vec<u32> = match orientation {
        BoardColor::White => (0..8).collect(),
        BoardColor::Black => (0..8).rev().collect(),
    };

    let mut out = String::new();
    for &rank in &ranks {
        out.push_str(&format!("{} ", rank + 1));
        for &file in &files {
            let sq = Square::from_coords(File::new(file), Rank::new(rank));
            let c = match board.piece_at(sq) {
                Some(piece) if piece.color == Color::White => piece.role.char().to_ascii_uppercase(),
                Some(piece) => piece.role.char(),
                None => '.',
            };
            out.push(' ');
            out.push(c);
        }
        out.push('\n');
    }

    out.push_str("  ");
    for &file in &files {
        out.push(' ');
        out.push((b'a' + file as u8) as char);
    }
    out.push('\n');
    out
}
