//! Compact coordinate move keys (`e2e4`, `e7e8q`).
//!
//! Puzzle lines are scripted in this notation and user attempts are
//! compared against it as plain strings, so a key must round-trip through
//! `Display`/`FromStr` exactly. Castling is always keyed by the king's
//! destination square (`e1g1`), never king-takes-rook.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Move, Role, Square};

use crate::board::position_fen;
use crate::error::ChessError;

/// Promotion pieces offered to the user, in picker order.
pub const PROMOTION_ROLES: [Role; 4] = [Role::Queen, Role::Rook, Role::Knight, Role::Bishop];

/// A board move in UCI coordinates. Drops and null moves are not keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MoveKey {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl MoveKey {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(self, role: Role) -> Self {
        Self {
            promotion: Some(role),
            ..self
        }
    }

    pub fn to_uci(&self) -> UciMove {
        UciMove::Normal {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }

    /// Key of a legal move, castling in standard `e1g1` form.
    pub fn from_move(m: &Move) -> Option<Self> {
        Self::from_uci(m.to_uci(CastlingMode::Standard))
    }

    fn from_uci(uci: UciMove) -> Option<Self> {
        match uci {
            UciMove::Normal { from, to, promotion } => Some(Self { from, to, promotion }),
            UciMove::Put { .. } | UciMove::Null => None,
        }
    }

    /// Resolve this key to the matching legal move in `pos`.
    pub fn to_move(&self, pos: &Chess) -> Result<Move, ChessError> {
        self.to_uci().to_move(pos).map_err(|_| ChessError::IllegalMove {
            mv: self.to_string(),
            fen: position_fen(pos),
        })
    }
}

impl fmt::Display for MoveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_uci(), f)
    }
}

impl FromStr for MoveKey {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidMove(s.to_string());

        let key = s
            .parse::<UciMove>()
            .ok()
            .and_then(Self::from_uci)
            .ok_or_else(invalid)?;
        match key.promotion {
            Some(role) if !PROMOTION_ROLES.contains(&role) => Err(invalid()),
            _ => Ok(key),
        }
    }
}

impl TryFrom<String> for MoveKey {
    type Error = ChessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MoveKey> for String {
    fn from(key: MoveKey) -> Self {
        key.to_string()
    }
}

/// Find the legal move a board widget reports as `from` -> `to`.
///
/// Castling may arrive as king-to-destination or king-to-rook; both map to
/// the castling move. A pawn reaching the last rank resolves to its queen
/// promotion, the caller picks the piece.
pub fn find_legal_move(pos: &Chess, from: Square, to: Square) -> Option<Move> {
    let plain = MoveKey::new(from, to);
    plain
        .to_move(pos)
        .or_else(|_| plain.with_promotion(Role::Queen).to_move(pos))
        .ok()
}
