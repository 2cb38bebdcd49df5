//! Replaying a puzzle line and the view handed to the board widget.

use chess_core::{legal_dests, parse_position, position_fen, render_board, BoardColor, Dests, MoveKey};
use serde::Serialize;
use shakmaty::{Chess, Position};

use crate::error::PuzzleError;
use crate::puzzle::Puzzle;

/// Position reached after replaying part of a puzzle line.
#[derive(Debug, Clone)]
pub struct Replay {
    pub position: Chess,
    pub last_move: Option<MoveKey>,
    pub orientation: BoardColor,
}

/// Replay the first `upto` scripted moves (clamped to the line length) on a
/// fresh position seeded from the puzzle's FEN.
///
/// The board is oriented towards the side to move after the first replayed
/// move, i.e. the solver.
pub fn replay(puzzle: &Puzzle, upto: usize) -> Result<Replay, PuzzleError> {
    let mut position = parse_position(&puzzle.fen)?;
    let mut last_move = None;
    let mut orientation = BoardColor::White;

    for (i, mv) in puzzle.moves.iter().take(upto).enumerate() {
        let key: MoveKey = mv.parse()?;
        let legal = key.to_move(&position)?;
        position.play_unchecked(legal);
        last_move = Some(key);
        if i == 0 {
            orientation = position.turn().into();
        }
    }

    Ok(Replay {
        position,
        last_move,
        orientation,
    })
}

impl Replay {
    pub fn turn(&self) -> BoardColor {
        self.position.turn().into()
    }

    pub fn fen(&self) -> String {
        position_fen(&self.position)
    }

    pub fn view(&self) -> BoardView {
        BoardView {
            fen: self.fen(),
            orientation: self.orientation,
            turn: self.turn(),
            dests: legal_dests(&self.position),
            last_move: self
                .last_move
                .map(|key| [key.from.to_string(), key.to.to_string()]),
            check: self.position.is_check(),
        }
    }

    pub fn render(&self) -> String {
        render_board(&self.position, self.orientation)
    }
}

/// Everything the board widget needs to draw the current puzzle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub fen: String,
    pub orientation: BoardColor,
    pub turn: BoardColor,
    pub dests: Dests,
    pub last_move: Option<[String; 2]>,
    pub check: bool,
}
