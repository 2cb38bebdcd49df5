//! Puzzle solving session.
//!
//! Owns the puzzle list, the cursor (`current_puzzle`, `current_move`) and
//! the transient per-line state: the pending promotion and the `ended`
//! latch. Transient state is reset whenever the active puzzle changes.
//!
//! A move attempt is resolved by comparing its coordinate key against the
//! scripted move under the cursor:
//!
//! * match, not final: the cursor skips the opponent's scripted reply (+2);
//! * match, final: the line is marked `Correct` unless it is already
//!   `Incorrect`, and a new puzzle is requested from the generator;
//! * mismatch (including illegal attempts): the line is marked `Incorrect`
//!   once; later attempts are still resolved but never re-report.

use chess_core::{find_legal_move, MoveKey, PROMOTION_ROLES};
use shakmaty::{Position, Role, Square};
use tracing::{debug, info, warn};

use crate::board::{replay, BoardView, Replay};
use crate::error::PuzzleError;
use crate::generator::PuzzleGenerator;
use crate::puzzle::{Completion, Puzzle};

/// A pawn move to the last rank waiting for the promotion piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingMove,
    AwaitingPromotion,
    /// A wrong move was played in this line
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Correct move; the line continues at `next_move`.
    Advanced { next_move: usize },
    /// Final move played. `next_puzzle` is the index of the freshly
    /// generated puzzle, or `None` when the generator failed.
    Solved {
        completion: Completion,
        next_puzzle: Option<usize>,
    },
    /// Wrong or illegal move. `reported` is set for the attempt that marked
    /// the line incorrect.
    Incorrect { reported: bool },
    /// Pawn reached the last rank: call `promote` or `cancel_promotion`.
    PromotionRequired(PendingPromotion),
}

pub struct PuzzleSession<G> {
    puzzles: Vec<Puzzle>,
    current_puzzle: usize,
    current_move: usize,
    db: String,
    generator: G,
    ended: bool,
    pending: Option<PendingPromotion>,
}

impl<G: PuzzleGenerator> PuzzleSession<G> {
    /// Empty session; call `generate_puzzle` to load the first puzzle.
    pub fn new(db: impl Into<String>, generator: G) -> Self {
        Self {
            puzzles: Vec::new(),
            current_puzzle: 0,
            current_move: 1,
            db: db.into(),
            generator,
            ended: false,
            pending: None,
        }
    }

    /// Resume a session from saved cursor state.
    pub fn restore(
        db: impl Into<String>,
        generator: G,
        puzzles: Vec<Puzzle>,
        current_puzzle: usize,
        current_move: usize,
    ) -> Result<Self, PuzzleError> {
        if !puzzles.is_empty() && current_puzzle >= puzzles.len() {
            return Err(PuzzleError::PuzzleOutOfRange {
                index: current_puzzle,
                len: puzzles.len(),
            });
        }

        let mut session = Self::new(db, generator);
        session.puzzles = puzzles;
        session.current_puzzle = current_puzzle;
        session.current_move = current_move;
        Ok(session)
    }

    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    pub fn current_puzzle(&self) -> usize {
        self.current_puzzle
    }

    pub fn current_move(&self) -> usize {
        self.current_move
    }

    pub fn db(&self) -> &str {
        &self.db
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending
    }

    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            Phase::AwaitingPromotion
        } else if self.ended {
            Phase::Ended
        } else {
            Phase::AwaitingMove
        }
    }

    pub fn puzzle(&self) -> Result<&Puzzle, PuzzleError> {
        self.puzzles
            .get(self.current_puzzle)
            .ok_or(PuzzleError::NoPuzzle)
    }

    /// Replay the active puzzle up to the cursor.
    pub fn replay(&self) -> Result<Replay, PuzzleError> {
        replay(self.puzzle()?, self.current_move)
    }

    pub fn view(&self) -> Result<BoardView, PuzzleError> {
        Ok(self.replay()?.view())
    }

    /// Request a new puzzle for this session's database and make it active.
    pub fn generate_puzzle(&mut self) -> Result<usize, PuzzleError> {
        let mut puzzle = self.generator.generate(&self.db)?;
        // Reject lines that cannot be replayed before they become active
        replay(&puzzle, puzzle.moves.len())?;
        puzzle.completion = Completion::Incomplete;

        self.puzzles.push(puzzle);
        let index = self.puzzles.len() - 1;
        self.activate(index);
        info!(index, db = %self.db, "New puzzle loaded");
        Ok(index)
    }

    pub fn select_puzzle(&mut self, index: usize) -> Result<(), PuzzleError> {
        if index >= self.puzzles.len() {
            return Err(PuzzleError::PuzzleOutOfRange {
                index,
                len: self.puzzles.len(),
            });
        }
        self.activate(index);
        Ok(())
    }

    /// A user move from `from` to `to`, as reported by the board widget.
    pub fn play(&mut self, from: Square, to: Square) -> Result<MoveOutcome, PuzzleError> {
        if self.pending.is_some() {
            return Err(PuzzleError::PromotionPending);
        }

        let replay = self.replay()?;
        let Some(key) = find_legal_move(&replay.position, from, to)
            .as_ref()
            .and_then(MoveKey::from_move)
        else {
            debug!(%from, %to, "Illegal move attempt");
            return Ok(self.mismatch());
        };

        let moved_pawn = replay
            .position
            .board()
            .piece_at(key.from)
            .is_some_and(|piece| piece.role == Role::Pawn);
        if moved_pawn && key.to.rank() == replay.turn().last_rank() {
            let pending = PendingPromotion {
                from: key.from,
                to: key.to,
            };
            self.pending = Some(pending);
            return Ok(MoveOutcome::PromotionRequired(pending));
        }

        self.resolve(MoveKey::new(key.from, key.to))
    }

    /// Complete the pending promotion with `role`.
    pub fn promote(&mut self, role: Role) -> Result<MoveOutcome, PuzzleError> {
        if self.pending.is_none() {
            return Err(PuzzleError::NoPendingPromotion);
        }
        if !PROMOTION_ROLES.contains(&role) {
            return Err(PuzzleError::InvalidPromotion(role.char()));
        }

        let Some(pending) = self.pending.take() else {
            return Err(PuzzleError::NoPendingPromotion);
        };
        self.resolve(MoveKey::new(pending.from, pending.to).with_promotion(role))
    }

    /// Close the promotion picker without choosing. Returns whether a
    /// promotion was pending; nothing else changes.
    pub fn cancel_promotion(&mut self) -> bool {
        self.pending.take().is_some()
    }

    fn resolve(&mut self, attempt: MoveKey) -> Result<MoveOutcome, PuzzleError> {
        let index = self.current_move;
        let puzzle = self
            .puzzles
            .get_mut(self.current_puzzle)
            .ok_or(PuzzleError::NoPuzzle)?;

        let attempt = attempt.to_string();
        if puzzle.expected_move(index) != Some(attempt.as_str()) {
            debug!(%attempt, expected = ?puzzle.expected_move(index), "Wrong move");
            return Ok(self.mismatch());
        }

        if !puzzle.is_final_move(index) {
            self.current_move += 2;
            debug!(%attempt, next_move = self.current_move, "Correct move");
            return Ok(MoveOutcome::Advanced {
                next_move: self.current_move,
            });
        }

        if puzzle.completion != Completion::Incorrect {
            puzzle.completion = Completion::Correct;
        }
        let completion = puzzle.completion;
        info!(puzzle = self.current_puzzle, ?completion, "Puzzle line finished");

        self.ended = false;
        self.current_move = 1;

        let next_puzzle = match self.generate_puzzle() {
            Ok(index) => Some(index),
            Err(e) => {
                warn!(db = %self.db, error = %e, "Failed to generate next puzzle");
                None
            }
        };

        Ok(MoveOutcome::Solved {
            completion,
            next_puzzle,
        })
    }

    fn mismatch(&mut self) -> MoveOutcome {
        let reported = !self.ended;
        if reported {
            if let Some(puzzle) = self.puzzles.get_mut(self.current_puzzle) {
                puzzle.completion = Completion::Incorrect;
            }
        }
        self.ended = true;
        MoveOutcome::Incorrect { reported }
    }

    fn activate(&mut self, index: usize) {
        self.current_puzzle = index;
        self.current_move = 1;
        self.ended = false;
        self.pending = None;
    }
}
