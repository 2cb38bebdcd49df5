//! `chess-desk puzzles ...`: a terminal puzzle board.

use std::io::{BufRead, Write};

use chess_core::{MoveKey, PROMOTION_ROLES};
use engine_registry::LocalFile;
use puzzle_board::{Completion, MoveOutcome, Puzzle, PuzzleError, PuzzleGenerator, PuzzleSession};
use shakmaty::{Position, Role, Square};
use tracing::warn;

use crate::session_store::SavedSession;

const HELP: &str = "Enter a move as from+to (e2e4, e7e8q), or: new, show, list, select <n>, help, quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Move {
        from: Square,
        to: Square,
        promotion: Option<Role>,
    },
    New,
    Show,
    List,
    Select(usize),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (Some("new"), None) => Input::New,
        (Some("show" | "board"), None) => Input::Show,
        (Some("list"), None) => Input::List,
        (Some("help" | "?"), None) => Input::Help,
        (Some("quit" | "exit"), None) => Input::Quit,
        (Some("select"), Some(n)) => match n.parse() {
            Ok(index) => Input::Select(index),
            Err(_) => Input::Unknown(line.to_string()),
        },
        (Some(word), None) => match word.parse::<MoveKey>() {
            Ok(key) => Input::Move {
                from: key.from,
                to: key.to,
                promotion: key.promotion,
            },
            Err(_) => Input::Unknown(line.to_string()),
        },
        _ => Input::Unknown(line.to_string()),
    }
}

/// Interactive loop: reads commands from `input` until `quit` or EOF,
/// saving the session after every change.
pub fn run<G, R, W>(
    session: &mut PuzzleSession<G>,
    store: &mut LocalFile<SavedSession>,
    mut input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    G: PuzzleGenerator,
    R: BufRead,
    W: Write,
{
    if session.puzzles().is_empty() {
        session.generate_puzzle()?;
        store.set(SavedSession::capture(session))?;
    }
    writeln!(out, "{HELP}")?;
    show(session, out)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = read_line(&mut input)? else {
            break;
        };

        let result = match parse_input(&line) {
            Input::Quit => break,
            Input::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Input::Show => show(session, out),
            Input::List => {
                write!(out, "{}", format_puzzles(session.puzzles(), session.current_puzzle()))?;
                continue;
            }
            Input::New => match session.generate_puzzle() {
                Ok(_) => show(session, out),
                Err(e) => Err(e.into()),
            },
            Input::Select(index) => match session.select_puzzle(index) {
                Ok(()) => show(session, out),
                Err(e) => Err(e.into()),
            },
            Input::Move {
                from,
                to,
                promotion,
            } => play(session, from, to, promotion, &mut input, out),
            Input::Unknown(text) => {
                if !text.is_empty() {
                    writeln!(out, "Unrecognised input '{text}'. {HELP}")?;
                }
                continue;
            }
        };

        if let Err(e) = result {
            warn!(error = %e, "Puzzle command failed");
            writeln!(out, "Error: {e}")?;
        }
        store.set(SavedSession::capture(session))?;
    }

    store.set(SavedSession::capture(session))?;
    Ok(())
}

fn play<G, R, W>(
    session: &mut PuzzleSession<G>,
    from: Square,
    to: Square,
    promotion: Option<Role>,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()>
where
    G: PuzzleGenerator,
    R: BufRead,
    W: Write,
{
    if let Some(role) = promotion {
        let replay = session.replay()?;
        if MoveKey::new(from, to).to_move(&replay.position).is_ok() {
            writeln!(out, "{from}{to} is not a promotion, drop the '{}'.", role.char())?;
            return Ok(());
        }
    }

    let mut outcome = session.play(from, to)?;

    if let MoveOutcome::PromotionRequired(pending) = outcome {
        let role = match promotion {
            Some(role) => Some(role),
            None => ask_promotion(pending.from, pending.to, input, out)?,
        };

        let Some(role) = role else {
            session.cancel_promotion();
            writeln!(out, "Promotion cancelled.")?;
            return Ok(());
        };
        outcome = match session.promote(role) {
            Ok(outcome) => outcome,
            Err(e) => {
                session.cancel_promotion();
                return Err(e.into());
            }
        };
    }

    writeln!(out, "{}", describe(&outcome))?;
    if !matches!(outcome, MoveOutcome::Incorrect { .. }) {
        show(session, out)?;
    }
    Ok(())
}

/// Ask until the answer is a promotion piece. An empty answer or EOF cancels.
fn ask_promotion<R: BufRead, W: Write>(
    from: Square,
    to: Square,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<Role>> {
    loop {
        write!(out, "Promote {from}{to} to (q/r/n/b, empty to cancel): ")?;
        out.flush()?;
        let answer = match read_line(input)? {
            Some(answer) if !answer.is_empty() => answer,
            _ => return Ok(None),
        };
        match parse_promotion(&answer) {
            Some(role) => return Ok(Some(role)),
            None => writeln!(out, "'{answer}' is not one of q, r, n, b.")?,
        }
    }
}

fn parse_promotion(answer: &str) -> Option<Role> {
    let mut chars = answer.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            Role::from_char(c.to_ascii_lowercase()).filter(|role| PROMOTION_ROLES.contains(role))
        }
        _ => None,
    }
}

fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub fn describe(outcome: &MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Advanced { .. } => "Correct! Keep going.".to_string(),
        MoveOutcome::Solved {
            completion,
            next_puzzle,
        } => {
            let verdict = match completion {
                Completion::Correct => "Puzzle solved!",
                _ => "Line finished, but the puzzle stays marked incorrect.",
            };
            match next_puzzle {
                Some(_) => format!("{verdict} Next puzzle loaded."),
                None => format!("{verdict} Could not load a new puzzle."),
            }
        }
        MoveOutcome::Incorrect { reported: true } => "Wrong move. Puzzle marked incorrect.".to_string(),
        MoveOutcome::Incorrect { reported: false } => "Wrong move.".to_string(),
        MoveOutcome::PromotionRequired(p) => format!("Choose a promotion piece for {}{}.", p.from, p.to),
    }
}

fn show<G: PuzzleGenerator, W: Write>(session: &PuzzleSession<G>, out: &mut W) -> anyhow::Result<()> {
    let replay = session.replay()?;
    write!(out, "{}", replay.render())?;

    let mut status = format!(
        "Puzzle {} / {}, {} to move",
        session.current_puzzle() + 1,
        session.puzzles().len(),
        replay.turn()
    );
    if let Some(last) = replay.last_move {
        status.push_str(&format!(", last move {last}"));
    }
    if replay.position.is_check() {
        status.push_str(", check");
    }
    writeln!(out, "{status}")?;
    Ok(())
}

/// One line per puzzle: index, completion, id or FEN, rating.
pub fn format_puzzles(puzzles: &[Puzzle], current: usize) -> String {
    if puzzles.is_empty() {
        return "No puzzles yet.\n".to_string();
    }

    let mut out = String::new();
    for (i, puzzle) in puzzles.iter().enumerate() {
        let marker = if i == current { '*' } else { ' ' };
        let status = match puzzle.completion {
            Completion::Incomplete => "incomplete",
            Completion::Correct => "correct",
            Completion::Incorrect => "incorrect",
        };
        let name = puzzle.id.as_deref().unwrap_or(puzzle.fen.as_str());
        let rating = puzzle.rating.map(|r| format!(" ({r})")).unwrap_or_default();
        out.push_str(&format!("{marker}{i:>3}  {status:<10}  {name}{rating}\n"));
    }

    let solved = puzzles.iter().filter(|p| p.completion == Completion::Correct).count();
    out.push_str(&format!("{solved}/{} solved\n", puzzles.len()));
    out
}

/// Build a session from saved state, for `puzzles play`.
pub fn restore<G: PuzzleGenerator>(
    db: &str,
    generator: G,
    saved: SavedSession,
) -> Result<PuzzleSession<G>, PuzzleError> {
    PuzzleSession::restore(
        db,
        generator,
        saved.puzzles,
        saved.current_puzzle,
        saved.current_move,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(
            parse_input("e2e4"),
            Input::Move {
                from: Square::E2,
                to: Square::E4,
                promotion: None
            }
        );
        assert_eq!(
            parse_input(" e7e8q "),
            Input::Move {
                from: Square::E7,
                to: Square::E8,
                promotion: Some(Role::Queen)
            }
        );
        assert_eq!(parse_input("select 2"), Input::Select(2));
        assert_eq!(parse_input("quit"), Input::Quit);
        assert_eq!(parse_input("select x"), Input::Unknown("select x".into()));
        assert_eq!(parse_input("zz"), Input::Unknown("zz".into()));
    }

    #[test]
    fn test_parse_promotion() {
        assert_eq!(parse_promotion("q"), Some(Role::Queen));
        assert_eq!(parse_promotion("N"), Some(Role::Knight));
        assert_eq!(parse_promotion(""), None);
        assert_eq!(parse_promotion("queen"), None);
        assert_eq!(parse_promotion("k"), None);
        assert_eq!(parse_promotion("p"), None);
    }

    #[test]
    fn test_format_puzzles() {
        let mut solved = Puzzle::from_line("8/8/8/8/8/8/8/K6k w - - 0 1", "a1a2 h1h2");
        solved.completion = Completion::Correct;
        solved.id = Some("abc".into());
        solved.rating = Some(1500);
        let open = Puzzle::from_line("8/8/8/8/8/8/8/K6k w - - 0 1", "a1b1 h1g1");

        let text = format_puzzles(&[solved, open], 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "   0  correct     abc (1500)");
        assert!(lines[1].starts_with("*  1  incomplete"));
        assert_eq!(lines[2], "1/2 solved");
    }
}
