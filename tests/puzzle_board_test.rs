//! Integration tests for the puzzle session: move resolution, completion
//! latch, promotion flow and puzzle sources.

mod common;

use std::fs;

use chess_core::{parse_position, BoardColor};
use puzzle_board::{
    replay, Completion, LichessDatabase, MoveOutcome, Phase, Puzzle, PuzzleError,
    PuzzleGenerator, PuzzleSession,
};
use shakmaty::{Position, Role, Square};

fn session(
    puzzle: Puzzle,
    cursor: usize,
) -> PuzzleSession<impl FnMut(&str) -> Result<Puzzle, PuzzleError>> {
    PuzzleSession::restore(
        "test.csv",
        common::fixed_generator(common::opening_puzzle()),
        vec![puzzle],
        0,
        cursor,
    )
    .unwrap()
}

#[test]
fn test_three_move_line_from_cursor_one() {
    let line = Puzzle::from_line(common::START_FEN, "e2e4 e7e5 g1f3");

    let mut good = session(line.clone(), 1);
    assert_eq!(
        good.play(Square::E7, Square::E5).unwrap(),
        MoveOutcome::Advanced { next_move: 3 }
    );
    assert_eq!(good.current_move(), 3);

    let mut bad = session(line, 1);
    assert_eq!(
        bad.play(Square::E7, Square::E6).unwrap(),
        MoveOutcome::Incorrect { reported: true }
    );
    assert_eq!(bad.current_move(), 1);
    assert_eq!(bad.puzzle().unwrap().completion, Completion::Incorrect);
}

#[test]
fn test_board_view_follows_cursor() {
    let mut s = session(common::opening_puzzle(), 1);
    let view = s.view().unwrap();
    assert_eq!(view.orientation, BoardColor::Black);
    assert_eq!(view.turn, BoardColor::Black);
    assert_eq!(view.last_move, Some(["e2".to_string(), "e4".to_string()]));

    s.play(Square::E7, Square::E5).unwrap();
    let view = s.view().unwrap();
    // Opponent's scripted reply has been replayed
    assert_eq!(view.last_move, Some(["g1".to_string(), "f3".to_string()]));
    assert_eq!(view.orientation, BoardColor::Black);
    assert!(view.dests.contains_key("b8"));
}

#[test]
fn test_replay_parity_for_every_prefix() {
    let puzzle = common::opening_puzzle();
    for n in 0..=puzzle.moves.len() {
        let r = replay(&puzzle, n).unwrap();
        let expected = if n % 2 == 0 { BoardColor::White } else { BoardColor::Black };
        assert_eq!(r.turn(), expected);
        let reparsed = parse_position(&r.fen()).unwrap();
        assert_eq!(BoardColor::from(reparsed.turn()), expected);
    }
}

#[test]
fn test_incorrect_latch_survives_solving() {
    let mut s = session(common::opening_puzzle(), 1);
    assert_eq!(
        s.play(Square::G8, Square::F6).unwrap(),
        MoveOutcome::Incorrect { reported: true }
    );
    assert_eq!(
        s.play(Square::D7, Square::D5).unwrap(),
        MoveOutcome::Incorrect { reported: false }
    );
    assert_eq!(s.phase(), Phase::Ended);

    s.play(Square::E7, Square::E5).unwrap();
    let outcome = s.play(Square::B8, Square::C6).unwrap();
    assert_eq!(
        outcome,
        MoveOutcome::Solved {
            completion: Completion::Incorrect,
            next_puzzle: Some(1),
        }
    );
    assert_eq!(s.puzzles()[0].completion, Completion::Incorrect);
    assert_eq!(s.phase(), Phase::AwaitingMove);
}

#[test]
fn test_promotion_matches_like_plain_move() {
    let mut plain = session(common::opening_puzzle(), 3);
    let mut promo = session(common::promotion_puzzle(), 1);

    let plain_outcome = plain.play(Square::B8, Square::C6).unwrap();

    assert!(matches!(
        promo.play(Square::E7, Square::E8).unwrap(),
        MoveOutcome::PromotionRequired(_)
    ));
    let promo_outcome = promo.promote(Role::Queen).unwrap();

    assert_eq!(plain_outcome, promo_outcome);
    assert_eq!(plain.current_move(), promo.current_move());
    assert_eq!(plain.current_puzzle(), promo.current_puzzle());
    assert_eq!(promo.puzzles()[0].completion, Completion::Correct);
}

#[test]
fn test_cancel_promotion_leaves_state() {
    let mut s = session(common::promotion_puzzle(), 1);
    s.play(Square::E7, Square::E8).unwrap();
    assert_eq!(s.phase(), Phase::AwaitingPromotion);

    assert!(s.cancel_promotion());
    assert_eq!(s.current_move(), 1);
    assert_eq!(s.puzzle().unwrap().completion, Completion::Incomplete);
    assert_eq!(s.phase(), Phase::AwaitingMove);

    // The line can still be solved afterwards
    s.play(Square::E7, Square::E8).unwrap();
    assert!(matches!(
        s.promote(Role::Queen).unwrap(),
        MoveOutcome::Solved {
            completion: Completion::Correct,
            ..
        }
    ));
}

#[test]
fn test_black_promotion_on_first_rank() {
    let puzzle = Puzzle::from_line("k7/8/8/8/8/8/4p3/7K w - - 0 1", "h1g1 e2e1q");
    let mut s = session(puzzle, 1);
    assert!(matches!(
        s.play(Square::E2, Square::E1).unwrap(),
        MoveOutcome::PromotionRequired(_)
    ));
    assert!(matches!(s.promote(Role::Queen).unwrap(), MoveOutcome::Solved { .. }));
}

#[test]
fn test_lichess_database_generator() {
    let dir = common::scratch_dir("lichess");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("puzzles.csv");
    fs::write(
        &path,
        "PuzzleId,FEN,Moves,Rating,RatingDeviation,Popularity,NbPlays,Themes,GameUrl,OpeningTags\n\
         easy1,rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1,e2e4 e7e5 g1f3 b8c6,900,75,90,100,opening,,\n\
         hard1,k7/4P3/8/8/8/8/8/K7 b - - 0 1,a8b8 e7e8q,2400,75,90,100,promotion,,\n\
         broken-row\n",
    )
    .unwrap();
    let db = path.to_str().unwrap();

    let mut hard_only = LichessDatabase::with_seed(2000, 3000, 42);
    for _ in 0..5 {
        let p = hard_only.generate(db).unwrap();
        assert_eq!(p.id.as_deref(), Some("hard1"));
        assert_eq!(p.rating, Some(2400));
    }

    let mut none = LichessDatabase::with_seed(3000, 3500, 42);
    assert!(matches!(none.generate(db), Err(PuzzleError::Database(_))));

    let mut missing = LichessDatabase::with_seed(0, 3000, 1);
    assert!(matches!(
        missing.generate(dir.join("nope.csv").to_str().unwrap()),
        Err(PuzzleError::Io(_))
    ));

    let mut session = PuzzleSession::new(db, LichessDatabase::with_seed(0, 1000, 3));
    assert_eq!(session.generate_puzzle().unwrap(), 0);
    assert_eq!(session.puzzle().unwrap().id.as_deref(), Some("easy1"));
    assert_eq!(session.current_move(), 1);
}

#[test]
fn test_generated_puzzle_with_illegal_line_is_rejected() {
    let bad = Puzzle::from_line(common::START_FEN, "e2e4 e7e4");
    let mut s = PuzzleSession::new("db", common::fixed_generator(bad));
    assert!(matches!(s.generate_puzzle(), Err(PuzzleError::Chess(_))));
    assert!(s.puzzles().is_empty());
}
