//! Integration tests for the scoresheet review flow
//!
//! Drives a session the way the binary does: a saved extraction response
//! from disk, then viewer commands fed through an in-memory stdin.

use std::fs;
use std::io::Cursor as Input;
use std::path::Path;

use chess_replay::{BoardState, Cursor, PieceColor, PieceType, ShakmatyRules};
use scoresheet::cli::{run_play, run_viewer};
use scoresheet::core::{AppError, AppResult};
use scoresheet::services::{ExtractionResponse, OpponentService, SavedExtraction};
use scoresheet::{PlaySession, RenderOptions, ScoresheetSession};

const RUY_LOPEZ_FEN: &str = "r1bqkbnr/1ppp1ppp/p1n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 0 4";

fn ascii() -> RenderOptions {
    RenderOptions { unicode: false }
}

fn session() -> ScoresheetSession {
    ScoresheetSession::new(ShakmatyRules::new())
}

fn write_response(dir: &Path, moves: &[&str]) -> std::path::PathBuf {
    let path = dir.join("response.json");
    let body = ExtractionResponse {
        moves: moves.iter().map(|m| m.to_string()).collect(),
        raw_text: "1. e4 e5 2. Nf3 Nc6".to_string(),
        parsed_text: moves.join(" "),
    };
    fs::write(&path, serde_json::to_string(&body).expect("serialize")).expect("write");
    path
}

#[test]
fn test_saved_extraction_replays_to_last_move() {
    //! A loaded sheet opens on its final position

    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_response(dir.path(), &["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]);

    let mut session = session();
    session.upload(&SavedExtraction, &path).expect("upload");

    assert_eq!(session.view().cursor(), Cursor::at(5));
    assert_eq!(session.view().replay().record.fen(), RUY_LOPEZ_FEN);
    assert!(session.view().invalid().is_empty());
    assert_eq!(session.raw_text(), "1. e4 e5 2. Nf3 Nc6");
}

#[test]
fn test_invalid_move_flagged_until_fixed() {
    //! One misread move is flagged; correcting it clears the flag

    let mut session = session();
    session.load_moves(["e4", "e5", "Qh9", "Nc6"]);

    assert_eq!(session.view().invalid().first(), Some(2));
    assert_eq!(session.view().replay().applied, 2);
    let before = session.view().replay().record.clone();

    session.edit(2, "Nf3").expect("in range");

    assert!(session.view().invalid().is_empty());
    assert_ne!(session.view().replay().record, before);
    assert_eq!(session.view().replay().applied, 4);
}

#[test]
fn test_unreadable_json_leaves_session_alone() {
    //! A broken saved response is an upload failure like any other

    let dir = tempfile::tempdir().expect("tempdir");
    let good = write_response(dir.path(), &["d4", "d5"]);
    let bad = dir.path().join("broken.json");
    fs::write(&bad, "{ not json").expect("write");

    let mut session = session();
    session.upload(&SavedExtraction, &good).expect("upload");
    let err = session.upload(&SavedExtraction, &bad).unwrap_err();

    assert!(matches!(err, AppError::Json(_)));
    assert_eq!(session.view().tokens(), &["d4", "d5"]);
    assert!(session.last_error().is_some());
}

#[test]
fn test_viewer_commands_drive_navigation() {
    //! n / p / r / j / e behave like the navigation buttons

    let mut session = session();
    session.load_moves(["e4", "e5", "Nf3", "Nc6"]);

    let input = Input::new("r\nn\nn\np\nj 3\ne 3 Qh9\nq\nn\n");
    let mut out = Vec::new();
    run_viewer(&mut session, input, &mut out, ascii()).expect("viewer");

    // Quit stops before the trailing `n`
    assert_eq!(session.view().cursor(), Cursor::at(3));
    assert_eq!(session.view().invalid().first(), Some(3));

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("Move: Start"));
    assert!(text.contains("1 Invalid (at 2...)"));
}

#[test]
fn test_viewer_reports_bad_input_and_keeps_going() {
    let mut session = session();
    session.load_moves(["e4"]);

    let input = Input::new("j 9\nwiggle\ne 5 e5\np\n");
    let mut out = Vec::new();
    run_viewer(&mut session, input, &mut out, ascii()).expect("viewer");

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("unknown command"));
    assert!(session.view().cursor().is_start());
    assert_eq!(session.view().tokens(), &["e4"]);
}

struct BookReplies;

impl OpponentService for BookReplies {
    fn reply(&self, record: &BoardState) -> AppResult<String> {
        // Answers 1. e4 with c5 and everything else with a6
        let placement = record.placement().to_string();
        if placement.contains("4P3") && !placement.contains("2p5") {
            Ok("c5".to_string())
        } else {
            Ok("a6".to_string())
        }
    }
}

#[test]
fn test_play_loop_alternates_with_opponent() {
    let mut game = PlaySession::new(ShakmatyRules::new());

    let input = Input::new("e4\ng1 f3\nKe3\nq\n");
    let mut out = Vec::new();
    run_play(&mut game, &BookReplies, input, &mut out, ascii()).expect("play");

    assert_eq!(game.history(), &["e4", "c5", "g1f3", "a6"]);

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("AI plays c5"));
    assert!(text.contains("Illegal move"));
}

#[test]
fn test_play_loop_stops_asking_after_mate() {
    struct Fools;
    impl OpponentService for Fools {
        fn reply(&self, record: &BoardState) -> AppResult<String> {
            let reply = match record.placement() {
                p if p.contains("5P2") && !p.contains("6P1") => "e5",
                _ => "Qh4#",
            };
            Ok(reply.to_string())
        }
    }

    let mut game = PlaySession::new(ShakmatyRules::new());
    let input = Input::new("f3\ng4\na3\n");
    let mut out = Vec::new();
    run_play(&mut game, &Fools, input, &mut out, ascii()).expect("play");

    assert_eq!(game.history(), &["f3", "e5", "g4", "Qh4#"]);
    let grid = chess_replay::decode(&game.record());
    assert_eq!(
        grid.get("h4"),
        Some(chess_replay::Piece::new(PieceColor::Black, PieceType::Queen))
    );

    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("Checkmate!"));
    assert!(text.contains("game is over"));
}
