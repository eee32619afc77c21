//! Command-line front end
//!
//! # Subcommands
//!
//! - `replay` - replay tokens once and print the board
//! - `view` - step through a game interactively on stdin
//! - `play` - play against the opponent service
//!
//! The interactive loops are generic over their input and output so they can
//! be driven from tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use chess_replay::{RulesAuthority, ShakmatyRules, Square};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::core::ViewerSettings;
use crate::play::PlaySession;
use crate::render::{render_board, render_frame, RenderOptions};
use crate::services::{
    ExtractionService, HttpExtractionClient, HttpOpponentClient, OpponentService, SavedExtraction,
};
use crate::session::ScoresheetSession;

#[derive(Parser, Debug)]
#[command(name = "scoresheet", version, about = "Replay and validate transcribed chess scoresheets")]
pub struct Cli {
    /// Letters instead of unicode chess glyphs
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Override the extraction service URL
    #[arg(long, global = true)]
    pub extraction_url: Option<String>,

    /// Override the opponent engine URL
    #[arg(long, global = true)]
    pub engine_url: Option<String>,

    /// Debug logging when RUST_LOG is unset
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay tokens once and print the resulting board
    Replay {
        /// Move tokens in ply order
        tokens: Vec<String>,

        /// Last index to replay (-1 = initial position); defaults to the last token
        #[arg(long, allow_negative_numbers = true)]
        cursor: Option<isize>,

        /// Read tokens from a saved extraction response instead
        #[arg(long)]
        from_json: Option<PathBuf>,
    },

    /// Step through a game interactively
    View {
        /// Read tokens from a saved extraction response
        #[arg(long, conflicts_with = "image")]
        from_json: Option<PathBuf>,

        /// Upload a scoresheet image to the extraction service
        #[arg(long)]
        image: Option<PathBuf>,

        /// Move tokens in ply order
        tokens: Vec<String>,
    },

    /// Play against the opponent service
    Play,
}

impl Cli {
    /// Settings file + environment, then flags on top
    pub fn settings(&self) -> ViewerSettings {
        let mut settings = ViewerSettings::load();
        if let Some(url) = &self.extraction_url {
            settings.extraction_url = url.clone();
        }
        if let Some(url) = &self.engine_url {
            settings.engine_url = url.clone();
        }
        if self.ascii {
            settings.unicode_pieces = false;
        }
        settings
    }
}

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = cli.settings();
    let options = RenderOptions {
        unicode: settings.unicode_pieces,
    };
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    match cli.command {
        Command::Replay {
            tokens,
            cursor,
            from_json,
        } => {
            let mut session = ScoresheetSession::new(ShakmatyRules::new());
            match from_json {
                Some(path) => session
                    .upload(&SavedExtraction, &path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => session.load_moves(tokens),
            }
            if let Some(cursor) = cursor {
                session.view_mut().jump_to(cursor)?;
            }
            write!(
                stdout,
                "{}",
                render_frame(session.view().tokens(), &session.frame(), options)
            )?;
        }
        Command::View {
            from_json,
            image,
            tokens,
        } => {
            let mut session = ScoresheetSession::new(ShakmatyRules::new());
            if let Some(path) = from_json {
                session
                    .upload(&SavedExtraction, &path)
                    .with_context(|| format!("reading {}", path.display()))?;
            } else if let Some(path) = image {
                let client = HttpExtractionClient::new(
                    settings.extraction_url.clone(),
                    settings.request_timeout(),
                )?;
                // A failed upload still opens the viewer on whatever was given
                if let Err(e) = upload_with_progress(&mut session, &client, &path, &mut stdout) {
                    writeln!(stdout, "{e}")?;
                    session.load_moves(tokens);
                }
            } else {
                session.load_moves(tokens);
            }
            run_viewer(&mut session, stdin.lock(), &mut stdout, options)?;
        }
        Command::Play => {
            let client =
                HttpOpponentClient::new(settings.engine_url.clone(), settings.request_timeout())?;
            let mut game = PlaySession::new(ShakmatyRules::new());
            run_play(&mut game, &client, stdin.lock(), &mut stdout, options)?;
        }
    }

    Ok(())
}

fn upload_with_progress<S, W>(
    session: &mut ScoresheetSession,
    service: &S,
    path: &std::path::Path,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: ExtractionService + ?Sized,
    W: Write,
{
    writeln!(out, "Processing image... This may take a moment.")?;
    session.upload(service, path)?;
    if !session.raw_text().is_empty() {
        writeln!(out, "Raw OCR Text:\n{}\n", session.raw_text())?;
    }
    if !session.parsed_text().is_empty() {
        writeln!(out, "Parsed Text:\n{}\n", session.parsed_text())?;
    }
    Ok(())
}

/// Viewer input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    Next,
    Prev,
    Reset,
    Jump(isize),
    Edit(usize, String),
    Show,
    Help,
    Quit,
}

const VIEW_HELP: &str = "\
Commands:
  n | next            step forward
  p | prev            step back
  r | reset           back to the start position
  j | jump N          go to ply N (0-based, -1 = start)
  e | edit N [MOVE]   replace ply N (empty MOVE clears it)
  s | show            redraw
  q | quit            leave";

/// Parse one viewer input line
pub fn parse_view_command(line: &str) -> Result<ViewCommand, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(ViewCommand::Show);
    };

    match verb {
        "n" | "next" => Ok(ViewCommand::Next),
        "p" | "prev" => Ok(ViewCommand::Prev),
        "r" | "reset" => Ok(ViewCommand::Reset),
        "s" | "show" => Ok(ViewCommand::Show),
        "h" | "help" | "?" => Ok(ViewCommand::Help),
        "q" | "quit" => Ok(ViewCommand::Quit),
        "j" | "jump" => {
            let index = words
                .next()
                .ok_or("jump needs an index")?
                .parse()
                .map_err(|_| "jump index must be a number".to_string())?;
            Ok(ViewCommand::Jump(index))
        }
        "e" | "edit" => {
            let index = words
                .next()
                .ok_or("edit needs an index")?
                .parse()
                .map_err(|_| "edit index must be a non-negative number".to_string())?;
            let value = words.collect::<Vec<_>>().join(" ");
            Ok(ViewCommand::Edit(index, value))
        }
        other => Err(format!("unknown command {other:?} (h for help)")),
    }
}

/// Interactive navigator over a session
pub fn run_viewer<A, R, W>(
    session: &mut ScoresheetSession<A>,
    input: R,
    out: &mut W,
    options: RenderOptions,
) -> anyhow::Result<()>
where
    A: RulesAuthority,
    R: BufRead,
    W: Write,
{
    draw(session, out, options)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_view_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        debug!("[SESSION] {:?}", command);

        let view = session.view_mut();
        let outcome = match command {
            ViewCommand::Quit => break,
            ViewCommand::Help => {
                writeln!(out, "{VIEW_HELP}")?;
                continue;
            }
            ViewCommand::Show => Ok(()),
            ViewCommand::Next => {
                view.next();
                Ok(())
            }
            ViewCommand::Prev => {
                view.prev();
                Ok(())
            }
            ViewCommand::Reset => {
                view.reset();
                Ok(())
            }
            ViewCommand::Jump(index) => view.jump_to(index),
            ViewCommand::Edit(index, value) => view.edit(index, value),
        };

        if let Err(e) = outcome {
            writeln!(out, "{e}")?;
            continue;
        }
        draw(session, out, options)?;
    }

    Ok(())
}

fn draw<A: RulesAuthority, W: Write>(
    session: &ScoresheetSession<A>,
    out: &mut W,
    options: RenderOptions,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "{}",
        render_frame(session.view().tokens(), &session.frame(), options)
    )?;
    if let Some(rejection) = &session.view().replay().rejection {
        writeln!(out, "{rejection}")?;
    }
    Ok(())
}

/// Interactive game against the opponent service
///
/// Input is a move in notation, two squares (`e2 e4`), `new`, or `q`.
pub fn run_play<A, S, R, W>(
    game: &mut PlaySession<A>,
    opponent: &S,
    input: R,
    out: &mut W,
    options: RenderOptions,
) -> anyhow::Result<()>
where
    A: RulesAuthority,
    S: OpponentService + ?Sized,
    R: BufRead,
    W: Write,
{
    draw_game(game, out, options)?;

    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        let played = match words.as_slice() {
            [] => continue,
            ["q"] | ["quit"] => break,
            ["new"] => {
                game.new_game();
                draw_game(game, out, options)?;
                continue;
            }
            [from, to] => match (Square::from_name(from), Square::from_name(to)) {
                (Some(from), Some(to)) => game.play_squares(from, to),
                _ => {
                    writeln!(out, "expected two squares, e.g. `e2 e4`")?;
                    continue;
                }
            },
            [token] => game.play(token),
            _ => {
                writeln!(out, "one move per line")?;
                continue;
            }
        };

        if let Err(e) = played {
            writeln!(out, "{e}")?;
            continue;
        }

        if !game.status().is_game_over() {
            writeln!(out, "AI is thinking...")?;
            match game.opponent_reply(opponent) {
                Ok(reply) => writeln!(out, "AI plays {reply}")?,
                Err(e) => writeln!(out, "{e}")?,
            }
        }
        draw_game(game, out, options)?;
    }

    Ok(())
}

fn draw_game<A: RulesAuthority, W: Write>(
    game: &PlaySession<A>,
    out: &mut W,
    options: RenderOptions,
) -> anyhow::Result<()> {
    let grid = chess_replay::decode(&game.record());
    writeln!(out, "{}", render_board(&grid, options))?;
    let status = game.status();
    if status.is_game_over() {
        writeln!(out, "{}", status.describe())?;
    } else if game.history().len() % 2 == 0 {
        writeln!(out, "Your Turn")?;
    }
    Ok(())
}
