//! Play mode - a live game against the opponent service
//!
//! Unlike the replay view, play mode keeps one working position and extends
//! it move by move. Every move still goes through the rules authority, so a
//! refused move or a bad reply from the service leaves the position as it
//! was.

use chess_replay::{BoardState, GameStatus, RulesAuthority, ShakmatyRules, Square};
use tracing::{info, warn};

use crate::core::{AppError, AppResult};
use crate::services::OpponentService;

/// Live game state
pub struct PlaySession<A: RulesAuthority = ShakmatyRules> {
    authority: A,
    position: A::Position,
    /// Tokens as they were accepted, in ply order
    history: Vec<String>,
}

impl Default for PlaySession<ShakmatyRules> {
    fn default() -> Self {
        Self::new(ShakmatyRules::new())
    }
}

impl<A: RulesAuthority> PlaySession<A> {
    pub fn new(authority: A) -> Self {
        let position = authority.initial_position();
        Self {
            authority,
            position,
            history: Vec::new(),
        }
    }

    /// Start over from the initial position
    pub fn new_game(&mut self) {
        self.position = self.authority.initial_position();
        self.history.clear();
        info!("[PLAY] New game");
    }

    /// Play a move given in notation
    pub fn play(&mut self, token: &str) -> AppResult<()> {
        self.ensure_accepting()?;
        let next = self.authority.apply(&self.position, token)?;
        self.commit(next, token);
        Ok(())
    }

    /// Play a move given as source and target squares
    ///
    /// A pawn reaching the last rank is promoted to a queen.
    pub fn play_squares(&mut self, from: Square, to: Square) -> AppResult<()> {
        self.ensure_accepting()?;
        let plain = format!("{from}{to}");
        let next = match self.authority.apply(&self.position, &plain) {
            Ok(next) => next,
            Err(plain_err) => {
                let promoted = format!("{plain}q");
                match self.authority.apply(&self.position, &promoted) {
                    Ok(next) => {
                        self.commit(next, &promoted);
                        return Ok(());
                    }
                    Err(_) => return Err(plain_err.into()),
                }
            }
        };
        self.commit(next, &plain);
        Ok(())
    }

    /// Ask the opponent service for a reply and play it
    ///
    /// Returns the token that was played. Service failures and inapplicable
    /// replies leave the position unchanged.
    pub fn opponent_reply<S>(&mut self, service: &S) -> AppResult<String>
    where
        S: OpponentService + ?Sized,
    {
        self.ensure_accepting()?;
        let record = self.record();
        let token = service.reply(&record).inspect_err(|e| {
            warn!("[PLAY] Error getting AI move: {}", e);
        })?;

        match self.authority.apply(&self.position, &token) {
            Ok(next) => {
                self.commit(next, &token);
                Ok(token)
            }
            Err(rejection) => {
                warn!("[PLAY] Opponent replied with an inapplicable move: {}", rejection);
                Err(rejection.into())
            }
        }
    }

    pub fn status(&self) -> GameStatus {
        self.authority.status(&self.position)
    }

    pub fn record(&self) -> BoardState {
        self.authority.record(&self.position)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn ensure_accepting(&self) -> AppResult<()> {
        if self.status().is_game_over() {
            return Err(AppError::NotAccepting {
                reason: "game is over",
            });
        }
        Ok(())
    }

    fn commit(&mut self, next: A::Position, token: &str) {
        self.position = next;
        self.history.push(token.to_string());
    }
}
