//! Scoresheet session
//!
//! One upload-and-review session: the replay view plus the text the
//! extraction service returned and the last collaborator error.
//!
//! # Failure Policy
//!
//! A failed upload changes nothing except `last_error`. Tokens, cursor,
//! replay result and the displayed texts stay exactly as they were.

use std::path::Path;

use chess_replay::{Frame, ReplayView, RulesAuthority, ShakmatyRules};
use tracing::{info, warn};

use crate::core::AppResult;
use crate::services::{ExtractionResponse, ExtractionService};

/// Upload-and-review session state
#[derive(Debug)]
pub struct ScoresheetSession<A: RulesAuthority = ShakmatyRules> {
    view: ReplayView<A>,
    raw_text: String,
    parsed_text: String,
    last_error: Option<String>,
}

impl Default for ScoresheetSession<ShakmatyRules> {
    fn default() -> Self {
        Self::new(ShakmatyRules::new())
    }
}

impl<A: RulesAuthority> ScoresheetSession<A> {
    pub fn new(authority: A) -> Self {
        Self {
            view: ReplayView::new(authority),
            raw_text: String::new(),
            parsed_text: String::new(),
            last_error: None,
        }
    }

    /// Run the extraction service and load its moves
    ///
    /// On error the session is left untouched apart from `last_error`.
    pub fn upload<S>(&mut self, service: &S, source: &Path) -> AppResult<()>
    where
        S: ExtractionService + ?Sized,
    {
        match service.extract(source) {
            Ok(response) => {
                self.apply_extraction(response);
                Ok(())
            }
            Err(e) => {
                warn!("[SESSION] Upload of {:?} failed: {}", source, e);
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Load an extraction response as if it had just been uploaded
    pub fn apply_extraction(&mut self, response: ExtractionResponse) {
        info!("[SESSION] Loaded {} extracted moves", response.moves.len());
        self.raw_text = response.raw_text;
        self.parsed_text = response.parsed_text;
        self.last_error = None;
        self.view.load(response.moves);
    }

    /// Load tokens typed or pasted by the user
    pub fn load_moves<I, S>(&mut self, moves: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.view.load(moves);
    }

    pub fn edit(&mut self, index: usize, value: impl Into<String>) -> AppResult<()> {
        self.view.edit(index, value)?;
        Ok(())
    }

    pub fn view(&self) -> &ReplayView<A> {
        &self.view
    }

    /// Navigation goes straight to the view
    pub fn view_mut(&mut self) -> &mut ReplayView<A> {
        &mut self.view
    }

    pub fn frame(&self) -> Frame {
        self.view.frame()
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn parsed_text(&self) -> &str {
        &self.parsed_text
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
