//! AI opponent service client
//!
//! Used by play mode only. The service receives the current position as FEN
//! and answers with one notation token for its reply:
//!
//! ```text
//! POST { "fen": "<fen>" }  ->  { "move": "e5" }
//! ```

use std::time::Duration;

use chess_replay::BoardState;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::{AppError, AppResult};

/// Anything that can propose a reply move for a position
pub trait OpponentService {
    fn reply(&self, record: &BoardState) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct MoveRequest<'a> {
    fen: &'a str,
}

#[derive(Debug, Deserialize)]
struct MoveResponse {
    #[serde(rename = "move")]
    mv: Option<String>,
}

/// HTTP client for the engine endpoint
#[derive(Debug, Clone)]
pub struct HttpOpponentClient {
    client: Client,
    url: String,
}

impl HttpOpponentClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl OpponentService for HttpOpponentClient {
    fn reply(&self, record: &BoardState) -> AppResult<String> {
        let fen = record.fen();
        let response = self
            .client
            .post(&self.url)
            .json(&MoveRequest { fen })
            .send()?;

        if !response.status().is_success() {
            warn!("[OPPONENT] Service answered {}", response.status());
            return Err(AppError::Opponent {
                message: "Failed to get AI move".to_string(),
            });
        }

        let body: MoveResponse = response.json()?;
        match body.mv.filter(|mv| !mv.trim().is_empty()) {
            Some(mv) => {
                info!("[OPPONENT] Reply {} for {}", mv, fen);
                Ok(mv)
            }
            None => Err(AppError::Opponent {
                message: "response carried no move".to_string(),
            }),
        }
    }
}
