//! Scoresheet extraction service client
//!
//! The extraction service turns a photographed scoresheet into move tokens.
//! Only its `moves` list feeds the replay core; the two text fields are kept
//! for display.
//!
//! # Wire Format
//!
//! Request: `multipart/form-data` with the image in field `file`, POSTed to
//! the configured URL with a `t=<unix millis>` query parameter so that
//! intermediaries never serve a cached answer.
//!
//! Response:
//!
//! ```json
//! { "moves": ["e4", "e5"], "raw_text": "...", "parsed_text": "..." }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::Form;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{AppError, AppResult};

/// Extraction service answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionResponse {
    pub moves: Vec<String>,
    pub raw_text: String,
    pub parsed_text: String,
}

/// Anything that can turn a scoresheet source into move tokens
pub trait ExtractionService {
    fn extract(&self, source: &Path) -> AppResult<ExtractionResponse>;
}

/// HTTP client for the extraction endpoint
#[derive(Debug, Clone)]
pub struct HttpExtractionClient {
    client: Client,
    url: String,
}

impl HttpExtractionClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    fn cache_busted_url(&self) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}t={}",
            self.url,
            separator,
            chrono::Utc::now().timestamp_millis()
        )
    }
}

impl ExtractionService for HttpExtractionClient {
    fn extract(&self, image: &Path) -> AppResult<ExtractionResponse> {
        let form = Form::new().file("file", image)?;
        let url = self.cache_busted_url();
        info!("[EXTRACT] Uploading {:?} to {}", image, url);

        let response = self.client.post(&url).multipart(form).send()?;
        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unknown status");
            warn!("[EXTRACT] Service answered {}", status);
            return Err(AppError::Extraction {
                message: format!("Error: {reason}"),
            });
        }

        let body: ExtractionResponse = response.json()?;
        debug!("[EXTRACT] Received {} moves", body.moves.len());
        Ok(body)
    }
}

/// Previously saved extraction response read from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct SavedExtraction;

impl ExtractionService for SavedExtraction {
    fn extract(&self, source: &Path) -> AppResult<ExtractionResponse> {
        let contents = fs::read_to_string(source)?;
        let body: ExtractionResponse = serde_json::from_str(&contents)?;
        info!("[EXTRACT] Loaded {} moves from {:?}", body.moves.len(), source);
        Ok(body)
    }
}
