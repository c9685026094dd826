//! API error taxonomy.
//!
//! Every failure mode of the network layer maps to exactly one variant,
//! and every variant renders as a human-readable string the UI can show
//! as-is. The wording matches what users of earlier releases saw, so
//! treat the messages as part of the contract.

use thiserror::Error;

/// Raw error-body excerpts are capped at this many characters.
const DETAIL_CAP: usize = 200;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response within the request budget.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// HTTP 401 or 403.
    #[error("Authentication failed (HTTP {status}) — check your API key{detail}")]
    Auth { status: u16, detail: String },

    /// HTTP 429.
    #[error("Rate limited (HTTP 429) — too many requests, try again shortly{detail}")]
    RateLimited { detail: String },

    /// HTTP 404 — wrong endpoint path or unknown model.
    #[error("Not found (HTTP 404) — check your API endpoint and model name{detail}")]
    NotFound { detail: String },

    /// Any other non-200 status.
    #[error("API error {status}{detail}")]
    Api { status: u16, detail: String },

    /// The request never produced an HTTP response.
    #[error("Request failed (no response) — check your endpoint URL")]
    Connection(#[source] reqwest::Error),

    /// 200 response whose JSON does not have the expected shape.
    #[error("Invalid response format: {0}")]
    Format(&'static str),

    /// 200 response whose body is not valid JSON.
    #[error("Failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),
}

impl ApiError {
    /// Classify a non-200 response by status, carrying whatever
    /// human-readable detail the error body offers.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let detail = detail_from_body(body);
        match status {
            401 | 403 => Self::Auth { status, detail },
            429 => Self::RateLimited { detail },
            404 => Self::NotFound { detail },
            _ => Self::Api { status, detail },
        }
    }
}

/// Pull a provider-supplied message out of an error body.
///
/// OpenAI-compatible servers put it at `error.message`. If the body is not
/// JSON, fall back to the first [`DETAIL_CAP`] characters of the raw text.
/// Returns either an empty string or a `": ..."` suffix ready to append.
fn detail_from_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => v
            .pointer("/error/message")
            .and_then(|m| m.as_str())
            .map(|m| format!(": {m}"))
            .unwrap_or_default(),
        Err(_) if body.is_empty() => String::new(),
        Err(_) => format!(": {}", body.chars().take(DETAIL_CAP).collect::<String>()),
    }
}
