//! LLM domain — chat completions against an OpenAI-compatible endpoint.
//!
//! Public API for the network layer of deskbridge. External code should
//! only use the items exported here.
//!
//!   - client.rs — ChatClient: /chat/completions + /models
//!   - error.rs  — ApiError taxonomy (auth, rate limit, timeout, ...)
//!   - types.rs  — conversation and request types

mod client;
mod error;
mod types;

pub use client::ChatClient;
pub use error::ApiError;
pub use types::{ChatMessage, ChatRequest, Role};
