//! HTTP client for OpenAI-compatible endpoints.
//!
//! One client per configured endpoint. Requests are independent async
//! operations: each resolves to exactly one `Result`, and dropping a
//! pending future aborts the in-flight request without delivering
//! anything. No retries happen here; retry policy belongs to the caller.

use std::time::Duration;

use tokio::time::timeout;

use super::error::ApiError;
use super::types::ChatRequest;

/// Default budget for a completion call.
const CHAT_TIMEOUT: Duration = Duration::from_secs(60);
/// Default budget for listing models.
const MODELS_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for `/chat/completions` and `/models` on one endpoint.
pub struct ChatClient {
    endpoint: String,
    api_key: Option<String>,
    http: reqwest::Client,
    chat_timeout: Duration,
    models_timeout: Duration,
}

impl ChatClient {
    /// Create a client. Trailing slashes on the endpoint are stripped.
    /// An empty api key counts as no key — no Authorization header is
    /// sent, which keeps unauthenticated local endpoints working.
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let api_key = api_key.filter(|k| !k.is_empty());
        Self {
            endpoint,
            api_key,
            http: reqwest::Client::new(),
            chat_timeout: CHAT_TIMEOUT,
            models_timeout: MODELS_TIMEOUT,
        }
    }

    /// Create a client from `DESKBRIDGE_ENDPOINT` / `DESKBRIDGE_API_KEY`.
    /// Defaults to api.openai.com when no endpoint is configured.
    pub fn from_env() -> Self {
        let endpoint = std::env::var("DESKBRIDGE_ENDPOINT")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key = std::env::var("DESKBRIDGE_API_KEY").ok();
        Self::new(endpoint, api_key)
    }

    /// Override the 60 s completion budget.
    pub fn with_chat_timeout(mut self, budget: Duration) -> Self {
        self.chat_timeout = budget;
        self
    }

    /// Override the 30 s model-listing budget.
    pub fn with_models_timeout(mut self, budget: Duration) -> Self {
        self.models_timeout = budget;
        self
    }

    /// Send one completion request and return the assistant text.
    ///
    /// Temperature goes over the wire as `temperature / 100.0`.
    pub async fn send_chat(&self, req: &ChatRequest) -> Result<String, ApiError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = serde_json::json!({
            "model": req.model,
            "messages": req.messages,
            "temperature": f64::from(req.temperature) / 100.0,
            "max_tokens": req.max_tokens,
        });

        log::info!("[CHAT] POST {} model={} messages={}", url, req.model, req.messages.len());

        let mut builder = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let (status, text) = self.exchange(builder, self.chat_timeout).await?;
        if status != 200 {
            log::error!("[CHAT] API returned {}: {}", status, text);
            return Err(ApiError::from_status(status, &text));
        }

        let value: serde_json::Value = serde_json::from_str(&text).map_err(ApiError::Parse)?;
        let content = value
            .pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .ok_or(ApiError::Format("missing choices[0].message.content"))?;
        Ok(content.to_string())
    }

    /// List the model ids the endpoint offers, in server order.
    /// A response without a `data` array yields an empty list.
    pub async fn list_models(&self) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/models", self.endpoint);

        log::info!("[MODELS] GET {}", url);

        let mut builder = self.http.get(&url).header("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let (status, text) = self.exchange(builder, self.models_timeout).await?;
        if status != 200 {
            log::error!("[MODELS] API returned {}: {}", status, text);
            return Err(ApiError::from_status(status, &text));
        }

        let value: serde_json::Value = serde_json::from_str(&text).map_err(ApiError::Parse)?;
        let models = value
            .get("data")
            .and_then(|d| d.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|m| m.get("id").and_then(|id| id.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(models)
    }

    /// Run one request to completion (status + full body) under a budget.
    async fn exchange(
        &self,
        builder: reqwest::RequestBuilder,
        budget: Duration,
    ) -> Result<(u16, String), ApiError> {
        let round_trip = async {
            let res = builder.send().await?;
            let status = res.status().as_u16();
            let text = res.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };
        timeout(budget, round_trip)
            .await
            .map_err(|_| ApiError::Timeout(budget.as_secs()))?
            .map_err(ApiError::Connection)
    }
}
