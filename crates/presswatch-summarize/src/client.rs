//! HTTP client for the chat-completions summarization endpoint.
//!
//! Wraps `reqwest` with credential handling, prompt assembly, and the
//! status-to-error classification callers branch on. The service is spoken
//! to over the `OpenAI`-compatible `/chat/completions` surface.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde_json::Value;

use crate::error::CompletionError;
use crate::types::Summary;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Largest error-body excerpt carried into an error detail.
const MAX_DETAIL_CHARS: usize = 300;

/// Client for the completion service.
///
/// Use [`CompletionClient::new`] for production or
/// [`CompletionClient::with_base_url`] to point at a mock server in tests.
pub struct CompletionClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl CompletionClient {
    /// Creates a client pointed at the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::UpstreamUnavailable`] if the underlying
    /// HTTP client cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, CompletionError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::UpstreamUnavailable`] if the underlying
    /// HTTP client cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("presswatch/0.1 (press-release summarization)")
            .build()
            .map_err(|e| CompletionError::UpstreamUnavailable {
                detail: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Summarize one press release.
    ///
    /// `{title}` and `{content}` placeholders in `user_prompt_template` are
    /// substituted before the request is sent. The completion is requested
    /// as a JSON object and parsed into [`Summary`].
    ///
    /// # Errors
    ///
    /// - [`CompletionError::InvalidCredential`] on 401/403.
    /// - [`CompletionError::RateLimited`] on 429, carrying any numeric
    ///   `Retry-After` header value.
    /// - [`CompletionError::MalformedRequest`] on 400/422.
    /// - [`CompletionError::UpstreamUnavailable`] on other non-2xx
    ///   statuses, network failures, and undecodable bodies.
    /// - [`CompletionError::NoContent`] when the completion is blank.
    pub async fn summarize(
        &self,
        title: &str,
        content: &str,
        system_prompt: &str,
        user_prompt_template: &str,
    ) -> Result<Summary, CompletionError> {
        let user_prompt = user_prompt_template
            .replace("{title}", title)
            .replace("{content}", content);

        let request_body = serde_json::json!({
            "model": self.model,
            "response_format": { "type": "json_object" },
            "temperature": 0.2,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ]
        });

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CompletionError::UpstreamUnavailable {
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_error_status(status, response).await);
        }

        let body: Value =
            response
                .json()
                .await
                .map_err(|e| CompletionError::UpstreamUnavailable {
                    detail: format!("undecodable response body: {e}"),
                })?;

        let message = body
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .unwrap_or_default();

        if message.trim().is_empty() {
            return Err(CompletionError::NoContent);
        }

        let summary: Summary = serde_json::from_str(message).map_err(|e| {
            CompletionError::UpstreamUnavailable {
                detail: format!("completion content is not valid summary JSON: {e}"),
            }
        })?;

        tracing::debug!(
            title,
            key_points = summary.key_points.len(),
            highlights = summary.highlights.len(),
            "summarized release"
        );
        Ok(summary)
    }
}

async fn classify_error_status(status: StatusCode, response: reqwest::Response) -> CompletionError {
    match status.as_u16() {
        401 | 403 => CompletionError::InvalidCredential,
        429 => {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok());
            CompletionError::RateLimited { retry_after }
        }
        400 | 422 => {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable response body".to_string());
            CompletionError::MalformedRequest {
                detail: detail.chars().take(MAX_DETAIL_CHARS).collect(),
            }
        }
        _ => CompletionError::UpstreamUnavailable {
            detail: format!("HTTP status {status}"),
        },
    }
}
