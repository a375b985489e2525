//! Summarisation client: one chat-completion request per button press.
//!
//! The [`Summarizer`] trait is the seam between the view and the network.
//! The web handlers hold an `Arc<dyn Summarizer>`, so tests inject a
//! recording mock and assert on call counts and exact prompts without a
//! live endpoint.
//!
//! There is deliberately no retry or backoff here: the single-attempt policy
//! is part of the tool's contract. Rate-limit and transport failures surface
//! to the user, who may simply click again.

use crate::config::Options;
use crate::error::BriefError;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default chat-completion endpoint.
const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Produces a summary for a prompt using a caller-supplied credential.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Issue exactly one summarisation request and return the generated
    /// text verbatim — no post-processing, truncation, or validation.
    async fn summarize(&self, prompt: &str, api_key: &str) -> Result<String, BriefError>;
}

/// [`Summarizer`] backed by an OpenAI-compatible chat-completion endpoint.
pub struct OpenAiSummarizer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    timeout_secs: u64,
}

impl OpenAiSummarizer {
    /// Build a client with the configured model and request timeout.
    pub fn new(options: &Options) -> Result<Self, BriefError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(options.api_timeout_secs))
            .build()
            .map_err(|e| BriefError::Internal(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            client,
            endpoint: OPENAI_CHAT_URL.to_string(),
            model: options.model.clone(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            timeout_secs: options.api_timeout_secs,
        })
    }

    /// Point the client at a different OpenAI-compatible endpoint
    /// (self-hosted gateways, test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, prompt: &str, api_key: &str) -> Result<String, BriefError> {
        // The view checks this first; guard again so no library caller can
        // reach the network without a credential.
        if api_key.trim().is_empty() {
            return Err(BriefError::MissingApiKey);
        }

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            "Requesting summary: model={}, prompt_len={}",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BriefError::ApiTimeout {
                        secs: self.timeout_secs,
                    }
                } else {
                    BriefError::Transport {
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let body = response.text().await.unwrap_or_default();
            warn!("Summarisation request failed: HTTP {} — {}", status, body);
            return Err(map_failure_status(status, retry_after, &body));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| BriefError::Transport {
            reason: format!("Malformed response body: {}", e),
        })?;

        let summary = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(BriefError::EmptyResponse)?;

        debug!("Summary received: {} chars", summary.len());
        Ok(summary)
    }
}

/// Map a non-2xx chat-completion status to the error taxonomy.
fn map_failure_status(status: StatusCode, retry_after: Option<u64>, body: &str) -> BriefError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BriefError::AuthRejected {
            detail: first_line(body),
        },
        StatusCode::TOO_MANY_REQUESTS => BriefError::RateLimited {
            retry_after_secs: retry_after,
        },
        _ => BriefError::Transport {
            reason: format!("HTTP {}: {}", status, first_line(body)),
        },
    }
}

/// Keep error bodies to one line for display.
fn first_line(body: &str) -> String {
    body.lines().next().unwrap_or("").trim().to_string()
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}
