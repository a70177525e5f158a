/// LLM Client: the single point of entry for all model calls in the interview API.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Services depend on the [`LlmBackend`] trait; [`LlmClient`] is the production backend.
///
/// Model: claude-sonnet-4-5 (hardcoded)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Role of a turn as the chat API sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One prior turn handed to a conversational call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// Stateless text-in/text-out model backend.
///
/// Carried in `AppState` as `Option<Arc<dyn LlmBackend>>`; `None` means the
/// backend is not configured, which callers must report separately from a
/// failed call.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Continues a conversation: `prior_turns` must alternate and start with
    /// `User`; `new_message` is sent as the next user turn.
    async fn converse(&self, prior_turns: &[ChatTurn], new_message: &str)
        -> Result<String, LlmError>;

    /// One-shot completion of a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: ChatRole,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Anthropic Messages API backend.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    max_attempts: u32,
}

impl LlmClient {
    /// `max_attempts` bounds the round trips per call; 1 disables retries.
    pub fn new(api_key: String, timeout: Duration, max_attempts: u32) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            max_attempts: max_attempts.max(1),
        })
    }

    /// Makes a raw call to the Messages API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff while
    /// attempts remain.
    async fn send(
        &self,
        system: Option<&str>,
        messages: Vec<AnthropicMessage<'_>>,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages,
        };

        let mut attempt: u32 = 0;

        loop {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1).min(5)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let error = match response {
                Err(e) => LlmError::Http(e),
                Ok(response) => {
                    let status = response.status();

                    if !status.is_success() {
                        let body = response.text().await.unwrap_or_default();
                        match retryable_error(status, body, attempt) {
                            Ok(error) => {
                                warn!("LLM API returned {}: {}", status, error);
                                error
                            }
                            Err(error) => return Err(error),
                        }
                    } else {
                        let llm_response: LlmResponse = response.json().await?;

                        debug!(
                            "LLM call succeeded: input_tokens={}, output_tokens={}",
                            llm_response.usage.input_tokens, llm_response.usage.output_tokens
                        );

                        return Ok(llm_response);
                    }
                }
            };

            attempt += 1;
            if attempt >= self.max_attempts {
                return Err(error);
            }
        }
    }

    fn into_text(response: LlmResponse) -> Result<String, LlmError> {
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[async_trait]
impl LlmBackend for LlmClient {
    async fn converse(
        &self,
        prior_turns: &[ChatTurn],
        new_message: &str,
    ) -> Result<String, LlmError> {
        let messages = conversation_messages(prior_turns, new_message);
        Self::into_text(self.send(None, messages).await?)
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let messages = vec![AnthropicMessage {
            role: ChatRole::User,
            content: prompt,
        }];
        Self::into_text(self.send(Some(prompts::JSON_ONLY_SYSTEM), messages).await?)
    }
}

/// Classifies a non-success status. `Ok` errors are worth another attempt
/// (429 and 5xx); `Err` errors end the call immediately.
fn retryable_error(
    status: StatusCode,
    body: String,
    retries: u32,
) -> Result<LlmError, LlmError> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Ok(LlmError::RateLimited { retries });
    }

    let message = serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    let error = LlmError::Api {
        status: status.as_u16(),
        message,
    };

    if status.is_server_error() {
        Ok(error)
    } else {
        Err(error)
    }
}

/// Prior turns in order, then `new_message` as the closing user turn.
fn conversation_messages<'a>(
    prior_turns: &'a [ChatTurn],
    new_message: &'a str,
) -> Vec<AnthropicMessage<'a>> {
    prior_turns
        .iter()
        .map(|turn| AnthropicMessage {
            role: turn.role,
            content: &turn.text,
        })
        .chain(std::iter::once(AnthropicMessage {
            role: ChatRole::User,
            content: new_message,
        }))
        .collect()
}

/// Strips a leading ```json / ``` fence and a trailing ``` fence from LLM
/// output. Either fence may be missing.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text)
        .trim();
    text.strip_suffix("```").unwrap_or(text).trim()
}
