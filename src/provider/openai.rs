use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::consts::API_KEY_ENV;

use super::{Prompt, Provider, SummarizeError};

/// A provider that speaks the OpenAI chat-completions protocol.
///
/// Works against any compatible host; the default is Groq.
pub struct OpenAiProvider {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiProvider {
    pub fn new(settings: &Settings) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: settings.base_url.clone(),
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_request<'a>(&'a self, prompt: &'a Prompt) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        }
    }

    fn parse_response(body: &str) -> Result<String, SummarizeError> {
        let resp: ChatResponse = serde_json::from_str(body)
            .map_err(|e| SummarizeError::Malformed(format!("invalid JSON: {e}")))?;

        if let Some(usage) = resp.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "token usage"
            );
        }

        let text = resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SummarizeError::Malformed("no completion in response".to_string()))?;

        if text.is_empty() {
            return Err(SummarizeError::Malformed("empty completion".to_string()));
        }

        Ok(text)
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, SummarizeError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SummarizeError::MissingApiKey {
                env_var: API_KEY_ENV,
            })?;

        let started = Instant::now();
        let resp = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&self.build_request(prompt))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            model = %self.model,
            "chat completion returned"
        );

        if !status.is_success() {
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        Self::parse_response(&body)
    }
}

/// Pull a human-readable message out of an error body.
///
/// Handles `{"error": {"message": ..}}` (OpenAI, Groq), `{"error": ".."}`
/// and `{"message": ".."}`. Anything else yields `None`.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = match value.get("error") {
        Some(serde_json::Value::String(s)) => Some(s.as_str()),
        Some(obj) => obj.get("message").and_then(|m| m.as_str()),
        None => value.get("message").and_then(|m| m.as_str()),
    };
    message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

// --- API types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}
