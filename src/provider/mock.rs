use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{Prompt, Provider, SummarizeError};

/// A scripted provider for tests. Returns pre-defined replies in order and
/// records every prompt it receives.
pub struct MockProvider {
    replies: Mutex<VecDeque<Result<String, SummarizeError>>>,
    prompts: Arc<Mutex<Vec<Prompt>>>,
    gate: Option<Arc<Notify>>,
}

impl MockProvider {
    pub fn new(replies: Vec<Result<String, SummarizeError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    /// Reply with `text` once.
    pub fn reply(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    /// Fail with `err` once.
    pub fn fail(err: SummarizeError) -> Self {
        Self::new(vec![Err(err)])
    }

    /// Hold every reply until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Shared handle to the recorded prompts, usable after the provider is
    /// moved into a summarizer.
    pub fn prompts(&self) -> Arc<Mutex<Vec<Prompt>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn model(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, SummarizeError> {
        let calls = {
            let mut prompts = self
                .prompts
                .lock()
                .map_err(|_| SummarizeError::message("MockProvider: prompt log poisoned"))?;
            prompts.push(prompt.clone());
            prompts.len()
        };

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self
            .replies
            .lock()
            .map_err(|_| SummarizeError::message("MockProvider: reply queue poisoned"))?
            .pop_front();
        next.unwrap_or_else(|| {
            Err(SummarizeError::message(format!(
                "MockProvider: no more replies (called {calls} times)"
            )))
        })
    }
}
