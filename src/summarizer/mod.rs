//! Turns raw text into a summary via a [`Provider`].

use std::sync::Arc;

use crate::prompts::SummaryFormat;
use crate::provider::{Prompt, Provider, SummarizeError};

/// Builds the fixed prompt for the configured format and hands it to the
/// provider. The reply comes back untouched.
pub struct Summarizer {
    provider: Arc<dyn Provider>,
    format: SummaryFormat,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn Provider>, format: SummaryFormat) -> Self {
        Self { provider, format }
    }

    pub fn format(&self) -> SummaryFormat {
        self.format
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Same provider, different format.
    pub fn with_format(&self, format: SummaryFormat) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            format,
        }
    }

    /// The exact messages that [`summarize`](Self::summarize) would send.
    pub fn prompt(&self, content: &str) -> Prompt {
        Prompt {
            system: self.format.system_prompt(),
            user: self.format.user_prompt(content),
        }
    }

    /// Callers are expected to reject blank input before getting here.
    pub async fn summarize(&self, content: &str) -> Result<String, SummarizeError> {
        let prompt = self.prompt(content);
        self.provider.complete(&prompt).await
    }
}
