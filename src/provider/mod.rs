pub mod error;
pub mod mock;
pub mod openai;

use async_trait::async_trait;

pub use error::SummarizeError;

/// The two messages sent for one summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// A chat-completion backend. Could be a hosted model or a test script.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Send one system + user exchange and return the reply text unmodified.
    async fn complete(&self, prompt: &Prompt) -> Result<String, SummarizeError>;
}
