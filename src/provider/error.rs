use thiserror::Error;

use crate::consts::FALLBACK_ERROR;

/// Everything that can go wrong while producing a summary.
///
/// The variants exist for logs and tests. Users only ever see
/// [`SummarizeError::user_message`].
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("no API key configured (set {env_var})")]
    MissingApiKey { env_var: &'static str },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("{}", .message.as_deref().unwrap_or(FALLBACK_ERROR))]
    Failed { message: Option<String> },
}

impl SummarizeError {
    /// A failure carrying `message` as the provider's explanation.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Failed {
            message: Some(message.into()),
        }
    }

    /// A failure with nothing to say for itself.
    pub fn opaque() -> Self {
        Self::Failed { message: None }
    }

    /// The single line shown in the error region.
    ///
    /// Provider-supplied text wins when present; anything without a usable
    /// message collapses to [`FALLBACK_ERROR`].
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Failed { message } => non_blank(message.as_deref())
                .unwrap_or(FALLBACK_ERROR)
                .to_string(),
            Self::Malformed(_) => FALLBACK_ERROR.to_string(),
            Self::MissingApiKey { .. } | Self::Http(_) => self.to_string(),
        }
    }
}

fn non_blank(message: Option<&str>) -> Option<&str> {
    message.filter(|m| !m.trim().is_empty())
}
