//! Immutable runtime settings, built once at startup.

use std::fmt;

use crate::consts::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::prompts::SummaryFormat;

/// Where to send requests and how to ask for the summary.
///
/// Constructed in `main` from CLI flags, the environment and stored
/// preferences, then passed explicitly to whatever needs it.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub format: SummaryFormat,
}

impl Settings {
    /// Defaults plus the credential from [`API_KEY_ENV`], if set.
    pub fn from_env() -> Self {
        Self {
            api_key: api_key_from_env(API_KEY_ENV),
            ..Self::default()
        }
    }

    /// Short auth description for the banner and `/status`.
    pub fn auth_status(&self) -> String {
        match &self.api_key {
            Some(_) => format!("API key (env {API_KEY_ENV}) ✓"),
            None => format!("not authenticated (set {API_KEY_ENV})"),
        }
    }

    /// Host part of the base URL, for display.
    pub fn host(&self) -> &str {
        let without_scheme = self
            .base_url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.base_url);
        without_scheme.split('/').next().unwrap_or(without_scheme)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            format: SummaryFormat::default(),
        }
    }
}

// The key must never end up in logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("format", &self.format)
            .finish()
    }
}

/// Read a credential from the environment. Empty values count as unset.
pub fn api_key_from_env(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}
