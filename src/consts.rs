//! Project-wide constants.

use std::path::PathBuf;

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// OpenAI-compatible endpoint used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Environment variable holding the provider credential.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "PRECIS_LOG";

/// Shown when a failure carries no usable message of its own.
pub const FALLBACK_ERROR: &str = "Failed to generate summary";

/// Default database path: `~/.precis/precis.db`.
/// Only preferences live here; input and summaries are never stored.
pub fn default_db_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".precis").join("precis.db"))
}

/// Format a number with comma separators (e.g. 1,234,567).
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts_are_non_empty() {
        assert!(!AUTHOR.is_empty());
        assert!(!HOMEPAGE.is_empty());
        assert!(!REPO.is_empty());
        assert!(!DEFAULT_MODEL.is_empty());
        assert!(!FALLBACK_ERROR.is_empty());
    }

    #[test]
    fn default_endpoint_is_openai_compatible() {
        assert!(DEFAULT_BASE_URL.starts_with("https://"));
        assert!(DEFAULT_BASE_URL.ends_with("/openai/v1"));
    }

    #[test]
    fn default_db_path_lives_under_dot_precis() {
        if let Some(path) = default_db_path() {
            assert!(path.ends_with(".precis/precis.db"));
        }
    }

    #[test]
    fn format_number_zero() {
        assert_eq!(format_number(0), "0");
    }

    #[test]
    fn format_number_small() {
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
    }

    #[test]
    fn format_number_thousands() {
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(12_345), "12,345");
        assert_eq!(format_number(123_456), "123,456");
    }

    #[test]
    fn format_number_millions() {
        assert_eq!(format_number(1_234_567), "1,234,567");
    }
}
