//! Fixed instructions sent alongside the user's text.

use std::fmt;
use std::str::FromStr;

const INTRO: &str = "You are a professional content summarizer. \
                     You create clear, concise summaries that capture the key points.";
const PROSE_RULES: &str = "Keep summaries between 3-5 sentences.";
const BULLET_RULES: &[&str] = &[
    "Format the summary as a list of bullet points, one per line.",
    "Start every bullet with \"- \".",
    "Do not use numbering or asterisks.",
    "Keep the list short when the content is short.",
];

const PROSE_REQUEST: &str = "Summarize the following content:";
const BULLET_REQUEST: &str = "Summarize the following content as bullet points:";

/// Shape of the summary requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    /// A short paragraph of 3-5 sentences.
    #[default]
    Prose,
    /// Dash-prefixed bullets, one per line.
    Bullets,
}

impl SummaryFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prose => "prose",
            Self::Bullets => "bullets",
        }
    }

    /// The system instruction for this format.
    pub fn system_prompt(&self) -> String {
        match self {
            Self::Prose => format!("{INTRO} {PROSE_RULES}"),
            Self::Bullets => {
                let rules = BULLET_RULES.join(" ");
                format!("{INTRO} {rules}")
            }
        }
    }

    /// The user message embedding `content` verbatim.
    pub fn user_prompt(&self, content: &str) -> String {
        let request = match self {
            Self::Prose => PROSE_REQUEST,
            Self::Bullets => BULLET_REQUEST,
        };
        format!("{request}\n\n{content}")
    }
}

impl fmt::Display for SummaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prose" | "paragraph" => Ok(Self::Prose),
            "bullets" | "bullet" | "list" => Ok(Self::Bullets),
            other => Err(format!(
                "unknown summary format: {other} (expected prose or bullets)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prose_is_default() {
        assert_eq!(SummaryFormat::default(), SummaryFormat::Prose);
    }

    #[test]
    fn prose_system_prompt() {
        let prompt = SummaryFormat::Prose.system_prompt();
        assert!(prompt.starts_with("You are a professional content summarizer."));
        assert!(prompt.contains("3-5 sentences"));
        assert!(!prompt.contains("bullet"));
    }

    #[test]
    fn bullet_system_prompt() {
        let prompt = SummaryFormat::Bullets.system_prompt();
        assert!(prompt.contains("professional content summarizer"));
        assert!(prompt.contains("\"- \""));
        assert!(prompt.contains("numbering or asterisks"));
        assert!(!prompt.contains("3-5 sentences"));
    }

    #[test]
    fn prose_user_prompt_embeds_content_verbatim() {
        let prompt = SummaryFormat::Prose.user_prompt("  spaced\ttext \n");
        assert_eq!(prompt, "Summarize the following content:\n\n  spaced\ttext \n");
    }

    #[test]
    fn bullet_user_prompt() {
        let prompt = SummaryFormat::Bullets.user_prompt("abc");
        assert_eq!(
            prompt,
            "Summarize the following content as bullet points:\n\nabc"
        );
    }

    #[test]
    fn parse_accepts_names_and_aliases() {
        assert_eq!("prose".parse::<SummaryFormat>().unwrap(), SummaryFormat::Prose);
        assert_eq!(" Bullets ".parse::<SummaryFormat>().unwrap(), SummaryFormat::Bullets);
        assert_eq!("list".parse::<SummaryFormat>().unwrap(), SummaryFormat::Bullets);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "haiku".parse::<SummaryFormat>().unwrap_err();
        assert!(err.contains("haiku"));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for format in [SummaryFormat::Prose, SummaryFormat::Bullets] {
            assert_eq!(format.to_string().parse::<SummaryFormat>().unwrap(), format);
        }
    }
}
