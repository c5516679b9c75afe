//! Synchronous state of the summarize form.

use crate::provider::SummarizeError;

/// Where the form is in its request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing to show.
    #[default]
    Idle,
    /// A request is in flight.
    Busy(Pending),
    /// The last request produced this summary.
    Succeeded(String),
    /// The last request failed with this user-facing message.
    Failed(String),
}

/// The request a busy form is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    pub token: u64,
    /// Set when the form was cleared mid-flight; the result will be dropped.
    pub cleared: bool,
}

/// Everything needed to issue a request: its token and a snapshot of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub token: u64,
    pub input: String,
}

/// What happened to a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Succeeded,
    Failed,
    /// The form was cleared while the request ran.
    Discarded,
    /// No request with this token is in flight.
    Stale,
}

/// Input text plus the request phase.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    input: String,
    phase: Phase,
    last_token: u64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Characters in the input, whitespace included.
    pub fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Busy(_))
    }

    /// Summary text, or `""` when there is none.
    pub fn summary(&self) -> &str {
        match &self.phase {
            Phase::Succeeded(text) => text,
            _ => "",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.input.trim().is_empty()
    }

    pub fn can_clear(&self) -> bool {
        !self.is_busy()
    }

    /// Replace the input. No validation.
    pub fn update_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Start a request if the input is non-blank and nothing is in flight.
    /// Any previous summary or error is dropped.
    pub fn begin(&mut self) -> Option<Ticket> {
        if !self.can_submit() {
            return None;
        }
        self.last_token += 1;
        self.phase = Phase::Busy(Pending {
            token: self.last_token,
            cleared: false,
        });
        Some(Ticket {
            token: self.last_token,
            input: self.input.clone(),
        })
    }

    /// Apply the result of the request identified by `token`.
    pub fn settle(&mut self, token: u64, result: Result<String, SummarizeError>) -> SettleOutcome {
        let pending = match self.phase {
            Phase::Busy(pending) if pending.token == token => pending,
            _ => return SettleOutcome::Stale,
        };

        if pending.cleared {
            self.phase = Phase::Idle;
            return SettleOutcome::Discarded;
        }

        match result {
            Ok(summary) => {
                self.phase = Phase::Succeeded(summary);
                SettleOutcome::Succeeded
            }
            Err(err) => {
                self.phase = Phase::Failed(err.user_message());
                SettleOutcome::Failed
            }
        }
    }

    /// Reset input, summary and error.
    ///
    /// A request in flight keeps the form busy until it settles, but its
    /// result will be discarded.
    pub fn clear(&mut self) {
        self.input.clear();
        self.phase = match self.phase {
            Phase::Busy(pending) => Phase::Busy(Pending {
                cleared: true,
                ..pending
            }),
            _ => Phase::Idle,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FALLBACK_ERROR;

    fn with_input(text: &str) -> FormState {
        let mut state = FormState::new();
        state.update_input(text);
        state
    }

    #[test]
    fn starts_idle_and_empty() {
        let state = FormState::new();
        assert_eq!(state.phase(), &Phase::Idle);
        assert_eq!(state.input(), "");
        assert_eq!(state.summary(), "");
        assert!(state.error().is_none());
        assert!(!state.can_submit());
        assert!(state.can_clear());
    }

    #[test]
    fn char_count_includes_whitespace() {
        assert_eq!(with_input("  a b\n").char_count(), 6);
        assert_eq!(with_input("").char_count(), 0);
    }

    #[test]
    fn char_count_counts_characters_not_bytes() {
        assert_eq!(with_input("héllo ✓").char_count(), 7);
    }

    #[test]
    fn blank_input_does_not_begin() {
        for blank in ["", " ", "\n\t  \r\n"] {
            let mut state = with_input(blank);
            assert!(state.begin().is_none());
            assert_eq!(state.phase(), &Phase::Idle);
            assert_eq!(state.input(), blank);
        }
    }

    #[test]
    fn begin_marks_busy_and_snapshots_input() {
        let mut state = with_input("text");
        let ticket = state.begin().unwrap();
        assert_eq!(ticket.input, "text");
        assert!(state.is_busy());
        assert!(!state.can_submit());
        assert!(!state.can_clear());
    }

    #[test]
    fn begin_while_busy_is_refused() {
        let mut state = with_input("text");
        let first = state.begin().unwrap();
        assert!(state.begin().is_none());
        assert_eq!(
            state.phase(),
            &Phase::Busy(Pending {
                token: first.token,
                cleared: false
            })
        );
    }

    #[test]
    fn begin_drops_previous_result() {
        let mut state = with_input("text");
        let t = state.begin().unwrap();
        state.settle(t.token, Ok("old".to_string()));
        assert_eq!(state.summary(), "old");

        state.begin().unwrap();
        assert_eq!(state.summary(), "");
        assert!(state.error().is_none());
    }

    #[test]
    fn tokens_increase() {
        let mut state = with_input("text");
        let a = state.begin().unwrap();
        state.settle(a.token, Ok("x".to_string()));
        let b = state.begin().unwrap();
        assert!(b.token > a.token);
    }

    #[test]
    fn success_sets_summary_only() {
        let mut state = with_input("text");
        let t = state.begin().unwrap();
        assert_eq!(
            state.settle(t.token, Ok("A fox jumps over a dog.".to_string())),
            SettleOutcome::Succeeded
        );
        assert_eq!(state.summary(), "A fox jumps over a dog.");
        assert!(state.error().is_none());
        assert!(!state.is_busy());
    }

    #[test]
    fn failure_sets_error_only() {
        let mut state = with_input("text");
        let t = state.begin().unwrap();
        assert_eq!(
            state.settle(t.token, Err(SummarizeError::message("rate limit exceeded"))),
            SettleOutcome::Failed
        );
        assert_eq!(state.error(), Some("rate limit exceeded"));
        assert_eq!(state.summary(), "");
        assert!(!state.is_busy());
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let mut state = with_input("text");
        let t = state.begin().unwrap();
        state.settle(t.token, Err(SummarizeError::opaque()));
        assert_eq!(state.error(), Some(FALLBACK_ERROR));
    }

    #[test]
    fn mismatched_token_is_stale() {
        let mut state = with_input("text");
        let t = state.begin().unwrap();
        assert_eq!(
            state.settle(t.token + 1, Ok("nope".to_string())),
            SettleOutcome::Stale
        );
        assert!(state.is_busy());
    }

    #[test]
    fn settle_when_idle_is_stale() {
        let mut state = with_input("text");
        assert_eq!(state.settle(1, Ok("nope".to_string())), SettleOutcome::Stale);
        assert_eq!(state.phase(), &Phase::Idle);
    }

    #[test]
    fn settling_twice_applies_once() {
        let mut state = with_input("text");
        let t = state.begin().unwrap();
        assert_eq!(state.settle(t.token, Ok("first".to_string())), SettleOutcome::Succeeded);
        assert_eq!(state.settle(t.token, Ok("second".to_string())), SettleOutcome::Stale);
        assert_eq!(state.summary(), "first");
    }

    #[test]
    fn clear_resets_result_and_error() {
        let mut state = with_input("text");
        let t = state.begin().unwrap();
        state.settle(t.token, Err(SummarizeError::opaque()));
        state.clear();
        assert_eq!(state.input(), "");
        assert_eq!(state.summary(), "");
        assert!(state.error().is_none());
        assert_eq!(state.phase(), &Phase::Idle);
    }

    #[test]
    fn clear_while_busy_discards_result() {
        let mut state = with_input("text");
        let t = state.begin().unwrap();
        state.clear();
        assert_eq!(state.input(), "");
        assert!(state.is_busy());

        assert_eq!(
            state.settle(t.token, Ok("late".to_string())),
            SettleOutcome::Discarded
        );
        assert_eq!(state.phase(), &Phase::Idle);
        assert_eq!(state.summary(), "");
    }

    #[test]
    fn update_input_does_not_touch_phase() {
        let mut state = with_input("text");
        let t = state.begin().unwrap();
        state.settle(t.token, Ok("sum".to_string()));
        state.update_input("new text");
        assert_eq!(state.summary(), "sum");
        assert_eq!(state.input(), "new text");
    }
}
