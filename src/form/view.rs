//! Text rendering of the form for the terminal.

use super::{FormState, Phase};
use crate::consts::format_number;

pub const SUBMIT_LABEL: &str = "Summarize";
pub const BUSY_LABEL: &str = "⏳ Summarizing...";

/// Live counter under the input, e.g. `1,234 characters`.
pub fn counter(state: &FormState) -> String {
    let n = state.char_count();
    let unit = if n == 1 { "character" } else { "characters" };
    format!("{} {unit}", format_number(n))
}

pub fn submit_label(state: &FormState) -> &'static str {
    if state.is_busy() { BUSY_LABEL } else { SUBMIT_LABEL }
}

/// The result region: summary, error box, or nothing.
pub fn result(state: &FormState) -> Option<String> {
    match state.phase() {
        Phase::Succeeded(summary) => Some(format!("Summary:\n{summary}")),
        Phase::Failed(message) => Some(format!("Error: {message}")),
        Phase::Idle | Phase::Busy(_) => None,
    }
}

/// One-line status for the prompt: counter, and whether the controls are live.
pub fn status_line(state: &FormState) -> String {
    let mut line = counter(state);
    if state.is_busy() || state.can_submit() {
        line.push_str(" · ");
        line.push_str(submit_label(state));
    }
    if state.can_submit() {
        line.push_str(" (/s)");
    }
    line
}
