//! REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! and dynamic help generation. Everything that is not a command is text
//! for the form; a leading `//` escapes a literal slash.

mod clear;
mod count;
mod format;
mod help;
mod quit;
mod show;
mod status;
mod summarize;

use async_trait::async_trait;
use std::sync::Arc;

use crate::form::FormState;
use crate::prompts::SummaryFormat;

/// Session info available to commands during execution.
pub struct SessionInfo<'a> {
    pub form: &'a FormState,
    pub format: SummaryFormat,
    pub model: &'a str,
    pub endpoint: &'a str,
    pub auth_status: &'a str,
    pub store: &'a str,
}

/// A setting change the REPL needs to apply after a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Format(SummaryFormat),
}

/// What the REPL should do after a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Not a command; the line is form input.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Submit the current input.
    Summarize,
    /// Reset the form.
    Clear,
    /// Command produced a state change the REPL must apply.
    StateChanged(StateChange),
    /// Exit the REPL.
    Quit,
}

/// A REPL command. Implement this trait to add new commands.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/summarize"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["/s"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    /// Run the command. `args` is whatever followed the name, trimmed.
    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult;
}

/// Holds registered commands.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(help::HelpCommand),
            Arc::new(summarize::SummarizeCommand),
            Arc::new(clear::ClearCommand),
            Arc::new(show::ShowCommand),
            Arc::new(count::CountCommand),
            Arc::new(format::FormatCommand),
            Arc::new(status::StatusCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    /// Register an additional command.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, info: &SessionInfo<'_>) -> CommandResult {
        let line = input.trim();
        if !line.starts_with('/') || line.starts_with("//") {
            return CommandResult::NotACommand;
        }

        let (cmd, args) = line
            .split_once(char::is_whitespace)
            .map(|(cmd, args)| (cmd, args.trim()))
            .unwrap_or((line, ""));

        for command in &self.commands {
            if cmd == command.name() || command.aliases().contains(&cmd) {
                // /help needs the registry to list all commands
                if command.name() == "/help" {
                    print!("{}", self.help_text());
                    return CommandResult::Handled;
                }
                return command.execute(args, info).await;
            }
        }

        println!("unknown command: {cmd}");
        println!("type /help for available commands, or start the line with // to keep it as text");
        CommandResult::Handled
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out
    }

    /// All registered command names (for testing).
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The text a non-command line contributes to the input.
/// `//etc/hosts` becomes `/etc/hosts`.
pub fn literal_text(line: &str) -> &str {
    if line.starts_with("//") { &line[1..] } else { line }
}

/// The input after appending a non-command `line`, or `None` when the line
/// changes nothing (blank lines before any text).
pub fn append_line(input: &str, line: &str) -> Option<String> {
    let text = literal_text(line);
    if input.is_empty() {
        if text.trim().is_empty() {
            return None;
        }
        return Some(text.to_string());
    }
    Some(format!("{input}\n{text}"))
}

fn format_label(name: &str, aliases: &[&str]) -> String {
    if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, aliases.join(", "))
    }
}
