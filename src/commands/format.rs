use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo, StateChange};
use crate::prompts::SummaryFormat;

pub struct FormatCommand;

#[async_trait]
impl Command for FormatCommand {
    fn name(&self) -> &str {
        "/format"
    }

    fn description(&self) -> &str {
        "show or set the summary format (prose | bullets); a new choice is remembered"
    }

    async fn execute(&self, args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if args.is_empty() {
            println!("  format    {}", info.format);
            return CommandResult::Handled;
        }

        match args.parse::<SummaryFormat>() {
            Ok(format) if format == info.format => {
                println!("  already using {format}");
                CommandResult::Handled
            }
            Ok(format) => CommandResult::StateChanged(StateChange::Format(format)),
            Err(e) => {
                eprintln!("  ✗ {e}");
                CommandResult::Handled
            }
        }
    }
}
