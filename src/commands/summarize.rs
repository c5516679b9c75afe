use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct SummarizeCommand;

#[async_trait]
impl Command for SummarizeCommand {
    fn name(&self) -> &str {
        "/summarize"
    }

    fn aliases(&self) -> &[&str] {
        &["/s"]
    }

    fn description(&self) -> &str {
        "summarize the current input"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if info.form.is_busy() {
            println!("  ✗ already summarizing, wait for the result");
            return CommandResult::Handled;
        }
        if !info.form.can_submit() {
            println!("  ✗ nothing to summarize, paste some text first");
            return CommandResult::Handled;
        }
        CommandResult::Summarize
    }
}
