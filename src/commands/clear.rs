use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct ClearCommand;

#[async_trait]
impl Command for ClearCommand {
    fn name(&self) -> &str {
        "/clear"
    }

    fn aliases(&self) -> &[&str] {
        &["/c"]
    }

    fn description(&self) -> &str {
        "clear input, summary and error"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        if !info.form.can_clear() {
            println!("  ✗ summarizing, press Ctrl+C to abandon the request");
            return CommandResult::Handled;
        }
        CommandResult::Clear
    }
}
