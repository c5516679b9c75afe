use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};

pub struct StatusCommand;

#[async_trait]
impl Command for StatusCommand {
    fn name(&self) -> &str {
        "/status"
    }

    fn description(&self) -> &str {
        "show endpoint, model, format and auth status"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        println!("  endpoint  {} ({})", info.endpoint, info.model);
        println!("  auth      {}", info.auth_status);
        println!("  format    {}", info.format);
        println!("  prefs     {}", info.store);
        CommandResult::Handled
    }
}
