use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::form::view;

pub struct CountCommand;

#[async_trait]
impl Command for CountCommand {
    fn name(&self) -> &str {
        "/count"
    }

    fn description(&self) -> &str {
        "show the input character count"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        println!("  {}", view::counter(info.form));
        CommandResult::Handled
    }
}
