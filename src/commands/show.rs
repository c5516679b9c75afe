use async_trait::async_trait;

use super::{Command, CommandResult, SessionInfo};
use crate::form::view;

pub struct ShowCommand;

#[async_trait]
impl Command for ShowCommand {
    fn name(&self) -> &str {
        "/show"
    }

    fn description(&self) -> &str {
        "show the current input and result"
    }

    async fn execute(&self, _args: &str, info: &SessionInfo<'_>) -> CommandResult {
        let form = info.form;
        if form.input().is_empty() {
            println!("  (no input)");
        } else {
            println!("{}", form.input());
        }
        println!("  {}", view::status_line(form));
        if let Some(result) = view::result(form) {
            println!("\n{result}");
        }
        CommandResult::Handled
    }
}
