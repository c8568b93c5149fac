//! Add command implementation.

use super::parse_transcript_id;
use crate::cli::AddArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use minutes_domain::NewActionItem;
use minutes_sdk::MinutesClient;

/// Execute the add command.
pub async fn execute_add(args: AddArgs, client: &MinutesClient, formatter: &Formatter) -> Result<()> {
    let transcript_id = parse_transcript_id(&args.transcript_id)?;

    if args.task.trim().is_empty() {
        return Err(CliError::InvalidInput("Task cannot be empty".to_string()));
    }

    let item = NewActionItem {
        task: args.task,
        owner: args.owner,
        due_date: args.due,
    }
    .normalized();

    let stored = client.add_action_item(transcript_id, &item).await?;

    if !formatter.is_quiet() {
        println!("{}", formatter.success("Action item added"));
    }
    println!("{}", formatter.format_action_item(&stored)?);
    Ok(())
}
