//! Edit command implementation.

use super::parse_item_id;
use crate::cli::EditArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use minutes_domain::{normalize_optional, ItemUpdate};
use minutes_sdk::MinutesClient;

/// Execute the edit command.
///
/// Each flag becomes one single-field update, applied in order.
pub async fn execute_edit(args: EditArgs, client: &MinutesClient, formatter: &Formatter) -> Result<()> {
    let id = parse_item_id(&args.item_id)?;
    let updates = updates_from_args(&args)?;

    let mut latest = None;
    for update in &updates {
        latest = Some(client.update_action_item(id, update).await?);
    }

    if let Some(item) = latest {
        if !formatter.is_quiet() {
            println!(
                "{}",
                formatter.success(&format!("Updated {} field(s)", updates.len()))
            );
        }
        println!("{}", formatter.format_action_item(&item)?);
    }

    Ok(())
}

/// Turn the edit flags into updates; empty owner or due values clear the field.
fn updates_from_args(args: &EditArgs) -> Result<Vec<ItemUpdate>> {
    let mut updates = Vec::new();

    if let Some(task) = &args.task {
        if task.trim().is_empty() {
            return Err(CliError::InvalidInput("Task cannot be empty".to_string()));
        }
        updates.push(ItemUpdate::Task(task.trim().to_string()));
    }
    if let Some(owner) = &args.owner {
        updates.push(ItemUpdate::Owner(normalize_optional(Some(owner))));
    }
    if let Some(due) = &args.due {
        updates.push(ItemUpdate::DueDate(normalize_optional(Some(due))));
    }

    if updates.is_empty() {
        return Err(CliError::InvalidInput(
            "Nothing to change; pass --task, --owner, or --due".to_string(),
        ));
    }

    Ok(updates)
}
