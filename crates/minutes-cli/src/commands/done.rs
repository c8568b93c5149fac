//! Done command implementation.

use super::parse_item_id;
use crate::cli::DoneArgs;
use crate::error::Result;
use crate::output::Formatter;
use minutes_sdk::MinutesClient;

/// Execute the done command, flipping the item's done state.
pub async fn execute_done(args: DoneArgs, client: &MinutesClient, formatter: &Formatter) -> Result<()> {
    let id = parse_item_id(&args.item_id)?;
    let item = client.toggle_action_item(id).await?;

    if !formatter.is_quiet() {
        let message = if item.is_done {
            format!("Marked done: {}", item.task)
        } else {
            format!("Reopened: {}", item.task)
        };
        println!("{}", formatter.success(&message));
    }
    println!("{}", formatter.format_action_item(&item)?);
    Ok(())
}
