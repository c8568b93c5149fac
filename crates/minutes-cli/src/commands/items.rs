//! Items command implementation.

use super::parse_transcript_id;
use crate::cli::ItemsArgs;
use crate::error::Result;
use crate::output::Formatter;
use minutes_sdk::MinutesClient;

/// Execute the items command.
pub async fn execute_items(
    args: ItemsArgs,
    client: &MinutesClient,
    formatter: &Formatter,
) -> Result<()> {
    let transcript_id = parse_transcript_id(&args.transcript_id)?;
    let items = client
        .list_action_items(transcript_id, args.filter.into())
        .await?;
    println!("{}", formatter.format_action_items(&items)?);
    Ok(())
}
