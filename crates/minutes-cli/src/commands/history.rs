//! History command implementation.

use crate::cli::HistoryArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use minutes_sdk::MinutesClient;

/// Execute the history command.
pub async fn execute_history(
    args: HistoryArgs,
    client: &MinutesClient,
    formatter: &Formatter,
) -> Result<()> {
    if args.limit == Some(0) {
        return Err(CliError::InvalidInput("Limit must be at least 1".to_string()));
    }

    let transcripts = client.list_transcripts(args.limit).await?;
    println!("{}", formatter.format_transcripts(&transcripts)?);
    Ok(())
}
