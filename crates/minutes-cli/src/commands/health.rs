//! Health command implementation.

use crate::error::Result;
use crate::output::Formatter;
use minutes_sdk::MinutesClient;

/// Execute the health command.
pub async fn execute_health(client: &MinutesClient, formatter: &Formatter) -> Result<()> {
    let health = client.health().await?;
    println!("{}", formatter.format_health(&health)?);
    if !health.is_healthy() && !formatter.is_quiet() {
        println!(
            "{}",
            formatter.warning(&format!("Server at {} is degraded", client.base_url()))
        );
    }
    Ok(())
}
