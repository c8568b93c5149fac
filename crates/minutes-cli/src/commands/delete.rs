//! Delete command implementation.

use super::parse_item_id;
use crate::cli::DeleteArgs;
use crate::error::Result;
use crate::output::Formatter;
use minutes_sdk::MinutesClient;
use std::io::{self, BufRead, Write};

/// Execute the delete command.
pub async fn execute_delete(
    args: DeleteArgs,
    client: &MinutesClient,
    formatter: &Formatter,
) -> Result<()> {
    let id = parse_item_id(&args.item_id)?;

    // Confirm deletion unless --yes is specified
    if !args.yes {
        print!("Delete action item {}? [y/N] ", id);
        io::stdout().flush()?;

        let stdin = io::stdin();
        if !confirmed(&mut stdin.lock())? {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    client.delete_action_item(id).await?;

    if formatter.is_quiet() {
        println!("{}", id);
    } else {
        println!("{}", formatter.success(&format!("Deleted action item {}", id)));
    }
    Ok(())
}

/// Read one answer line; only "y" or "yes" confirms.
fn confirmed(input: &mut impl BufRead) -> Result<bool> {
    let mut response = String::new();
    input.read_line(&mut response)?;
    let answer = response.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_confirmation() {
        assert!(confirmed(&mut Cursor::new("y\n")).unwrap());
        assert!(confirmed(&mut Cursor::new("YES\n")).unwrap());
        assert!(!confirmed(&mut Cursor::new("\n")).unwrap());
        assert!(!confirmed(&mut Cursor::new("nope\n")).unwrap());
        assert!(!confirmed(&mut Cursor::new("")).unwrap());
    }
}
