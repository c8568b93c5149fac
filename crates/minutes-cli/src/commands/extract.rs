//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use minutes_sdk::MinutesClient;
use std::fs;
use std::io::{self, Read};

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    client: &MinutesClient,
    formatter: &Formatter,
) -> Result<()> {
    let transcript = read_transcript(&args)?;

    if args.dry_run {
        let items = client.extract(&transcript).await?;
        println!("{}", formatter.format_extracted(&items)?);
    } else {
        let created = client.create_transcript(&transcript).await?;
        println!("{}", formatter.format_created(&created)?);
    }

    Ok(())
}

/// Collect the transcript from the argument, a file, or stdin.
fn read_transcript(args: &ExtractArgs) -> Result<String> {
    let text = if let Some(text) = &args.text {
        text.clone()
    } else if let Some(path) = &args.file {
        fs::read_to_string(path)?
    } else if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        return Err(CliError::InvalidInput(
            "Provide transcript text, --file <path>, or --stdin".to_string(),
        ));
    };

    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("Transcript is empty".to_string()));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(text: Option<&str>, file: Option<String>) -> ExtractArgs {
        ExtractArgs {
            text: text.map(str::to_string),
            file,
            stdin: false,
            dry_run: false,
        }
    }

    #[test]
    fn test_read_transcript_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Sam will send the report by Friday.").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let text = read_transcript(&args(None, Some(path))).unwrap();
        assert!(text.starts_with("Sam will send"));
    }

    #[test]
    fn test_inline_text_is_kept_verbatim() {
        let text = read_transcript(&args(Some("  Lee books the venue  "), None)).unwrap();
        assert_eq!(text, "  Lee books the venue  ");
    }

    #[test]
    fn test_missing_source_is_rejected() {
        assert!(matches!(
            read_transcript(&args(None, None)),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            read_transcript(&args(Some("   "), None)),
            Err(CliError::InvalidInput(_))
        ));
    }
}
