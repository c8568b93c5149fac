//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use minutes_domain::ItemFilter;

/// Minutes CLI - Turn meeting transcripts into tracked action items.
#[derive(Debug, Parser)]
#[command(name = "minutes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MINUTES_CONFIG")]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract action items from a transcript and save both
    Extract(ExtractArgs),

    /// List the action items of a saved transcript
    Items(ItemsArgs),

    /// Add an action item to a saved transcript
    Add(AddArgs),

    /// Edit fields of an action item
    Edit(EditArgs),

    /// Toggle an action item between done and open
    Done(DoneArgs),

    /// Delete an action item
    Delete(DeleteArgs),

    /// Show recently saved transcripts
    History(HistoryArgs),

    /// Check server, database, and LLM health
    Health,

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Transcript text
    pub text: Option<String>,

    /// Read the transcript from a file
    #[arg(short = 'F', long, conflicts_with = "text")]
    pub file: Option<String>,

    /// Read the transcript from stdin
    #[arg(long, conflicts_with_all = ["text", "file"])]
    pub stdin: bool,

    /// Only extract; do not save the transcript or its items
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the items command.
#[derive(Debug, Parser)]
pub struct ItemsArgs {
    /// Transcript ID
    pub transcript_id: String,

    /// Which items to show
    #[arg(long, value_enum, default_value = "all")]
    pub filter: FilterArg,
}

/// Arguments for the add command.
#[derive(Debug, Parser)]
pub struct AddArgs {
    /// Transcript ID
    pub transcript_id: String,

    /// Task description
    pub task: String,

    /// Person responsible
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Due date, as free text
    #[arg(short, long)]
    pub due: Option<String>,
}

/// Arguments for the edit command.
///
/// An empty `--owner` or `--due` clears that field.
#[derive(Debug, Parser)]
pub struct EditArgs {
    /// Action item ID
    pub item_id: String,

    /// New task description
    #[arg(short, long)]
    pub task: Option<String>,

    /// New owner
    #[arg(short, long)]
    pub owner: Option<String>,

    /// New due date
    #[arg(short, long)]
    pub due: Option<String>,
}

/// Arguments for the done command.
#[derive(Debug, Parser)]
pub struct DoneArgs {
    /// Action item ID
    pub item_id: String,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Action item ID
    pub item_id: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the history command.
#[derive(Debug, Parser)]
pub struct HistoryArgs {
    /// Maximum number of transcripts (server default when omitted)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Server URL
        #[arg(short, long)]
        url: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Item filter argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FilterArg {
    /// Every item
    All,
    /// Items not yet done
    Open,
    /// Completed items
    Done,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<FilterArg> for ItemFilter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::All => ItemFilter::All,
            FilterArg::Open => ItemFilter::Open,
            FilterArg::Done => ItemFilter::Done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_repl() {
        let cli = Cli::parse_from(["minutes"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from(["minutes", "extract", "--dry-run", "Sam sends the report"]);
        match cli.command {
            Some(Command::Extract(args)) => {
                assert!(args.dry_run);
                assert_eq!(args.text.as_deref(), Some("Sam sends the report"));
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_extract_sources_conflict() {
        let result = Cli::try_parse_from(["minutes", "extract", "text", "--stdin"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_edit_command() {
        let cli = Cli::parse_from(["minutes", "edit", "abc", "--owner", "Sam", "--due", ""]);
        match cli.command {
            Some(Command::Edit(args)) => {
                assert_eq!(args.item_id, "abc");
                assert!(args.task.is_none());
                assert_eq!(args.owner.as_deref(), Some("Sam"));
                assert_eq!(args.due.as_deref(), Some(""));
            }
            _ => panic!("Expected Edit command"),
        }
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::parse_from(["minutes", "history", "--limit", "3", "--format", "json"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Some(Command::History(args)) => assert_eq!(args.limit, Some(3)),
            _ => panic!("Expected History command"),
        }
    }

    #[test]
    fn test_filter_conversion() {
        let cli = Cli::parse_from(["minutes", "items", "abc", "--filter", "open"]);
        match cli.command {
            Some(Command::Items(args)) => {
                assert_eq!(ItemFilter::from(args.filter), ItemFilter::Open);
            }
            _ => panic!("Expected Items command"),
        }
    }
}
