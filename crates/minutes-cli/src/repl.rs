//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{
    AddArgs, Command, DeleteArgs, DoneArgs, EditArgs, ExtractArgs, FilterArg, HistoryArgs,
    ItemsArgs, ProfileAction, ProfileArgs,
};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use minutes_sdk::MinutesClient;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Run the interactive REPL.
pub async fn run_repl(config: &mut Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Minutes REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .auto_add_history(false)
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = config.dir()?.join("history.txt");
    std::fs::create_dir_all(config.dir()?)?;
    let _ = editor.load_history(&history_path);

    let mut client = MinutesClient::new(&config.get_active_profile()?.server_url);

    loop {
        let prompt = format!("minutes ({})> ", config.active_profile);

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(ReplCommand::Command(cmd)) => {
                        if let Err(e) = execute_repl_command(cmd, &mut client, config, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    Command(Command),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "extract" => parse_extract_command(&parts[1..]),
        "items" => parse_items_command(&parts[1..]),
        "add" => parse_add_command(&parts[1..]),
        "edit" => parse_edit_command(&parts[1..]),
        "done" => single_id(&parts[1..], "done <item-id>")
            .map(|item_id| ReplCommand::Command(Command::Done(DoneArgs { item_id }))),
        "delete" => single_id(&parts[1..], "delete <item-id>").map(|item_id| {
            ReplCommand::Command(Command::Delete(DeleteArgs { item_id, yes: false }))
        }),
        "history" => parse_history_command(&parts[1..]),
        "health" => Ok(ReplCommand::Command(Command::Health)),
        "profile" => parse_profile_command(&parts[1..]),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Execute a REPL command.
async fn execute_repl_command(
    cmd: Command,
    client: &mut MinutesClient,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        Command::Profile(args) => {
            commands::execute_profile(args, config, formatter)?;
            // A switch changes which server the session talks to
            let url = &config.get_active_profile()?.server_url;
            if url != client.base_url() {
                *client = MinutesClient::new(url);
            }
        }
        Command::Extract(args) => commands::execute_extract(args, client, formatter).await?,
        Command::Items(args) => commands::execute_items(args, client, formatter).await?,
        Command::Add(args) => commands::execute_add(args, client, formatter).await?,
        Command::Edit(args) => commands::execute_edit(args, client, formatter).await?,
        Command::Done(args) => commands::execute_done(args, client, formatter).await?,
        Command::Delete(args) => commands::execute_delete(args, client, formatter).await?,
        Command::History(args) => commands::execute_history(args, client, formatter).await?,
        Command::Health => commands::execute_health(client, formatter).await?,
        Command::Repl => {
            println!("{}", formatter.info("Already in REPL mode"));
        }
    }

    Ok(())
}

// Simple command parsers for REPL (minimal argument parsing)

fn parse_extract_command(args: &[&str]) -> Result<ReplCommand> {
    let (dry_run, words) = match args.first() {
        Some(&"--dry-run") => (true, &args[1..]),
        _ => (false, args),
    };

    if words.is_empty() {
        return Err(CliError::InvalidInput(
            "Usage: extract [--dry-run] <transcript text>".to_string(),
        ));
    }

    Ok(ReplCommand::Command(Command::Extract(ExtractArgs {
        text: Some(words.join(" ")),
        file: None,
        stdin: false,
        dry_run,
    })))
}

fn parse_items_command(args: &[&str]) -> Result<ReplCommand> {
    let transcript_id = args
        .first()
        .ok_or_else(|| CliError::InvalidInput("Usage: items <transcript-id> [all|open|done]".to_string()))?
        .to_string();

    let filter = match args.get(1).map(|s| s.to_lowercase()).as_deref() {
        None | Some("all") => FilterArg::All,
        Some("open") => FilterArg::Open,
        Some("done") => FilterArg::Done,
        Some(other) => {
            return Err(CliError::InvalidInput(format!(
                "Unknown filter '{}': expected all, open, or done",
                other
            )))
        }
    };

    Ok(ReplCommand::Command(Command::Items(ItemsArgs {
        transcript_id,
        filter,
    })))
}

fn parse_add_command(args: &[&str]) -> Result<ReplCommand> {
    if args.len() < 2 {
        return Err(CliError::InvalidInput(
            "Usage: add <transcript-id> <task>".to_string(),
        ));
    }

    Ok(ReplCommand::Command(Command::Add(AddArgs {
        transcript_id: args[0].to_string(),
        task: args[1..].join(" "),
        owner: None,
        due: None,
    })))
}

fn parse_edit_command(args: &[&str]) -> Result<ReplCommand> {
    if args.len() < 2 {
        return Err(CliError::InvalidInput(
            "Usage: edit <item-id> <task|owner|due> [value]".to_string(),
        ));
    }

    // A missing value clears owner or due
    let value = Some(args[2..].join(" "));
    let mut edit = EditArgs {
        item_id: args[0].to_string(),
        task: None,
        owner: None,
        due: None,
    };

    match args[1] {
        "task" => edit.task = value,
        "owner" => edit.owner = value,
        "due" | "due_date" => edit.due = value,
        other => {
            return Err(CliError::InvalidInput(format!(
                "Unknown field '{}': expected task, owner, or due",
                other
            )))
        }
    }

    Ok(ReplCommand::Command(Command::Edit(edit)))
}

fn parse_history_command(args: &[&str]) -> Result<ReplCommand> {
    let limit = match args.first() {
        Some(raw) => Some(raw.parse::<usize>().map_err(|_| {
            CliError::InvalidInput(format!("Invalid limit '{}'", raw))
        })?),
        None => None,
    };

    Ok(ReplCommand::Command(Command::History(HistoryArgs { limit })))
}

fn parse_profile_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Ok(ReplCommand::Command(Command::Profile(ProfileArgs {
            action: ProfileAction::Show,
        })));
    }

    let action = match args[0] {
        "list" => ProfileAction::List,
        "show" => ProfileAction::Show,
        "switch" => {
            if args.len() < 2 {
                return Err(CliError::InvalidInput("Usage: profile switch <name>".to_string()));
            }
            ProfileAction::Switch {
                name: args[1].to_string(),
            }
        }
        _ => return Err(CliError::InvalidInput(format!("Unknown profile action: {}", args[0]))),
    };

    Ok(ReplCommand::Command(Command::Profile(ProfileArgs { action })))
}

fn single_id(args: &[&str], usage: &str) -> Result<String> {
    match args {
        [id] => Ok(id.to_string()),
        _ => Err(CliError::InvalidInput(format!("Usage: {}", usage))),
    }
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  extract [--dry-run] <text>     - Extract and save action items");
    println!("  items <transcript-id> [filter] - List items (all|open|done)");
    println!("  add <transcript-id> <task>     - Add an action item");
    println!("  edit <item-id> <field> [value] - Edit task, owner, or due (no value clears)");
    println!("  done <item-id>                 - Toggle done");
    println!("  delete <item-id>               - Delete an action item");
    println!("  history [limit]                - Recent transcripts");
    println!("  health                         - Server health");
    println!("  profile [list|show|switch]     - Manage profiles");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
