//! Minutes CLI - Command-line client for the Minutes action item service.

use clap::Parser;
use minutes_cli::commands;
use minutes_cli::repl;
use minutes_cli::{Cli, Command, Config, Formatter};
use minutes_sdk::MinutesClient;
use std::path::Path;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> minutes_cli::Result<()> {
    let cli = Cli::parse();

    // Load or create config
    let loaded = match &cli.config {
        Some(path) => Config::load_from(Path::new(path)),
        None => Config::load(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}; using default configuration", e);
            Config::default()
        }
    };

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut config, &formatter).await?;
        }
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        Some(cmd) => {
            let profile = config.get_active_profile()?;
            let client = MinutesClient::new(&profile.server_url);

            match cmd {
                Command::Extract(args) => commands::execute_extract(args, &client, &formatter).await?,
                Command::Items(args) => commands::execute_items(args, &client, &formatter).await?,
                Command::Add(args) => commands::execute_add(args, &client, &formatter).await?,
                Command::Edit(args) => commands::execute_edit(args, &client, &formatter).await?,
                Command::Done(args) => commands::execute_done(args, &client, &formatter).await?,
                Command::Delete(args) => commands::execute_delete(args, &client, &formatter).await?,
                Command::History(args) => commands::execute_history(args, &client, &formatter).await?,
                Command::Health => commands::execute_health(&client, &formatter).await?,
                Command::Profile(_) | Command::Repl => unreachable!(),
            }
        }
    }

    Ok(())
}
