//! Minutes CLI library.
//!
//! Configuration, command execution, and output formatting for the `minutes`
//! command-line client and its interactive REPL.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
