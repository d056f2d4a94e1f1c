use std::io;

use rustyline::error::ReadlineError;
use spendlog_config::ConfigError;
use thiserror::Error;

/// Top-level error for the interactive shell.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Command failed: {0}")]
    Command(String),
    #[error("Terminal error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
