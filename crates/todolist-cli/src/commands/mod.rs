//! Command implementations for the tl CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod add;
pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod import;
pub mod list;
pub mod show;
pub mod stats;
pub mod status;
pub mod tags;

use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use dialoguer::Confirm;
use todolist_core::{CollectionStore, CollectionStoreError, RepositoryError};
use tracing::debug;

use crate::cli::Cli;
use config::Config;

/// Default number of todos shown by `list`.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Repository error (not found, validation, storage).
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Data file error outside the repository.
    #[error("store error: {0}")]
    Store(#[from] CollectionStoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Default `list` limit.
    pub list_limit: u32,
    /// Data file from `--data` / `TL_DATA` or the config file.
    pub data_path: Option<PathBuf>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the loaded config.
    ///
    /// Colors are off when `--no-color` is given, when `NO_COLOR` is set, or
    /// when the config sets `output.color = false`.
    pub fn new(cli: &Cli, config: &Config) -> Self {
        let no_color_env = env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && !no_color_env && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            verbose: cli.verbose,
            list_limit: config.list.limit.unwrap_or(DEFAULT_LIST_LIMIT),
            data_path: cli.data.clone().or_else(|| config.data_file.clone()),
        }
    }

    /// Returns the store for the resolved data file.
    ///
    /// Resolution order: `--data` / `TL_DATA`, then `data_file` from the
    /// config, then the platform data directory.
    pub fn store(&self) -> Result<CollectionStore> {
        let store = match &self.data_path {
            Some(path) => CollectionStore::with_path(path.clone()),
            None => CollectionStore::new()?,
        };
        debug!(path = %store.path().display(), "resolved data file");
        Ok(store)
    }
}

/// Outcome of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Confirmed,
    Aborted,
}

/// Asks the user to confirm a destructive operation on `items`.
///
/// `items` are `(id, title)` pairs shown before the prompt. With `force` the
/// prompt is skipped. Without a terminal on stdin the operation is refused
/// rather than guessed.
pub fn confirm_operation(
    action: &str,
    items: &[(String, String)],
    force: bool,
    quiet: bool,
) -> Result<ConfirmResult> {
    if force {
        return Ok(ConfirmResult::Confirmed);
    }

    if !io::stdin().is_terminal() {
        return Err(CommandError::Config(format!(
            "refusing to {action} without confirmation; re-run with --force"
        )));
    }

    if !quiet {
        eprintln!("About to {action} {} item(s):", items.len());
        for (id, title) in items {
            eprintln!("  {id}  {title}");
        }
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("{action} {} item(s)?", items.len()))
        .default(false)
        .interact()
        .map_err(|e| CommandError::Io(io::Error::other(e.to_string())))?;

    Ok(if confirmed {
        ConfirmResult::Confirmed
    } else {
        ConfirmResult::Aborted
    })
}
