use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod dispatch;
mod output;

use cli::Cli;
use commands::config::load_config;
use commands::{CommandContext, CommandError};
use dispatch::{NoStoreCommand, NoStoreDispatch, StoreCommand, StoreDispatch};
use todolist_core::{Repository, RepositoryError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                let rendered = serde_json::to_string_pretty(&error_json)
                    .unwrap_or_else(|_| error_json.to_string());
                eprintln!("{rendered}");
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Sets up logging on stderr.
///
/// `RUST_LOG` wins when set. Otherwise `--verbose` shows debug events,
/// `--quiet` only errors, and the default is warnings.
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let config = load_config()?;
    let ctx = CommandContext::new(cli, &config);

    // Config, completions and help never touch the data file
    if let Some(dispatch) = NoStoreDispatch::try_from_cli(cli) {
        return dispatch.execute(&ctx);
    }

    let Some(dispatch) = StoreDispatch::from_cli(cli) else {
        return Ok(());
    };

    let store = ctx.store()?;
    let mut repo = Repository::open_async(store).await?;
    debug!(
        todos = repo.todos().len(),
        tags = repo.tags().len(),
        "opened collection"
    );

    dispatch.execute(&ctx, &mut repo).await
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Repository(RepositoryError::NotFound { .. }) => "NOT_FOUND",
        CommandError::Repository(RepositoryError::Validation(_)) => "VALIDATION_ERROR",
        CommandError::Repository(RepositoryError::Store(_)) | CommandError::Store(_) => {
            "STORE_ERROR"
        }
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Repository(RepositoryError::NotFound { .. }) => 4,
        CommandError::Repository(RepositoryError::Validation(_)) => 1,
        CommandError::Repository(RepositoryError::Store(_)) => 5,
        CommandError::Store(_) => 5,
        CommandError::Config(_) => 5,
        CommandError::Io(_) => 3,
        CommandError::Json(_) => 1,
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}
