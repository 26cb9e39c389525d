//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Commands are split by whether they need the data file: config,
//! completions and help run without opening it, everything else gets a
//! loaded [`Repository`].

use todolist_core::Repository;

use crate::cli::{Cli, Commands, ConfigCommands, Shell, TagsCommands};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that run without the data file.
pub trait NoStoreCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// Trait for commands that read or change the collection.
#[allow(async_fn_in_trait)]
pub trait StoreCommand {
    /// Execute the command against an open repository.
    async fn execute(&self, ctx: &CommandContext, repo: &mut Repository) -> Result<()>;
}

/// Commands that don't need the data file.
pub enum NoStoreDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> NoStoreDispatch<'a> {
    /// Try to create a no-store dispatch from the CLI command.
    /// Returns None if the command needs the data file.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(shell)),
            None => Some(Self::Help),
            _ => None,
        }
    }
}

impl NoStoreCommand for NoStoreDispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("tl - local todo list");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that need the data file, converted to command options.
pub enum StoreDispatch<'a> {
    List(commands::list::ListOptions),
    Add(commands::add::AddOptions),
    Show(commands::show::ShowOptions),
    Edit(commands::edit::EditOptions),
    Status(commands::status::StatusOptions),
    Done(commands::status::DoneOptions),
    Delete(commands::delete::DeleteOptions),
    Tags(&'a Option<TagsCommands>),
    Import(commands::import::ImportOptions),
    Stats,
}

impl<'a> StoreDispatch<'a> {
    /// Create a store dispatch from the CLI command.
    /// Returns None for commands handled by [`NoStoreDispatch`].
    pub fn from_cli(cli: &'a Cli) -> Option<Self> {
        let dispatch = match cli.command.as_ref()? {
            Commands::List {
                status,
                priority,
                tag,
                from,
                to,
                limit,
                all,
            } => Self::List(commands::list::ListOptions {
                statuses: status.clone(),
                priority: *priority,
                tag: tag.clone(),
                from: *from,
                to: *to,
                limit: *limit,
                all: *all,
            }),
            Commands::Add {
                title,
                description,
                priority,
                status,
                tag,
                image,
                completed_at,
            } => Self::Add(commands::add::AddOptions {
                title: title.clone(),
                description: description.clone(),
                priority: *priority,
                status: *status,
                tags: tag.clone(),
                images: image.clone(),
                completed_at: *completed_at,
            }),
            Commands::Show { id } => Self::Show(commands::show::ShowOptions { id: *id }),
            Commands::Edit {
                id,
                title,
                description,
                no_description,
                priority,
                status,
                completed_at,
                tag,
                add_tag,
                remove_tag,
                clear_tags,
                image,
                clear_images,
            } => Self::Edit(commands::edit::EditOptions {
                id: *id,
                title: title.clone(),
                description: description.clone(),
                no_description: *no_description,
                priority: *priority,
                status: *status,
                completed_at: *completed_at,
                tags: tag.clone(),
                add_tags: add_tag.clone(),
                remove_tags: remove_tag.clone(),
                clear_tags: *clear_tags,
                images: image.clone(),
                clear_images: *clear_images,
            }),
            Commands::Status { id, status, at } => {
                Self::Status(commands::status::StatusOptions {
                    id: *id,
                    status: *status,
                    at: *at,
                })
            }
            Commands::Done { ids, at } => Self::Done(commands::status::DoneOptions {
                ids: ids.clone(),
                at: *at,
            }),
            Commands::Delete { ids, force } => Self::Delete(commands::delete::DeleteOptions {
                ids: ids.clone(),
                force: *force,
            }),
            Commands::Tags { command } => Self::Tags(command),
            Commands::Import { file, dry_run } => {
                Self::Import(commands::import::ImportOptions {
                    file: file.clone(),
                    dry_run: *dry_run,
                })
            }
            Commands::Stats => Self::Stats,
            Commands::Config { .. } | Commands::Completions { .. } => return None,
        };
        Some(dispatch)
    }
}

impl StoreCommand for StoreDispatch<'_> {
    async fn execute(&self, ctx: &CommandContext, repo: &mut Repository) -> Result<()> {
        match self {
            Self::List(opts) => commands::list::execute(ctx, opts, repo),
            Self::Add(opts) => commands::add::execute(ctx, opts, repo),
            Self::Show(opts) => commands::show::execute(ctx, opts, repo),
            Self::Edit(opts) => commands::edit::execute(ctx, opts, repo),
            Self::Status(opts) => commands::status::execute_status(ctx, opts, repo),
            Self::Done(opts) => commands::status::execute_done(ctx, opts, repo),
            Self::Delete(opts) => commands::delete::execute(ctx, opts, repo),
            Self::Tags(command) => dispatch_tags(ctx, command, repo),
            Self::Import(opts) => commands::import::execute(ctx, opts, repo).await,
            Self::Stats => commands::stats::execute(ctx, repo),
        }
    }
}

/// Dispatch tags subcommands.
fn dispatch_tags(
    ctx: &CommandContext,
    command: &Option<TagsCommands>,
    repo: &mut Repository,
) -> Result<()> {
    match command {
        Some(TagsCommands::List) | None => commands::tags::execute(ctx, repo),
        Some(TagsCommands::Add { name, color }) => {
            let opts = commands::tags::TagsAddOptions {
                name: name.clone(),
                color: color.clone(),
            };
            commands::tags::execute_add(ctx, &opts, repo)
        }
        Some(TagsCommands::Edit { tag, name, color }) => {
            let opts = commands::tags::TagsEditOptions {
                tag: tag.clone(),
                name: name.clone(),
                color: color.clone(),
            };
            commands::tags::execute_edit(ctx, &opts, repo)
        }
        Some(TagsCommands::Delete { tag, force }) => {
            let opts = commands::tags::TagsDeleteOptions {
                tag: tag.clone(),
                force: *force,
            };
            commands::tags::execute_delete(ctx, &opts, repo)
        }
    }
}
