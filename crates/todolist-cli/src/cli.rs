//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the tl CLI.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use todolist_model::models::{Priority, Status};
use todolist_model::timestamp::parse_timestamp;

/// tl - A local todo list with filtering, tags and markdown import
#[derive(Parser, Debug)]
#[command(name = "tl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Data file to use (default: from config, then the platform data directory)
    #[arg(long, global = true, env = "TL_DATA")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List todos (pending and in-progress by default)
    #[command(alias = "l")]
    List {
        /// Only these statuses (repeatable)
        #[arg(short, long, value_parser = parse_status, action = clap::ArgAction::Append)]
        status: Vec<Status>,

        /// Only this priority (low, medium, high or 1-3)
        #[arg(short = 'P', long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// Only todos with a tag containing this text (case-insensitive)
        #[arg(short, long)]
        tag: Option<String>,

        /// Completed on or after this day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,

        /// Completed on or before this day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,

        /// Limit results (default: from config, then 50)
        #[arg(long)]
        limit: Option<u32>,

        /// Show all matching todos (no limit)
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },

    /// Add a new todo
    #[command(alias = "a")]
    Add {
        /// Todo title
        title: String,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// Priority (default: low)
        #[arg(short = 'P', long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// Initial status (default: pending)
        #[arg(short, long, value_parser = parse_status)]
        status: Option<Status>,

        /// Add tag (repeatable, created if missing)
        #[arg(short, long, action = clap::ArgAction::Append)]
        tag: Vec<String>,

        /// Attach image path (repeatable)
        #[arg(long, action = clap::ArgAction::Append)]
        image: Vec<String>,

        /// Completion time for a completed todo
        #[arg(long, value_parser = parse_datetime, requires = "status")]
        completed_at: Option<NaiveDateTime>,
    },

    /// Show todo details
    #[command(alias = "s")]
    Show {
        /// Todo ID
        id: u64,
    },

    /// Edit a todo
    #[command(alias = "e")]
    Edit {
        /// Todo ID
        id: u64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long, conflicts_with = "no_description")]
        description: Option<String>,

        /// Remove the description
        #[arg(long)]
        no_description: bool,

        /// New priority
        #[arg(short = 'P', long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// New status
        #[arg(short, long, value_parser = parse_status)]
        status: Option<Status>,

        /// Completion time (applies when the todo ends up completed)
        #[arg(long, value_parser = parse_datetime)]
        completed_at: Option<NaiveDateTime>,

        /// Set tags (replaces existing, repeatable)
        #[arg(short, long, action = clap::ArgAction::Append, conflicts_with = "clear_tags")]
        tag: Vec<String>,

        /// Add a tag (repeatable)
        #[arg(long, action = clap::ArgAction::Append)]
        add_tag: Vec<String>,

        /// Remove a tag (repeatable)
        #[arg(long, action = clap::ArgAction::Append)]
        remove_tag: Vec<String>,

        /// Remove all tags
        #[arg(long)]
        clear_tags: bool,

        /// Set image paths (replaces existing, repeatable)
        #[arg(long, action = clap::ArgAction::Append, conflicts_with = "clear_images")]
        image: Vec<String>,

        /// Remove all image paths
        #[arg(long)]
        clear_images: bool,
    },

    /// Change a todo's status
    Status {
        /// Todo ID
        id: u64,

        /// New status (pending, in-progress, completed, cancelled)
        #[arg(value_parser = parse_status)]
        status: Status,

        /// Completion time when moving to completed (default: now)
        #[arg(long, value_parser = parse_datetime)]
        at: Option<NaiveDateTime>,
    },

    /// Complete todo(s)
    #[command(alias = "d")]
    Done {
        /// Todo ID(s)
        #[arg(required = true)]
        ids: Vec<u64>,

        /// Completion time (default: now)
        #[arg(long, value_parser = parse_datetime)]
        at: Option<NaiveDateTime>,
    },

    /// Delete todo(s)
    #[command(alias = "rm")]
    Delete {
        /// Todo ID(s)
        #[arg(required = true)]
        ids: Vec<u64>,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Manage tags
    #[command(alias = "tag")]
    Tags {
        #[command(subcommand)]
        command: Option<TagsCommands>,
    },

    /// Import todos from a markdown checklist
    Import {
        /// Markdown file to read
        file: PathBuf,

        /// Parse and report without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Show summary statistics
    Stats,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Tag subcommands
#[derive(Subcommand, Debug)]
pub enum TagsCommands {
    /// List all tags (default)
    List,

    /// Create a tag
    Add {
        /// Tag name
        name: String,

        /// Display color (e.g. "#1890ff")
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Rename or recolor a tag
    Edit {
        /// Tag name or ID
        tag: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New color
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a tag (todos keep the name)
    Delete {
        /// Tag name or ID
        tag: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Show config file path
    Path,
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    s.parse::<Priority>().map_err(|e| e.to_string())
}

fn parse_status(s: &str) -> Result<Status, String> {
    s.parse::<Status>().map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    parse_timestamp(s).ok_or_else(|| {
        format!("invalid time '{s}', expected YYYY-MM-DD [HH:MM[:SS]] or ISO-8601")
    })
}
