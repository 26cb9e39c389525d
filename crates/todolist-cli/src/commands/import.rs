//! Import command implementation.
//!
//! Reads a markdown checklist and adds one todo per checklist line.

use std::path::PathBuf;

use serde::Serialize;
use todolist_core::import::{self, ImportReport, ImportedTodo, SkippedLine};
use todolist_core::Repository;
use todolist_model::timestamp::format_timestamp;
use tracing::debug;

use super::{CommandContext, Result};

/// Options for the import command.
#[derive(Debug)]
pub struct ImportOptions {
    /// Markdown file to read.
    pub file: PathBuf,
    /// Parse and report without saving.
    pub dry_run: bool,
}

/// JSON output structure for a dry run.
#[derive(Serialize)]
struct DryRunOutput<'a> {
    dry_run: bool,
    todos: Vec<PreviewTodo<'a>>,
    skipped: &'a [SkippedLine],
}

#[derive(Serialize)]
struct PreviewTodo<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    priority: &'static str,
    status: &'static str,
    tags: &'a [String],
    created_at: Option<String>,
    completed_at: Option<String>,
}

impl<'a> From<&'a ImportedTodo> for PreviewTodo<'a> {
    fn from(todo: &'a ImportedTodo) -> Self {
        Self {
            title: &todo.title,
            description: todo.description.as_deref(),
            priority: todo.priority.as_str(),
            status: todo.status.as_str(),
            tags: &todo.tags,
            created_at: todo.created_at.map(format_timestamp),
            completed_at: todo.completed_at.map(format_timestamp),
        }
    }
}

/// Executes the import command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the data file cannot be saved.
pub async fn execute(ctx: &CommandContext, opts: &ImportOptions, repo: &mut Repository) -> Result<()> {
    let text = tokio::fs::read_to_string(&opts.file).await?;
    debug!(path = %opts.file.display(), bytes = text.len(), "read checklist");

    if opts.dry_run {
        let parsed = import::parse_document(&text);
        if ctx.json_output {
            let output = DryRunOutput {
                dry_run: true,
                todos: parsed.todos.iter().map(PreviewTodo::from).collect(),
                skipped: &parsed.skipped,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if !ctx.quiet {
            for todo in &parsed.todos {
                println!("Would import: {} [{}, {}]", todo.title, todo.status, todo.priority);
            }
            print_skipped(ctx, &parsed.skipped);
            println!(
                "\nDry run: {} todo(s) would be imported, {} line(s) skipped",
                parsed.todos.len(),
                parsed.skipped.len()
            );
        }
        return Ok(());
    }

    let report = repo.import_markdown(&text)?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !ctx.quiet {
        print!("{}", format_report(&report));
        print_skipped(ctx, &report.skipped);
    }

    Ok(())
}

fn format_report(report: &ImportReport) -> String {
    let mut output = format!(
        "Imported {} todo(s), skipped {} line(s)",
        report.imported_count(),
        report.skipped_count()
    );
    if report.tags_created > 0 {
        output.push_str(&format!(", created {} tag(s)", report.tags_created));
    }
    output.push('\n');
    output
}

fn print_skipped(ctx: &CommandContext, skipped: &[SkippedLine]) {
    if ctx.verbose {
        for line in skipped {
            eprintln!("  skipped line {}: {}", line.line_number, line.text);
        }
    }
}
