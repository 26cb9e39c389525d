//! Delete command implementation.
//!
//! Removes todos from the local collection after confirmation.

use todolist_core::Repository;

use super::{confirm_operation, CommandContext, CommandError, ConfirmResult, Result};

/// Options for the delete command.
#[derive(Debug)]
pub struct DeleteOptions {
    /// Todo IDs.
    pub ids: Vec<u64>,
    /// Skip confirmation prompt.
    pub force: bool,
}

/// Result of deleting a single todo.
#[derive(Debug)]
pub struct DeleteResult {
    /// The todo ID.
    pub id: u64,
    /// The todo title, empty when the id was unknown.
    pub title: String,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error message if failed.
    pub error: Option<String>,
}

/// Executes the delete command.
///
/// All ids are resolved before anything is deleted, so an unknown id aborts
/// the whole operation.
///
/// # Errors
///
/// Returns an error if an id is unknown, confirmation is impossible, or the
/// data file cannot be saved.
pub fn execute(ctx: &CommandContext, opts: &DeleteOptions, repo: &mut Repository) -> Result<()> {
    let mut resolved: Vec<(String, String)> = Vec::new();
    for &id in &opts.ids {
        let todo = repo.todo(id)?;
        resolved.push((todo.id.to_string(), todo.title.clone()));
    }

    match confirm_operation("delete", &resolved, opts.force, ctx.quiet)? {
        ConfirmResult::Confirmed => {}
        ConfirmResult::Aborted => {
            if !ctx.quiet {
                eprintln!("Aborted.");
            }
            return Ok(());
        }
    }

    let results = delete_all(repo, &opts.ids);
    let success_count = results.iter().filter(|r| r.success).count();
    let error_count = results.len() - success_count;

    if ctx.json_output {
        let output = format_delete_results_json(&results)?;
        println!("{output}");
    } else if !ctx.quiet {
        for result in &results {
            if result.success {
                println!("Deleted: {} ({})", result.title, result.id);
            } else if let Some(ref err) = result.error {
                eprintln!("Failed to delete {}: {}", result.id, err);
            }
        }

        if ctx.verbose && results.len() > 1 {
            println!("\n{success_count} deleted, {error_count} failed");
        }
    }

    if error_count > 0 && success_count == 0 {
        return Err(CommandError::Config(format!(
            "failed to delete {error_count} todo(s)"
        )));
    }

    Ok(())
}

fn delete_all(repo: &mut Repository, ids: &[u64]) -> Vec<DeleteResult> {
    ids.iter()
        .map(|&id| match repo.delete_todo(id) {
            Ok(todo) => DeleteResult {
                id,
                title: todo.title,
                success: true,
                error: None,
            },
            Err(e) => DeleteResult {
                id,
                title: String::new(),
                success: false,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

/// Formats delete results as JSON.
fn format_delete_results_json(results: &[DeleteResult]) -> Result<String> {
    use serde::Serialize;

    #[derive(Serialize)]
    struct DeleteOutput<'a> {
        deleted: Vec<DeletedTodoOutput<'a>>,
        failed: Vec<FailedTodoOutput<'a>>,
        total_deleted: usize,
        total_failed: usize,
    }

    #[derive(Serialize)]
    struct DeletedTodoOutput<'a> {
        id: u64,
        title: &'a str,
    }

    #[derive(Serialize)]
    struct FailedTodoOutput<'a> {
        id: u64,
        error: Option<&'a str>,
    }

    let deleted: Vec<DeletedTodoOutput> = results
        .iter()
        .filter(|r| r.success)
        .map(|r| DeletedTodoOutput {
            id: r.id,
            title: &r.title,
        })
        .collect();

    let failed: Vec<FailedTodoOutput> = results
        .iter()
        .filter(|r| !r.success)
        .map(|r| FailedTodoOutput {
            id: r.id,
            error: r.error.as_deref(),
        })
        .collect();

    let output = DeleteOutput {
        total_deleted: deleted.len(),
        total_failed: failed.len(),
        deleted,
        failed,
    };

    serde_json::to_string_pretty(&output).map_err(CommandError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use todolist_core::repository::NewTodo;
    use todolist_core::CollectionStore;

    #[test]
    fn test_delete_all_repeated_id() {
        let dir = TempDir::new().unwrap();
        let mut repo =
            Repository::open(CollectionStore::with_path(dir.path().join("todos.json"))).unwrap();
        let todo = repo.create_todo(NewTodo::new("Drop staging schema")).unwrap();

        let results = delete_all(&mut repo, &[todo.id, todo.id]);

        assert!(results[0].success);
        assert_eq!(results[0].title, "Drop staging schema");
        assert!(!results[1].success);
        assert!(repo.todos().is_empty());
    }

    #[test]
    fn test_format_delete_results_json() {
        let results = vec![
            DeleteResult {
                id: 3,
                title: "Todo 3".to_string(),
                success: true,
                error: None,
            },
            DeleteResult {
                id: 4,
                title: String::new(),
                success: false,
                error: Some("todo '4' not found.".to_string()),
            },
        ];

        let json = format_delete_results_json(&results).unwrap();
        assert!(json.contains("\"total_deleted\": 1"));
        assert!(json.contains("\"total_failed\": 1"));
        assert!(json.contains("Todo 3"));
        assert!(json.contains("todo '4' not found."));
    }

    #[test]
    fn test_execute_unknown_id_deletes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut repo =
            Repository::open(CollectionStore::with_path(dir.path().join("todos.json"))).unwrap();
        let todo = repo.create_todo(NewTodo::new("Keep me")).unwrap();
        let ctx = CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            verbose: false,
            list_limit: 50,
            data_path: None,
        };
        let opts = DeleteOptions {
            ids: vec![todo.id, 42],
            force: true,
        };

        assert!(execute(&ctx, &opts, &mut repo).is_err());
        assert_eq!(repo.todos().len(), 1);
    }
}
