use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;
use todolist_model::models::{Priority, Status, DEFAULT_TAG_COLOR};
use todolist_model::timestamp::parse_timestamp;

use super::*;

// ==================== Test Helpers ====================

fn open_temp() -> (TempDir, Repository) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let store = CollectionStore::with_path(dir.path().join("todolist.json"));
    let repo = Repository::open(store).expect("failed to open repository");
    (dir, repo)
}

fn reopen(repo: &Repository) -> Repository {
    Repository::open(repo.store().clone()).expect("failed to reopen repository")
}

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

// ==================== Create ====================

#[test]
fn test_create_todo_defaults() {
    let (_dir, mut repo) = open_temp();
    let todo = repo.create_todo(NewTodo::new("  Buy milk  ")).unwrap();

    assert_eq!(todo.id, 1);
    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.priority, Priority::Low);
    assert_eq!(todo.status, Status::Pending);
    assert!(todo.completed_at.is_none());
    assert!(todo.created_at.is_some());
    assert_eq!(todo.created_at, todo.updated_at);
}

#[test]
fn test_create_todo_rejects_blank_title() {
    let (_dir, mut repo) = open_temp();
    let err = repo.create_todo(NewTodo::new("   ")).unwrap_err();

    assert!(matches!(err, RepositoryError::Validation(_)));
    assert!(repo.todos().is_empty());
}

#[test]
fn test_create_completed_todo_gets_completion_time() {
    let (_dir, mut repo) = open_temp();
    let todo = repo
        .create_todo(NewTodo::new("done").with_status(Status::Completed))
        .unwrap();

    assert!(todo.is_completed());
    assert!(todo.completed_at_time().is_some());
}

#[test]
fn test_create_open_todo_drops_completion_time() {
    let (_dir, mut repo) = open_temp();
    let todo = repo
        .create_todo(
            NewTodo::new("open")
                .with_status(Status::InProgress)
                .with_completed_at(at(2025, 9, 1, 18)),
        )
        .unwrap();

    assert!(todo.completed_at.is_none());
}

#[test]
fn test_create_todo_normalizes_and_creates_tags() {
    let (_dir, mut repo) = open_temp();
    repo.create_tag("work", None).unwrap();

    let todo = repo
        .create_todo(NewTodo::new("x").with_tags([" work ", "", "infra", "work"]))
        .unwrap();

    assert_eq!(todo.tags, vec!["work".to_string(), "infra".to_string()]);
    let names: Vec<&str> = repo.tags().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["infra", "work"]);
}

#[test]
fn test_create_persists_immediately() {
    let (_dir, mut repo) = open_temp();
    let todo = repo
        .create_todo(
            NewTodo::new("persist me")
                .with_description("details")
                .with_priority(Priority::High)
                .with_image_paths(["img/a.png"]),
        )
        .unwrap();

    let reopened = reopen(&repo);
    assert_eq!(reopened.todo(todo.id).unwrap(), &todo);
}

// ==================== Update ====================

#[test]
fn test_update_only_changes_supplied_fields() {
    let (_dir, mut repo) = open_temp();
    let todo = repo
        .create_todo(
            NewTodo::new("original")
                .with_description("keep me")
                .with_priority(Priority::Medium)
                .with_tags(["home"]),
        )
        .unwrap();

    let updated = repo
        .update_todo(
            todo.id,
            TodoPatch {
                priority: Some(Priority::High),
                ..TodoPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.title, "original");
    assert_eq!(updated.description.as_deref(), Some("keep me"));
    assert_eq!(updated.tags, vec!["home".to_string()]);
    assert_eq!(updated.status, Status::Pending);
}

#[test]
fn test_update_clears_description() {
    let (_dir, mut repo) = open_temp();
    let todo = repo
        .create_todo(NewTodo::new("x").with_description("old"))
        .unwrap();

    let updated = repo
        .update_todo(
            todo.id,
            TodoPatch {
                description: Some(None),
                ..TodoPatch::default()
            },
        )
        .unwrap();
    assert!(updated.description.is_none());
}

#[test]
fn test_update_rejects_blank_title_without_changes() {
    let (_dir, mut repo) = open_temp();
    let todo = repo.create_todo(NewTodo::new("keep")).unwrap();

    let err = repo
        .update_todo(
            todo.id,
            TodoPatch {
                title: Some(" ".to_string()),
                priority: Some(Priority::High),
                ..TodoPatch::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Validation(_)));
    assert_eq!(repo.todo(todo.id).unwrap().priority, Priority::Low);
}

#[test]
fn test_update_unknown_todo() {
    let (_dir, mut repo) = open_temp();
    let err = repo
        .update_todo(
            99,
            TodoPatch {
                tags: Some(vec!["ghost".to_string()]),
                ..TodoPatch::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound { resource_type: "todo", .. }));
    assert!(repo.tags().is_empty());
}

#[test]
fn test_completed_at_only_patch_on_completed_todo() {
    let (_dir, mut repo) = open_temp();
    let todo = repo
        .create_todo(NewTodo::new("x").with_status(Status::Completed))
        .unwrap();

    let updated = repo
        .update_todo(
            todo.id,
            TodoPatch {
                completed_at: Some(at(2025, 8, 30, 18)),
                ..TodoPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.completed_at.as_deref(), Some("2025-08-30 18:00:00"));
}

#[test]
fn test_completed_at_only_patch_on_open_todo_is_ignored() {
    let (_dir, mut repo) = open_temp();
    let todo = repo.create_todo(NewTodo::new("x")).unwrap();

    let updated = repo
        .update_todo(
            todo.id,
            TodoPatch {
                completed_at: Some(at(2025, 8, 30, 18)),
                ..TodoPatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.status, Status::Pending);
    assert!(updated.completed_at.is_none());
}

// ==================== Status ====================

#[test]
fn test_set_status_round_trip_keeps_invariant() {
    let (_dir, mut repo) = open_temp();
    let todo = repo.create_todo(NewTodo::new("x")).unwrap();

    let done = repo
        .set_status(todo.id, Status::Completed, Some(at(2025, 9, 2, 18)))
        .unwrap();
    assert_eq!(done.completed_at.as_deref(), Some("2025-09-02 18:00:00"));

    let reopened = repo.set_status(todo.id, Status::Pending, None).unwrap();
    assert!(reopened.completed_at.is_none());

    let cancelled = repo.set_status(todo.id, Status::Cancelled, None).unwrap();
    assert_eq!(cancelled.status, Status::Cancelled);
    assert!(cancelled.completed_at.is_none());
}

#[test]
fn test_set_status_refreshes_updated_at() {
    let (_dir, mut repo) = open_temp();
    let todo = repo
        .create_todo(NewTodo::new("x").with_created_at(at(2020, 1, 1, 9)))
        .unwrap();

    let updated = repo.set_status(todo.id, Status::InProgress, None).unwrap();
    assert_eq!(updated.created_at.as_deref(), Some("2020-01-01 09:00:00"));
    let stamp = parse_timestamp(updated.updated_at.as_deref().unwrap()).unwrap();
    assert!(stamp > at(2020, 1, 1, 9));
}

// ==================== Delete ====================

#[test]
fn test_delete_todo_does_not_reuse_id() {
    let (_dir, mut repo) = open_temp();
    let first = repo.create_todo(NewTodo::new("a")).unwrap();
    repo.delete_todo(first.id).unwrap();

    let second = repo.create_todo(NewTodo::new("b")).unwrap();
    assert_eq!(second.id, first.id + 1);
    assert!(repo.todo(first.id).is_err());
    assert_eq!(reopen(&repo).todos().len(), 1);
}

#[test]
fn test_delete_unknown_todo() {
    let (_dir, mut repo) = open_temp();
    assert!(matches!(
        repo.delete_todo(5),
        Err(RepositoryError::NotFound { .. })
    ));
}

// ==================== Tags ====================

#[test]
fn test_create_tag_trims_and_defaults_color() {
    let (_dir, mut repo) = open_temp();
    let tag = repo.create_tag("  urgent ", None).unwrap();

    assert_eq!(tag.name, "urgent");
    assert_eq!(tag.color, DEFAULT_TAG_COLOR);
    assert!(tag.created_at.is_some());
}

#[test]
fn test_create_tag_returns_existing() {
    let (_dir, mut repo) = open_temp();
    let first = repo.create_tag("work", Some("#ff0000".to_string())).unwrap();
    let second = repo.create_tag("work ", Some("#00ff00".to_string())).unwrap();

    assert_eq!(first, second);
    assert_eq!(repo.tags().len(), 1);
}

#[test]
fn test_create_tag_rejects_blank() {
    let (_dir, mut repo) = open_temp();
    assert!(matches!(
        repo.create_tag(" ", None),
        Err(RepositoryError::Validation(_))
    ));
}

#[test]
fn test_update_tag_rejects_duplicate_name() {
    let (_dir, mut repo) = open_temp();
    repo.create_tag("work", None).unwrap();
    let home = repo.create_tag("home", None).unwrap();

    let err = repo
        .update_tag(
            home.id,
            TagPatch {
                name: Some("work".to_string()),
                ..TagPatch::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Validation(_)));
    assert_eq!(err.to_string(), "tag name 'work' is already in use");
}

#[test]
fn test_update_tag_same_name_is_allowed() {
    let (_dir, mut repo) = open_temp();
    let tag = repo.create_tag("work", None).unwrap();

    let updated = repo
        .update_tag(
            tag.id,
            TagPatch {
                name: Some("work".to_string()),
                color: Some("#123456".to_string()),
            },
        )
        .unwrap();
    assert_eq!(updated.color, "#123456");
}

#[test]
fn test_rename_and_delete_tag_leave_todos_alone() {
    let (_dir, mut repo) = open_temp();
    let todo = repo
        .create_todo(NewTodo::new("x").with_tags(["work"]))
        .unwrap();
    let tag = repo.resolve_tag("work").unwrap().clone();

    repo.update_tag(
        tag.id,
        TagPatch {
            name: Some("job".to_string()),
            ..TagPatch::default()
        },
    )
    .unwrap();
    assert_eq!(repo.todo(todo.id).unwrap().tags, vec!["work".to_string()]);

    repo.delete_tag(tag.id).unwrap();
    assert!(repo.tags().is_empty());
    assert_eq!(repo.todo(todo.id).unwrap().tags, vec!["work".to_string()]);
}

#[test]
fn test_resolve_tag_case_insensitive_and_by_id() {
    let (_dir, mut repo) = open_temp();
    let tag = repo.create_tag("Work", None).unwrap();

    assert_eq!(repo.resolve_tag("work").unwrap().id, tag.id);
    assert_eq!(repo.resolve_tag(&tag.id.to_string()).unwrap().id, tag.id);
}

#[test]
fn test_resolve_tag_suggests_similar_name() {
    let (_dir, mut repo) = open_temp();
    repo.create_tag("support", None).unwrap();

    let err = repo.resolve_tag("suport").unwrap_err();
    assert_eq!(
        err.to_string(),
        "tag 'suport' not found. Did you mean 'support'?"
    );
}

// ==================== Import & Summary ====================

#[test]
fn test_import_markdown() {
    let (_dir, mut repo) = open_temp();
    repo.create_tag("infra", None).unwrap();

    let text = "\
## Sprint
- [x] Deploy gateway #infra ⏫ ➕ 2025-08-29 ✅ 2025-08-30
- [x] Write notes #docs ➕ 2025-08-28
- [/] Tune queries #db 🔽 ;; slow report page
- [ ] ⏫
";
    let report = repo.import_markdown(text).unwrap();

    assert_eq!(report.imported_count(), 3);
    assert_eq!(report.skipped_count(), 2);
    assert_eq!(report.tags_created, 2);

    let deploy = repo.todo(report.imported[0]).unwrap();
    assert_eq!(deploy.priority, Priority::High);
    assert_eq!(deploy.created_at.as_deref(), Some("2025-08-29 09:00:00"));
    assert_eq!(deploy.completed_at.as_deref(), Some("2025-08-30 18:00:00"));

    // Falls back to the creation time
    let notes = repo.todo(report.imported[1]).unwrap();
    assert_eq!(notes.completed_at.as_deref(), Some("2025-08-28 09:00:00"));

    let tune = repo.todo(report.imported[2]).unwrap();
    assert_eq!(tune.status, Status::InProgress);
    assert_eq!(tune.priority, Priority::Low);
    assert!(tune.completed_at.is_none());
    assert_eq!(tune.description.as_deref(), Some("slow report page"));

    assert_eq!(reopen(&repo).todos().len(), 3);
}

#[test]
fn test_import_nothing_does_not_create_file() {
    let (_dir, mut repo) = open_temp();
    let report = repo.import_markdown("just prose\n").unwrap();

    assert!(report.imported.is_empty());
    assert!(!repo.store().exists());
}

#[test]
fn test_query_and_summary_see_current_state() {
    let (_dir, mut repo) = open_temp();
    repo.create_todo(NewTodo::new("a").with_priority(Priority::High))
        .unwrap();
    let b = repo.create_todo(NewTodo::new("b")).unwrap();
    repo.set_status(b.id, Status::Completed, None).unwrap();

    let open: Vec<&str> = repo
        .query(&QueryCriteria::new())
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(open, vec!["a"]);

    let summary = repo.summary();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.completion_rate, 50);
}

#[tokio::test]
async fn test_open_async_reads_saved_state() {
    let (_dir, mut repo) = open_temp();
    repo.create_todo(NewTodo::new("async")).unwrap();

    let reopened = Repository::open_async(repo.store().clone()).await.unwrap();
    assert_eq!(reopened.todos().len(), 1);
    assert_eq!(reopened.todos()[0].title, "async");
}
