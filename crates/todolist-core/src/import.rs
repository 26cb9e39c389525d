//! Markdown checklist import.
//!
//! Parses task lines in the common "checklist with emoji markers" format:
//!
//! ```text
//! - [x] Deploy gateway #infra ⏫ ➕ 2025-08-29 ;; rolled out in two waves ✅ 2025-08-30
//! ```
//!
//! Markers and tags count wherever they appear, including after `;;`.
//!
//! | element | meaning |
//! |---------|---------|
//! | `[ ]` `[/]` `[x]` `[-]` | pending, in progress, completed, cancelled |
//! | `#name` | tag |
//! | `⏫` `🔺` `🔼` / `🔽` `⏬` | high / low priority (medium otherwise) |
//! | `➕ date` | created on that day (09:00) |
//! | `✅ date` | completed on that day (18:00), completed tasks only |
//! | `📅` `🛫` `❌` + date | recognized and dropped |
//! | `;; text` | description, with markers and tags removed |

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use todolist_model::models::{Priority, Status};

const HIGH_MARKERS: &[char] = &['⏫', '🔺', '🔼'];
const LOW_MARKERS: &[char] = &['🔽', '⏬'];
const CREATED_MARKER: char = '➕';
const COMPLETED_MARKER: char = '✅';
const OTHER_DATE_MARKERS: &[char] = &['📅', '🛫', '❌'];
const VARIATION_SELECTOR: char = '\u{FE0F}';
const NOTE_SEPARATOR: &str = ";;";

/// Time of day assigned to imported creation dates.
const CREATED_TIME: (u32, u32, u32) = (9, 0, 0);

/// Time of day assigned to imported completion dates.
const COMPLETED_TIME: (u32, u32, u32) = (18, 0, 0);

/// A todo parsed from one checklist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedTodo {
    /// Title with all markers removed.
    pub title: String,
    /// Text after `;;`, without markers, marked dates or tags.
    pub description: Option<String>,
    /// Status from the checkbox.
    pub status: Status,
    /// Priority from the emoji markers.
    pub priority: Priority,
    /// Tags in order of appearance.
    pub tags: Vec<String>,
    /// Creation time from `➕ date`.
    pub created_at: Option<NaiveDateTime>,
    /// Completion time from `✅ date`. Only set for completed todos.
    pub completed_at: Option<NaiveDateTime>,
}

/// A line that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_number: usize,
    /// The original line.
    pub text: String,
}

/// Result of parsing a checklist document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Todos in document order.
    pub todos: Vec<ImportedTodo>,
    /// Non-blank lines that did not yield a todo.
    pub skipped: Vec<SkippedLine>,
}

/// Outcome of importing a document into a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Ids of the created todos, in document order.
    pub imported: Vec<u64>,
    /// Lines that were not imported.
    pub skipped: Vec<SkippedLine>,
    /// Number of tags that did not exist before the import.
    pub tags_created: usize,
}

impl ImportReport {
    /// Number of todos created.
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }

    /// Number of lines skipped.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Which date a following date token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateSlot {
    Created,
    Completed,
    Ignored,
}

/// Parses a whole document. Blank lines are ignored.
pub fn parse_document(text: &str) -> ParsedDocument {
    let mut parsed = ParsedDocument::default();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(todo) => parsed.todos.push(todo),
            None => parsed.skipped.push(SkippedLine {
                line_number: index + 1,
                text: line.to_string(),
            }),
        }
    }

    parsed
}

/// Parses one checklist line.
///
/// Returns `None` if the line is not a checklist item or its title is empty
/// once markers are removed.
///
/// # Example
///
/// ```
/// use todolist_core::import::parse_line;
/// use todolist_model::models::{Priority, Status};
///
/// let todo = parse_line("- [/] Upgrade runner #ci 🔺 ;; after the freeze").unwrap();
/// assert_eq!(todo.title, "Upgrade runner");
/// assert_eq!(todo.status, Status::InProgress);
/// assert_eq!(todo.priority, Priority::High);
/// assert_eq!(todo.tags, vec!["ci".to_string()]);
/// assert_eq!(todo.description.as_deref(), Some("after the freeze"));
/// ```
pub fn parse_line(line: &str) -> Option<ImportedTodo> {
    let (status, body) = strip_checkbox(line)?;

    let (main, note) = match body.split_once(NOTE_SEPARATOR) {
        Some((main, note)) => (main, Some(note)),
        None => (body, None),
    };

    let mut scan = LineScan::default();
    let title = scan.feed(main, Section::Title).join(" ");
    if title.is_empty() {
        return None;
    }
    let note_words = note
        .map(|note| scan.feed(note, Section::Note))
        .unwrap_or_default();
    let description = (!note_words.is_empty()).then(|| note_words.join(" "));

    let priority = if scan.high {
        Priority::High
    } else if scan.low {
        Priority::Low
    } else {
        Priority::Medium
    };

    let created_at = scan.created_day.map(|d| at(d, CREATED_TIME));
    let completed_at = match status {
        Status::Completed => scan.completed_day.map(|d| at(d, COMPLETED_TIME)),
        _ => None,
    };

    Some(ImportedTodo {
        title,
        description,
        status,
        priority,
        tags: scan.tags,
        created_at,
        completed_at,
    })
}

/// Part of a line being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Title,
    Note,
}

/// Markers collected across the whole line.
#[derive(Debug, Default)]
struct LineScan {
    tags: Vec<String>,
    high: bool,
    low: bool,
    created_day: Option<NaiveDate>,
    completed_day: Option<NaiveDate>,
}

impl LineScan {
    /// Consumes markers, tags and marked dates from `text` and returns the
    /// remaining words. Unmarked dates are dropped from the title but kept in
    /// the note. The first date seen for a marker wins.
    fn feed<'a>(&mut self, text: &'a str, section: Section) -> Vec<&'a str> {
        let mut words = Vec::new();
        let mut slot: Option<DateSlot> = None;

        for token in text.split_whitespace() {
            if let Some(tag) = token.strip_prefix('#').filter(|t| !t.is_empty()) {
                if !self.tags.iter().any(|t| t == tag) {
                    self.tags.push(tag.to_string());
                }
                continue;
            }

            for c in token.chars() {
                if HIGH_MARKERS.contains(&c) {
                    self.high = true;
                } else if LOW_MARKERS.contains(&c) {
                    self.low = true;
                } else if c == CREATED_MARKER {
                    slot = Some(DateSlot::Created);
                } else if c == COMPLETED_MARKER {
                    slot = Some(DateSlot::Completed);
                } else if OTHER_DATE_MARKERS.contains(&c) {
                    slot = Some(DateSlot::Ignored);
                }
            }

            let word = token.trim_matches(is_marker);
            if word.is_empty() {
                continue;
            }

            if let Ok(date) = NaiveDate::parse_from_str(word, "%Y-%m-%d") {
                match slot.take() {
                    Some(DateSlot::Created) => {
                        self.created_day.get_or_insert(date);
                    }
                    Some(DateSlot::Completed) => {
                        self.completed_day.get_or_insert(date);
                    }
                    Some(DateSlot::Ignored) => {}
                    None if section == Section::Note => words.push(word),
                    None => {}
                }
                continue;
            }

            slot = None;
            words.push(word);
        }

        words
    }
}

/// Splits `- [c] rest` into the status for `c` and `rest`.
fn strip_checkbox(line: &str) -> Option<(Status, &str)> {
    let rest = line.trim_start();
    let rest = rest
        .strip_prefix('-')
        .or_else(|| rest.strip_prefix('*'))?
        .trim_start();
    let rest = rest.strip_prefix('[')?;

    let mut chars = rest.chars();
    let mark = chars.next()?;
    let rest = chars.as_str().strip_prefix(']')?;

    let status = match mark {
        'x' | 'X' => Status::Completed,
        '/' => Status::InProgress,
        '-' => Status::Cancelled,
        _ => Status::Pending,
    };

    Some((status, rest))
}

fn is_marker(c: char) -> bool {
    HIGH_MARKERS.contains(&c)
        || LOW_MARKERS.contains(&c)
        || OTHER_DATE_MARKERS.contains(&c)
        || c == CREATED_MARKER
        || c == COMPLETED_MARKER
        || c == VARIATION_SELECTOR
}

fn at(date: NaiveDate, (h, m, s): (u32, u32, u32)) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(h, m, s).unwrap_or(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    // ==================== Checkbox ====================

    #[test]
    fn test_checkbox_statuses() {
        assert_eq!(parse_line("- [ ] a").unwrap().status, Status::Pending);
        assert_eq!(parse_line("- [/] a").unwrap().status, Status::InProgress);
        assert_eq!(parse_line("- [x] a").unwrap().status, Status::Completed);
        assert_eq!(parse_line("- [X] a").unwrap().status, Status::Completed);
        assert_eq!(parse_line("- [-] a").unwrap().status, Status::Cancelled);
        assert_eq!(parse_line("- [?] a").unwrap().status, Status::Pending);
    }

    #[test]
    fn test_asterisk_bullets_and_indent() {
        let todo = parse_line("    * [/] nested item").unwrap();
        assert_eq!(todo.status, Status::InProgress);
        assert_eq!(todo.title, "nested item");
    }

    #[test]
    fn test_non_checklist_lines_are_rejected() {
        assert!(parse_line("# Sprint notes").is_none());
        assert!(parse_line("plain text").is_none());
        assert!(parse_line("- no checkbox").is_none());
    }

    #[test]
    fn test_empty_title_is_rejected() {
        assert!(parse_line("- [ ] #tag ⏫ ➕ 2025-09-01").is_none());
        assert!(parse_line("- [ ]").is_none());
    }

    // ==================== Markers ====================

    #[test]
    fn test_full_line() {
        let todo = parse_line(
            "- [x] Report hunter metrics #cloud-migration ⏫ ➕ 2025-08-29 ✅ 2025-08-30",
        )
        .unwrap();

        assert_eq!(todo.title, "Report hunter metrics");
        assert_eq!(todo.status, Status::Completed);
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(todo.tags, vec!["cloud-migration".to_string()]);
        assert_eq!(todo.created_at, Some(dt(2025, 8, 29, 9)));
        assert_eq!(todo.completed_at, Some(dt(2025, 8, 30, 18)));
        assert!(todo.description.is_none());
    }

    #[test]
    fn test_priority_markers() {
        assert_eq!(parse_line("- [ ] a 🔺").unwrap().priority, Priority::High);
        assert_eq!(parse_line("- [ ] a 🔼").unwrap().priority, Priority::High);
        assert_eq!(parse_line("- [ ] a 🔽").unwrap().priority, Priority::Low);
        assert_eq!(parse_line("- [ ] a ⏬").unwrap().priority, Priority::Low);
        assert_eq!(parse_line("- [ ] a").unwrap().priority, Priority::Medium);
        // High wins when both appear
        assert_eq!(parse_line("- [ ] a 🔽 ⏫").unwrap().priority, Priority::High);
    }

    #[test]
    fn test_completion_date_ignored_for_open_tasks() {
        let todo = parse_line("- [/] a ✅ 2025-09-02").unwrap();
        assert!(todo.completed_at.is_none());
    }

    #[test]
    fn test_completed_without_date() {
        let todo = parse_line("- [x] a ➕ 2025-09-01").unwrap();
        assert_eq!(todo.created_at, Some(dt(2025, 9, 1, 9)));
        assert!(todo.completed_at.is_none());
    }

    #[test]
    fn test_other_dates_are_dropped() {
        let todo = parse_line("- [/] Regression suite 🛫 2025-08-28 📅 2025-09-06").unwrap();
        assert_eq!(todo.title, "Regression suite");
        assert!(todo.created_at.is_none());
        assert!(todo.completed_at.is_none());
    }

    #[test]
    fn test_cancel_marker_date_dropped() {
        let todo = parse_line("- [-] Restart trino ➕ 2025-09-01 ❌ 2025-09-02").unwrap();
        assert_eq!(todo.status, Status::Cancelled);
        assert_eq!(todo.created_at, Some(dt(2025, 9, 1, 9)));
        assert!(todo.completed_at.is_none());
    }

    #[test]
    fn test_marker_attached_to_date() {
        let todo = parse_line("- [x] a ➕2025-09-01 ✅2025-09-03").unwrap();
        assert_eq!(todo.created_at, Some(dt(2025, 9, 1, 9)));
        assert_eq!(todo.completed_at, Some(dt(2025, 9, 3, 18)));
    }

    #[test]
    fn test_bare_date_removed_from_title() {
        let todo = parse_line("- [ ] Review 2025-09-01 plan").unwrap();
        assert_eq!(todo.title, "Review plan");
        assert!(todo.created_at.is_none());
    }

    #[test]
    fn test_variation_selector_is_stripped() {
        let todo = parse_line("- [ ] Ship \u{2705}\u{FE0F} 2025-09-01").unwrap();
        assert_eq!(todo.title, "Ship");
    }

    // ==================== Tags & Notes ====================

    #[test]
    fn test_tags_in_any_position_deduplicated() {
        let todo = parse_line("- [ ] #ops Rotate keys #security #ops").unwrap();
        assert_eq!(todo.title, "Rotate keys");
        assert_eq!(todo.tags, vec!["ops".to_string(), "security".to_string()]);
    }

    #[test]
    fn test_lone_hash_is_title_text() {
        let todo = parse_line("- [ ] Fix bug # 12").unwrap();
        assert_eq!(todo.title, "Fix bug # 12");
        assert!(todo.tags.is_empty());
    }

    #[test]
    fn test_description_after_separator() {
        let todo = parse_line("- [/] Upgrade runner #ci ;; waiting on the 2025-09-10 freeze").unwrap();
        assert_eq!(todo.title, "Upgrade runner");
        assert_eq!(
            todo.description.as_deref(),
            Some("waiting on the 2025-09-10 freeze")
        );
    }

    #[test]
    fn test_completion_date_after_separator() {
        let todo =
            parse_line("- [x] HA config #infra ;; https://wiki.example.com/page?id=61 ✅ 2025-09-04")
                .unwrap();
        assert_eq!(todo.title, "HA config");
        assert_eq!(
            todo.description.as_deref(),
            Some("https://wiki.example.com/page?id=61")
        );
        assert_eq!(todo.completed_at, Some(dt(2025, 9, 4, 18)));
    }

    #[test]
    fn test_priority_and_created_after_separator() {
        let todo =
            parse_line("- [/] Runbook review #cloud ;; https://wiki.example.com ⏫ ➕ 2025-09-02")
                .unwrap();
        assert_eq!(todo.status, Status::InProgress);
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(todo.created_at, Some(dt(2025, 9, 2, 9)));
        assert_eq!(todo.description.as_deref(), Some("https://wiki.example.com"));
    }

    #[test]
    fn test_cancelled_note_with_trailing_markers() {
        let todo = parse_line(
            "- [-] Restart trino #oracle  ;; machine reboot fixed it ➕ 2025-09-01 ❌ 2025-09-02",
        )
        .unwrap();
        assert_eq!(todo.status, Status::Cancelled);
        assert_eq!(todo.created_at, Some(dt(2025, 9, 1, 9)));
        assert!(todo.completed_at.is_none());
        assert_eq!(todo.description.as_deref(), Some("machine reboot fixed it"));
    }

    #[test]
    fn test_note_without_space_after_separator() {
        let todo = parse_line(
            "- [x] Package arm deps ➕ 2025-09-01 #support ;;obs://bucket/python37-arm.zip ✅ 2025-09-02",
        )
        .unwrap();
        assert_eq!(todo.title, "Package arm deps");
        assert_eq!(todo.tags, vec!["support".to_string()]);
        assert_eq!(todo.created_at, Some(dt(2025, 9, 1, 9)));
        assert_eq!(todo.completed_at, Some(dt(2025, 9, 2, 18)));
        assert_eq!(
            todo.description.as_deref(),
            Some("obs://bucket/python37-arm.zip")
        );
    }

    #[test]
    fn test_tags_after_separator() {
        let todo = parse_line("- [ ] Rotate keys ;; see #security runbook").unwrap();
        assert_eq!(todo.tags, vec!["security".to_string()]);
        assert_eq!(todo.description.as_deref(), Some("see runbook"));
    }

    #[test]
    fn test_note_of_only_markers_is_none() {
        let todo = parse_line("- [x] Ship ;; ✅ 2025-09-03").unwrap();
        assert!(todo.description.is_none());
        assert_eq!(todo.completed_at, Some(dt(2025, 9, 3, 18)));
    }

    #[test]
    fn test_first_marked_date_wins() {
        let todo = parse_line("- [ ] a ➕ 2025-09-01 ;; moved ➕ 2025-09-05").unwrap();
        assert_eq!(todo.created_at, Some(dt(2025, 9, 1, 9)));
        assert_eq!(todo.description.as_deref(), Some("moved"));
    }

    #[test]
    fn test_empty_description_is_none() {
        let todo = parse_line("- [ ] a ;;   ").unwrap();
        assert!(todo.description.is_none());
    }

    // ==================== Documents ====================

    #[test]
    fn test_parse_document_counts_skipped_lines() {
        let text = "# Week 36\n\n- [ ] one\n- [x] two ✅ 2025-09-01\nnot a task\n- [ ] #only-tag\n";
        let parsed = parse_document(text);

        assert_eq!(parsed.todos.len(), 2);
        assert_eq!(
            parsed.skipped.iter().map(|s| s.line_number).collect::<Vec<_>>(),
            vec![1, 5, 6]
        );
        assert_eq!(parsed.skipped[1].text, "not a task");
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(parse_document(""), ParsedDocument::default());
        assert_eq!(parse_document("\n  \n"), ParsedDocument::default());
    }
}
