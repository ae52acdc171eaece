use serde::Serialize;

use crate::model::todo::{ListKey, Todo};
use crate::ops::filter::{SortBy, TodoFilter};
use crate::ops::store::StoreEvent;
use crate::util::unicode::truncate_to_width;

/// Descriptions are clipped to this many terminal cells in text output
pub const DESCRIPTION_WIDTH: usize = 48;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJson<'a> {
    pub list: ListKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    /// Size of the list before filtering
    pub total: usize,
    pub todos: &'a [Todo],
}

pub fn list_to_json<'a>(
    list: ListKey,
    filter: &'a TodoFilter,
    total: usize,
    todos: &'a [Todo],
) -> ListJson<'a> {
    ListJson {
        list,
        search: filter.search.as_ref().map(|q| q.as_str()),
        sort_by: filter.sort_by,
        total,
        todos,
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One line per todo: checkbox, short id, clipped description, then the
/// conclusion or due date if there is one.
pub fn format_todo(todo: &Todo) -> String {
    let check = if todo.completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{} {}  {}",
        check,
        todo.id.short(),
        truncate_to_width(&todo.description, DESCRIPTION_WIDTH)
    );
    if let Some(at) = todo.concluded_at {
        line.push_str(&format!("  (done {})", at.format("%Y-%m-%d")));
    } else if let Some(due) = todo.due_at {
        line.push_str(&format!("  (due {})", due.format("%Y-%m-%d")));
    }
    line
}

/// A list header followed by the visible todos, indented.
pub fn format_list(list: ListKey, todos: &[Todo], total: usize) -> String {
    let mut lines = vec![format!("{}: {} of {}", list, todos.len(), total)];
    if todos.is_empty() {
        lines.push("  (nothing to show)".to_string());
    }
    lines.extend(todos.iter().map(|todo| format!("  {}", format_todo(todo))));
    lines.join("\n")
}

pub fn format_sorts() -> String {
    SortBy::ALL
        .iter()
        .map(|sort| sort.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shell feedback for a change the store reported
pub fn describe_event(event: &StoreEvent) -> String {
    match event {
        StoreEvent::Added(id) => format!("added {}", id.short()),
        StoreEvent::Removed { list, id } => format!("removed {} from {}", id.short(), list),
        StoreEvent::Completed(id) => format!("completed {}", id.short()),
        StoreEvent::Uncompleted(id) => format!("reopened {}", id.short()),
    }
}
