use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque todo identifier.
///
/// Fresh ids are random UUID v4 strings; uniqueness rests on v4 collision
/// odds and is not checked against existing items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Generate a new random id
    pub fn generate() -> Self {
        TodoId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, enough to tell seed-sized lists apart
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        TodoId(value.to_string())
    }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self {
        TodoId(value)
    }
}

impl PartialEq<str> for TodoId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which of the two store collections an item lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ListKey {
    Completed,
    Uncompleted,
}

impl ListKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ListKey::Completed => "completed",
            ListKey::Uncompleted => "uncompleted",
        }
    }

    /// Parse a list name, accepting a few short aliases
    pub fn parse(s: &str) -> Option<ListKey> {
        match s {
            "completed" | "done" => Some(ListKey::Completed),
            "uncompleted" | "todo" | "open" => Some(ListKey::Uncompleted),
            _ => None,
        }
    }
}

impl std::fmt::Display for ListKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    /// Mirrors which list the item is in
    pub completed: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Set iff `completed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concluded_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Create an open todo with a fresh id
    pub fn new(description: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Todo {
            id: TodoId::generate(),
            completed: false,
            description: description.into(),
            due_at: None,
            created_at,
            concluded_at: None,
        }
    }

    pub fn with_due(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Mark concluded at `at`, keeping an existing timestamp if one is set
    pub(crate) fn conclude(&mut self, at: DateTime<Utc>) {
        self.completed = true;
        self.concluded_at.get_or_insert(at);
    }

    pub(crate) fn reopen(&mut self) {
        self.completed = false;
        self.concluded_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn generated_ids_differ() {
        let a = TodoId::generate();
        let b = TodoId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
        assert_eq!(a.short().len(), 8);
    }

    #[test]
    fn short_id_of_short_string() {
        assert_eq!(TodoId::from("abc").short(), "abc");
    }

    #[test]
    fn list_key_aliases() {
        assert_eq!(ListKey::parse("done"), Some(ListKey::Completed));
        assert_eq!(ListKey::parse("todo"), Some(ListKey::Uncompleted));
        assert_eq!(ListKey::parse("uncompleted"), Some(ListKey::Uncompleted));
        assert_eq!(ListKey::parse("nope"), None);
        assert_eq!(ListKey::Completed.to_string(), "completed");
    }

    #[test]
    fn conclude_and_reopen_keep_invariant() {
        let t0 = Utc.with_ymd_and_hms(2023, 7, 1, 9, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2023, 7, 2, 9, 0, 0).unwrap();
        let mut todo = Todo::new("water plants", t0);
        todo.conclude(t1);
        assert!(todo.completed);
        assert_eq!(todo.concluded_at, Some(t1));
        todo.reopen();
        assert!(!todo.completed);
        assert_eq!(todo.concluded_at, None);
        assert_eq!(todo.created_at, t0);
    }

    #[test]
    fn serializes_camel_case() {
        let t0 = Utc.with_ymd_and_hms(2023, 7, 1, 9, 0, 0).unwrap();
        let mut todo = Todo::new("x", t0);
        todo.id = TodoId::from("fixed");
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "fixed");
        assert_eq!(json["createdAt"], "2023-07-01T09:00:00Z");
        assert!(json.get("dueAt").is_none());
        assert!(json.get("concludedAt").is_none());
    }
}
