use chrono::{DateTime, Utc};

use crate::model::todo::{ListKey, Todo, TodoId};

/// A change the store has just applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added(TodoId),
    Removed { list: ListKey, id: TodoId },
    Completed(TodoId),
    Uncompleted(TodoId),
}

/// Handle returned by [`TodoStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&StoreEvent)>;

/// Owner of the completed and uncompleted lists.
///
/// Every mutation bumps the revision of each list it touched and then tells
/// subscribed observers what happened. Lookups by a missing id are no-ops.
pub struct TodoStore {
    completed: Vec<Todo>,
    uncompleted: Vec<Todo>,
    completed_rev: u64,
    uncompleted_rev: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    clock: fn() -> DateTime<Utc>,
}

impl Default for TodoStore {
    fn default() -> Self {
        TodoStore::new()
    }
}

impl std::fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("completed", &self.completed)
            .field("uncompleted", &self.uncompleted)
            .field("completed_rev", &self.completed_rev)
            .field("uncompleted_rev", &self.uncompleted_rev)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        TodoStore {
            completed: Vec::new(),
            uncompleted: Vec::new(),
            completed_rev: 0,
            uncompleted_rev: 0,
            observers: Vec::new(),
            next_subscription: 0,
            clock: Utc::now,
        }
    }

    /// Build a store from fixture lists.
    ///
    /// Each item's `completed` flag is forced to match its list, and completed
    /// items without a `concluded_at` are stamped with the current time.
    pub fn from_lists(completed: Vec<Todo>, uncompleted: Vec<Todo>) -> Self {
        let mut store = TodoStore::new();
        let now = store.now();
        store.completed = completed
            .into_iter()
            .map(|mut todo| {
                todo.conclude(now);
                todo
            })
            .collect();
        store.uncompleted = uncompleted
            .into_iter()
            .map(|mut todo| {
                todo.reopen();
                todo
            })
            .collect();
        store
    }

    /// Use `clock` instead of the system time for new timestamps
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn list(&self, key: ListKey) -> &[Todo] {
        match key {
            ListKey::Completed => &self.completed,
            ListKey::Uncompleted => &self.uncompleted,
        }
    }

    pub fn completed(&self) -> &[Todo] {
        &self.completed
    }

    pub fn uncompleted(&self) -> &[Todo] {
        &self.uncompleted
    }

    pub fn get(&self, key: ListKey, id: &str) -> Option<&Todo> {
        self.list(key).iter().find(|todo| todo.id == *id)
    }

    /// Total number of items across both lists
    pub fn len(&self) -> usize {
        self.completed.len() + self.uncompleted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counter bumped on every change to the given list
    pub fn revision(&self, key: ListKey) -> u64 {
        match key {
            ListKey::Completed => self.completed_rev,
            ListKey::Uncompleted => self.uncompleted_rev,
        }
    }

    /// Resolve an id or a unique id prefix within one list.
    pub fn resolve_prefix(&self, key: ListKey, prefix: &str) -> Option<TodoId> {
        if prefix.is_empty() {
            return None;
        }
        if let Some(todo) = self.get(key, prefix) {
            return Some(todo.id.clone());
        }
        let mut candidates = self
            .list(key)
            .iter()
            .filter(|todo| todo.id.as_str().starts_with(prefix));
        match (candidates.next(), candidates.next()) {
            (Some(todo), None) => Some(todo.id.clone()),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append a new open todo. Returns its id.
    pub fn add(&mut self, description: impl Into<String>) -> TodoId {
        let todo = Todo::new(description, self.now());
        let id = todo.id.clone();
        tracing::debug!(id = %id, "adding todo");
        self.uncompleted.push(todo);
        self.touch(ListKey::Uncompleted);
        self.notify(StoreEvent::Added(id.clone()));
        id
    }

    /// Take an item out of `list`. Returns `None` if it isn't there.
    pub fn remove(&mut self, list: ListKey, id: &str) -> Option<Todo> {
        let todo = self.take(list, id)?;
        tracing::debug!(%list, id = %todo.id, "removed todo");
        self.notify(StoreEvent::Removed {
            list,
            id: todo.id.clone(),
        });
        Some(todo)
    }

    /// Move an open item to the completed list, stamping `concluded_at`.
    /// Returns whether anything moved.
    pub fn complete(&mut self, id: &str) -> bool {
        let Some(mut todo) = self.take(ListKey::Uncompleted, id) else {
            return false;
        };
        todo.conclude(self.now());
        let id = todo.id.clone();
        tracing::debug!(id = %id, "completed todo");
        self.completed.push(todo);
        self.touch(ListKey::Completed);
        self.notify(StoreEvent::Completed(id));
        true
    }

    /// Move a completed item back to the open list, clearing `concluded_at`.
    /// Returns whether anything moved.
    pub fn uncomplete(&mut self, id: &str) -> bool {
        let Some(mut todo) = self.take(ListKey::Completed, id) else {
            return false;
        };
        todo.reopen();
        let id = todo.id.clone();
        tracing::debug!(id = %id, "uncompleted todo");
        self.uncompleted.push(todo);
        self.touch(ListKey::Uncompleted);
        self.notify(StoreEvent::Uncompleted(id));
        true
    }

    fn take(&mut self, list: ListKey, id: &str) -> Option<Todo> {
        let items = match list {
            ListKey::Completed => &mut self.completed,
            ListKey::Uncompleted => &mut self.uncompleted,
        };
        let index = items.iter().position(|todo| todo.id == *id)?;
        let todo = items.remove(index);
        self.touch(list);
        Some(todo)
    }

    fn touch(&mut self, list: ListKey) {
        match list {
            ListKey::Completed => self.completed_rev += 1,
            ListKey::Uncompleted => self.uncompleted_rev += 1,
        }
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Register a callback run after every applied change
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drop a callback. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }

    fn notify(&mut self, event: StoreEvent) {
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }
}
