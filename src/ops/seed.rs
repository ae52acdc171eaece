use chrono::{DateTime, TimeZone, Utc};

use crate::model::todo::Todo;
use crate::ops::store::TodoStore;

const FILLER: &str = "Nulla duis fugiat aute non veniam aliquip laboris dolore consequat velit do ad.";

/// Number of items in each fixture group: (completed, due-dated, undated)
pub const SEED_SIZES: (usize, usize, usize) = (5, 7, 3);

/// Build the fixture store loaded on start.
///
/// - five completed items created `now`
/// - seven open items with due dates: even positions due on 2023-08-(n), the
///   rest due `now`
/// - three open items without due dates, created 2023-07-01 through 07-03
pub fn seed_store(now: DateTime<Utc>) -> TodoStore {
    let (done_count, dated_count, undated_count) = SEED_SIZES;

    let completed = (1..=done_count)
        .map(|n| fixture(n, None, now))
        .collect();

    let mut uncompleted: Vec<Todo> = (1..=dated_count)
        .map(|n| {
            let due = if n % 2 == 0 {
                august_2023(n).unwrap_or(now)
            } else {
                now
            };
            fixture(n, Some(due), now)
        })
        .collect();
    uncompleted.extend((1..=undated_count).map(|n| {
        let created = july_2023(n).unwrap_or(now);
        fixture(n, None, created)
    }));

    tracing::debug!(
        completed = done_count,
        uncompleted = uncompleted.len(),
        "seeded store"
    );
    TodoStore::from_lists(completed, uncompleted)
}

/// `DUE(n) <date> …` for dated items, `NDA(n) <date> …` otherwise.
fn fixture(n: usize, due_at: Option<DateTime<Utc>>, created_at: DateTime<Utc>) -> Todo {
    let (tag, date) = match due_at {
        Some(due) => ("DUE", due),
        None => ("NDA", created_at),
    };
    let description = format!("{}({}) {} {}", tag, n, date.format("%Y-%m-%d"), FILLER);
    let todo = Todo::new(description, created_at);
    match due_at {
        Some(due) => todo.with_due(due),
        None => todo,
    }
}

fn august_2023(day: usize) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2023, 8, u32::try_from(day).ok()?, 0, 0, 0)
        .single()
}

fn july_2023(day: usize) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2023, 7, u32::try_from(day).ok()?, 0, 0, 0)
        .single()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::todo::ListKey;
    use crate::ops::filter::{SortBy, TodoFilter, apply_filter};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_seed_sizes() {
        let store = seed_store(now());
        assert_eq!(store.completed().len(), 5);
        assert_eq!(store.uncompleted().len(), 10);
    }

    #[test]
    fn test_seed_respects_invariants() {
        let store = seed_store(now());
        assert!(store.completed().iter().all(|t| t.completed && t.concluded_at.is_some()));
        assert!(
            store
                .uncompleted()
                .iter()
                .all(|t| !t.completed && t.concluded_at.is_none())
        );
    }

    #[test]
    fn test_seed_due_dates_alternate() {
        let store = seed_store(now());
        let dated: Vec<_> = store.uncompleted()[..7].iter().map(|t| t.due_at).collect();
        assert_eq!(dated[0], Some(now()));
        assert_eq!(dated[1], august_2023(2));
        assert_eq!(dated[3], august_2023(4));
        assert!(store.uncompleted()[7..].iter().all(|t| t.due_at.is_none()));
        assert!(store.uncompleted()[1].description.starts_with("DUE(2) 2023-08-02 Nulla"));
        assert!(store.uncompleted()[7].description.starts_with("NDA(1) 2023-07-01 Nulla"));
    }

    #[test]
    fn test_seed_ids_unique() {
        let store = seed_store(now());
        let mut ids: Vec<_> = store
            .completed()
            .iter()
            .chain(store.uncompleted())
            .map(|t| t.id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn test_recent_sort_over_seed() {
        let store = seed_store(now());
        let filter = TodoFilter::new().with_sort_by(SortBy::Recent);
        let sorted = apply_filter(store.list(ListKey::Uncompleted), &filter);
        let heads: Vec<&str> = sorted.iter().map(|t| &t.description[..6]).collect();
        assert_eq!(
            heads,
            vec![
                "NDA(1)", "NDA(2)", "NDA(3)", // undated, oldest first
                "DUE(2)", "DUE(4)", "DUE(6)", // due in 2023
                "DUE(1)", "DUE(3)", "DUE(5)", "DUE(7)", // due now, source order
            ]
        );
    }
}
