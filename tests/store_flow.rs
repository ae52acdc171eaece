use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

use todos::{
    FilteredView, ListKey, SortBy, StoreEvent, Todo, TodoFilter, TodoStore, apply_filter,
    normalize_text, pixels,
};

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 7, day, 10, 0, 0).unwrap()
}

fn descriptions(todos: &[Todo]) -> Vec<&str> {
    todos.iter().map(|t| t.description.as_str()).collect()
}

#[test]
fn add_then_remove_returns_the_added_item() {
    for description in ["", "buy milk", "Crème brûlée", "  spaced  ", "日本語"] {
        let mut store = TodoStore::new();
        let id = store.add(description);
        let added = store.get(ListKey::Uncompleted, id.as_str()).unwrap().clone();

        let removed = store.remove(ListKey::Uncompleted, id.as_str()).unwrap();
        assert_eq!(removed, added);
        assert_eq!(removed.description, description);
        assert!(!removed.completed);
        assert_eq!(removed.concluded_at, None);
        assert!(store.is_empty());
    }
}

#[test]
fn complete_then_uncomplete_round_trips() {
    let due = at(20);
    let original = Todo::new("renew passport", at(1)).with_due(due);
    let id = original.id.clone();
    let mut store = TodoStore::from_lists(Vec::new(), vec![original.clone()]);

    assert!(store.complete(id.as_str()));
    let done = store.get(ListKey::Completed, id.as_str()).unwrap();
    assert!(done.completed);
    assert!(done.concluded_at.is_some());

    assert!(store.uncomplete(id.as_str()));
    assert!(store.completed().is_empty());
    assert_eq!(store.uncompleted(), &[original]);
}

#[test]
fn missing_ids_are_silent_noops() {
    let mut store = TodoStore::new();
    store.add("only");
    let events = std::rc::Rc::new(std::cell::RefCell::new(0));
    let count = std::rc::Rc::clone(&events);
    store.subscribe(move |_| *count.borrow_mut() += 1);

    assert_eq!(store.remove(ListKey::Completed, "missing"), None);
    assert!(!store.complete("missing"));
    assert!(!store.uncomplete("missing"));
    assert_eq!(*events.borrow(), 0);
    assert_eq!(store.len(), 1);
}

#[test]
fn lists_stay_disjoint_through_moves() {
    let mut store = TodoStore::new();
    let ids: Vec<_> = (0..6).map(|i| store.add(format!("task {}", i))).collect();
    for id in ids.iter().step_by(2) {
        store.complete(id.as_str());
    }
    store.uncomplete(ids[2].as_str());

    for todo in store.completed() {
        assert!(todo.completed && todo.concluded_at.is_some());
        assert!(store.get(ListKey::Uncompleted, todo.id.as_str()).is_none());
    }
    for todo in store.uncompleted() {
        assert!(!todo.completed && todo.concluded_at.is_none());
    }
    assert_eq!(store.completed().len(), 2);
    assert_eq!(store.uncompleted().len(), 4);
}

#[test]
fn no_filter_is_identity() {
    let source = vec![Todo::new("b", at(2)), Todo::new("a", at(1))];
    let view = apply_filter(&source, &TodoFilter::new());
    assert_eq!(&*view, source.as_slice());
}

#[test]
fn search_is_diacritic_insensitive_both_ways() {
    let source = vec![
        Todo::new("Lunch at the cafe", at(1)),
        Todo::new("Coffee at the café", at(2)),
        Todo::new("Tea at home", at(3)),
    ];
    for query in ["café", "cafe", "CAFÉ"] {
        let filter = TodoFilter::new().with_search(query).unwrap();
        assert_eq!(
            descriptions(&apply_filter(&source, &filter)),
            vec!["Lunch at the cafe", "Coffee at the café"]
        );
    }
}

#[test]
fn alphabetical_sorts() {
    let source = vec![Todo::new("banana", at(1)), Todo::new("apple", at(2))];
    let az = TodoFilter::new().with_sort("A-Z").unwrap();
    let za = TodoFilter::new().with_sort("Z-A").unwrap();
    assert_eq!(descriptions(&apply_filter(&source, &az)), vec!["apple", "banana"]);
    assert_eq!(descriptions(&apply_filter(&source, &za)), vec!["banana", "apple"]);
}

#[test]
fn recent_sort_puts_undated_first() {
    let undated = Todo::new("undated", at(9));
    let dated = Todo::new("dated", at(1)).with_due(at(2));
    let filter = TodoFilter::new().with_sort_by(SortBy::Recent);
    for source in [
        vec![undated.clone(), dated.clone()],
        vec![dated.clone(), undated.clone()],
    ] {
        assert_eq!(
            descriptions(&apply_filter(&source, &filter)),
            vec!["undated", "dated"]
        );
    }
}

#[test]
fn bogus_sort_names_the_key() {
    let err = TodoFilter::new().with_sort("bogus").unwrap_err();
    assert!(err.to_string().contains("\"bogus\""));
}

#[test]
fn view_follows_store_and_observers_fire() {
    let mut store = TodoStore::new();
    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = std::rc::Rc::clone(&seen);
    store.subscribe(move |e: &StoreEvent| sink.borrow_mut().push(e.clone()));

    let mut view = FilteredView::new(
        ListKey::Uncompleted,
        TodoFilter::new().with_search("milk").unwrap(),
    );
    store.add("buy milk");
    store.add("walk dog");
    assert_eq!(descriptions(view.get(&store)), vec!["buy milk"]);

    let oat = store.add("oat milk");
    assert_eq!(descriptions(view.get(&store)), vec!["buy milk", "oat milk"]);
    store.complete(oat.as_str());
    assert_eq!(descriptions(view.get(&store)), vec!["buy milk"]);
    assert_eq!(view.recomputations(), 3);
    assert_eq!(seen.borrow().len(), 4);
}

#[test]
fn text_helpers() {
    assert_eq!(normalize_text("Crème brûlée!"), "Creme brulee");
    assert_eq!(pixels(0), None);
    assert_eq!(pixels("10").as_deref(), Some("10px"));
    assert_eq!(pixels("10px").as_deref(), Some("10px"));
}
