//! In-memory to-do lists: a store holding completed and uncompleted items,
//! plus memoized search/sort views over either list.

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod util;

pub use model::todo::{ListKey, Todo, TodoId};
pub use ops::filter::{FilterError, FilteredView, SortBy, TodoFilter, apply_filter};
pub use ops::store::{StoreEvent, SubscriptionId, TodoStore};
pub use util::styling::pixels;
pub use util::unicode::normalize_text;
