use std::borrow::Cow;
use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::todo::{ListKey, Todo};
use crate::ops::search::SearchQuery;
use crate::ops::store::TodoStore;

/// Error type for building a filter
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("the sorting \"{0}\" does not exist")]
    UnknownSort(String),
    #[error("invalid search: {0}")]
    InvalidSearch(#[from] regex::Error),
}

/// Sort orders available to a filtered view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortBy {
    /// No due date first (oldest created first), then by due date ascending
    Recent,
    /// Newest created first
    RecentlyAdded,
    /// Oldest created first
    Older,
    AToZ,
    ZToA,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::Recent,
        SortBy::RecentlyAdded,
        SortBy::Older,
        SortBy::AToZ,
        SortBy::ZToA,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Recent => "recent",
            SortBy::RecentlyAdded => "recently-added",
            SortBy::Older => "older",
            SortBy::AToZ => "A-Z",
            SortBy::ZToA => "Z-A",
        }
    }

    pub fn compare(self, a: &Todo, b: &Todo) -> Ordering {
        match self {
            SortBy::Recent => match (a.due_at, b.due_at) {
                (None, None) => a.created_at.cmp(&b.created_at),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(x), Some(y)) => x.cmp(&y),
            },
            SortBy::RecentlyAdded => b.created_at.cmp(&a.created_at),
            SortBy::Older => a.created_at.cmp(&b.created_at),
            SortBy::AToZ => a.description.cmp(&b.description),
            SortBy::ZToA => b.description.cmp(&a.description),
        }
    }
}

impl FromStr for SortBy {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| FilterError::UnknownSort(s.to_string()))
    }
}

impl TryFrom<String> for SortBy {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortBy> for String {
    fn from(value: SortBy) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search text plus sort order controlling a derived view
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    pub search: Option<SearchQuery>,
    pub sort_by: Option<SortBy>,
}

impl TodoFilter {
    pub fn new() -> Self {
        TodoFilter::default()
    }

    /// Set the search text. An empty string clears it.
    pub fn with_search(mut self, search: &str) -> Result<Self, FilterError> {
        self.search = if search.is_empty() {
            None
        } else {
            Some(SearchQuery::new(search)?)
        };
        Ok(self)
    }

    pub fn with_sort(mut self, sort_by: &str) -> Result<Self, FilterError> {
        self.sort_by = Some(sort_by.parse()?);
        Ok(self)
    }

    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// Whether applying this filter can change anything
    pub fn is_active(&self) -> bool {
        self.search.is_some() || self.sort_by.is_some()
    }
}

/// Derive a filtered, sorted view of `source`.
///
/// An inactive filter hands back the source slice itself; otherwise the
/// matching items are cloned and (stably) sorted. The source is never touched.
pub fn apply_filter<'a>(source: &'a [Todo], filter: &TodoFilter) -> Cow<'a, [Todo]> {
    if !filter.is_active() {
        return Cow::Borrowed(source);
    }

    let mut result: Vec<Todo> = match &filter.search {
        Some(query) => source
            .iter()
            .filter(|todo| query.matches(&todo.description))
            .cloned()
            .collect(),
        None => source.to_vec(),
    };

    if let Some(sort) = filter.sort_by {
        result.sort_by(|a, b| sort.compare(a, b));
    }

    Cow::Owned(result)
}

#[derive(Debug)]
struct CachedView {
    source_revision: u64,
    filter_revision: u64,
    items: Vec<Todo>,
}

/// A memoized filtered view over one list of a [`TodoStore`].
///
/// Reads recompute only when the list's revision or the filter changed since
/// the last read. A view is meant to be read against a single store; reading
/// it against another store may serve that store a stale cache.
#[derive(Debug)]
pub struct FilteredView {
    list: ListKey,
    filter: TodoFilter,
    filter_revision: u64,
    cache: Option<CachedView>,
    recomputations: usize,
}

impl FilteredView {
    pub fn new(list: ListKey, filter: TodoFilter) -> Self {
        FilteredView {
            list,
            filter,
            filter_revision: 0,
            cache: None,
            recomputations: 0,
        }
    }

    pub fn list(&self) -> ListKey {
        self.list
    }

    pub fn filter(&self) -> &TodoFilter {
        &self.filter
    }

    pub fn set_list(&mut self, list: ListKey) {
        if self.list != list {
            self.list = list;
            self.invalidate();
        }
    }

    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
        self.invalidate();
    }

    /// Replace the search text, keeping the sort. An empty string clears it.
    pub fn set_search(&mut self, search: &str) -> Result<(), FilterError> {
        self.filter.search = if search.is_empty() {
            None
        } else {
            Some(SearchQuery::new(search)?)
        };
        self.invalidate();
        Ok(())
    }

    pub fn set_sort_by(&mut self, sort_by: Option<SortBy>) {
        self.filter.sort_by = sort_by;
        self.invalidate();
    }

    /// How many times the derived list has been rebuilt
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    /// Current derived items, recomputed only if stale.
    pub fn get<'a>(&'a mut self, store: &'a TodoStore) -> &'a [Todo] {
        let source = store.list(self.list);
        if !self.filter.is_active() {
            return source;
        }

        let source_revision = store.revision(self.list);
        let fresh = matches!(
            &self.cache,
            Some(c) if c.source_revision == source_revision
                && c.filter_revision == self.filter_revision
        );
        if !fresh {
            let items = apply_filter(source, &self.filter).into_owned();
            self.recomputations += 1;
            tracing::trace!(
                list = %self.list,
                source = source.len(),
                derived = items.len(),
                "recomputed filtered view"
            );
            self.cache = Some(CachedView {
                source_revision,
                filter_revision: self.filter_revision,
                items,
            });
        }

        match &self.cache {
            Some(c) => &c.items,
            None => source,
        }
    }

    fn invalidate(&mut self) {
        self.filter_revision += 1;
    }
}
