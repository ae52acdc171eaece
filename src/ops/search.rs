use regex::{Regex, RegexBuilder};

use crate::util::unicode::normalize_text;

/// A compiled free-text query.
///
/// The query is normalized and split on whitespace; each word becomes its own
/// case-insensitive tester, and content matches when ANY word occurs in its
/// normalized form.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    raw: String,
    testers: Vec<Regex>,
}

impl SearchQuery {
    pub fn new(search: &str) -> Result<Self, regex::Error> {
        let testers = search_words(search)
            .iter()
            .map(|word| {
                RegexBuilder::new(&regex::escape(word))
                    .case_insensitive(true)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SearchQuery {
            raw: search.to_string(),
            testers,
        })
    }

    /// The query as the user typed it
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Number of words after normalization; a query of punctuation has none
    /// and matches nothing.
    pub fn word_count(&self) -> usize {
        self.testers.len()
    }

    pub fn matches(&self, content: &str) -> bool {
        if self.testers.is_empty() {
            return false;
        }
        let content = normalize_text(content);
        self.testers.iter().any(|re| re.is_match(&content))
    }
}

/// Normalized, non-empty words of a search string.
fn search_words(search: &str) -> Vec<String> {
    normalize_text(search)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
