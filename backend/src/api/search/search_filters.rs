//! Filters the search endpoint understands, read from the decoded query string.

use std::fmt;
use std::str::FromStr;

use common::filter_state::FilterState;
use common::search_const::{FILTER_GROUP_BY, FILTER_IN_TEXT, FILTER_LIMIT, MAX_PAGE_SIZE, PAGE_SIZE};

/// Document field results can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupField {
    Authors,
    Year,
    Topics,
}

impl GroupField {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupField::Authors => "authors",
            GroupField::Year => "year",
            GroupField::Topics => "topics",
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "authors" => Ok(GroupField::Authors),
            "year" => Ok(GroupField::Year),
            "topics" => Ok(GroupField::Topics),
            other => Err(format!("unknown group field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    /// Also match document content, not only titles and authors.
    pub in_text: bool,
    pub group_by: Vec<GroupField>,
    pub limit: usize,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self { in_text: false, group_by: vec![], limit: PAGE_SIZE as usize }
    }
}

impl SearchFilters {
    /// Unknown filters and unparseable values are ignored.
    pub fn from_state(state: &FilterState) -> Self {
        let in_text = state.get(FILTER_IN_TEXT).is_some_and(|value| value.is_truthy());

        let mut group_by = Vec::new();
        for value in state.get(FILTER_GROUP_BY).map(|value| value.values()).unwrap_or_default() {
            match value.parse::<GroupField>() {
                Ok(field) if !group_by.contains(&field) => group_by.push(field),
                Ok(_) => {}
                Err(e) => tracing::warn!("search_filters: {}", e),
            }
        }

        let limit = state
            .get(FILTER_LIMIT)
            .and_then(|value| value.as_scalar())
            .and_then(|value| value.parse::<u64>().ok())
            .map(|limit| limit.clamp(1, MAX_PAGE_SIZE))
            .unwrap_or(PAGE_SIZE) as usize;

        Self { in_text, group_by, limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::query_string;

    #[test]
    fn defaults_for_empty_state() {
        assert_eq!(SearchFilters::from_state(&FilterState::new()), SearchFilters::default());
    }

    #[test]
    fn reads_in_text_group_by_and_limit() {
        let state = query_string::decode("?in_text=true&groupby[]=year&groupby[]=authors&groupby[]=year&limit=5");
        let filters = SearchFilters::from_state(&state);
        assert!(filters.in_text);
        assert_eq!(filters.group_by, vec![GroupField::Year, GroupField::Authors]);
        assert_eq!(filters.limit, 5);
    }

    #[test]
    fn scalar_group_by_and_bad_values() {
        let state = query_string::decode("?groupby=topics&limit=lots");
        let filters = SearchFilters::from_state(&state);
        assert_eq!(filters.group_by, vec![GroupField::Topics]);
        assert_eq!(filters.limit, 50);

        let state = query_string::decode("?groupby[]=colour&limit=100000");
        let filters = SearchFilters::from_state(&state);
        assert!(filters.group_by.is_empty());
        assert_eq!(filters.limit, 500);
    }
}
