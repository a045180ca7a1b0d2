//! Filter state shared by the search page controls and the search endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::query_string;

/// One filter value. Nested maps only appear through dotted query keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterValue {
    Scalar(String),
    Flag(bool),
    Sequence(Vec<String>),
    Nested(FilterState),
}

impl FilterValue {
    /// Builds a scalar, storing the literal `"true"` as a flag so toggles survive the URL.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == "true" {
            FilterValue::Flag(true)
        } else {
            FilterValue::Scalar(value)
        }
    }

    /// Empty strings, `false`, empty sequences and empty maps all mean "off".
    pub fn is_truthy(&self) -> bool {
        match self {
            FilterValue::Scalar(text) => !text.is_empty(),
            FilterValue::Flag(flag) => *flag,
            FilterValue::Sequence(items) => !items.is_empty(),
            FilterValue::Nested(state) => !state.is_empty(),
        }
    }

    /// Scalar view of the value, as a control or the endpoint would read it.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FilterValue::Scalar(text) => Some(text.as_str()),
            FilterValue::Flag(true) => Some("true"),
            _ => None,
        }
    }

    /// Every string carried by a scalar or a sequence.
    pub fn values(&self) -> Vec<&str> {
        match self {
            FilterValue::Sequence(items) => items.iter().map(|item| item.as_str()).collect(),
            other => other.as_scalar().into_iter().collect(),
        }
    }

    fn normalized(self) -> Self {
        match self {
            FilterValue::Scalar(text) => FilterValue::text(text),
            other => other,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::text(value)
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        FilterValue::Sequence(value)
    }
}

impl From<FilterState> for FilterValue {
    fn from(value: FilterState) -> Self {
        FilterValue::Nested(value)
    }
}

/// Active filters keyed by filter name. Falsy values are never stored:
/// absence is the only representation of "off".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    entries: BTreeMap<String, FilterValue>,
}

/// Per-key overrides for [`FilterState::merged`]; a falsy value deletes the key.
pub type FilterOverrides = BTreeMap<String, FilterValue>;

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.entries.iter()
    }

    /// Sets `key`, or removes it when `value` is falsy. Keys that the query
    /// string would read back as nesting (`.`, `[`, `]`) are refused.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        let key = key.into();
        let value = value.into().normalized();
        if key.is_empty() {
            return;
        }
        if key.contains(['.', '[', ']']) {
            tracing::warn!("filter key {:?} cannot be written to a query string, ignored", key);
            return;
        }
        if value.is_truthy() {
            self.entries.insert(key, value);
        } else {
            self.entries.remove(&key);
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.entries.remove(key)
    }

    /// Returns a copy with every override applied; `self` is left untouched.
    pub fn merged(&self, overrides: &FilterOverrides) -> FilterState {
        let mut merged = self.clone();
        for (key, value) in overrides {
            merged.set(key.clone(), value.clone());
        }
        merged
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for FilterState {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut state = FilterState::new();
        for (key, value) in iter {
            state.set(key, value);
        }
        state
    }
}

/// Owns the page's current filter state. Every mutation goes through
/// [`FilterStateStore::merge`] followed by an explicit [`FilterStateStore::adopt`].
#[derive(Debug, Clone, Default)]
pub struct FilterStateStore {
    current: FilterState,
}

impl FilterStateStore {
    pub fn new(initial: FilterState) -> Self {
        Self { current: initial }
    }

    pub fn from_query(query: &str) -> Self {
        Self::new(query_string::decode(query))
    }

    pub fn current_state(&self) -> &FilterState {
        &self.current
    }

    pub fn merge(&self, overrides: &FilterOverrides) -> FilterState {
        self.current.merged(overrides)
    }

    pub fn adopt(&mut self, state: FilterState) {
        self.current = state;
    }

    pub fn replace_from_query(&mut self, query: &str) {
        self.current = query_string::decode(query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides<const N: usize>(pairs: [(&str, FilterValue); N]) -> FilterOverrides {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn merge_with_empty_value_removes_key() {
        let store = FilterStateStore::new(FilterState::from_iter([("a", "1"), ("b", "2")]));
        let merged = store.merge(&overrides([("a", FilterValue::text(""))]));
        assert!(!merged.contains_key("a"));
        assert_eq!(merged.get("b"), Some(&FilterValue::Scalar("2".into())));
    }

    #[test]
    fn merge_with_value_sets_key() {
        let store = FilterStateStore::default();
        let merged = store.merge(&overrides([("a", FilterValue::text("x"))]));
        assert_eq!(merged.get("a"), Some(&FilterValue::Scalar("x".into())));
    }

    #[test]
    fn merge_does_not_mutate_the_store() {
        let store = FilterStateStore::new(FilterState::from_iter([("a", "1")]));
        let _ = store.merge(&overrides([("a", FilterValue::Flag(false)), ("b", FilterValue::Flag(true))]));
        assert_eq!(store.current_state(), &FilterState::from_iter([("a", "1")]));
    }

    #[test]
    fn false_flag_and_empty_sequence_are_off() {
        let mut state = FilterState::from_iter([("in_text", true)]);
        state.set("in_text", false);
        state.set("groupby", Vec::<String>::new());
        assert!(state.is_empty());
    }

    #[test]
    fn literal_true_is_stored_as_flag() {
        let state = FilterState::from_iter([("in_text", "true")]);
        assert_eq!(state.get("in_text"), Some(&FilterValue::Flag(true)));
        assert_eq!(state.get("in_text").and_then(|v| v.as_scalar()), Some("true"));
    }

    #[test]
    fn keys_with_path_syntax_are_refused() {
        let mut state = FilterState::from_iter([("a", "1")]);
        state.set("a.b", "x");
        state.set("c[]", "y");
        state.set("d]", "z");
        assert_eq!(state, FilterState::from_iter([("a", "1")]));
        let merged = state.merged(&overrides([("a.b", FilterValue::text("x"))]));
        assert_eq!(merged, state);
    }

    #[test]
    fn adopt_replaces_current_state() {
        let mut store = FilterStateStore::from_query("?a=1");
        let merged = store.merge(&overrides([("b", FilterValue::text("2"))]));
        store.adopt(merged);
        assert_eq!(store.current_state(), &FilterState::from_iter([("a", "1"), ("b", "2")]));
        store.replace_from_query("?c=3");
        assert_eq!(store.current_state(), &FilterState::from_iter([("c", "3")]));
    }
}
