//! Per-page configuration of the search pipeline: endpoint templates, debounce
//! delays and the bound switch controls.

use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::control_binding::{ControlBinding, PickerOption};
use crate::filter_state::FilterState;
use crate::query_string;
use crate::search_const;

/// Characters escaped when the free-text query is placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%')
    .add(b'&')
    .add(b'+');

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPageConfig {
    /// Results endpoint; `%s` is replaced by the free-text query.
    pub search_base_url: String,
    pub search_completions_url: String,
    /// Path segment of the results endpoint, swapped for `search_path_segment`
    /// to get the address shown to the user.
    pub results_path_segment: String,
    pub search_path_segment: String,
    pub text_input_delay_ms: u64,
    pub control_delay_ms: u64,
    pub controls: Vec<ControlBinding>,
}

impl Default for SearchPageConfig {
    fn default() -> Self {
        Self {
            search_base_url: format!("{}%s", search_const::RESULTS_PATH_SEGMENT),
            search_completions_url: search_const::COMPLETIONS_PATH.to_string(),
            results_path_segment: search_const::RESULTS_PATH_SEGMENT.to_string(),
            search_path_segment: search_const::SEARCH_PATH_SEGMENT.to_string(),
            text_input_delay_ms: search_const::TEXT_INPUT_DELAY_MS,
            control_delay_ms: 0,
            controls: vec![
                ControlBinding::toggle("search-in-text", search_const::FILTER_IN_TEXT, "Search in full text"),
                ControlBinding::picker(
                    "search-group-by",
                    search_const::FILTER_GROUP_BY,
                    "Group by",
                    vec![
                        PickerOption::new("authors", "Authors"),
                        PickerOption::new("year", "Year"),
                        PickerOption::new("topics", "Topics"),
                    ],
                    "No grouping",
                ),
            ],
        }
    }
}

impl SearchPageConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn text_input_delay(&self) -> Duration {
        Duration::from_millis(self.text_input_delay_ms)
    }

    pub fn control_delay(&self) -> Duration {
        Duration::from_millis(self.control_delay_ms)
    }

    /// Results endpoint URL for a query text and filter state.
    pub fn results_url(&self, query_text: &str, state: &FilterState) -> String {
        let text = query_text.replace('/', " ");
        let segment = utf8_percent_encode(&text, PATH_SEGMENT).to_string();
        let mut url = self.search_base_url.replacen("%s", &segment, 1);
        let encoded = query_string::encode(state);
        if !encoded.is_empty() {
            url.push('?');
            url.push_str(&encoded);
        }
        url
    }

    /// The address the user can share for a results URL.
    pub fn shareable_url(&self, results_url: &str) -> String {
        results_url.replacen(&self.results_path_segment, &self.search_path_segment, 1)
    }

    /// Free-text query carried by a shareable location (`/search/<text>?...`).
    /// The bare search path (`/search`) carries the empty query.
    pub fn query_text_from_location(&self, location: &str) -> Option<String> {
        let path = location.split(['?', '#']).next().unwrap_or_default();
        let bare_segment = self.search_path_segment.trim_end_matches('/');
        if !bare_segment.is_empty() && path == bare_segment {
            return Some(String::new());
        }
        let start = path.find(self.search_path_segment.as_str())? + self.search_path_segment.len();
        let text = percent_decode_str(&path[start..]).decode_utf8_lossy();
        Some(text.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_url_substitutes_text_and_appends_state() {
        let config = SearchPageConfig::default();
        let state = FilterState::from_iter([("in_text", true)]);
        assert_eq!(config.results_url("topic models", &state), "/search_results/topic%20models?in_text=true");
        assert_eq!(config.results_url("", &FilterState::new()), "/search_results/");
    }

    #[test]
    fn slashes_in_query_text_become_spaces() {
        let config = SearchPageConfig::default();
        assert_eq!(config.results_url("a/b", &FilterState::new()), "/search_results/a%20b");
    }

    #[test]
    fn shareable_url_swaps_results_segment() {
        let config = SearchPageConfig::default();
        assert_eq!(
            config.shareable_url("/search_results/lda?groupby=year"),
            "/search/lda?groupby=year"
        );
    }

    #[test]
    fn query_text_is_read_back_from_location() {
        let config = SearchPageConfig::default();
        assert_eq!(
            config.query_text_from_location("/search/topic%20models?in_text=true"),
            Some("topic models".to_string())
        );
        assert_eq!(config.query_text_from_location("/search/"), Some(String::new()));
        assert_eq!(config.query_text_from_location("/search?in_text=true"), Some(String::new()));
        assert_eq!(config.query_text_from_location("/search/search"), Some("search".to_string()));
        assert_eq!(config.query_text_from_location("/about"), None);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = SearchPageConfig::from_json(r#"{"text_input_delay_ms": 250}"#).unwrap();
        assert_eq!(config.text_input_delay(), Duration::from_millis(250));
        assert_eq!(config.search_base_url, "/search_results/%s");
        assert_eq!(config.controls.len(), 2);
    }
}
