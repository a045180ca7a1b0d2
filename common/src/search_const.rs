//! Paths, filter names and limits shared by the search page and the search endpoint.

pub const SEARCH_PATH_SEGMENT: &str = "/search/";
pub const RESULTS_PATH_SEGMENT: &str = "/search_results/";
pub const COMPLETIONS_PATH: &str = "/search_completions";

pub const FILTER_IN_TEXT: &str = "in_text";
pub const FILTER_GROUP_BY: &str = "groupby";
pub const FILTER_LIMIT: &str = "limit";

/// Quiet period after the last keystroke before the query is sent.
pub const TEXT_INPUT_DELAY_MS: u64 = 1000;

pub const PAGE_SIZE: u64 = 50;
pub const MAX_PAGE_SIZE: u64 = 500;
pub const MAX_COMPLETIONS: usize = 10;

pub const RESULTS_CONTAINER_ID: &str = "search-results";
pub const LOADING_INDICATOR_ID: &str = "search-loading";
pub const ERROR_INDICATOR_ID: &str = "search-error";
pub const SEARCH_INPUT_ID: &str = "search-input";
