//! Search API: result lists and query completions over the document corpus.

mod search_for_results;
pub use search_for_results::search_for_results;

mod search_completions;
pub use search_completions::search_completions;

pub mod search_filters;
