//! Utilities for highlighting text spans in search results.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightTextSpan {
    pub text: String,
    pub is_highlighted: bool,
    /// Position among the highlighted spans of the same text; 0 for plain spans.
    pub index: u64,
}
