//! Search results and completions exchanged between the endpoint and the page.

use serde::{Deserialize, Serialize};

use crate::text_highlight::HighlightTextSpan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicWeight {
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultDocumentItem {
    pub document_id: String,
    pub title_spans: Vec<HighlightTextSpan>,
    pub authors: Vec<String>,
    pub year: Option<u32>,
    pub snippet_spans: Vec<HighlightTextSpan>,
    pub topics: Vec<TopicWeight>,
    pub score: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultGroup {
    pub name: String,
    pub results: Vec<SearchResultDocumentItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultDocuments {
    pub query_text: String,
    pub results: Vec<SearchResultDocumentItem>,
    /// Present when the request asked for `groupby[]`.
    pub groups: Option<Vec<SearchResultGroup>>,
    /// Spelling suggestion offered when nothing matched.
    pub corrected_query: Option<String>,
}

impl SearchResultDocuments {
    /// Hits counted once per group membership, as the grouped listing shows them.
    pub fn result_count(&self) -> usize {
        match &self.groups {
            Some(groups) => groups.iter().map(|group| group.results.len()).sum(),
            None => self.results.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchCompletions {
    pub query: String,
    /// Words completing the last term of `query`.
    pub suggestions: Vec<String>,
}

impl SearchCompletions {
    /// Full queries, each with the last term replaced by a suggestion.
    pub fn completed_queries(&self) -> Vec<String> {
        let head = match self.query.trim_end().rsplit_once(char::is_whitespace) {
            Some((head, _)) => format!("{} ", head.trim_end()),
            None => String::new(),
        };
        self.suggestions.iter().map(|word| format!("{}{}", head, word)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_queries_replace_the_last_term() {
        let completions = SearchCompletions {
            query: "latent  dir".to_string(),
            suggestions: vec!["dirichlet".to_string(), "dirty".to_string()],
        };
        assert_eq!(completions.completed_queries(), vec!["latent dirichlet", "latent dirty"]);

        let single = SearchCompletions { query: "mod".to_string(), suggestions: vec!["models".to_string()] };
        assert_eq!(single.completed_queries(), vec!["models"]);
    }
}
