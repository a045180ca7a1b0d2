//! Completions for the word being typed in the search box.

use common::search_const::MAX_COMPLETIONS;
use common::search_result::SearchCompletions;

use crate::db_utils::corpus::DocumentCorpus;

/// Vocabulary words starting with the last term of `query`, shortest first.
pub fn search_completions(corpus: &DocumentCorpus, query: &str) -> SearchCompletions {
    let prefix = match query.split_whitespace().last() {
        Some(term) if !query.ends_with(char::is_whitespace) => term.to_lowercase(),
        _ => return SearchCompletions { query: query.to_string(), suggestions: vec![] },
    };

    let mut suggestions: Vec<String> = corpus
        .vocabulary()
        .iter()
        .filter(|word| word.starts_with(prefix.as_str()) && word.as_str() != prefix)
        .cloned()
        .collect();
    suggestions.sort_by(|a, b| a.chars().count().cmp(&b.chars().count()).then_with(|| a.cmp(b)));
    suggestions.truncate(MAX_COMPLETIONS);

    SearchCompletions { query: query.to_string(), suggestions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_the_last_term() {
        let completions = search_completions(&DocumentCorpus::sample(), "latent dir");
        assert_eq!(completions.query, "latent dir");
        assert_eq!(completions.suggestions, vec!["dirichlet".to_string()]);
    }

    #[test]
    fn shorter_words_come_first() {
        let completions = search_completions(&DocumentCorpus::sample(), "Mo");
        assert_eq!(completions.suggestions.first().map(|s| s.as_str()), Some("models"));
        assert!(completions.suggestions.len() <= MAX_COMPLETIONS);
    }

    #[test]
    fn nothing_to_complete() {
        let corpus = DocumentCorpus::sample();
        assert!(search_completions(&corpus, "").suggestions.is_empty());
        assert!(search_completions(&corpus, "topic ").suggestions.is_empty());
        assert!(search_completions(&corpus, "qqq").suggestions.is_empty());
    }
}
