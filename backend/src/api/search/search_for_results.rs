//! Search endpoint for result lists.

use std::collections::BTreeMap;

use common::search_result::{SearchResultDocumentItem, SearchResultDocuments, SearchResultGroup};
use common::text_highlight::HighlightTextSpan;

use crate::api::search::search_filters::{GroupField, SearchFilters};
use crate::db_utils::corpus::{CorpusDocument, DocumentCorpus};
use crate::db_utils::decompose_spans::{decompose_text_into_spans, snippet_spans};

const TITLE_WEIGHT: u64 = 3;
const AUTHOR_WEIGHT: u64 = 2;
const CONTENT_WEIGHT: u64 = 1;

/// Characters of content shown when no term matched inside it.
const EXCERPT_CHARS: usize = 160;

/// Runs `query_text` against the corpus. Every term must match; an empty or
/// `*` query matches every document.
pub fn search_for_results(corpus: &DocumentCorpus, query_text: &str, filters: &SearchFilters) -> SearchResultDocuments {
    let terms = query_terms(query_text);

    let mut scored: Vec<(u64, &CorpusDocument)> = corpus
        .documents()
        .iter()
        .filter_map(|doc| score_document(doc, &terms, filters.in_text).map(|score| (score, doc)))
        .collect();
    scored.sort_by(|(a_score, a), (b_score, b)| {
        b_score.cmp(a_score).then_with(|| a.title.cmp(&b.title)).then_with(|| a.id.cmp(&b.id))
    });
    scored.truncate(filters.limit);
    tracing::info!("search_for_results: {:?} -> {} hits", query_text, scored.len());

    let groups = if filters.group_by.is_empty() {
        None
    } else {
        Some(group_results(&scored, &terms, filters))
    };
    let corrected_query = if scored.is_empty() && !terms.is_empty() {
        correct_query(corpus, &terms)
    } else {
        None
    };
    let results = scored.iter().map(|(score, doc)| result_item(doc, *score, &terms, filters.in_text)).collect();

    SearchResultDocuments { query_text: query_text.to_string(), results, groups, corrected_query }
}

/// Lowercased query terms with surrounding punctuation and wildcards removed.
pub fn query_terms(query_text: &str) -> Vec<String> {
    query_text
        .split_whitespace()
        .map(|term| term.trim_matches(|c: char| !c.is_alphanumeric()).to_ascii_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

fn count_matches(text: &str, term: &str) -> u64 {
    text.to_ascii_lowercase().matches(term).count() as u64
}

fn score_document(doc: &CorpusDocument, terms: &[String], in_text: bool) -> Option<u64> {
    let mut total = 0;
    for term in terms {
        let title = count_matches(&doc.title, term) * TITLE_WEIGHT;
        let authors: u64 = doc.authors.iter().map(|author| count_matches(author, term)).sum::<u64>() * AUTHOR_WEIGHT;
        let content = if in_text { count_matches(&doc.content, term) * CONTENT_WEIGHT } else { 0 };
        let term_score = title + authors + content;
        if term_score == 0 {
            return None;
        }
        total += term_score;
    }
    Some(total)
}

fn result_item(doc: &CorpusDocument, score: u64, terms: &[String], in_text: bool) -> SearchResultDocumentItem {
    let snippet = if in_text { snippet_spans(&doc.content, terms) } else { None };
    let snippet = snippet.unwrap_or_else(|| excerpt(&doc.content));
    SearchResultDocumentItem {
        document_id: doc.id.clone(),
        title_spans: decompose_text_into_spans(&doc.title, terms),
        authors: doc.authors.clone(),
        year: doc.year,
        snippet_spans: snippet,
        topics: doc.topics.clone(),
        score,
    }
}

fn excerpt(content: &str) -> Vec<HighlightTextSpan> {
    if content.is_empty() {
        return vec![];
    }
    let text = match content.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}…", &content[..cut]),
        None => content.to_string(),
    };
    vec![HighlightTextSpan { text, is_highlighted: false, index: 0 }]
}

fn group_keys(doc: &CorpusDocument, field: GroupField) -> Vec<String> {
    let keys: Vec<String> = match field {
        GroupField::Authors => doc.authors.clone(),
        GroupField::Year => doc.year.map(|year| year.to_string()).into_iter().collect(),
        GroupField::Topics => doc.topics.iter().map(|topic| topic.name.clone()).collect(),
    };
    if keys.is_empty() {
        vec![format!("Unknown {}", field)]
    } else {
        keys
    }
}

/// A document lands in every group its keys produce, so groups overlap.
/// Several fields combine into `a / b` group names.
fn group_results(scored: &[(u64, &CorpusDocument)], terms: &[String], filters: &SearchFilters) -> Vec<SearchResultGroup> {
    let mut grouped: BTreeMap<String, Vec<SearchResultDocumentItem>> = BTreeMap::new();
    for (score, doc) in scored {
        let mut names = vec![String::new()];
        for field in &filters.group_by {
            let keys = group_keys(doc, *field);
            names = names
                .iter()
                .flat_map(|prefix| {
                    keys.iter().map(move |key| if prefix.is_empty() { key.clone() } else { format!("{} / {}", prefix, key) })
                })
                .collect();
        }
        names.sort();
        names.dedup();
        for name in names {
            grouped.entry(name).or_default().push(result_item(doc, *score, terms, filters.in_text));
        }
    }

    let mut groups: Vec<SearchResultGroup> =
        grouped.into_iter().map(|(name, results)| SearchResultGroup { name, results }).collect();
    groups.sort_by(|a, b| b.results.len().cmp(&a.results.len()).then_with(|| a.name.cmp(&b.name)));
    groups
}

/// Replaces unknown terms by a vocabulary word one edit away, if any.
fn correct_query(corpus: &DocumentCorpus, terms: &[String]) -> Option<String> {
    let vocabulary = corpus.vocabulary();
    let mut changed = false;
    let corrected: Vec<String> = terms
        .iter()
        .map(|term| {
            if vocabulary.contains(term) {
                return term.clone();
            }
            match vocabulary.iter().find(|word| within_one_edit(term, word)) {
                Some(word) => {
                    changed = true;
                    word.clone()
                }
                None => term.clone(),
            }
        })
        .collect();
    changed.then(|| corrected.join(" "))
}

/// True when `a` and `b` differ by at most one insertion, deletion or substitution.
fn within_one_edit(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    if long.len() - short.len() > 1 {
        return false;
    }
    let prefix = short.iter().zip(long.iter()).take_while(|(x, y)| x == y).count();
    if short.len() == long.len() {
        short[prefix..].iter().skip(1).eq(long[prefix..].iter().skip(1))
    } else {
        short[prefix..] == long[prefix + 1..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> DocumentCorpus {
        DocumentCorpus::sample()
    }

    fn filters() -> SearchFilters {
        SearchFilters::default()
    }

    fn ids(documents: &SearchResultDocuments) -> Vec<&str> {
        documents.results.iter().map(|item| item.document_id.as_str()).collect()
    }

    #[test]
    fn empty_and_wildcard_queries_match_everything() {
        let corpus = corpus();
        let everything = search_for_results(&corpus, "", &filters());
        assert_eq!(everything.results.len(), corpus.documents().len());
        let wildcard = search_for_results(&corpus, "*", &filters());
        assert_eq!(ids(&wildcard), ids(&everything));
        assert_eq!(everything.corrected_query, None);
    }

    #[test]
    fn title_matches_are_highlighted() {
        let result = search_for_results(&corpus(), "dirichlet", &filters());
        assert_eq!(ids(&result), vec!["blei2003lda"]);
        let highlighted: Vec<&str> = result.results[0]
            .title_spans
            .iter()
            .filter(|span| span.is_highlighted)
            .map(|span| span.text.as_str())
            .collect();
        assert_eq!(highlighted, vec!["Dirichlet"]);
    }

    #[test]
    fn content_is_only_searched_in_text_mode() {
        let corpus = corpus();
        assert!(search_for_results(&corpus, "tempered", &filters()).results.is_empty());

        let in_text = SearchFilters { in_text: true, ..filters() };
        let result = search_for_results(&corpus, "tempered", &in_text);
        assert_eq!(ids(&result), vec!["hofmann1999plsa"]);
        assert!(result.results[0].snippet_spans.iter().any(|span| span.is_highlighted));
    }

    #[test]
    fn every_term_must_match() {
        let corpus = corpus();
        assert_eq!(ids(&search_for_results(&corpus, "latent blei", &filters())), vec!["blei2003lda"]);
        assert!(search_for_results(&corpus, "latent steyvers", &filters()).results.is_empty());
    }

    #[test]
    fn limit_truncates_results() {
        let limited = SearchFilters { limit: 3, ..filters() };
        assert_eq!(search_for_results(&corpus(), "", &limited).results.len(), 3);
    }

    #[test]
    fn groups_overlap_and_are_ordered_by_size() {
        let by_topics = SearchFilters { group_by: vec![GroupField::Topics], ..filters() };
        let result = search_for_results(&corpus(), "", &by_topics);
        let groups = result.groups.unwrap();
        assert_eq!(groups[0].name, "topic models");
        assert!(groups.windows(2).all(|pair| pair[0].results.len() >= pair[1].results.len()));
        let memberships: usize = groups.iter().map(|group| group.results.len()).sum();
        assert!(memberships > result.results.len());
    }

    #[test]
    fn combined_group_fields_join_names() {
        let grouped = SearchFilters { group_by: vec![GroupField::Year, GroupField::Authors], ..filters() };
        let result = search_for_results(&corpus(), "hofmann", &grouped);
        let names: Vec<String> = result.groups.unwrap().into_iter().map(|group| group.name).collect();
        assert_eq!(names, vec!["1999 / Thomas Hofmann".to_string()]);
    }

    #[test]
    fn misspelled_query_gets_a_correction() {
        let result = search_for_results(&corpus(), "dirichlat", &filters());
        assert!(result.results.is_empty());
        assert_eq!(result.corrected_query.as_deref(), Some("dirichlet"));
        assert_eq!(search_for_results(&corpus(), "zzzzzzzz", &filters()).corrected_query, None);
    }

    #[test]
    fn one_edit_distance() {
        assert!(within_one_edit("topic", "topics"));
        assert!(within_one_edit("topics", "topic"));
        assert!(within_one_edit("topic", "tepic"));
        assert!(within_one_edit("topic", "topic"));
        assert!(!within_one_edit("topic", "tpoic"));
        assert!(!within_one_edit("topic", "to"));
    }

    #[test]
    fn query_terms_are_normalized() {
        assert_eq!(query_terms("  Topic, MODELS * "), vec!["topic", "models"]);
        assert!(query_terms("*").is_empty());
    }
}
