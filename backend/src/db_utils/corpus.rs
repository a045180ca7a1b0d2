//! In-memory document corpus the search endpoint runs against.

use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use common::search_result::TopicWeight;
use serde::{Deserialize, Serialize};

const SAMPLE_CORPUS_JSON: &str = include_str!("sample_corpus.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub year: Option<u32>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub topics: Vec<TopicWeight>,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentCorpus {
    documents: Vec<CorpusDocument>,
    vocabulary: BTreeSet<String>,
}

impl DocumentCorpus {
    pub fn new(documents: Vec<CorpusDocument>) -> Self {
        let vocabulary = build_vocabulary(&documents);
        Self { documents, vocabulary }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let documents = serde_json::from_str::<Vec<CorpusDocument>>(json).context("Failed to parse corpus json")?;
        Ok(Self::new(documents))
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read corpus file {}", path))?;
        Self::from_json(&json)
    }

    /// Small built-in corpus used when `SEARCH_CORPUS_PATH` is not set.
    pub fn sample() -> Self {
        match Self::from_json(SAMPLE_CORPUS_JSON) {
            Ok(corpus) => corpus,
            Err(e) => {
                tracing::error!("sample corpus is invalid: {:#?}", e);
                Self::default()
            }
        }
    }

    pub fn documents(&self) -> &[CorpusDocument] {
        &self.documents
    }

    /// Lowercased words of all titles and author names.
    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }
}

fn build_vocabulary(documents: &[CorpusDocument]) -> BTreeSet<String> {
    documents
        .iter()
        .flat_map(|doc| std::iter::once(doc.title.as_str()).chain(doc.authors.iter().map(|a| a.as_str())))
        .flat_map(|text| text.split(|c: char| !c.is_alphanumeric()))
        .filter(|word| word.chars().count() >= 2)
        .map(|word| word.to_lowercase())
        .collect()
}

static CORPUS: OnceLock<Arc<DocumentCorpus>> = OnceLock::new();

pub fn get_corpus() -> Arc<DocumentCorpus> {
    CORPUS
        .get_or_init(|| {
            let corpus = match std::env::var("SEARCH_CORPUS_PATH") {
                Ok(path) => DocumentCorpus::load(&path).unwrap_or_else(|e| {
                    tracing::error!("falling back to the sample corpus: {:#?}", e);
                    DocumentCorpus::sample()
                }),
                Err(_) => DocumentCorpus::sample(),
            };
            tracing::info!("search corpus loaded: {} documents", corpus.documents().len());
            Arc::new(corpus)
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_corpus_parses() {
        let corpus = DocumentCorpus::sample();
        assert!(corpus.documents().len() >= 5);
        assert!(corpus.documents().iter().all(|doc| !doc.id.is_empty() && !doc.title.is_empty()));
    }

    #[test]
    fn vocabulary_has_lowercase_title_and_author_words() {
        let corpus = DocumentCorpus::from_json(
            r#"[{"id": "d1", "title": "Latent Dirichlet Allocation", "authors": ["David M. Blei"]}]"#,
        )
        .unwrap();
        let vocabulary = corpus.vocabulary();
        assert!(vocabulary.contains("dirichlet"));
        assert!(vocabulary.contains("blei"));
        assert!(!vocabulary.contains("m"));
    }

    #[test]
    fn missing_optional_fields_default() {
        let corpus = DocumentCorpus::from_json(r#"[{"id": "d1", "title": "Untitled"}]"#).unwrap();
        let doc = &corpus.documents()[0];
        assert!(doc.authors.is_empty());
        assert_eq!(doc.year, None);
        assert!(doc.topics.is_empty());
    }
}
