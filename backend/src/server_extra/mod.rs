//! Axum routes served next to the frontend app.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use common::query_string;
use common::search_const::COMPLETIONS_PATH;
use common::search_page_config::SearchPageConfig;
use common::search_result::SearchCompletions;
use serde::Deserialize;
use tracing::info;

use crate::api::search::search_filters::SearchFilters;
use crate::api::search::{search_completions, search_for_results};
use crate::db_utils::corpus::DocumentCorpus;

pub mod search_fragment;
use search_fragment::render_search_fragment;

/// Corpus plus the page configuration whose path segments the fragment links use.
#[derive(Clone)]
pub struct SearchRouterState {
    pub corpus: Arc<DocumentCorpus>,
    pub page_config: Arc<SearchPageConfig>,
}

/// `<results segment>{query}` and `/search_completions`, bound to `corpus`.
pub fn search_router(corpus: Arc<DocumentCorpus>, page_config: SearchPageConfig) -> Router {
    let results_segment = page_config.results_path_segment.clone();
    Router::new()
        .route(&results_segment, get(search_results_all))
        .route(&format!("{}{{query}}", results_segment), get(search_results))
        .route(COMPLETIONS_PATH, get(completions))
        .with_state(SearchRouterState { corpus, page_config: Arc::new(page_config) })
}

async fn _search_results(state: SearchRouterState, query_text: String, raw_query: Option<String>) -> anyhow::Result<String> {
    info!("search_results: {:?} ? {:?}", query_text, raw_query);
    let filter_state = query_string::decode(raw_query.as_deref().unwrap_or_default());
    let filters = SearchFilters::from_state(&filter_state);
    let corpus = state.corpus.clone();
    let documents = tokio::task::spawn_blocking(move || search_for_results(&corpus, &query_text, &filters))
        .await
        .context("search task failed")?;
    Ok(render_search_fragment(&documents, &filter_state, &state.page_config))
}

fn fragment_response(result: anyhow::Result<String>) -> Response {
    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("search_results: request failed: {:#?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Body::from(e.to_string())).into_response()
        }
    }
}

pub async fn search_results(
    State(state): State<SearchRouterState>,
    Path(query): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    fragment_response(_search_results(state, query, raw_query).await)
}

/// Same as [`search_results`] with an empty query, which matches everything.
pub async fn search_results_all(State(state): State<SearchRouterState>, RawQuery(raw_query): RawQuery) -> Response {
    fragment_response(_search_results(state, String::new(), raw_query).await)
}

#[derive(Debug, Default, Deserialize)]
pub struct CompletionsParams {
    #[serde(default)]
    pub query: String,
}

pub async fn completions(
    State(state): State<SearchRouterState>,
    Query(params): Query<CompletionsParams>,
) -> Json<SearchCompletions> {
    Json(search_completions(&state.corpus, &params.query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router_state(page_config: SearchPageConfig) -> SearchRouterState {
        SearchRouterState { corpus: Arc::new(DocumentCorpus::sample()), page_config: Arc::new(page_config) }
    }

    #[tokio::test]
    async fn handler_renders_fragment_for_raw_query() {
        let state = router_state(SearchPageConfig::default());
        let html = _search_results(state, "dirichlet".to_string(), Some("in_text=true&groupby[]=year".to_string()))
            .await
            .unwrap();
        assert!(html.contains(r#"<section class="search-group">"#));
        assert!(html.contains(r#"data-document-id="blei2003lda""#));
        assert!(html.contains(r#"data-document-id="griffiths2004finding""#));
    }

    #[tokio::test]
    async fn fragment_links_follow_configured_segments() {
        let page_config = SearchPageConfig {
            search_base_url: "/find_results/%s".to_string(),
            results_path_segment: "/find_results/".to_string(),
            search_path_segment: "/find/".to_string(),
            ..SearchPageConfig::default()
        };
        let html = _search_results(router_state(page_config), "dirichlat".to_string(), Some("in_text=true".to_string()))
            .await
            .unwrap();
        assert!(html.contains(r#"<a href="/find/dirichlet?in_text=true""#));
        assert!(!html.contains("/search/"));
    }

    #[tokio::test]
    async fn completions_handler_uses_query_param() {
        let state = router_state(SearchPageConfig::default());
        let Json(completions) =
            completions(State(state), Query(CompletionsParams { query: "latent dir".to_string() })).await;
        assert_eq!(completions.suggestions, vec!["dirichlet".to_string()]);
    }
}
