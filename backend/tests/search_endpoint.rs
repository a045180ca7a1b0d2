//! Drives the search routes over HTTP against a local listener.

use std::sync::Arc;

use backend::db_utils::corpus::DocumentCorpus;
use backend::server_extra::search_router;
use common::search_page_config::SearchPageConfig;
use common::search_result::SearchCompletions;

async fn serve() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let router = search_router(Arc::new(DocumentCorpus::sample()), SearchPageConfig::default());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", address)
}

#[tokio::test]
async fn results_fragment_for_query_and_filters() {
    let base = serve().await;
    let response = reqwest::get(format!("{}/search_results/topic%20models?groupby%5B%5D=year&limit=3", base))
        .await
        .unwrap();
    assert!(response.status().is_success());
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let html = response.text().await.unwrap();
    assert!(html.contains("for <em>topic models</em>"));
    assert_eq!(html.matches(r#"<li class="search-result""#).count(), 3);
    assert!(html.contains(r#"<section class="search-group">"#));
}

#[tokio::test]
async fn empty_query_lists_every_document() {
    let base = serve().await;
    let html = reqwest::get(format!("{}/search_results/", base)).await.unwrap().text().await.unwrap();
    let expected = DocumentCorpus::sample().documents().len();
    assert_eq!(html.matches(r#"<li class="search-result""#).count(), expected);
}

#[tokio::test]
async fn misspelling_gets_a_correction_link() {
    let base = serve().await;
    let html = reqwest::get(format!("{}/search_results/dirichlat?in_text=true", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Nothing found."));
    assert!(html.contains(r#"href="/search/dirichlet?in_text=true""#));
}

#[tokio::test]
async fn completions_are_json() {
    let base = serve().await;
    let completions: SearchCompletions = reqwest::get(format!("{}/search_completions?query=latent%20dir", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(completions.query, "latent dir");
    assert_eq!(completions.suggestions, vec!["dirichlet".to_string()]);
    assert_eq!(completions.completed_queries(), vec!["latent dirichlet".to_string()]);
}
