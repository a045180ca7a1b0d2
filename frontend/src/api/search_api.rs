//! Client API calls for search endpoints.

use common::search_error::SearchError;
use common::search_result::SearchCompletions;

/// Turns a site-relative URL into an absolute one; the browser client needs an origin.
fn absolute_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    let origin = web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default();
    format!("{}{}", origin, url)
}

/// Fetches a results fragment. Any non-success status is an error.
pub async fn fetch_search_fragment(url: &str) -> Result<String, SearchError> {
    let response = reqwest::get(absolute_url(url))
        .await
        .map_err(|e| SearchError::Transport(e.to_string()))?;
    let status = response.status();
    let body = response.text().await.map_err(|e| SearchError::Transport(e.to_string()))?;
    if !status.is_success() {
        return Err(SearchError::Server { status: status.as_u16(), message: body });
    }
    Ok(body)
}

pub async fn fetch_completions(completions_url: &str, query: &str) -> anyhow::Result<SearchCompletions> {
    let url = reqwest::Url::parse_with_params(&absolute_url(completions_url), &[("query", query)])?;
    let completions = reqwest::get(url).await?.error_for_status()?.json::<SearchCompletions>().await?;
    Ok(completions)
}
