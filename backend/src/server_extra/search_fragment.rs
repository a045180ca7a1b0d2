//! HTML fragment returned by the results endpoint and placed into `#search-results`.

use common::filter_state::FilterState;
use common::search_page_config::SearchPageConfig;
use common::search_result::{SearchResultDocumentItem, SearchResultDocuments, SearchResultGroup};
use common::text_highlight::HighlightTextSpan;

/// Tooltip prefix for topic weights in a result's tag cloud.
const TOPIC_WEIGHT_PREFIX: &str = "topic weight: ";

/// Render the result listing for `documents`. `state` is the filter state the
/// request was made with; links in the fragment keep it and point at `config`'s pages.
pub fn render_search_fragment(documents: &SearchResultDocuments, state: &FilterState, config: &SearchPageConfig) -> String {
    let mut html = String::new();

    let count = documents.results.len();
    let noun = if count == 1 { "document" } else { "documents" };
    if documents.query_text.trim().is_empty() {
        html.push_str(&format!(r#"<p class="search-summary">{} {}</p>"#, count, noun));
    } else {
        html.push_str(&format!(
            r#"<p class="search-summary">{} {} for <em>{}</em></p>"#,
            count,
            noun,
            html_escape(&documents.query_text)
        ));
    }

    if let Some(corrected) = &documents.corrected_query {
        let href = search_link(config, corrected, state);
        html.push_str(&format!(
            r#"<p class="search-correction">Did you mean <a href="{}" data-corrected-query="{}">{}</a>?</p>"#,
            html_escape(&href),
            html_escape(corrected),
            html_escape(corrected)
        ));
    }

    if count == 0 {
        html.push_str(r#"<p class="search-empty">Nothing found.</p>"#);
        return html;
    }

    match &documents.groups {
        Some(groups) => {
            for group in groups {
                html.push_str(&render_group(config, group, state));
            }
        }
        None => html.push_str(&render_list(config, &documents.results, state)),
    }
    html
}

fn render_group(config: &SearchPageConfig, group: &SearchResultGroup, state: &FilterState) -> String {
    format!(
        r#"<section class="search-group"><h3 class="search-group-name">{} <span class="badge">{}</span></h3>{}</section>"#,
        html_escape(&group.name),
        group.results.len(),
        render_list(config, &group.results, state)
    )
}

fn render_list(config: &SearchPageConfig, items: &[SearchResultDocumentItem], state: &FilterState) -> String {
    let rows: String = items.iter().map(|item| render_item(config, item, state)).collect();
    format!(r#"<ol class="search-result-list">{}</ol>"#, rows)
}

fn render_item(config: &SearchPageConfig, item: &SearchResultDocumentItem, state: &FilterState) -> String {
    let mut meta = item.authors.iter().map(|author| html_escape(author)).collect::<Vec<_>>().join(", ");
    if let Some(year) = item.year {
        if !meta.is_empty() {
            meta.push_str(" · ");
        }
        meta.push_str(&year.to_string());
    }

    let snippet = if item.snippet_spans.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="search-result-snippet">{}</p>"#, render_spans(&item.snippet_spans))
    };

    format!(
        r#"<li class="search-result" data-document-id="{}"><h4 class="search-result-title">{}<span class="search-result-score" data-toggle="tooltip" data-title="relevance {}"></span></h4><div class="search-result-meta">{}</div>{}{}</li>"#,
        html_escape(&item.document_id),
        render_spans(&item.title_spans),
        item.score,
        meta,
        snippet,
        render_topics(config, item, state)
    )
}

/// Topics as a tag cloud; the page weights the entries by `data-size`.
fn render_topics(config: &SearchPageConfig, item: &SearchResultDocumentItem, state: &FilterState) -> String {
    if item.topics.is_empty() {
        return String::new();
    }
    let entries: String = item
        .topics
        .iter()
        .map(|topic| {
            format!(
                r#"<li><a href="{}" data-size="{}" data-toggle="tooltip">{}</a></li>"#,
                html_escape(&search_link(config, &topic.name, state)),
                topic.weight,
                html_escape(&topic.name)
            )
        })
        .collect();
    format!(r#"<ul class="tagcloud" data-valprefix="{}">{}</ul>"#, html_escape(TOPIC_WEIGHT_PREFIX), entries)
}

fn render_spans(spans: &[HighlightTextSpan]) -> String {
    spans
        .iter()
        .map(|span| {
            if span.is_highlighted {
                format!(r#"<strong data-highlight-index="{}">{}</strong>"#, span.index, html_escape(&span.text))
            } else {
                html_escape(&span.text)
            }
        })
        .collect()
}

fn search_link(config: &SearchPageConfig, query_text: &str, state: &FilterState) -> String {
    config.shareable_url(&config.results_url(query_text, state))
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
