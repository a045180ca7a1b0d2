use common::control_binding::ControlSynchronizer;
use dioxus::prelude::*;

use crate::components::error_boundary::ComponentErrorBoundary;
use crate::components::search_components::search_input_top_bar::SearchInputTopBar;
use crate::components::search_components::search_results_panel::SearchResultsPanel;
use crate::components::search_components::switch_controls::SwitchControls;
use crate::data_definitions::filter_query::FilterQuery;
use crate::data_definitions::search_page_config::search_page_config;
use crate::search_pipeline::dom_surface::SearchPageSignals;
use crate::search_pipeline::search_driver::SearchDriver;

fn title_ellipsis(title: &str) -> String {
    if title.chars().count() > 20 {
        title.chars().take(18).collect::<String>() + "..."
    } else {
        title.to_string()
    }
}

/// Search page for `/search/<query>?<filters>`.
#[component]
pub fn SearchPage(query: String, filters: FilterQuery) -> Element {
    rsx! {
        Title { "Search: {title_ellipsis(&query)}" }
        SearchPageRootComponent { query, filters }
    }
}

/// `/search` with no query text: every document matches.
#[component]
pub fn SearchAllPage(filters: FilterQuery) -> Element {
    rsx! {
        SearchPage { query: String::new(), filters }
    }
}

#[component]
fn SearchPageRootComponent(query: String, filters: FilterQuery) -> Element {
    let config = use_hook(search_page_config);
    let loading = use_signal(|| false);
    let error = use_signal(|| false);
    // Seeded with the initial visuals so building the dispatcher writes nothing during render.
    let controls = use_signal(|| ControlSynchronizer::new(config.controls.clone()).projected(&filters.0));
    let query_text = use_signal(|| query.clone());
    let driver = use_context_provider(|| {
        let signals = SearchPageSignals { loading, error, controls, query_text };
        SearchDriver::new(config.clone(), signals, query, filters.0)
    });

    // Client only: the first search reads the address bar, later ones follow history moves.
    use_effect(move || {
        driver.history_navigated();
        driver.watch_history();
    });

    rsx! {
        div {
            id: "x-search-page-root-component",
            style: r#"
                height: 100%;
                width: 100%;
                display: flex;
                flex-direction: column;
            "#,
            div {
                id: "x-search-input-top-bar",
                style: "
                    border-bottom: 1px solid rgb(164, 164, 164);
                    background-color: #F8FCFF;
                    flex-shrink: 0;
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    height: 76px;
                    width: 100%;
                ",
                SearchInputTopBar {}
                ComponentErrorBoundary { SwitchControls {} }
            }
            div {
                id: "x-search-results-bottom-space",
                style: r#"
                    width: 100%;
                    flex-grow: 1;
                    max-height: calc(100% - 76px);
                    background-color: #ECEEF2;
                "#,
                SearchResultsPanel {}
            }
        }
    }
}
