//! Error banner, loading indicator and the container results are rendered into.

use common::search_const::{ERROR_INDICATOR_ID, LOADING_INDICATOR_ID, RESULTS_CONTAINER_ID};
use dioxus::prelude::*;

use crate::components::loading_indicator::LoadingIndicator;
use crate::search_pipeline::search_driver::SearchDriver;

#[component]
pub fn SearchResultsPanel() -> Element {
    let driver = use_context::<SearchDriver>();
    let signals = driver.signals();
    let loading = signals.loading;
    let error = signals.error;
    rsx! {
        div {
            id: "x-search-results-panel",
            style: "
                height: 100%;
                width: 100%;
                overflow-y: auto;
                padding: 7px 16px;
                box-sizing: border-box;
            ",
            div {
                id: ERROR_INDICATOR_ID,
                class: "alert alert-danger",
                hidden: !error(),
                "Search failed. Try again in a moment."
            }
            div {
                id: LOADING_INDICATOR_ID,
                hidden: !loading(),
                LoadingIndicator {}
            }
            // Filled with server-rendered fragments outside of dioxus; must stay childless here.
            div { id: RESULTS_CONTAINER_ID, class: "search-results" }
        }
    }
}
