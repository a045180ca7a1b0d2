//! Search page configuration bundled with the app.

use common::search_page_config::SearchPageConfig;
use dioxus::logger::tracing;

const SEARCH_PAGE_CONFIG_JSON: &str = include_str!("../../assets/search_page_config.json");

pub fn search_page_config() -> SearchPageConfig {
    SearchPageConfig::from_json(SEARCH_PAGE_CONFIG_JSON).unwrap_or_else(|e| {
        tracing::error!("search_page_config.json is invalid, using defaults: {}", e);
        SearchPageConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_parses() {
        let config = SearchPageConfig::from_json(SEARCH_PAGE_CONFIG_JSON).unwrap();
        assert_eq!(config.search_base_url, "/search_results/%s");
        assert_eq!(config.text_input_delay_ms, 1000);
        assert_eq!(config.controls.len(), 2);
    }
}
