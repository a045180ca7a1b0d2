//! Page indicators, control visuals and history, as seen by the dispatcher.

use std::collections::BTreeMap;

use common::control_binding::{ControlUpdate, ControlVisual};
use common::search_dispatcher::SearchSurface;
use dioxus::logger::tracing;
use dioxus::prelude::*;
use wasm_bindgen::JsValue;

/// Signals the search page renders from. Written by [`SignalSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchPageSignals {
    pub loading: Signal<bool>,
    pub error: Signal<bool>,
    pub controls: Signal<BTreeMap<String, ControlVisual>>,
    /// Text of the search input.
    pub query_text: Signal<String>,
}

pub struct SignalSurface {
    signals: SearchPageSignals,
}

impl SignalSurface {
    pub fn new(signals: SearchPageSignals) -> Self {
        Self { signals }
    }
}

impl SearchSurface for SignalSurface {
    fn set_loading(&mut self, visible: bool) {
        if *self.signals.loading.peek() != visible {
            self.signals.loading.set(visible);
        }
    }

    fn set_error(&mut self, visible: bool) {
        if *self.signals.error.peek() != visible {
            self.signals.error.set(visible);
        }
    }

    fn update_controls(&mut self, updates: &[ControlUpdate]) {
        let changed: Vec<&ControlUpdate> = {
            let shown = self.signals.controls.peek();
            updates.iter().filter(|update| shown.get(&update.control_id) != Some(&update.visual)).collect()
        };
        if changed.is_empty() {
            return;
        }
        let mut controls = self.signals.controls.write();
        for update in changed {
            controls.insert(update.control_id.clone(), update.visual.clone());
        }
    }

    fn location(&self) -> String {
        let Some(window) = web_sys::window() else {
            return String::new();
        };
        let location = window.location();
        let path = location.pathname().unwrap_or_default();
        let search = location.search().unwrap_or_default();
        format!("{}{}", path, search)
    }

    fn push_history(&mut self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let result = window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(url)));
        if let Err(e) = result {
            tracing::error!("push_history: {:?}", e);
        }
    }
}

/// Forwards every `popstate` to the page. Only one listener is installed at a time:
/// starting a watcher replaces the previous listener, and a listener that fires
/// after the results container is gone removes itself.
const POPSTATE_LISTENER_JS: &str = r#"
    const previous = window.__searchPopstateListener;
    if (previous) {
        window.removeEventListener("popstate", previous);
    }
    const listener = () => {
        if (!document.getElementById("search-results")) {
            window.removeEventListener("popstate", listener);
            if (window.__searchPopstateListener === listener) {
                window.__searchPopstateListener = null;
            }
            return;
        }
        dioxus.send(window.location.pathname + window.location.search);
    };
    window.__searchPopstateListener = listener;
    window.addEventListener("popstate", listener);
"#;

/// Reports back/forward moves through the browser history.
pub struct HistoryWatcher {
    eval: document::Eval,
}

impl HistoryWatcher {
    pub fn start() -> Self {
        Self { eval: document::eval(POPSTATE_LISTENER_JS) }
    }

    /// The new location, or `None` once the page is gone.
    pub async fn next(&mut self) -> Option<String> {
        self.eval.recv::<String>().await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popstate_listener_replaces_previous_one() {
        let remove = POPSTATE_LISTENER_JS.find("removeEventListener(\"popstate\", previous)").unwrap();
        let add = POPSTATE_LISTENER_JS.find("addEventListener(\"popstate\", listener)").unwrap();
        assert!(remove < add);
        assert_eq!(POPSTATE_LISTENER_JS.matches(".addEventListener(").count(), 1);
    }

    #[test]
    fn popstate_listener_is_tied_to_results_container() {
        let container = format!("getElementById(\"{}\")", common::search_const::RESULTS_CONTAINER_ID);
        assert!(POPSTATE_LISTENER_JS.contains(&container));
    }
}
