//! Debounced search dispatch with stale-response suppression.
//!
//! The dispatcher does no I/O of its own. [`SearchDispatcher::request_search`]
//! hands back a [`ScheduledSearch`] for the caller to put on a timer; when the timer
//! fires the caller passes the token to [`SearchDispatcher::timer_fired`] and
//! performs the returned [`SearchRequest`]; the response goes to
//! [`SearchDispatcher::complete`]. Page side effects go through [`SearchSurface`]
//! and [`ResultRenderer`].
//!
//! Phases: `Idle -> Debouncing -> InFlight -> Idle`, the outcome of the last
//! applied request being kept as [`SearchOutcome`].

use std::time::Duration;

use crate::control_binding::{ControlCommand, ControlSynchronizer, ControlUpdate};
use crate::filter_state::{FilterOverrides, FilterState, FilterStateStore};
use crate::search_error::{RenderError, SearchError};
use crate::search_page_config::SearchPageConfig;

/// Indicators, controls and history of the page hosting the search.
pub trait SearchSurface {
    fn set_loading(&mut self, visible: bool);
    fn set_error(&mut self, visible: bool);
    fn update_controls(&mut self, updates: &[ControlUpdate]);
    /// Path and query currently shown in the address bar.
    fn location(&self) -> String;
    /// Adds a history entry without navigating.
    fn push_history(&mut self, url: &str);
}

/// Puts a results fragment on the page.
pub trait ResultRenderer {
    fn render(&mut self, fragment: &str) -> Result<(), RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DebounceToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledSearch {
    pub token: DebounceToken,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub sequence: u64,
    pub state: FilterState,
    pub query_text: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Debouncing,
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone)]
struct InFlight {
    sequence: u64,
    url: String,
    /// Started by a history move: the address bar already shows this search.
    from_history: bool,
}

pub struct SearchDispatcher<S, R> {
    config: SearchPageConfig,
    store: FilterStateStore,
    controls: ControlSynchronizer,
    surface: S,
    renderer: R,
    query_text: String,
    last_token: u64,
    pending: Option<DebounceToken>,
    history_token: Option<DebounceToken>,
    last_sequence: u64,
    in_flight: Option<InFlight>,
    last_outcome: Option<SearchOutcome>,
}

impl<S: SearchSurface, R: ResultRenderer> SearchDispatcher<S, R> {
    /// Builds the dispatcher for a page showing `query_text` and `initial` filters,
    /// and brings the controls in line with them.
    pub fn new(config: SearchPageConfig, query_text: impl Into<String>, initial: FilterState, surface: S, renderer: R) -> Self {
        let controls = ControlSynchronizer::new(config.controls.clone());
        let mut dispatcher = Self {
            config,
            store: FilterStateStore::new(initial),
            controls,
            surface,
            renderer,
            query_text: query_text.into(),
            last_token: 0,
            pending: None,
            history_token: None,
            last_sequence: 0,
            in_flight: None,
            last_outcome: None,
        };
        dispatcher.sync_controls();
        dispatcher
    }

    pub fn config(&self) -> &SearchPageConfig {
        &self.config
    }

    pub fn state(&self) -> &FilterState {
        self.store.current_state()
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn controls(&self) -> &ControlSynchronizer {
        &self.controls
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn last_outcome(&self) -> Option<SearchOutcome> {
        self.last_outcome
    }

    pub fn phase(&self) -> SearchPhase {
        if self.pending.is_some() {
            SearchPhase::Debouncing
        } else if self.in_flight.is_some() {
            SearchPhase::InFlight
        } else {
            SearchPhase::Idle
        }
    }

    /// Merges `overrides`, refreshes the controls and restarts the debounce window.
    /// Any previously scheduled token becomes inert.
    pub fn request_search(&mut self, overrides: FilterOverrides, delay: Duration) -> ScheduledSearch {
        let merged = self.store.merge(&overrides);
        self.store.adopt(merged);
        self.sync_controls();

        self.surface.set_error(false);
        self.surface.set_loading(true);

        if let Some(previous) = self.pending.take() {
            tracing::debug!("search: cancelling debounce {:?}", previous);
        }
        self.last_token += 1;
        let token = DebounceToken(self.last_token);
        self.pending = Some(token);
        ScheduledSearch { token, delay }
    }

    /// Free-text input changed.
    pub fn input_changed(&mut self, query_text: impl Into<String>) -> ScheduledSearch {
        self.query_text = query_text.into();
        let delay = self.config.text_input_delay();
        self.request_search(FilterOverrides::new(), delay)
    }

    /// A bound control was clicked. Unknown controls schedule nothing.
    pub fn control_command(&mut self, command: &ControlCommand) -> Option<ScheduledSearch> {
        let overrides = self.controls.overrides_for(command)?;
        let delay = self.config.control_delay();
        Some(self.request_search(overrides, delay))
    }

    /// The address bar moved (back/forward or initial load): adopt its filters and
    /// query text, then search again right away. That search leaves history alone.
    pub fn history_navigated(&mut self, location: &str) -> ScheduledSearch {
        if let Some(query_text) = self.config.query_text_from_location(location) {
            self.query_text = query_text;
        }
        let query = location.split_once('?').map(|(_, query)| query).unwrap_or_default();
        self.store.replace_from_query(query);
        let scheduled = self.request_search(FilterOverrides::new(), Duration::ZERO);
        self.history_token = Some(scheduled.token);
        scheduled
    }

    /// Only the most recently scheduled token dispatches. Dispatching supersedes
    /// whatever request was still in flight.
    pub fn timer_fired(&mut self, token: DebounceToken) -> Option<SearchRequest> {
        if self.pending != Some(token) {
            tracing::debug!("search: ignoring cancelled debounce {:?}", token);
            return None;
        }
        self.pending = None;
        let from_history = self.history_token.take() == Some(token);

        self.last_sequence += 1;
        let sequence = self.last_sequence;
        let state = self.store.current_state().clone();
        let url = self.config.results_url(&self.query_text, &state);
        if let Some(previous) = self.in_flight.replace(InFlight { sequence, url: url.clone(), from_history }) {
            tracing::debug!("search: request #{} superseded by #{}", previous.sequence, sequence);
        }
        tracing::info!("search: dispatching #{} {}", sequence, url);
        Some(SearchRequest { sequence, state, query_text: self.query_text.clone(), url })
    }

    /// Applies the response of request `sequence`. Responses of superseded requests
    /// are dropped and return `None`.
    pub fn complete(&mut self, sequence: u64, response: Result<String, SearchError>) -> Option<SearchOutcome> {
        if self.in_flight.as_ref().map(|in_flight| in_flight.sequence) != Some(sequence) {
            tracing::debug!("search: discarding stale response #{}", sequence);
            return None;
        }
        let request = self.in_flight.take()?;

        let rendered = response.and_then(|fragment| self.renderer.render(&fragment).map_err(SearchError::from));
        let outcome = match rendered {
            Ok(()) => {
                self.surface.set_error(false);
                let shareable = self.config.shareable_url(&request.url);
                if !request.from_history && self.surface.location() != shareable {
                    self.surface.push_history(&shareable);
                }
                SearchOutcome::Succeeded
            }
            Err(err) => {
                tracing::warn!("search: request #{} failed: {}", sequence, err);
                self.surface.set_error(true);
                SearchOutcome::Failed
            }
        };
        if self.pending.is_none() {
            self.surface.set_loading(false);
        }
        self.last_outcome = Some(outcome);
        Some(outcome)
    }

    fn sync_controls(&mut self) {
        let updates = self.controls.apply(self.store.current_state());
        if !updates.is_empty() {
            self.surface.update_controls(&updates);
        }
    }
}
