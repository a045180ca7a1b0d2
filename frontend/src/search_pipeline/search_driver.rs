//! Runs the dispatcher's timers and requests as dioxus tasks.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use common::control_binding::ControlCommand;
use common::filter_state::FilterState;
use common::search_dispatcher::{DebounceToken, ScheduledSearch, SearchDispatcher, SearchSurface};
use dioxus::core::Task;
use common::search_page_config::SearchPageConfig;
use dioxus::logger::tracing;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::api::search_api::fetch_search_fragment;
use crate::search_pipeline::dom_renderer::DomResultRenderer;
use crate::search_pipeline::dom_surface::{HistoryWatcher, SearchPageSignals, SignalSurface};

type PageDispatcher = SearchDispatcher<SignalSurface, DomResultRenderer>;

/// Shared handle to the page's dispatcher. Cloning shares the same dispatcher.
#[derive(Clone)]
pub struct SearchDriver {
    dispatcher: Rc<RefCell<PageDispatcher>>,
    signals: SearchPageSignals,
    /// The pending debounce; replaced, and so cancelled, by every new schedule.
    timer: Rc<RefCell<Option<Task>>>,
}

impl PartialEq for SearchDriver {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.dispatcher, &other.dispatcher)
    }
}

impl SearchDriver {
    pub fn new(config: SearchPageConfig, signals: SearchPageSignals, query_text: String, initial: FilterState) -> Self {
        let renderer = DomResultRenderer::new(common::search_const::RESULTS_CONTAINER_ID);
        let dispatcher = SearchDispatcher::new(config, query_text, initial, SignalSurface::new(signals), renderer);
        Self { dispatcher: Rc::new(RefCell::new(dispatcher)), signals, timer: Rc::new(RefCell::new(None)) }
    }

    pub fn signals(&self) -> SearchPageSignals {
        self.signals
    }

    pub fn config(&self) -> SearchPageConfig {
        self.dispatcher.borrow().config().clone()
    }

    /// Keystroke in the search box: search once typing pauses.
    pub fn input_changed(&self, query_text: String) {
        let scheduled = self.dispatcher.borrow_mut().input_changed(query_text);
        self.schedule(scheduled);
    }

    /// Enter in the search box: search right away.
    pub fn search_now(&self, query_text: String) {
        let scheduled = self.dispatcher.borrow_mut().input_changed(query_text);
        self.schedule(ScheduledSearch { delay: Duration::ZERO, ..scheduled });
    }

    pub fn control_command(&self, command: ControlCommand) {
        let scheduled = self.dispatcher.borrow_mut().control_command(&command);
        if let Some(scheduled) = scheduled {
            self.schedule(scheduled);
        }
    }

    /// Re-reads filters and query text from the address bar and searches.
    pub fn history_navigated(&self) {
        let scheduled = {
            let mut dispatcher = self.dispatcher.borrow_mut();
            let location = dispatcher.surface().location();
            dispatcher.history_navigated(&location)
        };
        let query_text = self.dispatcher.borrow().query_text().to_string();
        let mut query_signal = self.signals.query_text;
        if *query_signal.peek() != query_text {
            query_signal.set(query_text);
        }
        self.schedule(scheduled);
    }

    /// Searches again on every back/forward move for as long as the page lives.
    pub fn watch_history(&self) {
        let driver = self.clone();
        spawn(async move {
            let mut watcher = HistoryWatcher::start();
            while let Some(location) = watcher.next().await {
                tracing::debug!("history: moved to {}", location);
                driver.history_navigated();
            }
        });
    }

    fn schedule(&self, scheduled: ScheduledSearch) {
        let driver = self.clone();
        let task = spawn(async move {
            if !scheduled.delay.is_zero() {
                TimeoutFuture::new(scheduled.delay.as_millis() as u32).await;
            }
            driver.fire(scheduled.token);
        });
        if let Some(previous) = self.timer.borrow_mut().replace(task) {
            previous.cancel();
        }
    }

    /// Sends the request in its own task so later debounces cannot cancel it.
    fn fire(&self, token: DebounceToken) {
        let Some(request) = self.dispatcher.borrow_mut().timer_fired(token) else {
            return;
        };
        let driver = self.clone();
        spawn(async move {
            let response = fetch_search_fragment(&request.url).await;
            driver.dispatcher.borrow_mut().complete(request.sequence, response);
        });
    }
}
