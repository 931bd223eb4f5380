//! List screen controller
//!
//! A [`ListController`] owns the inputs of one list screen (page number, page
//! size, filter configuration) and the data derived from the backend (current
//! rows, total count). It performs no IO: every change that should reach the
//! server produces a [`FetchPlan`], and the page driver reports results back
//! through [`ListController::apply_rows`] / [`ListController::apply_count`].
//!
//! The controller starts in [`Phase::FirstRender`]. Mounting moves it to
//! [`Phase::Ready`] without planning a fetch; input changes received before
//! mounting are stored but never produce a plan.
//!
//! Each plan carries a generation number. Results tagged with anything other
//! than the latest generation are dropped, so a slow response to an old
//! filter can never overwrite a newer one.

use cadence_core::{CountRequest, FetchRequest, ListFilters, PageChange, PageState};

use crate::state::FilterConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    FirstRender,
    Ready,
}

/// The pair of requests one input change asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub generation: u64,
    pub rows: FetchRequest,
    pub count: CountRequest,
}

#[derive(Debug, Clone)]
pub struct ListController<T> {
    phase: Phase,
    /// Filters fixed by the screen (campaign / cadence scope)
    scope: ListFilters,
    filter: FilterConfig,
    page: PageState,
    items: Vec<T>,
    generation: u64,
}

impl<T: Clone> ListController<T> {
    pub fn new(scope: ListFilters, page_size: u32) -> Self {
        Self {
            phase: Phase::FirstRender,
            scope,
            filter: FilterConfig::default(),
            page: PageState::with_page_size(page_size),
            items: Vec::new(),
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Leave the first-render phase; never plans a fetch
    pub fn mount(&mut self) {
        if self.phase == Phase::FirstRender {
            tracing::debug!("list mounted");
            self.phase = Phase::Ready;
        }
    }

    /// Adopt a new filter configuration
    pub fn set_filter(&mut self, filter: FilterConfig) -> Option<FetchPlan> {
        self.filter = filter;
        self.plan()
    }

    /// Adopt a pagination change (size and number together)
    pub fn change_page(&mut self, change: PageChange) -> Option<FetchPlan> {
        self.page.apply(change);
        self.plan()
    }

    /// Re-request the current page
    pub fn refresh(&mut self) -> Option<FetchPlan> {
        self.plan()
    }

    /// Row request for the current inputs
    pub fn current_request(&self) -> FetchRequest {
        FetchRequest::for_page(&self.page)
            .with_filters(self.filter.apply_to(&self.scope))
            .with_params(self.filter.params.clone())
    }

    fn plan(&mut self) -> Option<FetchPlan> {
        if self.phase == Phase::FirstRender {
            return None;
        }
        self.generation += 1;
        let rows = self.current_request();
        let count = rows.count_request();
        tracing::debug!(
            generation = self.generation,
            offset = rows.offset,
            limit = rows.limit,
            "planned fetch"
        );
        Some(FetchPlan {
            generation: self.generation,
            rows,
            count,
        })
    }

    /// Replace the rows if `generation` is still current
    pub fn apply_rows(&mut self, generation: u64, rows: Vec<T>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.items = rows;
        true
    }

    /// Store the total count if `generation` is still current
    pub fn apply_count(&mut self, generation: u64, count: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.page.total_count = count;
        true
    }

    fn is_current(&self, generation: u64) -> bool {
        let current = generation == self.generation;
        if !current {
            tracing::debug!(
                generation,
                latest = self.generation,
                "dropping superseded result"
            );
        }
        current
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
