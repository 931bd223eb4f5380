//! Generic paged list screen
//!
//! [`ListPage`] wires a [`ListController`] to a [`ListResource`]: every plan
//! the controller emits is executed as two concurrent service calls (rows and
//! total count), each writing its own slice of state on success and handing
//! failures to the screen's error handler. Nothing is rolled back on failure.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cadence_client::{ErrorHandler, ListResource, TotalCount, run_service};
use cadence_core::{ListFilters, PageChange, PageState};
use tokio::sync::watch;

use crate::components::PaginationView;
use crate::controller::{FetchPlan, ListController, Phase};
use crate::state::FilterConfig;

/// What a list screen shows at one instant
#[derive(Debug, Clone)]
pub struct ListSnapshot<T> {
    pub phase: Phase,
    pub items: Vec<T>,
    pub page: PageState,
    pub pagination: PaginationView,
    pub empty_message: &'static str,
}

impl<T> ListSnapshot<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub struct ListPage<S: ListResource> {
    source: S,
    controller: Mutex<ListController<S::Item>>,
    errors: Arc<dyn ErrorHandler>,
    empty_message: &'static str,
}

impl<S: ListResource> ListPage<S> {
    pub fn new(
        source: S,
        scope: ListFilters,
        page_size: u32,
        errors: Arc<dyn ErrorHandler>,
        empty_message: &'static str,
    ) -> Self {
        Self {
            source,
            controller: Mutex::new(ListController::new(scope, page_size)),
            errors,
            empty_message,
        }
    }

    fn controller(&self) -> MutexGuard<'_, ListController<S::Item>> {
        self.controller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn errors(&self) -> &dyn ErrorHandler {
        self.errors.as_ref()
    }

    pub fn mount(&self) {
        self.controller().mount();
    }

    pub async fn set_filter(&self, filter: FilterConfig) {
        let plan = self.controller().set_filter(filter);
        self.execute(plan).await;
    }

    pub async fn change_page(&self, change: PageChange) {
        let plan = self.controller().change_page(change);
        self.execute(plan).await;
    }

    pub async fn refresh(&self) {
        let plan = self.controller().refresh();
        self.execute(plan).await;
    }

    /// Re-fetch on every filter change until the context goes away
    pub async fn follow_filters(&self, mut filters: watch::Receiver<FilterConfig>) {
        while filters.changed().await.is_ok() {
            let filter = filters.borrow_and_update().clone();
            self.set_filter(filter).await;
        }
        tracing::debug!("filter context closed");
    }

    async fn execute(&self, plan: Option<FetchPlan>) {
        let Some(FetchPlan {
            generation,
            rows,
            count,
        }) = plan
        else {
            return;
        };

        let fetch_rows = run_service(
            rows,
            |request| self.source.list(request),
            |items: Vec<S::Item>| {
                self.controller().apply_rows(generation, items);
            },
            |status, error| self.errors.handle_error(status, &error),
        );
        let fetch_count = run_service(
            count,
            |request| self.source.total_count(request),
            |total: TotalCount| {
                self.controller().apply_count(generation, total.count);
            },
            |status, error| self.errors.handle_error(status, &error),
        );
        tokio::join!(fetch_rows, fetch_count);
    }

    pub fn snapshot(&self) -> ListSnapshot<S::Item> {
        let controller = self.controller();
        let page = controller.page();
        ListSnapshot {
            phase: controller.phase(),
            items: controller.items().to_vec(),
            page,
            pagination: PaginationView::new(&page),
            empty_message: self.empty_message,
        }
    }
}
