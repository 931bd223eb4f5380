//! Calls screen

use std::sync::Arc;

use cadence_client::resources::{Call, CallsApi};
use cadence_client::{ApiClient, ErrorHandler};
use cadence_core::ListFilters;

use super::list_page::{ListPage, ListSnapshot};
use crate::components::CallRow;

pub const EMPTY_CALLS: &str = "No calls";

pub type CallsPage = ListPage<CallsApi>;

pub fn calls_page(
    client: ApiClient,
    scope: ListFilters,
    page_size: u32,
    errors: Arc<dyn ErrorHandler>,
) -> CallsPage {
    ListPage::new(CallsApi::new(client), scope, page_size, errors, EMPTY_CALLS)
}

pub fn call_rows(snapshot: &ListSnapshot<Call>) -> Vec<CallRow> {
    snapshot.items.iter().map(CallRow::new).collect()
}
