//! Contacts-in-cadence screen
//!
//! A list page plus the row actions. A successful action re-fetches the
//! current page; a failed one goes to the error handler and leaves the rows
//! as they were.

use std::sync::Arc;

use cadence_client::resources::{ContactInCadence, ContactsApi};
use cadence_client::{ApiClient, ErrorHandler, run_service};
use cadence_core::{ListFilters, StepAction, StepStatus};

use super::list_page::{ListPage, ListSnapshot};
use crate::components::{ContactRow, RowCommand};

pub const EMPTY_CONTACTS: &str = "No contacts";

pub struct ContactsPage {
    list: ListPage<ContactsApi>,
}

impl ContactsPage {
    /// Contacts enrolled in `cadence_id`
    pub fn new(
        client: ApiClient,
        cadence_id: &str,
        page_size: u32,
        errors: Arc<dyn ErrorHandler>,
    ) -> Self {
        let scope = ListFilters::new().cadence(cadence_id);
        Self {
            list: ListPage::new(
                ContactsApi::new(client),
                scope,
                page_size,
                errors,
                EMPTY_CONTACTS,
            ),
        }
    }

    pub fn list(&self) -> &ListPage<ContactsApi> {
        &self.list
    }

    pub fn snapshot(&self) -> ListSnapshot<ContactInCadence> {
        self.list.snapshot()
    }

    pub fn rows(&self) -> Vec<ContactRow> {
        self.snapshot().items.iter().map(ContactRow::new).collect()
    }

    /// Move a step to `status`; returns whether the backend accepted it
    pub async fn update_step(&self, step_id: &str, status: StepStatus) -> bool {
        let api = self.list.source();
        let mut accepted = false;
        run_service(
            (step_id, status),
            |(id, status)| async move { api.update_status(id, &status).await },
            |()| accepted = true,
            |code, error| self.list.errors().handle_error(code, &error),
        )
        .await;
        if accepted {
            self.list.refresh().await;
        }
        accepted
    }

    /// Take a step out of the cadence; returns whether the backend accepted it
    pub async fn remove_step(&self, step_id: &str) -> bool {
        let api = self.list.source();
        let mut accepted = false;
        run_service(
            step_id,
            |id| async move { api.remove(id).await },
            |()| accepted = true,
            |code, error| self.list.errors().handle_error(code, &error),
        )
        .await;
        if accepted {
            self.list.refresh().await;
        }
        accepted
    }

    /// Run a menu action chosen on `row`
    pub async fn perform(&self, row: &ContactRow, action: StepAction) -> bool {
        match row.command(action) {
            RowCommand::Update { step_id, status } => self.update_step(&step_id, status).await,
            RowCommand::Remove { step_id } => self.remove_step(&step_id).await,
        }
    }
}
