//! Mailings screen

use std::sync::Arc;

use cadence_client::resources::{Mailing, MailingsApi};
use cadence_client::{ApiClient, ErrorHandler};
use cadence_core::ListFilters;

use super::list_page::{ListPage, ListSnapshot};
use crate::components::MailingRow;

pub const EMPTY_MAILINGS: &str = "No mailings";

pub type EmailsPage = ListPage<MailingsApi>;

/// Mailings list, optionally scoped to a campaign and/or cadence
pub fn emails_page(
    client: ApiClient,
    scope: ListFilters,
    page_size: u32,
    errors: Arc<dyn ErrorHandler>,
) -> EmailsPage {
    ListPage::new(MailingsApi::new(client), scope, page_size, errors, EMPTY_MAILINGS)
}

pub fn mailing_rows(snapshot: &ListSnapshot<Mailing>) -> Vec<MailingRow> {
    snapshot.items.iter().map(MailingRow::new).collect()
}
