//! Screens
//!
//! Each list screen is a [`ListPage`] over one resource; the contacts screen
//! adds row actions and the settings screen edits the current cadence.

pub mod cadence_settings;
pub mod calls;
pub mod contacts;
pub mod emails;
pub mod list_page;

pub use cadence_settings::{CadenceSettingsPage, SubmitOutcome};
pub use calls::{CallsPage, EMPTY_CALLS, call_rows, calls_page};
pub use contacts::{ContactsPage, EMPTY_CONTACTS};
pub use emails::{EMPTY_MAILINGS, EmailsPage, emails_page, mailing_rows};
pub use list_page::{ListPage, ListSnapshot};
