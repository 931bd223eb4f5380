//! # Cadence UI
//!
//! Headless screens for Cadence Desk.
//!
//! Widgets are somebody else's job. This crate owns what they display and
//! when the backend gets asked:
//!
//! - **Controller**: the per-screen list state machine (`FirstRender` → `Ready`)
//! - **Pages**: list screens for calls, mailings and contacts, plus cadence settings
//! - **Components**: row view models, the contact action menu, pagination
//! - **State**: observable filter, cadence and status contexts
//!

// ============================================================================
// Modules
// ============================================================================

pub mod components;
pub mod controller;
pub mod pages;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use cadence_client;
pub use cadence_core;

pub use components::{
    BadgeTone, CallRow, ContactRow, MailingRow, MenuEntry, PAGE_SIZE_CHOICES, PaginationView,
    RowCommand,
};
pub use controller::{FetchPlan, ListController, Phase};
pub use pages::{
    CadenceSettingsPage, CallsPage, ContactsPage, EmailsPage, ListPage, ListSnapshot,
    SubmitOutcome,
};
pub use state::{
    CadenceContext, FilterConfig, FilterContext, StatusContext, StatusLevel, StatusMessage,
    StatusNotifier, Store,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
