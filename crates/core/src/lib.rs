//! # Cadence Core
//!
//! Core types, query building and error handling for Cadence Desk.
//!
//! - **Types**: step statuses and their action table, mailing states,
//!   user filters, pagination state
//! - **Query**: `FetchRequest` / `CountRequest` and the URL builders
//! - **Traits**: `Validatable` for forms
//! - **Errors**: `DeskError` and `DeskResult`
//!

pub mod error;
pub mod query;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{DeskError, DeskResult};
pub use query::{
    CountRequest, FetchRequest, ListFilters, QueryParams, build_filter_query, build_query,
};
pub use traits::{FieldError, Validatable, require, require_email};
pub use types::{
    DEFAULT_PAGE_SIZE, MailingState, PageChange, PageState, StepAction, StepStatus, UserFilter,
    UserRef,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
