//! Row and control view models
//!
//! Widgets render these; nothing here draws anything.

pub mod call_item;
pub mod contact_item;
pub mod mailing_item;
pub mod pagination;

pub use call_item::CallRow;
pub use contact_item::{BadgeTone, ContactRow, MenuEntry, RowCommand};
pub use mailing_item::MailingRow;
pub use pagination::{PAGE_SIZE_CHOICES, PaginationView};
