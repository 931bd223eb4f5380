//! Core types used throughout Cadence Desk
//!
//! Status enumerations, user references for filters, and the pagination
//! state shared by every list screen.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// User References
// ============================================================================

/// A user picked in a filter select (value = user id, label = display name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub value: String,
    pub label: String,
}

impl UserRef {
    /// Create a new user reference
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Reference with the id doubling as label
    pub fn from_id(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// The "from user" filter: nothing, a single user, or a multi-select
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserFilter {
    #[default]
    None,
    One(UserRef),
    Many(Vec<UserRef>),
}

impl UserFilter {
    /// User ids in selection order
    pub fn ids(&self) -> Vec<&str> {
        match self {
            UserFilter::None => Vec::new(),
            UserFilter::One(user) => vec![user.value.as_str()],
            UserFilter::Many(users) => users.iter().map(|u| u.value.as_str()).collect(),
        }
    }

    /// Check if no user is selected
    pub fn is_empty(&self) -> bool {
        match self {
            UserFilter::None => true,
            UserFilter::One(_) => false,
            UserFilter::Many(users) => users.is_empty(),
        }
    }
}

impl From<Vec<UserRef>> for UserFilter {
    fn from(users: Vec<UserRef>) -> Self {
        match users.len() {
            0 => UserFilter::None,
            _ => UserFilter::Many(users),
        }
    }
}

impl From<UserRef> for UserFilter {
    fn from(user: UserRef) -> Self {
        UserFilter::One(user)
    }
}

// ============================================================================
// Cadence Step Status
// ============================================================================

/// Lifecycle state of a contact's current cadence step
///
/// Travels over the wire as its lowercase name. Anything the backend sends
/// that is not one of the known states is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StepStatus {
    Active,
    Paused,
    Finished,
    Done,
    Other(String),
}

impl StepStatus {
    /// Wire name of this status
    pub fn as_str(&self) -> &str {
        match self {
            StepStatus::Active => "active",
            StepStatus::Paused => "paused",
            StepStatus::Finished => "finished",
            StepStatus::Done => "done",
            StepStatus::Other(other) => other,
        }
    }

    /// Actions the row menu offers for this status
    pub fn available_actions(&self) -> &'static [StepAction] {
        use StepAction::*;
        match self {
            StepStatus::Active => &[Pause, MarkDone, MarkFinished, Remove],
            StepStatus::Paused => &[Resume, MarkDone, MarkFinished, Remove],
            StepStatus::Finished => &[Remove],
            StepStatus::Done | StepStatus::Other(_) => &[MarkDone, MarkFinished, Remove],
        }
    }

    /// Endpoint segment used to move a step into this status
    pub fn subaction(&self) -> Option<&'static str> {
        match self {
            StepStatus::Active => Some("resume"),
            StepStatus::Paused => Some("pause"),
            StepStatus::Finished => Some("finish"),
            StepStatus::Done => Some("done"),
            StepStatus::Other(_) => None,
        }
    }
}

impl Default for StepStatus {
    /// Unknown status with an empty name
    fn default() -> Self {
        StepStatus::Other(String::new())
    }
}

impl From<String> for StepStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => StepStatus::Active,
            "paused" => StepStatus::Paused,
            "finished" => StepStatus::Finished,
            "done" => StepStatus::Done,
            _ => StepStatus::Other(value),
        }
    }
}

impl From<StepStatus> for String {
    fn from(status: StepStatus) -> Self {
        match status {
            StepStatus::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for StepStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(StepStatus::from(s.trim().to_lowercase()))
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Step Actions
// ============================================================================

/// An entry of the contact row's action menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepAction {
    Pause,
    Resume,
    MarkDone,
    MarkFinished,
    Remove,
}

impl StepAction {
    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            StepAction::Pause => "Pause sequence now",
            StepAction::Resume => "Resume sequence now",
            StepAction::MarkDone => "Mark as done",
            StepAction::MarkFinished => "Mark as finished",
            StepAction::Remove => "Remove from cadence",
        }
    }

    /// Status the step moves to, `None` for removal
    pub fn target_status(&self) -> Option<StepStatus> {
        match self {
            StepAction::Pause => Some(StepStatus::Paused),
            StepAction::Resume => Some(StepStatus::Active),
            StepAction::MarkDone => Some(StepStatus::Done),
            StepAction::MarkFinished => Some(StepStatus::Finished),
            StepAction::Remove => None,
        }
    }
}

// ============================================================================
// Mailing State
// ============================================================================

/// Delivery state of a mailing (or of a call's follow-up email)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailingState {
    Drafted,
    Scheduled,
    Delivered,
    NotSent,
    Bounced,
    NotOpened,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MailingState {
    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            MailingState::Drafted => "Drafted",
            MailingState::Scheduled => "Scheduled",
            MailingState::Delivered => "Delivered",
            MailingState::NotSent => "Not sent",
            MailingState::Bounced => "Bounced",
            MailingState::NotOpened => "Not opened",
            MailingState::Unknown => "Unknown",
        }
    }
}

// ============================================================================
// Pagination State
// ============================================================================

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page size and number emitted together by the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub page_size: u32,
    pub page_number: u32,
}

impl PageChange {
    pub fn new(page_size: u32, page_number: u32) -> Self {
        Self {
            page_size,
            page_number,
        }
    }
}

/// Pagination state of one list screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page number
    pub page_number: u32,
    /// Rows per page, never zero
    pub page_size: u32,
    /// Total rows reported by the count endpoint
    pub total_count: u64,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
        }
    }
}

impl PageState {
    /// Create a new page state with the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page state with a custom page size
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    /// Row offset of the current page
    pub fn offset(&self) -> u64 {
        u64::from(self.page_size) * u64::from(self.page_number.saturating_sub(1))
    }

    /// Adopt both values of a pagination change at once
    pub fn apply(&mut self, change: PageChange) {
        self.page_size = change.page_size.max(1);
        self.page_number = change.page_number.max(1);
    }

    /// Number of pages needed for `total_count` rows
    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.page_size.max(1)))
    }
}

// ============================================================================
// Tests
// ============================================================================
