//! Shared state for the desk screens
//!
//! Screens do not read ambient globals. Anything shared between a screen and
//! its surroundings (the filter panel, the cadence being edited, the status
//! line) lives in a [`Store`]: an observable value backed by a
//! `tokio::sync::watch` channel. Subscribing hands out a receiver; dropping
//! the receiver unsubscribes.

use std::sync::Arc;

use cadence_client::resources::Cadence;
use cadence_client::{ErrorHandler, TracingErrorHandler};
use cadence_core::{DeskError, ListFilters, QueryParams, UserFilter};
use tokio::sync::watch;

// ============================================================================
// Store
// ============================================================================

/// Observable value shared between a producer and any number of listeners
#[derive(Debug)]
pub struct Store<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone> Store<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx: Arc::new(tx) }
    }

    /// Listen for changes; the receiver starts at the current value
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Replace the value and notify listeners
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Modify the value in place and notify listeners
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Clone of the current value
    pub fn current(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Number of live receivers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

// ============================================================================
// Filter Context
// ============================================================================

/// State of a list screen's filter panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Whether the filter panel is shown
    pub is_open: bool,
    pub search: String,
    pub from_user: UserFilter,
    pub params: QueryParams,
}

impl FilterConfig {
    /// Layer the panel's filters over a screen's fixed scope
    pub fn apply_to(&self, scope: &ListFilters) -> ListFilters {
        let mut filters = scope.clone();
        filters.from_user = self.from_user.clone();
        filters.search = (!self.search.is_empty()).then(|| self.search.clone());
        filters
    }
}

/// Filter panel state shared by a list screen and its panel
pub type FilterContext = Store<FilterConfig>;

impl Store<FilterConfig> {
    pub fn toggle_panel(&self) {
        self.update(|config| config.is_open = !config.is_open);
    }

    pub fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.update(|config| config.search = search);
    }

    pub fn set_from_user(&self, users: impl Into<UserFilter>) {
        let users = users.into();
        self.update(|config| config.from_user = users);
    }

    pub fn set_param(&self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        self.update(|config| {
            config.params.insert(key, value);
        });
    }

    pub fn remove_param(&self, key: &str) {
        self.update(|config| {
            config.params.remove(key);
        });
    }

    /// Reset every filter, keeping the panel open or closed
    pub fn clear(&self) {
        self.update(|config| {
            *config = FilterConfig {
                is_open: config.is_open,
                ..FilterConfig::default()
            }
        });
    }
}

/// The cadence currently open in the settings screens
pub type CadenceContext = Store<Option<Cadence>>;

// ============================================================================
// Status Line
// ============================================================================

/// Status message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, StatusLevel::Error)
    }
}

/// Latest status message, if any
pub type StatusContext = Store<Option<StatusMessage>>;

/// Error handler that logs and posts the failure to a status line
#[derive(Debug, Clone, Default)]
pub struct StatusNotifier {
    status: StatusContext,
}

impl StatusNotifier {
    pub fn new(status: StatusContext) -> Self {
        Self { status }
    }

    pub fn status(&self) -> &StatusContext {
        &self.status
    }
}

impl ErrorHandler for StatusNotifier {
    fn handle_error(&self, status: Option<u16>, error: &DeskError) {
        TracingErrorHandler.handle_error(status, error);
        let text = match status {
            Some(401) => "Your session has expired. Please sign in again.".to_string(),
            Some(404) => "The requested record no longer exists.".to_string(),
            _ => error.to_string(),
        };
        self.status.set(Some(StatusMessage::error(text)));
    }
}

// ============================================================================
// Tests
// ============================================================================
