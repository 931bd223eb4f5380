//! Core traits for Cadence Desk
//!
//! Forms (cadence settings, new call, new mailing) implement [`Validatable`]
//! so the pages can check them before anything goes over the wire.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DeskError, DeskResult};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

// ============================================================================
// Field Errors
// ============================================================================

/// A validation message attached to one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<FieldError> for DeskError {
    fn from(err: FieldError) -> Self {
        DeskError::field(err.field, err.message)
    }
}

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for form values that can be validated
///
/// # Example
///
/// ```rust,ignore
/// use cadence_core::{FieldError, Validatable, require};
///
/// struct Rename { name: String }
///
/// impl Validatable for Rename {
///     fn field_errors(&self) -> Vec<FieldError> {
///         let mut errors = Vec::new();
///         require(&mut errors, "name", &self.name, "Name is required");
///         errors
///     }
/// }
/// ```
pub trait Validatable {
    /// Every failing field, in form order
    fn field_errors(&self) -> Vec<FieldError>;

    /// Validate the current state, reporting the first failing field
    fn validate(&self) -> DeskResult<()> {
        match self.field_errors().into_iter().next() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Check if the value is valid without returning error details
    fn is_valid(&self) -> bool {
        self.field_errors().is_empty()
    }

    /// Message for a single field, if it failed
    fn error_for(&self, field: &str) -> Option<String> {
        self.field_errors()
            .into_iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }
}

/// Record `message` when `value` is blank
pub fn require(errors: &mut Vec<FieldError>, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, message));
    }
}

/// Record an error when `value` is blank or not shaped like an address
pub fn require_email(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{field} is required")));
    } else if !EMAIL_RE.is_match(value.trim()) {
        errors.push(FieldError::new(field, "Invalid email address"));
    }
}

// ============================================================================
// Tests
// ============================================================================
