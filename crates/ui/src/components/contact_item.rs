//! Contact row and its status action menu

use cadence_client::resources::ContactInCadence;
use cadence_core::{StepAction, StepStatus};
use serde::Serialize;

/// Colour family of the status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BadgeTone {
    Primary,
    Danger,
    Success,
    Neutral,
}

impl BadgeTone {
    pub fn for_status(status: &StepStatus) -> Self {
        match status {
            StepStatus::Active => BadgeTone::Primary,
            StepStatus::Paused => BadgeTone::Danger,
            StepStatus::Finished => BadgeTone::Success,
            StepStatus::Done | StepStatus::Other(_) => BadgeTone::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub action: StepAction,
    pub label: &'static str,
}

/// What choosing a menu entry asks the screen to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowCommand {
    Update { step_id: String, status: StepStatus },
    Remove { step_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    /// `cadenceStepId`; every action targets it
    pub step_id: String,
    pub name: String,
    pub status: StepStatus,
    pub tone: BadgeTone,
    pub step_label: Option<String>,
    pub lead_status: Option<String>,
    /// "title @ company"
    pub headline: Option<String>,
    pub owner: Option<String>,
}

impl ContactRow {
    pub fn new(contact: &ContactInCadence) -> Self {
        let status = contact.current_step_status.clone();
        Self {
            step_id: contact.cadence_step_id.clone(),
            name: join_name(&contact.first_name, &contact.last_name),
            tone: BadgeTone::for_status(&status),
            status,
            step_label: contact.cadence_current_step.map(|step| format!("Step {step}")),
            lead_status: contact.lead_status.clone(),
            headline: headline(contact.job_title.as_deref(), contact.company_name.as_deref()),
            owner: Some(join_name(
                contact.owner_first_name.as_deref().unwrap_or_default(),
                contact.owner_last_name.as_deref().unwrap_or_default(),
            ))
            .filter(|name| !name.is_empty()),
        }
    }

    pub fn menu(&self) -> Vec<MenuEntry> {
        self.status
            .available_actions()
            .iter()
            .map(|&action| MenuEntry {
                action,
                label: action.label(),
            })
            .collect()
    }

    pub fn command(&self, action: StepAction) -> RowCommand {
        let step_id = self.step_id.clone();
        match action.target_status() {
            Some(status) => RowCommand::Update { step_id, status },
            None => RowCommand::Remove { step_id },
        }
    }

    /// Dispatch `action` to the screen's update or delete callback
    pub fn invoke(
        &self,
        action: StepAction,
        on_update: impl FnOnce(&str, StepStatus),
        on_delete: impl FnOnce(&str),
    ) {
        match self.command(action) {
            RowCommand::Update { step_id, status } => on_update(&step_id, status),
            RowCommand::Remove { step_id } => on_delete(&step_id),
        }
    }
}

fn join_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}

fn headline(title: Option<&str>, company: Option<&str>) -> Option<String> {
    let title = title.map(str::trim).filter(|s| !s.is_empty());
    let company = company.map(str::trim).filter(|s| !s.is_empty());
    match (title, company) {
        (Some(title), Some(company)) => Some(format!("{title} @ {company}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}
