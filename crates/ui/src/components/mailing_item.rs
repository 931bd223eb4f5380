//! Mailing row

use cadence_client::resources::Mailing;
use cadence_core::MailingState;
use serde::Serialize;

use super::BadgeTone;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailingRow {
    pub id: String,
    pub recipient: String,
    pub subject: String,
    pub state: &'static str,
    pub tone: BadgeTone,
    /// Short schedule date, e.g. "Aug 26"
    pub scheduled: Option<String>,
}

impl MailingRow {
    pub fn new(mailing: &Mailing) -> Self {
        Self {
            id: mailing.id.clone(),
            recipient: mailing.recipient(),
            subject: mailing.subject.clone(),
            state: mailing.mailing_status.display_name(),
            tone: tone_for(mailing.mailing_status),
            scheduled: mailing.schedule_at.map(|at| at.format("%b %d").to_string()),
        }
    }
}

fn tone_for(state: MailingState) -> BadgeTone {
    match state {
        MailingState::Delivered => BadgeTone::Success,
        MailingState::Scheduled => BadgeTone::Primary,
        MailingState::NotSent | MailingState::Bounced => BadgeTone::Danger,
        MailingState::Drafted | MailingState::NotOpened | MailingState::Unknown => {
            BadgeTone::Neutral
        }
    }
}
