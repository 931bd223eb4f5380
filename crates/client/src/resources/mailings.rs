//! Mailings resource

use async_trait::async_trait;
use cadence_core::{
    DeskResult, FieldError, MailingState, Validatable, require, require_email,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ListResource, Statistics};
use crate::client::{ApiClient, ApiResponse, Created};

/// A mailing row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mailing {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub from_email: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub to_email: String,
    #[serde(default)]
    pub lead_first_name: Option<String>,
    #[serde(default)]
    pub lead_last_name: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub mailing_status: MailingState,
    #[serde(default)]
    pub schedule_at: Option<DateTime<Utc>>,
}

impl Mailing {
    /// Recipient name, falling back to the address
    pub fn recipient(&self) -> String {
        let name = [&self.lead_first_name, &self.lead_last_name]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.to_email.clone()
        } else {
            name
        }
    }
}

/// Payload for creating a mailing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMailing {
    pub lead_id: String,
    pub owner_id: String,
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailing_status: Option<MailingState>,
}

impl Validatable for NewMailing {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "leadId", &self.lead_id, "Lead is required");
        require(&mut errors, "ownerId", &self.owner_id, "Owner is required");
        require_email(&mut errors, "fromEmail", &self.from_email);
        require_email(&mut errors, "toEmail", &self.to_email);
        require(&mut errors, "subject", &self.subject, "Subject is required");
        errors
    }
}

#[derive(Debug, Clone)]
pub struct MailingsApi {
    client: ApiClient,
}

impl MailingsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn statistics(&self) -> DeskResult<ApiResponse<Statistics>> {
        self.client.statistics(Self::RESOURCE).await
    }

    pub async fn create(&self, mailing: &NewMailing) -> DeskResult<ApiResponse<Created>> {
        mailing.validate()?;
        self.client.create(Self::RESOURCE, mailing).await
    }

    pub async fn send(&self, id: &str) -> DeskResult<()> {
        self.client.action(Self::RESOURCE, "send", id).await
    }
}

#[async_trait]
impl ListResource for MailingsApi {
    type Item = Mailing;
    const RESOURCE: &'static str = "mailings";

    fn client(&self) -> &ApiClient {
        &self.client
    }
}
