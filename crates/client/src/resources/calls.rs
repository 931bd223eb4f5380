//! Calls resource

use async_trait::async_trait;
use cadence_core::{
    DeskResult, FieldError, MailingState, Validatable, require, require_email,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ListResource, Statistics};
use crate::client::{ApiClient, ApiResponse, Created};

/// A call task as listed on the calls screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Call {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(rename = "type", deserialize_with = "super::null_as_default")]
    pub call_type: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub priority: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub assignee: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub due_date: String,
}

/// Payload for creating a call (with its follow-up email)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCall {
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
    pub call_status: Option<MailingState>,
}

impl Validatable for NewCall {
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
pub struct CallsApi {
    client: ApiClient,
}

impl CallsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn statistics(&self) -> DeskResult<ApiResponse<Statistics>> {
        self.client.statistics(Self::RESOURCE).await
    }

    /// Validate and create a call
    pub async fn create(&self, call: &NewCall) -> DeskResult<ApiResponse<Created>> {
        call.validate()?;
        self.client.create(Self::RESOURCE, call).await
    }

    /// Send a call's email now
    pub async fn send(&self, id: &str) -> DeskResult<()> {
        self.client.action(Self::RESOURCE, "send", id).await
    }
}

#[async_trait]
impl ListResource for CallsApi {
    type Item = Call;
    const RESOURCE: &'static str = "calls";

    fn client(&self) -> &ApiClient {
        &self.client
    }
}
