//! Contacts enrolled in a cadence
//!
//! Status changes go through `POST /api/contacts/<subaction>/<stepId>`; the
//! step id (`cadenceStepId`) is the only identifier actions use.

use async_trait::async_trait;
use cadence_core::{DeskError, DeskResult, StepStatus};
use serde::{Deserialize, Serialize};

use super::ListResource;
use crate::client::ApiClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInCadence {
    /// Empty when the backend omits it
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub cadence_step_id: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub last_name: String,
    /// `Other("")` when missing, which offers the generic menu
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub current_step_status: StepStatus,
    #[serde(default)]
    pub cadence_current_step: Option<u32>,
    #[serde(default)]
    pub lead_status: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub owner_first_name: Option<String>,
    #[serde(default)]
    pub owner_last_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ContactsApi {
    client: ApiClient,
}

impl ContactsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Move a step into `status`
    pub async fn update_status(&self, step_id: &str, status: &StepStatus) -> DeskResult<()> {
        let subaction = status.subaction().ok_or_else(|| {
            DeskError::validation(format!("cannot move a step to status '{status}'"))
        })?;
        self.client.action(Self::RESOURCE, subaction, step_id).await
    }

    /// Take a contact out of its cadence
    pub async fn remove(&self, step_id: &str) -> DeskResult<()> {
        self.client.action(Self::RESOURCE, "remove", step_id).await
    }
}

#[async_trait]
impl ListResource for ContactsApi {
    type Item = ContactInCadence;
    const RESOURCE: &'static str = "contacts";

    fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;
    use crate::transport::Method;
    use cadence_core::{FetchRequest, ListFilters};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn api(stub: &Arc<StubTransport>) -> ContactsApi {
        ContactsApi::new(ApiClient::from_shared(stub.clone()))
    }

    #[tokio::test]
    async fn test_status_subactions() {
        let stub = Arc::new(StubTransport::new());
        for sub in ["pause", "resume", "done", "finish"] {
            stub.respond(Method::Post, &format!("/api/contacts/{sub}/s1"), 200, Value::Null);
        }
        let contacts = api(&stub);
        for status in [
            StepStatus::Paused,
            StepStatus::Active,
            StepStatus::Done,
            StepStatus::Finished,
        ] {
            contacts.update_status("s1", &status).await.unwrap();
        }

        let paths: Vec<String> = stub.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "/api/contacts/pause/s1",
                "/api/contacts/resume/s1",
                "/api/contacts/done/s1",
                "/api/contacts/finish/s1",
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_target_status_is_rejected_locally() {
        let stub = Arc::new(StubTransport::new());
        let err = api(&stub)
            .update_status("s1", &StepStatus::Other("queued".into()))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_remove() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(Method::Post, "/api/contacts/remove/s2", 200, Value::Null);
        api(&stub).remove("s2").await.unwrap();
        assert_eq!(stub.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_sparse_row_does_not_fail_the_page() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(
            Method::Get,
            "/api/contacts",
            200,
            json!([
                {"cadenceStepId": "s1", "firstName": "Ada", "currentStepStatus": "active"},
                {"firstName": null, "lastName": "Byron", "currentStepStatus": "paused"},
                {"cadenceStepId": "s3", "currentStepStatus": null}
            ]),
        );
        let rows = api(&stub).list(FetchRequest::new(0, 10)).await.unwrap().data;

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].cadence_step_id, "");
        assert_eq!(rows[1].first_name, "");
        assert_eq!(rows[1].current_step_status, StepStatus::Paused);
        assert_eq!(rows[2].current_step_status, StepStatus::Other(String::new()));
    }

    #[tokio::test]
    async fn test_list_scoped_to_cadence() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(
            Method::Get,
            "/api/contacts",
            200,
            json!([{"cadenceStepId": "s1", "firstName": "Ada", "currentStepStatus": "active"}]),
        );
        let request = FetchRequest::new(0, 10).with_filters(ListFilters::new().cadence("cad1"));
        let rows = api(&stub).list(request).await.unwrap().data;
        assert_eq!(rows[0].current_step_status, StepStatus::Active);
        assert_eq!(
            stub.requests()[0].path,
            "/api/contacts?offset=0&limit=10&cadenceId=cad1"
        );
    }
}
