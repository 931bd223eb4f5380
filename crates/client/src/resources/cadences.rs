//! Cadences resource

use cadence_core::{DeskResult, FieldError, Validatable, require};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, ApiResponse};

const RESOURCE: &str = "cadences";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cadence {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Settings form payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CadenceUpdate {
    pub name: String,
    pub owner_id: String,
}

impl CadenceUpdate {
    /// Form values seeded from an existing cadence
    pub fn from_cadence(cadence: &Cadence) -> Self {
        Self {
            name: cadence.name.clone(),
            owner_id: cadence.owner_id.clone(),
        }
    }
}

impl Validatable for CadenceUpdate {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name, "Cadence name is required");
        require(&mut errors, "ownerId", &self.owner_id, "Assignee is required");
        errors
    }
}

#[derive(Debug, Clone)]
pub struct CadencesApi {
    client: ApiClient,
}

impl CadencesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> DeskResult<ApiResponse<Cadence>> {
        self.client.get_one(RESOURCE, id).await
    }

    /// Validate and save the settings of cadence `id`
    pub async fn update(&self, id: &str, update: &CadenceUpdate) -> DeskResult<ApiResponse<Cadence>> {
        update.validate()?;
        self.client.update(RESOURCE, id, update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;
    use crate::transport::Method;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_update_validation_messages() {
        let update = CadenceUpdate::default();
        assert_eq!(
            update.error_for("name"),
            Some("Cadence name is required".to_string())
        );
        assert_eq!(
            update.error_for("ownerId"),
            Some("Assignee is required".to_string())
        );
    }

    #[tokio::test]
    async fn test_update_puts_camel_case_body() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(
            Method::Put,
            "/api/cadences/cad1",
            200,
            json!({"id": "cad1", "name": "Renewals", "ownerId": "u2"}),
        );
        let api = CadencesApi::new(ApiClient::from_shared(stub.clone()));
        let update = CadenceUpdate {
            name: "Renewals".into(),
            owner_id: "u2".into(),
        };
        let cadence = api.update("cad1", &update).await.unwrap().data;

        assert_eq!(cadence.owner_id, "u2");
        assert_eq!(
            stub.requests()[0].body,
            Some(json!({"name": "Renewals", "ownerId": "u2"}))
        );
    }

    #[tokio::test]
    async fn test_get() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(
            Method::Get,
            "/api/cadences/cad1",
            200,
            json!({"id": "cad1", "name": "Q3 outbound"}),
        );
        let api = CadencesApi::new(ApiClient::from_shared(stub));
        let cadence = api.get("cad1").await.unwrap().data;
        assert_eq!(cadence.name, "Q3 outbound");
        assert_eq!(cadence.owner_id, "");
    }
}
