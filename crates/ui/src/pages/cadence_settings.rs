//! Cadence settings screen
//!
//! Edits the name and owner of the cadence held in the [`CadenceContext`].
//! Owner choices come from the users endpoint; a saved cadence replaces the
//! context value so every other screen watching it sees the new name.

use std::sync::{Arc, Mutex, PoisonError};

use cadence_client::resources::{Cadence, CadenceUpdate, CadencesApi, SelectOption, User, UsersApi};
use cadence_client::{ApiClient, ErrorHandler, run_service};
use cadence_core::{DeskError, FieldError, Validatable};

use crate::state::CadenceContext;

/// Result of submitting the settings form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(Cadence),
    /// Nothing was sent
    Invalid(Vec<FieldError>),
    /// Sent and rejected; already reported to the error handler
    Failed,
}

pub struct CadenceSettingsPage {
    users: UsersApi,
    cadences: CadencesApi,
    cadence: CadenceContext,
    errors: Arc<dyn ErrorHandler>,
    owner_options: Mutex<Vec<SelectOption>>,
}

impl CadenceSettingsPage {
    pub fn new(client: ApiClient, cadence: CadenceContext, errors: Arc<dyn ErrorHandler>) -> Self {
        Self {
            users: UsersApi::new(client.clone()),
            cadences: CadencesApi::new(client),
            cadence,
            errors,
            owner_options: Mutex::new(Vec::new()),
        }
    }

    /// Fetch the owner select options
    pub async fn load_users(&self) {
        run_service(
            (),
            |_| self.users.list(),
            |users: Vec<User>| {
                let options = users.iter().map(SelectOption::from).collect();
                *self
                    .owner_options
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = options;
            },
            |status, error| self.errors.handle_error(status, &error),
        )
        .await;
    }

    pub fn owner_options(&self) -> Vec<SelectOption> {
        self.owner_options
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Form values to start from: the current cadence, or blanks
    pub fn initial_values(&self) -> CadenceUpdate {
        self.cadence
            .current()
            .as_ref()
            .map(CadenceUpdate::from_cadence)
            .unwrap_or_default()
    }

    /// Validate and save the form
    pub async fn submit(&self, values: CadenceUpdate) -> SubmitOutcome {
        let errors = values.field_errors();
        if !errors.is_empty() {
            return SubmitOutcome::Invalid(errors);
        }
        let Some(cadence_id) = self.cadence.current().map(|c| c.id) else {
            self.errors
                .handle_error(None, &DeskError::validation("no cadence is loaded"));
            return SubmitOutcome::Failed;
        };

        let mut saved = None;
        run_service(
            (cadence_id, values),
            |(id, update)| async move { self.cadences.update(&id, &update).await },
            |cadence: Cadence| saved = Some(cadence),
            |status, error| self.errors.handle_error(status, &error),
        )
        .await;

        match saved {
            Some(cadence) => {
                tracing::info!(cadence = %cadence.id, "cadence settings saved");
                self.cadence.set(Some(cadence.clone()));
                SubmitOutcome::Saved(cadence)
            }
            None => SubmitOutcome::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_client::Method;
    use cadence_client::testing::StubTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn cadence() -> Cadence {
        serde_json::from_value(json!({"id": "cad1", "name": "Q3", "ownerId": "u1"})).unwrap()
    }

    fn silent() -> Arc<dyn ErrorHandler> {
        Arc::new(|_: Option<u16>, _: &DeskError| {})
    }

    #[tokio::test]
    async fn test_load_users_builds_options() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(
            Method::Get,
            "/api/users",
            200,
            json!([{"id": "u1", "firstName": "Ada", "lastName": "Lovelace"}]),
        );
        let settings = CadenceSettingsPage::new(
            ApiClient::from_shared(stub.clone()),
            CadenceContext::default(),
            silent(),
        );
        settings.load_users().await;
        assert_eq!(
            settings.owner_options(),
            vec![SelectOption {
                name: "Ada Lovelace".into(),
                value: "u1".into()
            }]
        );
    }

    #[test]
    fn test_initial_values_follow_context() {
        let context = CadenceContext::default();
        let settings = CadenceSettingsPage::new(
            ApiClient::new(StubTransport::new()),
            context.clone(),
            silent(),
        );
        assert_eq!(settings.initial_values(), CadenceUpdate::default());

        context.set(Some(cadence()));
        assert_eq!(settings.initial_values().name, "Q3");
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let stub = Arc::new(StubTransport::new());
        let settings = CadenceSettingsPage::new(
            ApiClient::from_shared(stub.clone()),
            CadenceContext::new(Some(cadence())),
            silent(),
        );
        let outcome = settings
            .submit(CadenceUpdate {
                name: String::new(),
                owner_id: "u1".into(),
            })
            .await;
        assert_eq!(
            outcome,
            SubmitOutcome::Invalid(vec![FieldError::new("name", "Cadence name is required")])
        );
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_submit_replaces_context() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(
            Method::Put,
            "/api/cadences/cad1",
            200,
            json!({"id": "cad1", "name": "Renewals", "ownerId": "u2"}),
        );
        let context = CadenceContext::new(Some(cadence()));
        let mut rx = context.subscribe();
        let settings =
            CadenceSettingsPage::new(ApiClient::from_shared(stub.clone()), context.clone(), silent());

        let outcome = settings
            .submit(CadenceUpdate {
                name: "Renewals".into(),
                owner_id: "u2".into(),
            })
            .await;

        assert!(matches!(outcome, SubmitOutcome::Saved(_)));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().name, "Renewals");
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_context() {
        let stub = Arc::new(StubTransport::new());
        stub.respond(Method::Put, "/api/cadences/cad1", 403, json!({}));
        let context = CadenceContext::new(Some(cadence()));
        let settings =
            CadenceSettingsPage::new(ApiClient::from_shared(stub.clone()), context.clone(), silent());

        let outcome = settings
            .submit(CadenceUpdate {
                name: "Renewals".into(),
                owner_id: "u2".into(),
            })
            .await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(context.current().unwrap().name, "Q3");
    }
}
