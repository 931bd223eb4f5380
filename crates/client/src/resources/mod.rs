//! Resource APIs
//!
//! One module per backend resource. List screens only need the
//! [`ListResource`] half (rows + total count); the rest of each API is
//! resource specific.

pub mod cadences;
pub mod calls;
pub mod contacts;
pub mod mailings;
pub mod users;

use async_trait::async_trait;
use cadence_core::{CountRequest, DeskResult, FetchRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::{ApiClient, ApiResponse, TotalCount};

pub use cadences::{Cadence, CadenceUpdate, CadencesApi};
pub use calls::{Call, CallsApi, NewCall};
pub use contacts::{ContactInCadence, ContactsApi};
pub use mailings::{Mailing, MailingsApi, NewMailing};
pub use users::{SelectOption, User, UsersApi};

/// A resource that can back a paged list screen
#[async_trait]
pub trait ListResource: Send + Sync {
    type Item: DeserializeOwned + Clone + Send + Sync + 'static;

    /// Path segment under `/api`
    const RESOURCE: &'static str;

    fn client(&self) -> &ApiClient;

    async fn list(&self, request: FetchRequest) -> DeskResult<ApiResponse<Vec<Self::Item>>> {
        self.client().list(Self::RESOURCE, &request).await
    }

    async fn total_count(&self, request: CountRequest) -> DeskResult<ApiResponse<TotalCount>> {
        self.client().total_count(Self::RESOURCE, &request).await
    }
}

/// Field deserializer mapping `null` (and, with `#[serde(default)]`, absence)
/// to the type's default, so one sparse row cannot fail a whole page
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Delivery counters reported by `/statistics`
///
/// Every counter is optional; the backend omits the ones it does not track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub total_count: Option<u64>,
    pub drafted_count: Option<u64>,
    pub scheduled_count: Option<u64>,
    pub delivered_count: Option<u64>,
    pub not_sent_count: Option<u64>,
    pub bounced_count: Option<u64>,
    pub not_opened_count: Option<u64>,
}

impl Statistics {
    /// `(label, value)` pairs for the counters that are present
    pub fn entries(&self) -> Vec<(&'static str, u64)> {
        [
            ("Total", self.total_count),
            ("Drafted", self.drafted_count),
            ("Scheduled", self.scheduled_count),
            ("Delivered", self.delivered_count),
            ("Not sent", self.not_sent_count),
            ("Bounced", self.bounced_count),
            ("Not opened", self.not_opened_count),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }
}
