//! Users resource and the owner select options built from it

use cadence_core::{DeskResult, UserRef};
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, ApiResponse};

const RESOURCE: &str = "users";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// "First Last", trimmed
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Reference for the "from user" filter
    pub fn to_ref(&self) -> UserRef {
        UserRef::new(&self.id, self.display_name())
    }
}

/// An entry of a select input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
    pub value: String,
}

impl From<&User> for SelectOption {
    fn from(user: &User) -> Self {
        Self {
            name: user.display_name(),
            value: user.id.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> DeskResult<ApiResponse<Vec<User>>> {
        self.client.get_all(RESOURCE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: &str, last: &str) -> User {
        User {
            id: "u1".into(),
            first_name: first.into(),
            last_name: last.into(),
            email: None,
        }
    }

    #[test]
    fn test_select_option_from_user() {
        let option = SelectOption::from(&user("Ada", "Lovelace"));
        assert_eq!(option.name, "Ada Lovelace");
        assert_eq!(option.value, "u1");
    }

    #[test]
    fn test_display_name_without_last_name() {
        assert_eq!(user("Ada", "").display_name(), "Ada");
        assert_eq!(user("Ada", "").to_ref().label, "Ada");
    }
}
