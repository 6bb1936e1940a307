use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The signed-in user, as returned by signup/login and kept in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub username: String,
    #[serde(
        default,
        rename = "profilePicture",
        alias = "avatarUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl User {
    /// Name to show, falling back to the username.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.username
        } else {
            &self.name
        }
    }
}

/// Persisted credentials: bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Account creation form.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub username: String,
    pub mobile: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("Name is required".to_string()));
        }
        if self.username.trim().is_empty() {
            return Err(DomainError::Validation("Username is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(DomainError::Validation("Password is required".to_string()));
        }
        if self.password != self.confirm_password {
            return Err(DomainError::Validation(
                "Passwords do not match".to_string(),
            ));
        }
        Ok(())
    }
}
