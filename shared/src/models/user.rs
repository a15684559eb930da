//! Session models for the demo login

use serde::{Deserialize, Serialize};

/// Login request; the role is taken verbatim
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str, role: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        }
    }

    /// No real authentication: any non-empty username and password pass
    pub fn is_present(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

/// The signed-in dashboard user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub username: String,
    pub role: String,
    pub display_name: String,
}
