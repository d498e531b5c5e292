use serde::{Deserialize, Serialize};

use super::Patch;
use crate::entities::users;

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_verified: bool,
}

impl UserCreate {
    /// A regular, active, unverified account.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: None,
            is_active: true,
            is_superuser: false,
            is_verified: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserEdit {
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub password: Patch<String>,
    #[serde(default)]
    pub is_active: Patch<bool>,
    #[serde(default)]
    pub is_superuser: Patch<bool>,
    #[serde(default)]
    pub is_verified: Patch<bool>,
}

impl UserEdit {
    /// Whether the payload touches a flag only superusers may change.
    #[must_use]
    pub const fn touches_privileged_flags(&self) -> bool {
        !(self.is_active.is_absent()
            && self.is_superuser.is_absent()
            && self.is_verified.is_absent())
    }
}

/// Outward view of a user. Carries neither the password hash nor the API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserOut {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
}

impl From<users::Model> for UserOut {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            is_active: model.is_active,
            is_superuser: model.is_superuser,
            is_verified: model.is_verified,
        }
    }
}
