//! Error taxonomy shared by the data-access services.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::domain::EmailError;
use crate::models::NullField;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    /// Authenticated, but not entitled to act on this particular resource.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<NullField> for ServiceError {
    fn from(err: NullField) -> Self {
        Self::BadRequest(format!("Field '{}' may not be null", err.0))
    }
}

impl From<EmailError> for ServiceError {
    fn from(err: EmailError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl ServiceError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    #[must_use]
    pub fn user_not_found() -> Self {
        Self::not_found(messages::USER_NOT_FOUND)
    }

    #[must_use]
    pub fn ingredient_not_found() -> Self {
        Self::not_found(messages::INGREDIENT_NOT_FOUND)
    }

    #[must_use]
    pub fn meal_not_found() -> Self {
        Self::not_found(messages::MEAL_NOT_FOUND)
    }

    #[must_use]
    pub fn insufficient_privileges() -> Self {
        Self::Forbidden(messages::NOT_ENOUGH_PRIVILEGES.to_string())
    }

    /// Maps a write failure, turning a unique-index violation into `conflict`.
    pub fn from_write(err: DbErr, conflict: &str) -> Self {
        if is_unique_violation(&err) {
            Self::conflict(conflict)
        } else {
            Self::from(err)
        }
    }
}

#[must_use]
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Client-facing messages.
pub mod messages {
    pub const USER_NOT_FOUND: &str = "User not found";
    pub const DIET_NOT_FOUND: &str = "Diet requirements not found";
    pub const INGREDIENT_NOT_FOUND: &str = "Ingredient not found";
    pub const MEAL_NOT_FOUND: &str = "Meal not found";

    pub const EMAIL_TAKEN: &str = "Email already registered";
    pub const INGREDIENT_NAME_TAKEN: &str = "Ingredient with this name already exists";
    pub const MEAL_NAME_TAKEN: &str = "Meal with this name already exists";

    pub const MEAL_EDIT_DENIED: &str = "You are not authorized to edit this meal";
    pub const MEAL_DELETE_DENIED: &str = "You are not authorized to delete this meal";

    pub const NOT_ENOUGH_PRIVILEGES: &str = "The user doesn't have enough privileges";
    pub const INVALID_CREDENTIALS: &str = "Could not validate credentials";
    pub const INACTIVE_USER: &str = "Inactive user";
    pub const INCORRECT_LOGIN: &str = "Incorrect email or password";
}
