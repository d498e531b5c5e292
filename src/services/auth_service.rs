//! Domain service for authentication.
//!
//! Resolves credentials (password, API key, session user id) into a
//! [`Principal`] and handles self-service signup.

use serde::Serialize;

use crate::domain::Principal;
use crate::models::UserOut;
use crate::services::ServiceError;

/// A user together with the API key that authenticates it.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user: UserOut,
    pub api_key: String,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] on bad credentials or an
    /// inactive account.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, ServiceError>;

    /// Registers a regular, active, unverified user.
    async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<LoginResult, ServiceError>;

    async fn principal_for_api_key(&self, api_key: &str) -> Result<Principal, ServiceError>;

    async fn principal_for_user_id(&self, user_id: i32) -> Result<Principal, ServiceError>;
}
