//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::db::repositories::user::UserRepository;
use crate::domain::{Principal, normalize_email};
use crate::entities::users;
use crate::models::UserCreate;
use crate::services::error::messages;
use crate::services::user_service_impl::{create_account, verify_password};
use crate::services::{AuthService, LoginResult, ServiceError};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

fn unauthorized(msg: &str) -> ServiceError {
    ServiceError::Unauthorized(msg.to_string())
}

fn active_principal(user: Option<users::Model>) -> Result<Principal, ServiceError> {
    let user = user.ok_or_else(|| unauthorized(messages::INVALID_CREDENTIALS))?;
    if !user.is_active {
        return Err(unauthorized(messages::INACTIVE_USER));
    }
    Ok(Principal::new(user.id, user.is_superuser))
}

fn login_result(user: users::Model) -> LoginResult {
    LoginResult {
        api_key: user.api_key.clone(),
        user: user.into(),
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, ServiceError> {
        let Ok(email) = normalize_email(email) else {
            return Err(unauthorized(messages::INCORRECT_LOGIN));
        };

        let user = UserRepository::new(&self.store.conn)
            .get_by_email(&email)
            .await?
            .ok_or_else(|| unauthorized(messages::INCORRECT_LOGIN))?;

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            tracing::debug!(user_id = user.id, "Rejected login: wrong password");
            return Err(unauthorized(messages::INCORRECT_LOGIN));
        }
        if !user.is_active {
            return Err(unauthorized(messages::INACTIVE_USER));
        }

        tracing::info!(user_id = user.id, "User logged in");
        Ok(login_result(user))
    }

    async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
    ) -> Result<LoginResult, ServiceError> {
        let payload = UserCreate {
            name,
            ..UserCreate::new(email, password)
        };
        let user = create_account(&self.store, &self.security, payload).await?;
        Ok(login_result(user))
    }

    async fn principal_for_api_key(&self, api_key: &str) -> Result<Principal, ServiceError> {
        let user = UserRepository::new(&self.store.conn)
            .get_by_api_key(api_key)
            .await?;
        active_principal(user)
    }

    async fn principal_for_user_id(&self, user_id: i32) -> Result<Principal, ServiceError> {
        let user = UserRepository::new(&self.store.conn)
            .get_by_id(user_id)
            .await?;
        active_principal(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Patch, UserEdit};
    use crate::services::test_support::{fast_security, test_store};
    use crate::services::{SeaOrmUserService, UserService};

    #[tokio::test]
    async fn test_signup_then_login() {
        let auth = SeaOrmAuthService::new(test_store().await, fast_security());
        let signed_up = auth
            .signup("dana@example.com", "hunter22", Some("Dana".to_string()))
            .await
            .unwrap();
        assert_eq!(signed_up.api_key.len(), 64);
        assert!(!signed_up.user.is_superuser);

        let logged_in = auth.login("dana@example.com", "hunter22").await.unwrap();
        assert_eq!(logged_in.api_key, signed_up.api_key);

        let principal = auth.principal_for_api_key(&signed_up.api_key).await.unwrap();
        assert_eq!(principal, Principal::new(signed_up.user.id, false));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let auth = SeaOrmAuthService::new(test_store().await, fast_security());
        auth.signup("dana@example.com", "hunter22", None).await.unwrap();

        for (email, password) in [("dana@example.com", "nope"), ("ghost@example.com", "x")] {
            let err = auth.login(email, password).await.unwrap_err();
            assert!(matches!(
                err,
                ServiceError::Unauthorized(ref m) if m == "Incorrect email or password"
            ));
        }
    }

    #[tokio::test]
    async fn test_inactive_user_is_rejected() {
        let store = test_store().await;
        let auth = SeaOrmAuthService::new(store.clone(), fast_security());
        let account = auth.signup("eve@example.com", "pw", None).await.unwrap();

        SeaOrmUserService::new(store, fast_security())
            .edit_user(
                account.user.id,
                UserEdit {
                    is_active: Patch::Value(false),
                    ..UserEdit::default()
                },
            )
            .await
            .unwrap();

        let err = auth.principal_for_api_key(&account.api_key).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(ref m) if m == "Inactive user"));
        let err = auth.login("eve@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(ref m) if m == "Inactive user"));
    }

    #[tokio::test]
    async fn test_unknown_api_key() {
        let auth = SeaOrmAuthService::new(test_store().await, fast_security());
        let err = auth.principal_for_api_key("deadbeef").await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Unauthorized(ref m) if m == "Could not validate credentials"
        ));
    }
}
