//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, Set};
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::db::repositories::diet::DietRepository;
use crate::db::repositories::meal::MealRepository;
use crate::db::repositories::user::{self as user_repo, NewUser, UserRepository};
use crate::domain::normalize_email;
use crate::entities::users;
use crate::models::{Page, UserCreate, UserEdit, UserOut};
use crate::services::error::messages;
use crate::services::{ServiceError, UserService};

pub struct SeaOrmUserService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

/// Hashes off the async executor; Argon2 is deliberately slow.
pub(crate) async fn hash_password(
    password: String,
    security: &SecurityConfig,
) -> Result<String, ServiceError> {
    let security = security.clone();
    tokio::task::spawn_blocking(move || user_repo::hash_password(&password, &security))
        .await
        .map_err(|e| ServiceError::Internal(format!("Password hashing task failed: {e}")))?
        .map_err(ServiceError::from)
}

pub(crate) async fn verify_password(
    password: String,
    password_hash: String,
) -> Result<bool, ServiceError> {
    tokio::task::spawn_blocking(move || user_repo::verify_password(&password, &password_hash))
        .await
        .map_err(|e| ServiceError::Internal(format!("Password verification task failed: {e}")))?
        .map_err(ServiceError::from)
}

/// Validates and inserts a user plus its default diet profile.
///
/// Commits the transaction and returns the stored row, API key included.
pub(crate) async fn create_account(
    store: &Store,
    security: &SecurityConfig,
    payload: UserCreate,
) -> Result<users::Model, ServiceError> {
    let email = normalize_email(&payload.email)?;
    let password_hash = hash_password(payload.password, security).await?;

    let (_permit, txn) = store.begin_write().await?;
    let users_repo = UserRepository::new(&txn);

    if users_repo.email_taken(&email, None).await? {
        return Err(ServiceError::conflict(messages::EMAIL_TAKEN));
    }

    let user = users_repo
        .insert(NewUser {
            email,
            name: payload.name,
            password_hash,
            is_active: payload.is_active,
            is_superuser: payload.is_superuser,
            is_verified: payload.is_verified,
        })
        .await
        .map_err(|e| ServiceError::from_write(e, messages::EMAIL_TAKEN))?;

    DietRepository::new(&txn).insert_defaults(user.id).await?;
    txn.commit().await?;

    info!(user_id = user.id, superuser = user.is_superuser, "Created user");
    Ok(user)
}

async fn require_user<C: ConnectionTrait>(conn: &C, id: i32) -> Result<users::Model, ServiceError> {
    UserRepository::new(conn)
        .get_by_id(id)
        .await?
        .ok_or_else(ServiceError::user_not_found)
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn get_user(&self, id: i32) -> Result<UserOut, ServiceError> {
        let txn = self.store.begin().await?;
        let user = require_user(&txn, id).await?;
        txn.commit().await?;
        Ok(user.into())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserOut>, ServiceError> {
        let email = normalize_email(email)?;
        let txn = self.store.begin().await?;
        let user = UserRepository::new(&txn).get_by_email(&email).await?;
        txn.commit().await?;
        Ok(user.map(UserOut::from))
    }

    async fn list_users(&self, page: Page) -> Result<Vec<UserOut>, ServiceError> {
        let txn = self.store.begin().await?;
        let users = UserRepository::new(&txn)
            .list(page.offset, page.limit)
            .await?;
        txn.commit().await?;
        Ok(users.into_iter().map(UserOut::from).collect())
    }

    async fn search_users(&self, pattern: &str) -> Result<Vec<UserOut>, ServiceError> {
        let txn = self.store.begin().await?;
        let users = UserRepository::new(&txn).search_by_email(pattern).await?;
        txn.commit().await?;
        Ok(users.into_iter().map(UserOut::from).collect())
    }

    async fn create_user(&self, payload: UserCreate) -> Result<UserOut, ServiceError> {
        create_account(&self.store, &self.security, payload)
            .await
            .map(UserOut::from)
    }

    async fn edit_user(&self, id: i32, payload: UserEdit) -> Result<UserOut, ServiceError> {
        // A missing user answers 404 whatever the payload holds.
        require_user(&self.store.conn, id).await?;

        let email = payload
            .email
            .required("email")?
            .map(|raw| normalize_email(&raw))
            .transpose()?;
        let password = payload.password.required("password")?;
        let is_active = payload.is_active.required("is_active")?;
        let is_superuser = payload.is_superuser.required("is_superuser")?;
        let is_verified = payload.is_verified.required("is_verified")?;
        let name = payload.name.nullable();

        let password_hash = match password {
            Some(password) => Some(hash_password(password, &self.security).await?),
            None => None,
        };

        let (_permit, txn) = self.store.begin_write().await?;
        let users_repo = UserRepository::new(&txn);
        let current = require_user(&txn, id).await?;

        let mut active: users::ActiveModel = current.clone().into();
        if let Some(email) = email {
            if users_repo.email_taken(&email, Some(id)).await? {
                return Err(ServiceError::conflict(messages::EMAIL_TAKEN));
            }
            active.email = Set(email);
        }
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(hash) = password_hash {
            active.password_hash = Set(hash);
        }
        if let Some(flag) = is_active {
            active.is_active = Set(flag);
        }
        if let Some(flag) = is_superuser {
            active.is_superuser = Set(flag);
        }
        if let Some(flag) = is_verified {
            active.is_verified = Set(flag);
        }

        let user = users_repo
            .update(current, active)
            .await
            .map_err(|e| ServiceError::from_write(e, messages::EMAIL_TAKEN))?;
        txn.commit().await?;

        info!(user_id = id, "Updated user");
        Ok(user.into())
    }

    async fn delete_user(&self, id: i32) -> Result<UserOut, ServiceError> {
        let (_permit, txn) = self.store.begin_write().await?;
        let user = require_user(&txn, id).await?;

        let meals = MealRepository::new(&txn);
        let meal_ids = meals.ids_for_user(id).await?;
        meals.clear_ingredients(&meal_ids).await?;
        let removed_meals = meals.delete_for_user(id).await?;
        DietRepository::new(&txn).delete_for_user(id).await?;
        UserRepository::new(&txn).delete(id).await?;
        txn.commit().await?;

        info!(user_id = id, removed_meals, "Deleted user");
        Ok(user.into())
    }

    async fn ensure_superuser(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserOut>, ServiceError> {
        let normalized = normalize_email(email)?;
        if UserRepository::new(&self.store.conn)
            .get_by_email(&normalized)
            .await?
            .is_some()
        {
            return Ok(None);
        }

        let payload = UserCreate {
            is_superuser: true,
            is_verified: true,
            ..UserCreate::new(normalized, password)
        };

        match create_account(&self.store, &self.security, payload).await {
            Ok(user) => Ok(Some(user.into())),
            // Lost a race against a concurrent registration.
            Err(ServiceError::Conflict(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
