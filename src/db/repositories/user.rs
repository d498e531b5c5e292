use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::contains_literal;
use crate::config::SecurityConfig;
use crate::entities::{prelude::*, users};

/// Fields needed to insert a user row. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
}

pub struct UserRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<users::Model>, DbErr> {
        Users::find_by_id(id).one(self.conn).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        Users::find()
            .filter(users::Column::Email.eq(email))
            .one(self.conn)
            .await
    }

    pub async fn get_by_api_key(&self, api_key: &str) -> Result<Option<users::Model>, DbErr> {
        Users::find()
            .filter(users::Column::ApiKey.eq(api_key))
            .one(self.conn)
            .await
    }

    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<users::Model>, DbErr> {
        Users::find()
            .order_by_asc(users::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.conn)
            .await
    }

    pub async fn search_by_email(&self, pattern: &str) -> Result<Vec<users::Model>, DbErr> {
        Users::find()
            .filter(contains_literal(users::Column::Email, pattern))
            .order_by_asc(users::Column::Id)
            .all(self.conn)
            .await
    }

    /// True when some user other than `exclude` already owns `email`.
    pub async fn email_taken(&self, email: &str, exclude: Option<i32>) -> Result<bool, DbErr> {
        let mut query = Users::find().filter(users::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(users::Column::Id.ne(id));
        }
        Ok(query.one(self.conn).await?.is_some())
    }

    pub async fn insert(&self, user: NewUser) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().to_rfc3339();

        users::ActiveModel {
            email: Set(user.email),
            name: Set(user.name),
            password_hash: Set(user.password_hash),
            api_key: Set(generate_api_key()),
            is_active: Set(user.is_active),
            is_superuser: Set(user.is_superuser),
            is_verified: Set(user.is_verified),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    /// Persists the changed columns of `active`, bumping `updated_at`.
    /// Returns the stored row untouched when nothing changed.
    pub async fn update(
        &self,
        current: users::Model,
        mut active: users::ActiveModel,
    ) -> Result<users::Model, DbErr> {
        if !active.is_changed() {
            return Ok(current);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(self.conn).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        Users::delete_by_id(id).exec(self.conn).await?;
        Ok(())
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Check `password` against a stored PHC hash string.
///
/// The cost parameters are read back from the hash itself.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))
        .context("Stored password hash is unreadable")?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Generate a random API key (64 character hex string)
#[must_use]
pub fn generate_api_key() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_security() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("correct horse", &fast_security()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("same", &fast_security()).unwrap();
        let b = hash_password("same", &fast_security()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(verify_password("pw", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_generate_api_key() {
        let key = generate_api_key();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(key, generate_api_key());
    }
}
