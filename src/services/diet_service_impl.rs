//! `SeaORM` implementation of the `DietService` trait.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, Set};
use tracing::info;

use crate::db::Store;
use crate::db::repositories::diet::DietRepository;
use crate::db::repositories::user::UserRepository;
use crate::entities::user_diet_requirements;
use crate::models::{DietRequirementsEdit, DietRequirementsOut};
use crate::services::error::messages;
use crate::services::{DietService, ServiceError};

pub struct SeaOrmDietService {
    store: Store,
}

impl SeaOrmDietService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

async fn require_profile<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
) -> Result<user_diet_requirements::Model, ServiceError> {
    if UserRepository::new(conn).get_by_id(user_id).await?.is_none() {
        return Err(ServiceError::user_not_found());
    }

    DietRepository::new(conn)
        .get_by_user(user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found(messages::DIET_NOT_FOUND))
}

#[async_trait]
impl DietService for SeaOrmDietService {
    async fn get_diet_requirements(
        &self,
        user_id: i32,
    ) -> Result<DietRequirementsOut, ServiceError> {
        let txn = self.store.begin().await?;
        let profile = require_profile(&txn, user_id).await?;
        txn.commit().await?;
        Ok(profile.into())
    }

    async fn edit_diet_requirements(
        &self,
        user_id: i32,
        payload: DietRequirementsEdit,
    ) -> Result<DietRequirementsOut, ServiceError> {
        let vegetarian = payload.is_vegetarian.required("is_vegetarian")?;
        let vegan = payload.is_vegan.required("is_vegan")?;
        let gluten_free = payload.is_gluten_free.required("is_gluten_free")?;
        let dairy_free = payload.is_dairy_free.required("is_dairy_free")?;
        let nut_free = payload.is_nut_free.required("is_nut_free")?;
        let shellfish_free = payload.is_shellfish_free.required("is_shellfish_free")?;
        let pescatarian = payload.is_pescatarian.required("is_pescatarian")?;

        let (_permit, txn) = self.store.begin_write().await?;
        let current = require_profile(&txn, user_id).await?;

        let mut active: user_diet_requirements::ActiveModel = current.clone().into();
        if let Some(flag) = vegetarian {
            active.is_vegetarian = Set(flag);
        }
        if let Some(flag) = vegan {
            active.is_vegan = Set(flag);
        }
        if let Some(flag) = gluten_free {
            active.is_gluten_free = Set(flag);
        }
        if let Some(flag) = dairy_free {
            active.is_dairy_free = Set(flag);
        }
        if let Some(flag) = nut_free {
            active.is_nut_free = Set(flag);
        }
        if let Some(flag) = shellfish_free {
            active.is_shellfish_free = Set(flag);
        }
        if let Some(flag) = pescatarian {
            active.is_pescatarian = Set(flag);
        }

        let profile = DietRepository::new(&txn).update(current, active).await?;
        txn.commit().await?;

        info!(user_id, "Updated diet requirements");
        Ok(profile.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Patch, UserCreate};
    use crate::services::test_support::{fast_security, test_store};
    use crate::services::{SeaOrmUserService, UserService};

    #[tokio::test]
    async fn test_new_user_starts_with_all_flags_false() {
        let store = test_store().await;
        let user = SeaOrmUserService::new(store.clone(), fast_security())
            .create_user(UserCreate::new("diet@example.com", "pw"))
            .await
            .unwrap();

        let profile = SeaOrmDietService::new(store)
            .get_diet_requirements(user.id)
            .await
            .unwrap();
        assert_eq!(profile.user_id, user.id);
        assert!(!profile.is_vegan);
        assert!(!profile.is_pescatarian);
    }

    #[tokio::test]
    async fn test_partial_edit_keeps_other_flags() {
        let store = test_store().await;
        let user = SeaOrmUserService::new(store.clone(), fast_security())
            .create_user(UserCreate::new("diet@example.com", "pw"))
            .await
            .unwrap();
        let diets = SeaOrmDietService::new(store);

        diets
            .edit_diet_requirements(
                user.id,
                DietRequirementsEdit {
                    is_vegan: Patch::Value(true),
                    ..DietRequirementsEdit::default()
                },
            )
            .await
            .unwrap();
        let profile = diets
            .edit_diet_requirements(
                user.id,
                DietRequirementsEdit {
                    is_nut_free: Patch::Value(true),
                    ..DietRequirementsEdit::default()
                },
            )
            .await
            .unwrap();

        assert!(profile.is_vegan);
        assert!(profile.is_nut_free);
        assert!(!profile.is_vegetarian);
    }

    #[tokio::test]
    async fn test_null_flag_is_rejected() {
        let store = test_store().await;
        let user = SeaOrmUserService::new(store.clone(), fast_security())
            .create_user(UserCreate::new("diet@example.com", "pw"))
            .await
            .unwrap();

        let err = SeaOrmDietService::new(store)
            .edit_diet_requirements(
                user.id,
                DietRequirementsEdit {
                    is_vegan: Patch::Null,
                    ..DietRequirementsEdit::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let err = SeaOrmDietService::new(test_store().await)
            .get_diet_requirements(42)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == "User not found"));
    }
}
