//! `SeaORM` implementation of the `MealService` trait.

use std::collections::HashSet;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, Set};
use tracing::info;

use crate::db::Store;
use crate::db::repositories::ingredient::IngredientRepository;
use crate::db::repositories::meal::MealRepository;
use crate::domain::Principal;
use crate::entities::meals;
use crate::models::{MealCreate, MealEdit, MealOut, Page};
use crate::services::error::messages;
use crate::services::{MealService, ServiceError};

pub struct SeaOrmMealService {
    store: Store,
}

impl SeaOrmMealService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Fails unless every id names an existing ingredient.
async fn resolve_ingredients<C: ConnectionTrait>(
    conn: &C,
    ids: &[i32],
) -> Result<(), ServiceError> {
    let wanted: HashSet<i32> = ids.iter().copied().collect();
    let found = IngredientRepository::new(conn)
        .get_by_ids(&wanted.iter().copied().collect::<Vec<_>>())
        .await?;

    if found.len() == wanted.len() {
        Ok(())
    } else {
        Err(ServiceError::bad_request(messages::INGREDIENT_NOT_FOUND))
    }
}

async fn require_meal<C: ConnectionTrait>(conn: &C, id: i32) -> Result<meals::Model, ServiceError> {
    MealRepository::new(conn)
        .get_by_id(id)
        .await?
        .ok_or_else(ServiceError::meal_not_found)
}

/// Pairs each meal with its ingredients, preserving the input order.
async fn with_ingredients<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<meals::Model>,
) -> Result<Vec<MealOut>, ServiceError> {
    let ids: Vec<i32> = rows.iter().map(|m| m.id).collect();
    let mut grouped = MealRepository::new(conn).ingredients_by_meal(&ids).await?;

    Ok(rows
        .into_iter()
        .map(|meal| {
            let ingredients = grouped.remove(&meal.id).unwrap_or_default();
            MealOut::new(meal, ingredients)
        })
        .collect())
}

async fn view<C: ConnectionTrait>(conn: &C, meal: meals::Model) -> Result<MealOut, ServiceError> {
    let mut views = with_ingredients(conn, vec![meal]).await?;
    views
        .pop()
        .ok_or_else(|| ServiceError::Internal("Meal view went missing".to_string()))
}

#[async_trait]
impl MealService for SeaOrmMealService {
    async fn get_meal(&self, id: i32) -> Result<MealOut, ServiceError> {
        let txn = self.store.begin().await?;
        let meal = require_meal(&txn, id).await?;
        let out = view(&txn, meal).await?;
        txn.commit().await?;
        Ok(out)
    }

    async fn search_meals(
        &self,
        pattern: &str,
        owner: Option<i32>,
    ) -> Result<Vec<MealOut>, ServiceError> {
        let txn = self.store.begin().await?;
        let rows = MealRepository::new(&txn)
            .search_by_name(pattern, owner)
            .await?;
        let out = with_ingredients(&txn, rows).await?;
        txn.commit().await?;
        Ok(out)
    }

    async fn list_meals(
        &self,
        owner: Option<i32>,
        page: Page,
    ) -> Result<Vec<MealOut>, ServiceError> {
        let txn = self.store.begin().await?;
        let rows = MealRepository::new(&txn)
            .list(owner, page.offset, page.limit)
            .await?;
        let out = with_ingredients(&txn, rows).await?;
        txn.commit().await?;
        Ok(out)
    }

    async fn create_meal(
        &self,
        payload: MealCreate,
        caller: Principal,
    ) -> Result<MealOut, ServiceError> {
        let (_permit, txn) = self.store.begin_write().await?;
        let repo = MealRepository::new(&txn);

        if repo.name_taken(&payload.name, None).await? {
            return Err(ServiceError::conflict(messages::MEAL_NAME_TAKEN));
        }
        resolve_ingredients(&txn, &payload.ingredients).await?;

        let meal = repo
            .insert(payload.name, payload.description, caller.user_id)
            .await
            .map_err(|e| ServiceError::from_write(e, messages::MEAL_NAME_TAKEN))?;
        repo.attach_ingredients(meal.id, &payload.ingredients).await?;

        let out = view(&txn, meal).await?;
        txn.commit().await?;

        info!(meal_id = out.id, user_id = caller.user_id, "Created meal");
        Ok(out)
    }

    async fn edit_meal(
        &self,
        id: i32,
        payload: MealEdit,
        caller: Principal,
    ) -> Result<MealOut, ServiceError> {
        let (_permit, txn) = self.store.begin_write().await?;
        let repo = MealRepository::new(&txn);
        let current = require_meal(&txn, id).await?;

        if !caller.can_modify(current.user_id) {
            return Err(ServiceError::Unauthorized(
                messages::MEAL_EDIT_DENIED.to_string(),
            ));
        }

        let name = payload.name.required("name")?;
        let description = payload.description.nullable();
        let ingredients = payload.ingredients.required("ingredients")?;

        let mut active: meals::ActiveModel = current.clone().into();
        if let Some(name) = name {
            if repo.name_taken(&name, Some(id)).await? {
                return Err(ServiceError::conflict(messages::MEAL_NAME_TAKEN));
            }
            active.name = Set(name);
        }
        if let Some(description) = description {
            active.description = Set(description);
        }

        let meal = repo
            .update(current, active)
            .await
            .map_err(|e| ServiceError::from_write(e, messages::MEAL_NAME_TAKEN))?;

        if let Some(ids) = ingredients {
            resolve_ingredients(&txn, &ids).await?;
            repo.clear_ingredients(&[id]).await?;
            repo.attach_ingredients(id, &ids).await?;
        }

        let out = view(&txn, meal).await?;
        txn.commit().await?;

        info!(meal_id = id, user_id = caller.user_id, "Updated meal");
        Ok(out)
    }

    async fn delete_meal(&self, id: i32, caller: Principal) -> Result<MealOut, ServiceError> {
        let (_permit, txn) = self.store.begin_write().await?;
        let repo = MealRepository::new(&txn);
        let meal = require_meal(&txn, id).await?;

        if !caller.can_modify(meal.user_id) {
            return Err(ServiceError::Unauthorized(
                messages::MEAL_DELETE_DENIED.to_string(),
            ));
        }

        let out = view(&txn, meal).await?;
        repo.clear_ingredients(&[id]).await?;
        repo.delete(id).await?;
        txn.commit().await?;

        info!(meal_id = id, user_id = caller.user_id, "Deleted meal");
        Ok(out)
    }
}
