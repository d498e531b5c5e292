//! Meal endpoints.
//!
//! Reads of single meals and the unscoped listing are superuser-only;
//! `/meals/me` scopes to the caller. Ownership for edits and deletes is
//! decided by the service from the caller's [`Principal`](crate::domain::Principal).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::auth::{CurrentUser, Superuser};
use super::validation::{page_from_query, validate_search_pattern};
use super::{ApiError, AppState, ListQuery, Listing};
use crate::models::{MealCreate, MealEdit, MealOut};

async fn list_scoped(
    state: &AppState,
    owner: Option<i32>,
    query: &ListQuery,
) -> Result<Listing<MealOut>, ApiError> {
    let meals = match validate_search_pattern(query.name.as_deref())? {
        Some(pattern) => state.meal_service().search_meals(pattern, owner).await?,
        None => {
            let page = page_from_query(query)?;
            state.meal_service().list_meals(owner, page).await?
        }
    };
    Ok(Listing(meals))
}

/// `GET /meals/me[?name=&skip=&limit=]`
pub async fn list_my_meals(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Listing<MealOut>, ApiError> {
    list_scoped(&state, Some(caller.user_id), &query).await
}

/// `GET /meals[?name=&skip=&limit=]`
pub async fn list_all_meals(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Query(query): Query<ListQuery>,
) -> Result<Listing<MealOut>, ApiError> {
    list_scoped(&state, None, &query).await
}

pub async fn get_meal(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Path(id): Path<i32>,
) -> Result<Json<MealOut>, ApiError> {
    Ok(Json(state.meal_service().get_meal(id).await?))
}

pub async fn create_meal(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    Json(payload): Json<MealCreate>,
) -> Result<Json<MealOut>, ApiError> {
    Ok(Json(state.meal_service().create_meal(payload, caller).await?))
}

pub async fn edit_meal(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<MealEdit>,
) -> Result<Json<MealOut>, ApiError> {
    Ok(Json(
        state.meal_service().edit_meal(id, payload, caller).await?,
    ))
}

pub async fn delete_meal(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<MealOut>, ApiError> {
    Ok(Json(state.meal_service().delete_meal(id, caller).await?))
}
