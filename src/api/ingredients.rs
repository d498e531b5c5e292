use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::auth::{CurrentUser, Superuser};
use super::validation::{page_from_query, validate_search_pattern};
use super::{ApiError, AppState, ListQuery, Listing};
use crate::models::{IngredientCreate, IngredientEdit, IngredientOut};

/// `GET /ingredients[?name=&skip=&limit=]`, open to every authenticated user.
pub async fn list_ingredients(
    State(state): State<Arc<AppState>>,
    CurrentUser(_): CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Listing<IngredientOut>, ApiError> {
    let ingredients = match validate_search_pattern(query.name.as_deref())? {
        Some(pattern) => state.ingredient_service().search_ingredients(pattern).await?,
        None => {
            let page = page_from_query(&query)?;
            state.ingredient_service().list_ingredients(page).await?
        }
    };
    Ok(Listing(ingredients))
}

pub async fn get_ingredient(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Path(id): Path<i32>,
) -> Result<Json<IngredientOut>, ApiError> {
    Ok(Json(state.ingredient_service().get_ingredient(id).await?))
}

pub async fn create_ingredient(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Json(payload): Json<IngredientCreate>,
) -> Result<Json<IngredientOut>, ApiError> {
    Ok(Json(
        state.ingredient_service().create_ingredient(payload).await?,
    ))
}

pub async fn edit_ingredient(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Path(id): Path<i32>,
    Json(payload): Json<IngredientEdit>,
) -> Result<Json<IngredientOut>, ApiError> {
    Ok(Json(
        state
            .ingredient_service()
            .edit_ingredient(id, payload)
            .await?,
    ))
}

pub async fn delete_ingredient(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Path(id): Path<i32>,
) -> Result<Json<IngredientOut>, ApiError> {
    Ok(Json(state.ingredient_service().delete_ingredient(id).await?))
}
