//! User management endpoints.
//!
//! Everything except the `/users/me` pair requires a superuser.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::auth::{CurrentUser, Superuser};
use super::validation::{page_from_query, validate_search_pattern};
use super::{ApiError, AppState, ListQuery, Listing};
use crate::models::{UserCreate, UserEdit, UserOut};
use crate::services::error::messages;

/// `GET /users[?email=&skip=&limit=]`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Query(query): Query<ListQuery>,
) -> Result<Listing<UserOut>, ApiError> {
    let users = match validate_search_pattern(query.email.as_deref())? {
        Some(pattern) => state.user_service().search_users(pattern).await?,
        None => {
            let page = page_from_query(&query)?;
            state.user_service().list_users(page).await?
        }
    };
    Ok(Listing(users))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Json(payload): Json<UserCreate>,
) -> Result<Json<UserOut>, ApiError> {
    let user = state.user_service().create_user(payload).await?;
    Ok(Json(user))
}

pub async fn get_me(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<UserOut>, ApiError> {
    let user = state.user_service().get_user(caller.user_id).await?;
    Ok(Json(user))
}

/// Self-service edit. Regular users may not touch the account flags.
pub async fn edit_me(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    Json(payload): Json<UserEdit>,
) -> Result<Json<UserOut>, ApiError> {
    if !caller.is_superuser && payload.touches_privileged_flags() {
        return Err(ApiError::forbidden(messages::NOT_ENOUGH_PRIVILEGES));
    }
    let user = state
        .user_service()
        .edit_user(caller.user_id, payload)
        .await?;
    Ok(Json(user))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Path(id): Path<i32>,
) -> Result<Json<UserOut>, ApiError> {
    let user = state.user_service().get_user(id).await?;
    Ok(Json(user))
}

pub async fn edit_user(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Path(id): Path<i32>,
    Json(payload): Json<UserEdit>,
) -> Result<Json<UserOut>, ApiError> {
    let user = state.user_service().edit_user(id, payload).await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Path(id): Path<i32>,
) -> Result<Json<UserOut>, ApiError> {
    let user = state.user_service().delete_user(id).await?;
    Ok(Json(user))
}
