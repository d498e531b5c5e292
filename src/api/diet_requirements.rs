//! Diet-requirement endpoints: a self-service pair under `/me` and a
//! superuser pair keyed by user id.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::auth::{CurrentUser, Superuser};
use super::{ApiError, AppState};
use crate::models::{DietRequirementsEdit, DietRequirementsOut};

pub async fn get_mine(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
) -> Result<Json<DietRequirementsOut>, ApiError> {
    let profile = state
        .diet_service()
        .get_diet_requirements(caller.user_id)
        .await?;
    Ok(Json(profile))
}

pub async fn edit_mine(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    Json(payload): Json<DietRequirementsEdit>,
) -> Result<Json<DietRequirementsOut>, ApiError> {
    let profile = state
        .diet_service()
        .edit_diet_requirements(caller.user_id, payload)
        .await?;
    Ok(Json(profile))
}

pub async fn get_for_user(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Path(user_id): Path<i32>,
) -> Result<Json<DietRequirementsOut>, ApiError> {
    let profile = state.diet_service().get_diet_requirements(user_id).await?;
    Ok(Json(profile))
}

pub async fn edit_for_user(
    State(state): State<Arc<AppState>>,
    Superuser(_): Superuser,
    Path(user_id): Path<i32>,
    Json(payload): Json<DietRequirementsEdit>,
) -> Result<Json<DietRequirementsOut>, ApiError> {
    let profile = state
        .diet_service()
        .edit_diet_requirements(user_id, payload)
        .await?;
    Ok(Json(profile))
}
