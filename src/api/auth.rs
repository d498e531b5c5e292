use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, AppState, MessageResponse};
use crate::constants::session::USER_ID_KEY;
use crate::domain::Principal;
use crate::services::LoginResult;
use crate::services::error::messages;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

// ============================================================================
// Middleware
// ============================================================================

/// Authentication middleware that checks:
/// 1. Session cookie (from login)
/// 2. `X-Api-Key` header
/// 3. `Authorization: Bearer <api_key>` header
///
/// The resolved [`Principal`] is stored in the request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = if let Ok(Some(user_id)) = session.get::<i32>(USER_ID_KEY).await {
        state.auth_service().principal_for_user_id(user_id).await?
    } else if let Some(key) = extract_api_key(&headers) {
        state.auth_service().principal_for_api_key(&key).await?
    } else {
        return Err(ApiError::unauthorized(messages::INVALID_CREDENTIALS));
    };

    tracing::Span::current().record("user_id", principal.user_id);
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

// ============================================================================
// Extractors
// ============================================================================

/// Any authenticated, active user.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Principal);

/// An authenticated superuser; everyone else gets 403.
#[derive(Debug, Clone, Copy)]
pub struct Superuser(pub Principal);

fn principal_from(parts: &Parts) -> Result<Principal, ApiError> {
    parts
        .extensions
        .get::<Principal>()
        .copied()
        .ok_or_else(|| ApiError::unauthorized(messages::INVALID_CREDENTIALS))
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        principal_from(parts).map(Self)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Superuser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = principal_from(parts)?;
        if !principal.is_superuser {
            return Err(ApiError::forbidden(messages::NOT_ENOUGH_PRIVILEGES));
        }
        Ok(Self(principal))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
/// Authenticate with email and password, returns the user and API key
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResult>, ApiError> {
    let result = state
        .auth_service()
        .login(&payload.email, &payload.password)
        .await?;

    session
        .insert(USER_ID_KEY, result.user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    Ok(Json(result))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Json<MessageResponse> {
    let _ = session.flush().await;
    Json(MessageResponse::new("Logged out"))
}

/// POST /signup
/// Self-service registration of a regular user
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<LoginResult>, ApiError> {
    let result = state
        .auth_service()
        .signup(&payload.email, &payload.password, payload.name)
        .await?;
    Ok(Json(result))
}
