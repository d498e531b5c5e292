use axum::{
    Json, Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
mod diet_requirements;
mod error;
mod ingredients;
mod meals;
mod observability;
mod types;
mod users;
mod validation;

pub use error::{ApiError, ErrorBody};
pub use types::*;

use crate::services::{AuthService, DietService, IngredientService, MealService, UserService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn user_service(&self) -> &Arc<dyn UserService> {
        &self.shared.user_service
    }

    #[must_use]
    pub fn diet_service(&self) -> &Arc<dyn DietService> {
        &self.shared.diet_service
    }

    #[must_use]
    pub fn ingredient_service(&self) -> &Arc<dyn IngredientService> {
        &self.shared.ingredient_service
    }

    #[must_use]
    pub fn meal_service(&self) -> &Arc<dyn MealService> {
        &self.shared.meal_service
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = state.shared.config.server.clone();

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )));

    let v1_routes = create_protected_router(state.clone()).route("/", get(root));

    let api_router = Router::new()
        .nest("/v1", v1_routes)
        .route("/signup", axum::routing::post(auth::signup))
        .route("/auth/login", axum::routing::post(auth::login))
        .route("/auth/logout", axum::routing::post(auth::logout))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/me", get(users::get_me).put(users::edit_me))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::edit_user)
                .delete(users::delete_user),
        )
        .route(
            "/users_diet_requirements/me",
            get(diet_requirements::get_mine).put(diet_requirements::edit_mine),
        )
        .route(
            "/users_diet_requirements/{user_id}",
            get(diet_requirements::get_for_user).put(diet_requirements::edit_for_user),
        )
        .route(
            "/ingredients",
            get(ingredients::list_ingredients).post(ingredients::create_ingredient),
        )
        .route(
            "/ingredients/{id}",
            get(ingredients::get_ingredient)
                .put(ingredients::edit_ingredient)
                .delete(ingredients::delete_ingredient),
        )
        .route("/meals", get(meals::list_all_meals).post(meals::create_meal))
        .route("/meals/me", get(meals::list_my_meals))
        .route(
            "/meals/{id}",
            get(meals::get_meal)
                .put(meals::edit_meal)
                .delete(meals::delete_meal),
        )
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::auth_middleware,
        ))
}

/// `GET /api/v1`
async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello World"))
}
