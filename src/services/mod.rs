pub mod error;
pub use error::ServiceError;

pub mod auth_service;
pub use auth_service::{AuthService, LoginResult};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod diet_service;
pub use diet_service::DietService;

pub mod diet_service_impl;
pub use diet_service_impl::SeaOrmDietService;

pub mod ingredient_service;
pub use ingredient_service::IngredientService;

pub mod ingredient_service_impl;
pub use ingredient_service_impl::SeaOrmIngredientService;

pub mod meal_service;
pub use meal_service::MealService;

pub mod meal_service_impl;
pub use meal_service_impl::SeaOrmMealService;

pub mod user_service;
pub use user_service::UserService;

pub mod user_service_impl;
pub use user_service_impl::SeaOrmUserService;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::SecurityConfig;
    use crate::db::Store;

    pub fn fast_security() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    /// A freshly migrated in-memory database behind a single connection.
    pub async fn test_store() -> Store {
        Store::with_pool_options("sqlite::memory:", 1, 1).await.unwrap()
    }

    /// An on-disk database under `dir` with a multi-connection pool.
    pub async fn file_store(dir: &tempfile::TempDir) -> Store {
        let url = format!("sqlite:{}", dir.path().join("mealplan.db").display());
        Store::with_pool_options(&url, 5, 1).await.unwrap()
    }
}
