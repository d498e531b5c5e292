use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, DietService, IngredientService, MealService, SeaOrmAuthService,
    SeaOrmDietService, SeaOrmIngredientService, SeaOrmMealService, SeaOrmUserService,
    UserService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub user_service: Arc<dyn UserService>,

    pub diet_service: Arc<dyn DietService>,

    pub ingredient_service: Arc<dyn IngredientService>,

    pub meal_service: Arc<dyn MealService>,

    pub auth_service: Arc<dyn AuthService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Self::with_store(config, store).await
    }

    /// Wires the services around an already-migrated store and runs the
    /// superuser bootstrap when enabled.
    pub async fn with_store(config: Config, store: Store) -> anyhow::Result<Self> {
        let security = config.security.clone();

        let user_service = Arc::new(SeaOrmUserService::new(store.clone(), security.clone()))
            as Arc<dyn UserService>;
        let diet_service = Arc::new(SeaOrmDietService::new(store.clone()))
            as Arc<dyn DietService>;
        let ingredient_service = Arc::new(SeaOrmIngredientService::new(store.clone()))
            as Arc<dyn IngredientService>;
        let meal_service = Arc::new(SeaOrmMealService::new(store.clone()))
            as Arc<dyn MealService>;
        let auth_service = Arc::new(SeaOrmAuthService::new(store, security))
            as Arc<dyn AuthService>;

        if config.bootstrap.enabled {
            let created = user_service
                .ensure_superuser(&config.bootstrap.admin_email, &config.bootstrap.admin_password)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to bootstrap superuser: {e}"))?;
            if let Some(admin) = created {
                info!(user_id = admin.id, email = %admin.email, "Bootstrapped superuser");
            }
        }

        Ok(Self {
            config: Arc::new(config),
            user_service,
            diet_service,
            ingredient_service,
            meal_service,
            auth_service,
        })
    }
}
