//! Domain service for the shared ingredient catalog.

use crate::models::{IngredientCreate, IngredientEdit, IngredientOut, Page};
use crate::services::ServiceError;

#[async_trait::async_trait]
pub trait IngredientService: Send + Sync {
    async fn get_ingredient(&self, id: i32) -> Result<IngredientOut, ServiceError>;

    /// Literal, case-sensitive substring match on the name. Not paginated.
    async fn search_ingredients(&self, pattern: &str) -> Result<Vec<IngredientOut>, ServiceError>;

    async fn list_ingredients(&self, page: Page) -> Result<Vec<IngredientOut>, ServiceError>;

    /// # Errors
    ///
    /// Returns [`ServiceError::Conflict`] if the name is already taken.
    async fn create_ingredient(
        &self,
        payload: IngredientCreate,
    ) -> Result<IngredientOut, ServiceError>;

    async fn edit_ingredient(
        &self,
        id: i32,
        payload: IngredientEdit,
    ) -> Result<IngredientOut, ServiceError>;

    /// Detaches the ingredient from every meal, then deletes it.
    async fn delete_ingredient(&self, id: i32) -> Result<IngredientOut, ServiceError>;
}
