//! Domain service for meals.
//!
//! Every mutation takes the calling [`Principal`]; only the owner or a
//! superuser may edit or delete a meal.

use crate::domain::Principal;
use crate::models::{MealCreate, MealEdit, MealOut, Page};
use crate::services::ServiceError;

#[async_trait::async_trait]
pub trait MealService: Send + Sync {
    async fn get_meal(&self, id: i32) -> Result<MealOut, ServiceError>;

    /// Literal, case-sensitive substring match on the name, optionally
    /// restricted to one owner. Not paginated.
    async fn search_meals(
        &self,
        pattern: &str,
        owner: Option<i32>,
    ) -> Result<Vec<MealOut>, ServiceError>;

    async fn list_meals(&self, owner: Option<i32>, page: Page)
    -> Result<Vec<MealOut>, ServiceError>;

    /// Creates a meal owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Conflict`] on a name collision and
    /// [`ServiceError::BadRequest`] if any ingredient id does not resolve.
    async fn create_meal(
        &self,
        payload: MealCreate,
        caller: Principal,
    ) -> Result<MealOut, ServiceError>;

    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] if `caller` neither owns the
    /// meal nor is a superuser.
    async fn edit_meal(
        &self,
        id: i32,
        payload: MealEdit,
        caller: Principal,
    ) -> Result<MealOut, ServiceError>;

    async fn delete_meal(&self, id: i32, caller: Principal) -> Result<MealOut, ServiceError>;
}
