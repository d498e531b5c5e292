//! Domain service for per-user diet-requirement profiles.

use crate::models::{DietRequirementsEdit, DietRequirementsOut};
use crate::services::ServiceError;

#[async_trait::async_trait]
pub trait DietService: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the user or its profile is missing.
    async fn get_diet_requirements(
        &self,
        user_id: i32,
    ) -> Result<DietRequirementsOut, ServiceError>;

    /// Applies a partial flag update. Absent flags keep their value.
    async fn edit_diet_requirements(
        &self,
        user_id: i32,
        payload: DietRequirementsEdit,
    ) -> Result<DietRequirementsOut, ServiceError>;
}
