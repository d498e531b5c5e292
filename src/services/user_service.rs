//! Domain service for user accounts.
//!
//! Creating a user also creates its diet-requirements profile; deleting one
//! removes everything the user owns.

use crate::models::{Page, UserCreate, UserEdit, UserOut};
use crate::services::ServiceError;

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if no user has this id.
    async fn get_user(&self, id: i32) -> Result<UserOut, ServiceError>;

    /// Looks a user up by email after normalizing it.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserOut>, ServiceError>;

    async fn list_users(&self, page: Page) -> Result<Vec<UserOut>, ServiceError>;

    /// Case-sensitive substring match over emails. Not paginated.
    async fn search_users(&self, pattern: &str) -> Result<Vec<UserOut>, ServiceError>;

    /// # Errors
    ///
    /// Returns [`ServiceError::BadRequest`] for a malformed email and
    /// [`ServiceError::Conflict`] if the email is already registered.
    async fn create_user(&self, payload: UserCreate) -> Result<UserOut, ServiceError>;

    async fn edit_user(&self, id: i32, payload: UserEdit) -> Result<UserOut, ServiceError>;

    /// Deletes the user with its meals and diet requirements, returning the
    /// deleted user.
    async fn delete_user(&self, id: i32) -> Result<UserOut, ServiceError>;

    /// Creates an active, verified superuser unless `email` is already
    /// registered. Returns the new user, or `None` when nothing was created.
    async fn ensure_superuser(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserOut>, ServiceError>;
}
