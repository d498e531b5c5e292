//! Domain primitives shared by the service and HTTP layers.

pub mod email;

pub use email::{EmailError, normalize_email};

/// The authenticated caller of an operation.
///
/// Resolved once by the authentication middleware and handed to every
/// service call that needs to decide ownership or privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Principal {
    pub user_id: i32,
    pub is_superuser: bool,
}

impl Principal {
    #[must_use]
    pub const fn new(user_id: i32, is_superuser: bool) -> Self {
        Self {
            user_id,
            is_superuser,
        }
    }

    /// Owners and superusers may mutate a resource owned by `owner_id`.
    #[must_use]
    pub const fn can_modify(&self, owner_id: i32) -> bool {
        self.is_superuser || self.user_id == owner_id
    }
}
