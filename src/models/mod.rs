pub mod diet;
pub mod ingredient;
pub mod meal;
pub mod patch;
pub mod user;

pub use diet::{DietRequirementsEdit, DietRequirementsOut};
pub use ingredient::{IngredientCreate, IngredientEdit, IngredientOut};
pub use meal::{MealCreate, MealEdit, MealOut};
pub use patch::{NullField, Patch};
pub use user::{UserCreate, UserEdit, UserOut};

use crate::constants::limits;

/// Offset/limit window for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl Page {
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: limits::DEFAULT_PAGE_SIZE,
        }
    }
}
