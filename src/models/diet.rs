use serde::{Deserialize, Serialize};

use super::Patch;
use crate::entities::user_diet_requirements;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DietRequirementsEdit {
    #[serde(default)]
    pub is_vegetarian: Patch<bool>,
    #[serde(default)]
    pub is_vegan: Patch<bool>,
    #[serde(default)]
    pub is_gluten_free: Patch<bool>,
    #[serde(default)]
    pub is_dairy_free: Patch<bool>,
    #[serde(default)]
    pub is_nut_free: Patch<bool>,
    #[serde(default)]
    pub is_shellfish_free: Patch<bool>,
    #[serde(default)]
    pub is_pescatarian: Patch<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DietRequirementsOut {
    pub id: i32,
    pub user_id: i32,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub is_gluten_free: bool,
    pub is_dairy_free: bool,
    pub is_nut_free: bool,
    pub is_shellfish_free: bool,
    pub is_pescatarian: bool,
}

impl From<user_diet_requirements::Model> for DietRequirementsOut {
    fn from(model: user_diet_requirements::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            is_vegetarian: model.is_vegetarian,
            is_vegan: model.is_vegan,
            is_gluten_free: model.is_gluten_free,
            is_dairy_free: model.is_dairy_free,
            is_nut_free: model.is_nut_free,
            is_shellfish_free: model.is_shellfish_free,
            is_pescatarian: model.is_pescatarian,
        }
    }
}
