use serde::{Deserialize, Serialize};

use super::Patch;
use crate::entities::ingredients;

#[derive(Debug, Clone, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientEdit {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub alias: Patch<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientOut {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl From<ingredients::Model> for IngredientOut {
    fn from(model: ingredients::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            alias: model.alias,
        }
    }
}
