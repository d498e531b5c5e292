use serde::{Deserialize, Serialize};

use super::{IngredientOut, Patch};
use crate::entities::{ingredients, meals};

#[derive(Debug, Clone, Deserialize)]
pub struct MealCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Ingredient ids; every one must resolve or the create fails.
    #[serde(default)]
    pub ingredients: Vec<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealEdit {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    /// When present, replaces the whole ingredient set.
    #[serde(default)]
    pub ingredients: Patch<Vec<i32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealOut {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub user_id: i32,
    pub ingredients: Vec<IngredientOut>,
}

impl MealOut {
    #[must_use]
    pub fn new(meal: meals::Model, ingredients: Vec<ingredients::Model>) -> Self {
        Self {
            id: meal.id,
            name: meal.name,
            description: meal.description,
            user_id: meal.user_id,
            ingredients: ingredients.into_iter().map(IngredientOut::from).collect(),
        }
    }

    #[must_use]
    pub fn ingredient_ids(&self) -> Vec<i32> {
        self.ingredients.iter().map(|i| i.id).collect()
    }
}
