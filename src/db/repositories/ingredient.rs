use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::contains_literal;
use crate::entities::{ingredients, meal_ingredients, prelude::*};

pub struct IngredientRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> IngredientRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<ingredients::Model>, DbErr> {
        Ingredients::find_by_id(id).one(self.conn).await
    }

    pub async fn get_by_ids(&self, ids: &[i32]) -> Result<Vec<ingredients::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ingredients::find()
            .filter(ingredients::Column::Id.is_in(ids.to_vec()))
            .all(self.conn)
            .await
    }

    pub async fn name_taken(&self, name: &str, exclude: Option<i32>) -> Result<bool, DbErr> {
        let mut query = Ingredients::find().filter(ingredients::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(ingredients::Column::Id.ne(id));
        }
        Ok(query.one(self.conn).await?.is_some())
    }

    pub async fn list(&self, offset: u64, limit: u64) -> Result<Vec<ingredients::Model>, DbErr> {
        Ingredients::find()
            .order_by_asc(ingredients::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.conn)
            .await
    }

    pub async fn search_by_name(&self, pattern: &str) -> Result<Vec<ingredients::Model>, DbErr> {
        Ingredients::find()
            .filter(contains_literal(ingredients::Column::Name, pattern))
            .order_by_asc(ingredients::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn insert(
        &self,
        name: String,
        alias: Option<String>,
    ) -> Result<ingredients::Model, DbErr> {
        ingredients::ActiveModel {
            name: Set(name),
            alias: Set(alias),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    pub async fn update(
        &self,
        current: ingredients::Model,
        active: ingredients::ActiveModel,
    ) -> Result<ingredients::Model, DbErr> {
        if !active.is_changed() {
            return Ok(current);
        }
        active.update(self.conn).await
    }

    /// Removes every meal association pointing at the ingredient.
    pub async fn detach_from_meals(&self, id: i32) -> Result<u64, DbErr> {
        let result = MealIngredients::delete_many()
            .filter(meal_ingredients::Column::IngredientId.eq(id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        Ingredients::delete_by_id(id).exec(self.conn).await?;
        Ok(())
    }
}
