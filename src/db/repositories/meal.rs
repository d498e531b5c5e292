use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};

use super::contains_literal;
use crate::entities::{ingredients, meal_ingredients, meals, prelude::*};

pub struct MealRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> MealRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<meals::Model>, DbErr> {
        Meals::find_by_id(id).one(self.conn).await
    }

    pub async fn name_taken(&self, name: &str, exclude: Option<i32>) -> Result<bool, DbErr> {
        let mut query = Meals::find().filter(meals::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(meals::Column::Id.ne(id));
        }
        Ok(query.one(self.conn).await?.is_some())
    }

    pub async fn list(
        &self,
        owner: Option<i32>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<meals::Model>, DbErr> {
        owned_by(owner)
            .order_by_asc(meals::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.conn)
            .await
    }

    pub async fn search_by_name(
        &self,
        pattern: &str,
        owner: Option<i32>,
    ) -> Result<Vec<meals::Model>, DbErr> {
        owned_by(owner)
            .filter(contains_literal(meals::Column::Name, pattern))
            .order_by_asc(meals::Column::Id)
            .all(self.conn)
            .await
    }

    pub async fn ids_for_user(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        Meals::find()
            .select_only()
            .column(meals::Column::Id)
            .filter(meals::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.conn)
            .await
    }

    pub async fn insert(
        &self,
        name: String,
        description: Option<String>,
        user_id: i32,
    ) -> Result<meals::Model, DbErr> {
        meals::ActiveModel {
            name: Set(name),
            description: Set(description),
            user_id: Set(user_id),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    pub async fn update(
        &self,
        current: meals::Model,
        active: meals::ActiveModel,
    ) -> Result<meals::Model, DbErr> {
        if !active.is_changed() {
            return Ok(current);
        }
        active.update(self.conn).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        Meals::delete_by_id(id).exec(self.conn).await?;
        Ok(())
    }

    pub async fn delete_for_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = Meals::delete_many()
            .filter(meals::Column::UserId.eq(user_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }

    /// Loads the ingredients of each meal in association insertion order.
    ///
    /// Meals without ingredients map to an empty list. An ingredient attached
    /// twice appears twice.
    pub async fn ingredients_by_meal(
        &self,
        meal_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<ingredients::Model>>, DbErr> {
        let mut grouped: HashMap<i32, Vec<ingredients::Model>> =
            meal_ids.iter().map(|id| (*id, Vec::new())).collect();

        if meal_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = MealIngredients::find()
            .find_also_related(Ingredients)
            .filter(meal_ingredients::Column::MealId.is_in(meal_ids.to_vec()))
            .order_by_asc(meal_ingredients::Column::Id)
            .all(self.conn)
            .await?;

        for (link, ingredient) in rows {
            if let Some(ingredient) = ingredient {
                grouped.entry(link.meal_id).or_default().push(ingredient);
            }
        }

        Ok(grouped)
    }

    /// Appends one association row per id, in the given order.
    pub async fn attach_ingredients(
        &self,
        meal_id: i32,
        ingredient_ids: &[i32],
    ) -> Result<(), DbErr> {
        if ingredient_ids.is_empty() {
            return Ok(());
        }

        let links: Vec<meal_ingredients::ActiveModel> = ingredient_ids
            .iter()
            .map(|ingredient_id| meal_ingredients::ActiveModel {
                meal_id: Set(meal_id),
                ingredient_id: Set(*ingredient_id),
                ..Default::default()
            })
            .collect();

        MealIngredients::insert_many(links).exec(self.conn).await?;
        Ok(())
    }

    pub async fn clear_ingredients(&self, meal_ids: &[i32]) -> Result<u64, DbErr> {
        if meal_ids.is_empty() {
            return Ok(0);
        }
        let result = MealIngredients::delete_many()
            .filter(meal_ingredients::Column::MealId.is_in(meal_ids.to_vec()))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}

fn owned_by(owner: Option<i32>) -> Select<Meals> {
    let query = Meals::find();
    match owner {
        Some(user_id) => query.filter(meals::Column::UserId.eq(user_id)),
        None => query,
    }
}
