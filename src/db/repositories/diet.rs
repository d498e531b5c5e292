use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::entities::{prelude::*, user_diet_requirements};

pub struct DietRepository<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> DietRepository<'a, C> {
    #[must_use]
    pub const fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn get_by_user(
        &self,
        user_id: i32,
    ) -> Result<Option<user_diet_requirements::Model>, DbErr> {
        UserDietRequirements::find()
            .filter(user_diet_requirements::Column::UserId.eq(user_id))
            .one(self.conn)
            .await
    }

    /// Inserts the all-false profile every new user starts with.
    pub async fn insert_defaults(
        &self,
        user_id: i32,
    ) -> Result<user_diet_requirements::Model, DbErr> {
        user_diet_requirements::ActiveModel {
            user_id: Set(user_id),
            is_vegetarian: Set(false),
            is_vegan: Set(false),
            is_gluten_free: Set(false),
            is_dairy_free: Set(false),
            is_nut_free: Set(false),
            is_shellfish_free: Set(false),
            is_pescatarian: Set(false),
            ..Default::default()
        }
        .insert(self.conn)
        .await
    }

    pub async fn update(
        &self,
        current: user_diet_requirements::Model,
        active: user_diet_requirements::ActiveModel,
    ) -> Result<user_diet_requirements::Model, DbErr> {
        if !active.is_changed() {
            return Ok(current);
        }
        active.update(self.conn).await
    }

    pub async fn delete_for_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = UserDietRequirements::delete_many()
            .filter(user_diet_requirements::Column::UserId.eq(user_id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}
