use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub alias: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::meal_ingredients::Entity")]
    MealIngredients,
}

impl Related<super::meal_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MealIngredients.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
