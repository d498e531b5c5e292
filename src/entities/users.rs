use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Normalized address, see `domain::email`
    #[sea_orm(unique)]
    pub email: String,

    pub name: Option<String>,

    /// Argon2id password hash
    pub password_hash: String,

    /// Random API key (64-char hex string)
    #[sea_orm(unique)]
    pub api_key: String,

    pub is_active: bool,

    pub is_superuser: bool,

    pub is_verified: bool,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::user_diet_requirements::Entity")]
    DietRequirements,
    #[sea_orm(has_many = "super::meals::Entity")]
    Meals,
}

impl Related<super::user_diet_requirements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DietRequirements.def()
    }
}

impl Related<super::meals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Meals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
