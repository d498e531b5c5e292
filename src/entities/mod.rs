pub mod prelude;

pub mod ingredients;
pub mod meal_ingredients;
pub mod meals;
pub mod user_diet_requirements;
pub mod users;
