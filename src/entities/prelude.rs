pub use super::ingredients::Entity as Ingredients;
pub use super::meal_ingredients::Entity as MealIngredients;
pub use super::meals::Entity as Meals;
pub use super::user_diet_requirements::Entity as UserDietRequirements;
pub use super::users::Entity as Users;
