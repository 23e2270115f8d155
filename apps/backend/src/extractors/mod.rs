pub mod current_user;
pub mod recipe_id;
pub mod validated_json;

pub use current_user::CurrentUser;
pub use recipe_id::RecipeId;
pub use validated_json::ValidatedJson;
