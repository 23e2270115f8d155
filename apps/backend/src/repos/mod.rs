//! Store traits and the documents they persist.

pub mod recipes;
pub mod users;

pub use recipes::{Comment, Recipe, RecipeQuery, RecipeStore};
pub use users::{User, UserStore};
