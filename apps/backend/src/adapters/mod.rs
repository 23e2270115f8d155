//! Store implementations: SeaORM for Postgres/SQLite and in-memory.

pub mod memory;
pub mod recipes_sea;
pub mod users_sea;

pub use memory::{MemoryRecipeStore, MemoryUserStore};
pub use recipes_sea::RecipeStoreSea;
pub use users_sea::UserStoreSea;
