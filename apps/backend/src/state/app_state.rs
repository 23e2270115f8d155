use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::adapters::{MemoryRecipeStore, MemoryUserStore};
use crate::repos::recipes::RecipeStore;
use crate::repos::users::UserStore;

/// Shared, immutable handler state.
#[derive(Clone)]
pub struct AppState {
    pub security: SecurityConfig,
    pub users: Arc<dyn UserStore>,
    pub recipes: Arc<dyn RecipeStore>,
    /// Present when the stores are database-backed
    db: Option<DatabaseConnection>,
}

impl AppState {
    pub fn new(
        security: SecurityConfig,
        users: Arc<dyn UserStore>,
        recipes: Arc<dyn RecipeStore>,
        db: Option<DatabaseConnection>,
    ) -> Self {
        Self {
            security,
            users,
            recipes,
            db,
        }
    }

    /// State backed by fresh in-memory stores.
    pub fn in_memory(security: SecurityConfig) -> Self {
        Self::new(
            security,
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryRecipeStore::new()),
            None,
        )
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("security", &self.security)
            .field("db", &self.db.is_some())
            .finish_non_exhaustive()
    }
}
