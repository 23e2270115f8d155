use std::sync::Arc;

use crate::adapters::{RecipeStoreSea, UserStoreSea};
use crate::config::db::{DbKind, RuntimeEnv};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::repos::recipes::RecipeStore;
use crate::repos::users::UserStore;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, used by `main` and by tests.
///
/// Store selection, in priority order: explicit stores from `with_stores`,
/// then a database from `with_db`, then in-memory stores.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db: Option<(RuntimeEnv, DbKind)>,
    stores: Option<(Arc<dyn UserStore>, Arc<dyn RecipeStore>)>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db: None,
            stores: None,
        }
    }

    pub fn with_db(mut self, env: RuntimeEnv, kind: DbKind) -> Self {
        self.db = Some((env, kind));
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_stores(
        mut self,
        users: Arc<dyn UserStore>,
        recipes: Arc<dyn RecipeStore>,
    ) -> Self {
        self.stores = Some((users, recipes));
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        if let Some((users, recipes)) = self.stores {
            return Ok(AppState::new(self.security_config, users, recipes, None));
        }

        match self.db {
            Some((env, kind)) => {
                // single entrypoint: connect + migrate
                let conn = bootstrap_db(env, kind).await?;
                Ok(AppState::new(
                    self.security_config,
                    Arc::new(UserStoreSea::new(conn.clone())),
                    Arc::new(RecipeStoreSea::new(conn.clone())),
                    Some(conn),
                ))
            }
            None => Ok(AppState::in_memory(self.security_config)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::build_state;
    use crate::config::db::{DbKind, RuntimeEnv};

    #[tokio::test]
    async fn test_build_without_db_uses_memory_stores() {
        let state = build_state().build().await.unwrap();
        assert!(state.db().is_none());
        assert!(state.users.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_build_with_sqlite_memory_runs_migrations() {
        let state = build_state()
            .with_db(RuntimeEnv::Test, DbKind::SqliteMemory)
            .build()
            .await
            .unwrap();
        assert!(state.db().is_some());
        assert!(state.recipes.find_by_id(uuid::Uuid::new_v4()).await.unwrap().is_none());
    }
}
