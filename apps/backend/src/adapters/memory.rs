//! In-process stores backed by `parking_lot::RwLock<HashMap<..>>`.
//!
//! Same contracts as the SeaORM adapters, including the unique-email
//! conflict, so handlers can be exercised without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::recipes::{Recipe, RecipeQuery, RecipeStore};
use crate::repos::users::{User, UserStore};

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write();
        if users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "Email already registered",
            ));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    recipes: RwLock<HashMap<Uuid, Recipe>>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, DomainError> {
        Ok(self.recipes.read().get(&id).cloned())
    }

    async fn save(&self, recipe: &Recipe) -> Result<(), DomainError> {
        let mut recipes = self.recipes.write();
        let mut stored = recipe.clone();
        if let Some(existing) = recipes.get(&recipe.id) {
            stored.author = existing.author;
            stored.created_at = existing.created_at;
        }
        recipes.insert(stored.id, stored);
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.recipes.write().remove(&id).is_some())
    }

    async fn find_where(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, DomainError> {
        let mut out: Vec<Recipe> = self
            .recipes
            .read()
            .values()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(out)
    }
}
