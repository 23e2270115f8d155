//! User documents and the credential store seam.

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::claims::Role;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// argon2 PHC string
    pub password_hash: String,
    pub role: Role,
    pub saved_recipes: Vec<Uuid>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: Role::User,
            saved_recipes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add or remove `recipe_id` from favorites. Returns `true` when the
    /// recipe is saved after the call.
    pub fn toggle_saved(&mut self, recipe_id: Uuid) -> bool {
        match self.saved_recipes.iter().position(|id| *id == recipe_id) {
            Some(pos) => {
                self.saved_recipes.remove(pos);
                false
            }
            None => {
                self.saved_recipes.push(recipe_id);
                true
            }
        }
    }
}

/// Persistence for user documents. `save` is an atomic upsert of one
/// document keyed by `id`; a duplicate email surfaces as
/// `DomainError::Conflict(UniqueEmail, _)`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn save(&self, user: &User) -> Result<(), DomainError>;
}
