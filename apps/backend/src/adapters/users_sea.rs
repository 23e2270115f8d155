//! SeaORM implementation of `UserStore`.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::auth::claims::Role;
use crate::entities::users;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::users::{User, UserStore};

#[derive(Debug, Clone)]
pub struct UserStoreSea {
    db: DatabaseConnection,
}

impl UserStoreSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn corrupt(detail: impl Into<String>) -> DomainError {
    DomainError::infra(InfraErrorKind::DataCorruption, detail)
}

impl TryFrom<users::Model> for User {
    type Error = DomainError;

    fn try_from(model: users::Model) -> Result<Self, Self::Error> {
        let role = model
            .role
            .parse::<Role>()
            .map_err(|_| corrupt(format!("user {} has an unknown role", model.id)))?;
        let saved_recipes = serde_json::from_value::<Vec<Uuid>>(model.saved_recipes)
            .map_err(|_| corrupt(format!("user {} has malformed saved_recipes", model.id)))?;

        Ok(Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            role,
            saved_recipes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

fn to_active(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        name: Set(user.name.clone()),
        email: Set(user.email.clone()),
        password_hash: Set(user.password_hash.clone()),
        role: Set(user.role.as_str().to_string()),
        saved_recipes: Set(serde_json::json!(user.saved_recipes)),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

#[async_trait]
impl UserStore for UserStoreSea {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(User::try_from)
            .transpose()
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        users::Entity::insert(to_active(user))
            .on_conflict(
                OnConflict::column(users::Column::Id)
                    .update_columns([
                        users::Column::Name,
                        users::Column::Email,
                        users::Column::PasswordHash,
                        users::Column::Role,
                        users::Column::SavedRecipes,
                        users::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }
}
