//! SeaORM implementation of `RecipeStore`.
//!
//! Tags live in a JSON column, so tag filtering loads rows in creation order
//! and applies `RecipeQuery::matches` in process.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::recipes;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::recipes::{Comment, Recipe, RecipeQuery, RecipeStore};

#[derive(Debug, Clone)]
pub struct RecipeStoreSea {
    db: DatabaseConnection,
}

impl RecipeStoreSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    id: Uuid,
    field: &str,
) -> Result<T, DomainError> {
    serde_json::from_value(value).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("recipe {id} has malformed {field}"),
        )
    })
}

impl TryFrom<recipes::Model> for Recipe {
    type Error = DomainError;

    fn try_from(model: recipes::Model) -> Result<Self, Self::Error> {
        let id = model.id;
        Ok(Self {
            id,
            title: model.title,
            ingredients: decode::<Vec<String>>(model.ingredients, id, "ingredients")?,
            steps: model.steps,
            tags: decode::<Vec<String>>(model.tags, id, "tags")?,
            image_url: model.image_url,
            author: model.author_id,
            comments: decode::<Vec<Comment>>(model.comments, id, "comments")?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

fn to_active(recipe: &Recipe) -> Result<recipes::ActiveModel, DomainError> {
    let comments = serde_json::to_value(&recipe.comments).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("Encode".into()),
            format!("failed to encode comments: {e}"),
        )
    })?;

    Ok(recipes::ActiveModel {
        id: Set(recipe.id),
        title: Set(recipe.title.clone()),
        ingredients: Set(serde_json::json!(recipe.ingredients)),
        steps: Set(recipe.steps.clone()),
        tags: Set(serde_json::json!(recipe.tags)),
        image_url: Set(recipe.image_url.clone()),
        author_id: Set(recipe.author),
        comments: Set(comments),
        created_at: Set(recipe.created_at),
        updated_at: Set(recipe.updated_at),
    })
}

#[async_trait]
impl RecipeStore for RecipeStoreSea {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, DomainError> {
        recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(Recipe::try_from)
            .transpose()
    }

    async fn save(&self, recipe: &Recipe) -> Result<(), DomainError> {
        // author_id and created_at are fixed at creation.
        recipes::Entity::insert(to_active(recipe)?)
            .on_conflict(
                OnConflict::column(recipes::Column::Id)
                    .update_columns([
                        recipes::Column::Title,
                        recipes::Column::Ingredients,
                        recipes::Column::Steps,
                        recipes::Column::Tags,
                        recipes::Column::ImageUrl,
                        recipes::Column::Comments,
                        recipes::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = recipes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn find_where(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, DomainError> {
        let rows = recipes::Entity::find()
            .order_by_asc(recipes::Column::CreatedAt)
            .order_by_asc(recipes::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let recipe = Recipe::try_from(row)?;
            if query.matches(&recipe) {
                out.push(recipe);
            }
        }
        Ok(out)
    }
}
