//! Recipe documents and the resource store seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::domain::DomainError;

/// Embedded comment. Stored inside the recipe document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    /// Subject id of the commenter
    pub user: Uuid,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: String,
    /// Trimmed, lowercase
    pub tags: Vec<String>,
    pub image_url: String,
    /// Owner subject id. Set at creation, never reassigned.
    pub author: Uuid,
    pub comments: Vec<Comment>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Normalise a tag list: trim, lowercase, drop empties and duplicates.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Selection understood by every `RecipeStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeQuery {
    All,
    /// Recipes carrying at least one of the (normalised) tags
    AnyTag(Vec<String>),
}

impl RecipeQuery {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            RecipeQuery::All => true,
            RecipeQuery::AnyTag(tags) => recipe.tags.iter().any(|t| tags.contains(t)),
        }
    }
}

/// Persistence for recipe documents. Results of `find_where` are ordered by
/// creation time, oldest first.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, DomainError>;
    async fn save(&self, recipe: &Recipe) -> Result<(), DomainError>;
    /// Returns `false` when nothing was deleted.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError>;
    async fn find_where(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, DomainError>;
}
