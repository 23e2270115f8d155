//! Recipe use cases: listing, CRUD behind the ownership guard, favorites
//! and comments.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::auth::claims::IdentityClaims;
use crate::auth::guard::{authorize, Decision, OwnerOp};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::recipes::{normalize_tags, Comment, Recipe, RecipeQuery, RecipeStore};
use crate::repos::users::UserStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorView {
    pub id: Uuid,
    /// `None` when the author's user record no longer exists
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: String,
    pub tags: Vec<String>,
    pub image_url: String,
    pub author: AuthorView,
    pub comments: Vec<Comment>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: String,
}

/// Partial update. Only these fields are mutable; `author` and `comments`
/// in a request body are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    pub title: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub steps: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
}

/// Result of a favorite toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    pub saved: bool,
    pub saved_recipes: Vec<Uuid>,
}

fn invalid_recipe(detail: &str) -> AppError {
    DomainError::validation(ValidationKind::InvalidRecipe, detail).into()
}

fn recipe_not_found() -> AppError {
    DomainError::not_found(NotFoundKind::Recipe, "Recipe not found").into()
}

fn clean_ingredients(ingredients: Vec<String>) -> Vec<String> {
    ingredients
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect()
}

async fn load_existing(recipes: &dyn RecipeStore, id: Uuid) -> Result<Recipe, AppError> {
    recipes.find_by_id(id).await?.ok_or_else(recipe_not_found)
}

/// Existence (404) is settled by the caller before this runs.
fn ensure_permitted(
    claims: &IdentityClaims,
    recipe: &Recipe,
    op: OwnerOp,
) -> Result<(), AppError> {
    match authorize(claims, recipe.author, op) {
        Decision::Permit => Ok(()),
        Decision::Deny => {
            let verb = match op {
                OwnerOp::Update => "update",
                OwnerOp::Delete => "delete",
            };
            security::access_denied(claims.sub, recipe.id, verb);
            Err(AppError::forbidden(
                ErrorCode::NotRecipeOwner,
                format!("Access denied: You cannot {verb} this recipe"),
            ))
        }
    }
}

/// Attach author name/email, looking each author up once.
async fn populate(
    users: &dyn UserStore,
    recipes: Vec<Recipe>,
) -> Result<Vec<RecipeView>, AppError> {
    let mut authors: HashMap<Uuid, AuthorView> = HashMap::new();
    let mut out = Vec::with_capacity(recipes.len());

    for recipe in recipes {
        let author = match authors.get(&recipe.author) {
            Some(a) => a.clone(),
            None => {
                let found = users.find_by_id(recipe.author).await?;
                let view = AuthorView {
                    id: recipe.author,
                    name: found.as_ref().map(|u| u.name.clone()),
                    email: found.map(|u| u.email),
                };
                authors.insert(recipe.author, view.clone());
                view
            }
        };

        out.push(RecipeView {
            id: recipe.id,
            title: recipe.title,
            ingredients: recipe.ingredients,
            steps: recipe.steps,
            tags: recipe.tags,
            image_url: recipe.image_url,
            author,
            comments: recipe.comments,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        });
    }
    Ok(out)
}

async fn populate_one(users: &dyn UserStore, recipe: Recipe) -> Result<RecipeView, AppError> {
    let mut views = populate(users, vec![recipe]).await?;
    views.pop().ok_or_else(|| AppError::internal("populate returned no recipe"))
}

/// All recipes. When a caller is known, their favorites come first; the
/// relative order within each group is preserved.
pub async fn list(
    recipes: &dyn RecipeStore,
    users: &dyn UserStore,
    caller: Option<Uuid>,
) -> Result<Vec<RecipeView>, AppError> {
    let mut all = recipes.find_where(&RecipeQuery::All).await?;

    if let Some(caller) = caller {
        if let Some(user) = users.find_by_id(caller).await? {
            all.sort_by_key(|r| !user.saved_recipes.contains(&r.id));
        }
    }

    populate(users, all).await
}

/// Recipes carrying any of the comma-separated tags in `raw`.
pub async fn filter_by_tags(
    recipes: &dyn RecipeStore,
    users: &dyn UserStore,
    raw: Option<&str>,
) -> Result<Vec<RecipeView>, AppError> {
    let tags = normalize_tags(raw.unwrap_or_default().split(','));
    if tags.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::MissingTags,
            "Tags query param is required",
        )
        .into());
    }

    let found = recipes.find_where(&RecipeQuery::AnyTag(tags)).await?;
    populate(users, found).await
}

pub async fn get(
    recipes: &dyn RecipeStore,
    users: &dyn UserStore,
    id: Uuid,
) -> Result<RecipeView, AppError> {
    let recipe = load_existing(recipes, id).await?;
    populate_one(users, recipe).await
}

/// Create a recipe owned by the caller.
pub async fn create(
    recipes: &dyn RecipeStore,
    users: &dyn UserStore,
    claims: &IdentityClaims,
    input: NewRecipe,
) -> Result<RecipeView, AppError> {
    let title = input.title.trim().to_string();
    if title.is_empty() {
        return Err(invalid_recipe("Title is required"));
    }
    let ingredients = clean_ingredients(input.ingredients);
    if ingredients.is_empty() {
        return Err(invalid_recipe("At least one ingredient is required"));
    }
    if input.steps.trim().is_empty() {
        return Err(invalid_recipe("Steps are required"));
    }

    let now = OffsetDateTime::now_utc();
    let recipe = Recipe {
        id: Uuid::new_v4(),
        title,
        ingredients,
        steps: input.steps,
        tags: normalize_tags(&input.tags),
        image_url: input.image_url.trim().to_string(),
        author: claims.sub,
        comments: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    recipes.save(&recipe).await?;

    info!(recipe_id = %recipe.id, author = %recipe.author, "recipe created");
    populate_one(users, recipe).await
}

/// Apply a partial update. 404 before 403.
pub async fn update(
    recipes: &dyn RecipeStore,
    users: &dyn UserStore,
    claims: &IdentityClaims,
    id: Uuid,
    patch: RecipePatch,
) -> Result<RecipeView, AppError> {
    let mut recipe = load_existing(recipes, id).await?;
    ensure_permitted(claims, &recipe, OwnerOp::Update)?;

    if let Some(title) = patch.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(invalid_recipe("Title cannot be empty"));
        }
        recipe.title = title;
    }
    if let Some(ingredients) = patch.ingredients {
        let ingredients = clean_ingredients(ingredients);
        if ingredients.is_empty() {
            return Err(invalid_recipe("At least one ingredient is required"));
        }
        recipe.ingredients = ingredients;
    }
    if let Some(steps) = patch.steps {
        if steps.trim().is_empty() {
            return Err(invalid_recipe("Steps cannot be empty"));
        }
        recipe.steps = steps;
    }
    if let Some(tags) = patch.tags {
        recipe.tags = normalize_tags(&tags);
    }
    if let Some(image_url) = patch.image_url {
        recipe.image_url = image_url.trim().to_string();
    }
    recipe.updated_at = OffsetDateTime::now_utc();

    recipes.save(&recipe).await?;
    info!(recipe_id = %recipe.id, actor = %claims.sub, "recipe updated");
    populate_one(users, recipe).await
}

/// Delete a recipe. 404 before 403.
pub async fn delete(
    recipes: &dyn RecipeStore,
    claims: &IdentityClaims,
    id: Uuid,
) -> Result<(), AppError> {
    let recipe = load_existing(recipes, id).await?;
    ensure_permitted(claims, &recipe, OwnerOp::Delete)?;

    if !recipes.delete_by_id(id).await? {
        // Removed concurrently between lookup and delete.
        return Err(recipe_not_found());
    }
    info!(recipe_id = %id, actor = %claims.sub, "recipe deleted");
    Ok(())
}

/// Add or remove a recipe from the caller's favorites.
///
/// Read-modify-write on the user document; concurrent toggles from the same
/// user resolve last-write-wins.
pub async fn toggle_favorite(
    recipes: &dyn RecipeStore,
    users: &dyn UserStore,
    claims: &IdentityClaims,
    id: Uuid,
) -> Result<FavoriteToggle, AppError> {
    load_existing(recipes, id).await?;

    let mut user = users
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| AppError::from(DomainError::not_found(NotFoundKind::User, "User not found")))?;

    let saved = user.toggle_saved(id);
    user.updated_at = OffsetDateTime::now_utc();
    users.save(&user).await?;

    Ok(FavoriteToggle {
        saved,
        saved_recipes: user.saved_recipes,
    })
}

/// Append a comment by the caller. Empty text is rejected before the
/// recipe is looked up.
pub async fn comment(
    recipes: &dyn RecipeStore,
    claims: &IdentityClaims,
    id: Uuid,
    text: &str,
) -> Result<Vec<Comment>, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::MissingCommentText,
            "Comment text is required",
        )
        .into());
    }

    let mut recipe = load_existing(recipes, id).await?;
    recipe.comments.push(Comment {
        id: Uuid::new_v4(),
        user: claims.sub,
        text: text.to_string(),
        date: OffsetDateTime::now_utc(),
    });
    recipe.updated_at = OffsetDateTime::now_utc();
    recipes.save(&recipe).await?;

    Ok(recipe.comments)
}
