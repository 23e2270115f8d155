use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use super::ApiResponse;
use crate::error::AppError;
use crate::extractors::{CurrentUser, RecipeId, ValidatedJson};
use crate::services::recipes::{self as service, NewRecipe, RecipePatch};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct TagsQuery {
    pub tags: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub text: String,
}

async fn list_recipes(
    user: Option<CurrentUser>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let recipes = service::list(
        app_state.recipes.as_ref(),
        app_state.users.as_ref(),
        user.map(|u| u.sub),
    )
    .await?;
    Ok(ApiResponse::success("Recipes retrieved successfully", recipes).respond(StatusCode::OK))
}

async fn filter_by_tags(
    query: web::Query<TagsQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let recipes = service::filter_by_tags(
        app_state.recipes.as_ref(),
        app_state.users.as_ref(),
        query.tags.as_deref(),
    )
    .await?;
    Ok(ApiResponse::success("Filtered recipes retrieved", recipes).respond(StatusCode::OK))
}

async fn get_recipe(
    id: RecipeId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let recipe = service::get(app_state.recipes.as_ref(), app_state.users.as_ref(), id.0).await?;
    Ok(ApiResponse::success("Recipe retrieved successfully", recipe).respond(StatusCode::OK))
}

async fn create_recipe(
    user: CurrentUser,
    body: ValidatedJson<NewRecipe>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let recipe = service::create(
        app_state.recipes.as_ref(),
        app_state.users.as_ref(),
        user.claims(),
        body.into_inner(),
    )
    .await?;
    Ok(ApiResponse::success("Recipe created successfully", recipe).respond(StatusCode::CREATED))
}

async fn update_recipe(
    user: CurrentUser,
    id: RecipeId,
    body: ValidatedJson<RecipePatch>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let recipe = service::update(
        app_state.recipes.as_ref(),
        app_state.users.as_ref(),
        user.claims(),
        id.0,
        body.into_inner(),
    )
    .await?;
    Ok(ApiResponse::success("Recipe updated successfully", recipe).respond(StatusCode::OK))
}

async fn delete_recipe(
    user: CurrentUser,
    id: RecipeId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    service::delete(app_state.recipes.as_ref(), user.claims(), id.0).await?;
    Ok(ApiResponse::message_only("Recipe deleted successfully").respond(StatusCode::OK))
}

async fn toggle_favorite(
    user: CurrentUser,
    id: RecipeId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let toggle = service::toggle_favorite(
        app_state.recipes.as_ref(),
        app_state.users.as_ref(),
        user.claims(),
        id.0,
    )
    .await?;
    let message = if toggle.saved {
        "Recipe saved to favorites"
    } else {
        "Recipe removed from favorites"
    };
    Ok(ApiResponse::success(message, toggle.saved_recipes).respond(StatusCode::OK))
}

async fn comment_on_recipe(
    user: CurrentUser,
    id: RecipeId,
    body: ValidatedJson<CommentRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let comments =
        service::comment(app_state.recipes.as_ref(), user.claims(), id.0, &body.text).await?;
    Ok(ApiResponse::success("Comment added", comments).respond(StatusCode::CREATED))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_recipes))
            .route(web::post().to(create_recipe)),
    )
    .route("/filter/tags", web::get().to(filter_by_tags))
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_recipe))
            .route(web::patch().to(update_recipe))
            .route(web::delete().to(delete_recipe)),
    )
    .route("/{id}/save", web::post().to(toggle_favorite))
    .route("/{id}/comment", web::post().to(comment_on_recipe));
}
