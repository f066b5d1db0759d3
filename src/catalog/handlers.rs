use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{dto::CategoryRequest, repo, repo_types::FoodCategory};
use crate::{auth::services::AuthCoach, error::AppError, state::AppState};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/food-categories", get(list_categories).post(create_category))
        .route(
            "/food-categories/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
    AuthCoach(_coach_id): AuthCoach,
) -> Result<Json<Vec<FoodCategory>>, AppError> {
    Ok(Json(repo::list_all(&state.catalog).await?))
}

#[instrument(skip(state))]
pub async fn get_category(
    State(state): State<AppState>,
    AuthCoach(_coach_id): AuthCoach,
    Path(id): Path<Uuid>,
) -> Result<Json<FoodCategory>, AppError> {
    repo::find_by_id(&state.catalog, id)
        .await?
        .map(Json)
        .ok_or(AppError::CategoryNotFound(id))
}

#[instrument(skip(state, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Json(payload): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<FoodCategory>), AppError> {
    let fields = payload.into_fields()?;
    if repo::find_by_name(&state.catalog, &fields.name, None).await?.is_some() {
        warn!(name = %fields.name, "food category already exists");
        return Err(AppError::Conflict(format!(
            "Food category '{}' already exists",
            fields.name
        )));
    }
    let category = repo::create(&state.catalog, &fields).await.map_err(|e| {
        AppError::on_duplicate(e, format!("Food category '{}' already exists", fields.name))
    })?;
    info!(%coach_id, category_id = %category.id, name = %category.name, "food category created");
    Ok((StatusCode::CREATED, Json(category)))
}

#[instrument(skip(state, payload))]
pub async fn update_category(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<FoodCategory>, AppError> {
    let fields = payload.into_fields()?;
    if repo::find_by_name(&state.catalog, &fields.name, Some(id)).await?.is_some() {
        warn!(name = %fields.name, "food category name taken");
        return Err(AppError::Conflict(format!(
            "Food category '{}' already exists",
            fields.name
        )));
    }
    let category = repo::update(&state.catalog, id, &fields)
        .await
        .map_err(|e| {
            AppError::on_duplicate(e, format!("Food category '{}' already exists", fields.name))
        })?
        .ok_or(AppError::CategoryNotFound(id))?;
    info!(%coach_id, category_id = %id, "food category updated");
    Ok(Json(category))
}

#[instrument(skip(state))]
pub async fn delete_category(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !repo::delete(&state.catalog, id).await? {
        return Err(AppError::CategoryNotFound(id));
    }
    info!(%coach_id, category_id = %id, "food category deleted");
    Ok(StatusCode::NO_CONTENT)
}
