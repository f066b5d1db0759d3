use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{CreateMealRequest, RenameMealRequest},
    repo_types::Meal,
};
use crate::{
    access::{self, Scope},
    auth::services::AuthCoach,
    error::AppError,
    state::AppState,
    validate,
};

const MEAL_NAME_MAX: usize = 64;

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/days/:id/meals", get(list_meals))
        .route("/meals", post(create_meal))
        .route("/meals/:id", put(rename_meal).delete(delete_meal))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(day_id): Path<Uuid>,
) -> Result<Json<Vec<Meal>>, AppError> {
    access::require(&state.db, coach_id, Scope::Day, day_id).await?;
    Ok(Json(Meal::list_by_day(&state.db, day_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Json(payload): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<Meal>), AppError> {
    access::require(&state.db, coach_id, Scope::Day, payload.day_id).await?;
    let name = validate::required_text("name", &payload.name, MEAL_NAME_MAX)?;

    if Meal::name_taken(&state.db, payload.day_id, &name, None).await? {
        warn!(day_id = %payload.day_id, %name, "meal name already used");
        return Err(AppError::Conflict(format!(
            "Meal '{name}' already exists for this day"
        )));
    }

    let meal = Meal::create(&state.db, payload.day_id, &name)
        .await
        .map_err(|e| AppError::on_duplicate(e, format!("Meal '{name}' already exists for this day")))?;
    info!(%coach_id, meal_id = %meal.id, day_id = %meal.day_id, "meal created");
    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state, payload))]
pub async fn rename_meal(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(id): Path<Uuid>,
    Json(payload): Json<RenameMealRequest>,
) -> Result<Json<Meal>, AppError> {
    access::require(&state.db, coach_id, Scope::Meal, id).await?;
    let current = Meal::find(&state.db, id).await?.ok_or(AppError::NotFound("Meal"))?;
    let name = validate::required_text("name", &payload.name, MEAL_NAME_MAX)?;

    if Meal::name_taken(&state.db, current.day_id, &name, Some(id)).await? {
        warn!(meal_id = %id, %name, "meal name already used");
        return Err(AppError::Conflict(format!(
            "Meal '{name}' already exists for this day"
        )));
    }

    let meal = Meal::rename(&state.db, id, &name)
        .await
        .map_err(|e| AppError::on_duplicate(e, format!("Meal '{name}' already exists for this day")))?;
    info!(%coach_id, meal_id = %id, "meal renamed");
    Ok(Json(meal))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    access::require(&state.db, coach_id, Scope::Meal, id).await?;
    Meal::delete(&state.db, id).await?;
    info!(%coach_id, meal_id = %id, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}
