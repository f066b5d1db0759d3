use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{DayNutrition, MealNutrition},
    services,
};
use crate::{auth::services::AuthCoach, error::AppError, state::AppState};

pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/meals/:id/nutrition", get(meal_nutrition))
        .route("/days/:id/nutrition", get(day_nutrition))
}

#[instrument(skip(state))]
pub async fn meal_nutrition(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(meal_id): Path<Uuid>,
) -> Result<Json<MealNutrition>, AppError> {
    let totals = services::compute_meal_totals(&state, coach_id, meal_id).await?;
    Ok(Json(totals))
}

#[instrument(skip(state))]
pub async fn day_nutrition(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(day_id): Path<Uuid>,
) -> Result<Json<DayNutrition>, AppError> {
    let totals = services::compute_day_totals(&state, coach_id, day_id).await?;
    Ok(Json(totals))
}
