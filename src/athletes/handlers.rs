use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{dto::AthleteRequest, repo_types::Athlete};
use crate::{
    access::{self, Scope},
    auth::services::AuthCoach,
    error::AppError,
    state::AppState,
};

pub fn athlete_routes() -> Router<AppState> {
    Router::new()
        .route("/athletes", get(list_athletes).post(create_athlete))
        .route(
            "/athletes/:id",
            get(get_athlete).put(update_athlete).delete(delete_athlete),
        )
}

#[instrument(skip(state))]
pub async fn list_athletes(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
) -> Result<Json<Vec<Athlete>>, AppError> {
    Ok(Json(Athlete::list_by_coach(&state.db, coach_id).await?))
}

#[instrument(skip(state))]
pub async fn get_athlete(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(id): Path<Uuid>,
) -> Result<Json<Athlete>, AppError> {
    let athlete = Athlete::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Athlete"))?;
    access::check_owner(Scope::Athlete, Some(athlete.coach_id), coach_id)?;
    Ok(Json(athlete))
}

#[instrument(skip(state, payload))]
pub async fn create_athlete(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Json(payload): Json<AthleteRequest>,
) -> Result<(StatusCode, Json<Athlete>), AppError> {
    let fields = payload.into_fields()?;
    let name = fields
        .name
        .clone()
        .ok_or_else(|| AppError::Validation("name is required".into()))?;
    let athlete = Athlete::create(&state.db, coach_id, &name, &fields).await?;
    info!(%coach_id, athlete_id = %athlete.id, "athlete created");
    Ok((StatusCode::CREATED, Json(athlete)))
}

#[instrument(skip(state, payload))]
pub async fn update_athlete(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(id): Path<Uuid>,
    Json(payload): Json<AthleteRequest>,
) -> Result<Json<Athlete>, AppError> {
    access::require(&state.db, coach_id, Scope::Athlete, id).await?;
    let fields = payload.into_fields()?;
    let athlete = Athlete::update(&state.db, id, &fields).await?;
    info!(%coach_id, athlete_id = %id, "athlete updated");
    Ok(Json(athlete))
}

#[instrument(skip(state))]
pub async fn delete_athlete(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    access::require(&state.db, coach_id, Scope::Athlete, id).await?;
    Athlete::delete(&state.db, id).await?;
    info!(%coach_id, athlete_id = %id, "athlete deleted");
    Ok(StatusCode::NO_CONTENT)
}
