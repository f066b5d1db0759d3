use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{parse_date, CreateDayRequest, DayResponse, UpdateDayRequest},
    repo_types::Day,
};
use crate::{
    access::{self, Scope},
    auth::services::AuthCoach,
    error::AppError,
    state::AppState,
    validate,
};

const DAY_NAME_MAX: usize = 64;

pub fn day_routes() -> Router<AppState> {
    Router::new()
        .route("/athletes/:id/days", get(list_days))
        .route("/days", post(create_day))
        .route("/days/:id", put(update_day).delete(delete_day))
}

#[instrument(skip(state))]
pub async fn list_days(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(athlete_id): Path<Uuid>,
) -> Result<Json<Vec<DayResponse>>, AppError> {
    access::require(&state.db, coach_id, Scope::Athlete, athlete_id).await?;
    let days = Day::list_by_athlete(&state.db, athlete_id).await?;
    Ok(Json(days.into_iter().map(DayResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_day(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Json(payload): Json<CreateDayRequest>,
) -> Result<(StatusCode, Json<DayResponse>), AppError> {
    access::require(&state.db, coach_id, Scope::Athlete, payload.athlete_id).await?;

    let day_name = validate::required_text("day_name", &payload.day_name, DAY_NAME_MAX)?;
    let date = match payload.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => OffsetDateTime::now_utc().date(),
    };

    if Day::name_taken(&state.db, payload.athlete_id, &day_name, None).await? {
        warn!(athlete_id = %payload.athlete_id, %day_name, "day name already used");
        return Err(AppError::Conflict(format!(
            "Day '{day_name}' already exists for this athlete"
        )));
    }

    let day = Day::create(&state.db, payload.athlete_id, &day_name, date)
        .await
        .map_err(|e| {
            AppError::on_duplicate(e, format!("Day '{day_name}' already exists for this athlete"))
        })?;
    info!(%coach_id, day_id = %day.id, athlete_id = %day.athlete_id, "day created");
    Ok((StatusCode::CREATED, Json(day.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_day(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDayRequest>,
) -> Result<Json<DayResponse>, AppError> {
    access::require(&state.db, coach_id, Scope::Day, id).await?;
    let current = Day::find(&state.db, id).await?.ok_or(AppError::NotFound("Day"))?;

    let day_name = match payload.day_name.as_deref() {
        Some(raw) => Some(validate::required_text("day_name", raw, DAY_NAME_MAX)?),
        None => None,
    };
    let date = payload.date.as_deref().map(parse_date).transpose()?;

    if let Some(name) = &day_name {
        if Day::name_taken(&state.db, current.athlete_id, name, Some(id)).await? {
            warn!(day_id = %id, day_name = %name, "day name already used");
            return Err(AppError::Conflict(format!(
                "Day '{name}' already exists for this athlete"
            )));
        }
    }

    let day = Day::update(&state.db, id, day_name.as_deref(), date)
        .await
        .map_err(|e| AppError::on_duplicate(e, "Day name already exists for this athlete"))?;
    info!(%coach_id, day_id = %id, "day updated");
    Ok(Json(day.into()))
}

#[instrument(skip(state))]
pub async fn delete_day(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    access::require(&state.db, coach_id, Scope::Day, id).await?;
    Day::delete(&state.db, id).await?;
    info!(%coach_id, day_id = %id, "day deleted");
    Ok(StatusCode::NO_CONTENT)
}
