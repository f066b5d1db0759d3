use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{AuthResponse, CredentialsRequest, PublicCoach, RefreshRequest},
        repo_types::Coach,
        services::{
            hash_password, is_valid_username, verify_password, AuthCoach, JwtKeys,
            MIN_PASSWORD_LEN,
        },
    },
    error::{is_unique_violation, AppError},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn issue_tokens(state: &AppState, coach: Coach) -> Result<AuthResponse, AppError> {
    let keys = JwtKeys::from_ref(state);
    let access_token = keys.sign_access(coach.id).map_err(|e| {
        error!(error = %e, "jwt sign access failed");
        AppError::Internal(e)
    })?;
    let refresh_token = keys.sign_refresh(coach.id).map_err(|e| {
        error!(error = %e, "jwt sign refresh failed");
        AppError::Internal(e)
    })?;
    Ok(AuthResponse {
        access_token,
        refresh_token,
        coach: PublicCoach {
            id: coach.id,
            username: coach.username,
        },
    })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.username = payload.username.trim().to_string();

    if !is_valid_username(&payload.username) {
        warn!(username = %payload.username, "invalid username");
        return Err(AppError::Validation(
            "Username must be 3-32 characters of letters, digits, '_', '.' or '-'".into(),
        ));
    }

    if payload.password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::Validation("Password too short".into()));
    }

    // Ensure username is not taken
    if Coach::find_by_username(&state.db, &payload.username).await?.is_some() {
        warn!(username = %payload.username, "username already registered");
        return Err(AppError::Conflict("Username already registered".into()));
    }

    let hash = hash_password(&payload.password)?;
    let coach = match Coach::create(&state.db, &payload.username, &hash).await {
        Ok(c) => c,
        Err(e) if is_unique_violation(&e) => {
            warn!(username = %payload.username, "username registered concurrently");
            return Err(AppError::Conflict("Username already registered".into()));
        }
        Err(e) => {
            error!(error = %e, "create coach failed");
            return Err(AppError::Internal(e));
        }
    };

    info!(coach_id = %coach.id, username = %coach.username, "coach registered");
    Ok((StatusCode::CREATED, Json(issue_tokens(&state, coach)?)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let username = payload.username.trim();

    let coach = match Coach::find_by_username(&state.db, username).await? {
        Some(c) => c,
        None => {
            warn!(%username, "login unknown username");
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
    };

    if !verify_password(&payload.password, &coach.password_hash)? {
        warn!(%username, coach_id = %coach.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    info!(coach_id = %coach.id, username = %coach.username, "coach logged in");
    Ok(Json(issue_tokens(&state, coach)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify_refresh(&payload.refresh_token)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;

    let coach = load_coach(&state, claims.sub).await?;
    Ok(Json(issue_tokens(&state, coach)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
) -> Result<Json<PublicCoach>, AppError> {
    let coach = load_coach(&state, coach_id).await?;
    Ok(Json(PublicCoach {
        id: coach.id,
        username: coach.username,
    }))
}

async fn load_coach(state: &AppState, coach_id: Uuid) -> Result<Coach, AppError> {
    Coach::find_by_id(&state.db, coach_id).await?.ok_or_else(|| {
        error!(%coach_id, "coach not found");
        AppError::Unauthorized("Coach not found".into())
    })
}

#[cfg(test)]
mod me_tests {
    use super::*;

    #[test]
    fn test_public_coach_serialization() {
        let response = PublicCoach {
            id: uuid::Uuid::new_v4(),
            username: "coach_anna".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("coach_anna"));
        assert!(json.contains("id"));
    }

    #[tokio::test]
    async fn issued_tokens_belong_to_the_coach() {
        let state = AppState::fake();
        let coach = Coach {
            id: Uuid::new_v4(),
            username: "coach_anna".into(),
            password_hash: "irrelevant".into(),
            created_at: time::OffsetDateTime::now_utc(),
        };
        let id = coach.id;
        let res = issue_tokens(&state, coach).unwrap();
        let keys = JwtKeys::from_ref(&state);
        assert_eq!(keys.verify(&res.access_token).unwrap().sub, id);
        assert_eq!(keys.verify_refresh(&res.refresh_token).unwrap().sub, id);

        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["coach"]["username"], "coach_anna");
        assert!(json["coach"].get("password_hash").is_none());
    }
}
