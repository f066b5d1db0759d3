use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateFoodRequest, FoodResponse, UpdateFoodRequest},
    repo_types::Food,
};
use crate::{
    access::{self, Scope},
    auth::services::AuthCoach,
    catalog::{self, repo_types::FoodCategory},
    error::AppError,
    nutrition::{
        aggregator::{category_of, distinct_category_ids, FoodEntry},
        resolver::ResolveError,
    },
    state::AppState,
    validate,
};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/meals/:id/foods", get(list_foods))
        .route("/foods", post(create_food))
        .route("/foods/:id", put(update_food).delete(delete_food))
}

/// Foods of a meal with their per-food totals. One catalog lookup for the
/// whole list; dangling categories show as "Unknown Category".
#[instrument(skip(state))]
pub async fn list_foods(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(meal_id): Path<Uuid>,
) -> Result<Json<Vec<FoodResponse>>, AppError> {
    access::require(&state.db, coach_id, Scope::Meal, meal_id).await?;
    let foods = Food::list_by_meal(&state.db, meal_id).await?;

    let entries: Vec<FoodEntry> = foods.iter().map(FoodEntry::from).collect();
    let categories = state
        .categories
        .resolve_many(&distinct_category_ids(&entries))
        .await?;

    let items = foods
        .iter()
        .zip(&entries)
        .map(|(f, entry)| FoodResponse::build(f, category_of(entry, &categories)))
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, payload))]
pub async fn create_food(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Json(payload): Json<CreateFoodRequest>,
) -> Result<(StatusCode, Json<FoodResponse>), AppError> {
    access::require(&state.db, coach_id, Scope::Meal, payload.meal_id).await?;
    let quantity = validate::quantity(payload.quantity.unwrap_or(1))?;
    let category = category_for_new_food(&state, payload.category_id).await?;

    let food = Food::create(&state.db, payload.meal_id, category.id, quantity).await?;
    info!(%coach_id, food_id = %food.id, meal_id = %food.meal_id, category = %category.name, quantity, "food created");
    Ok((
        StatusCode::CREATED,
        Json(FoodResponse::build(&food, Some(&category))),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_food(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFoodRequest>,
) -> Result<Json<FoodResponse>, AppError> {
    access::require(&state.db, coach_id, Scope::Food, id).await?;
    let quantity = payload.quantity.map(validate::quantity).transpose()?;

    // A new category must exist; the current one may already be gone.
    let requested = match payload.category_id {
        Some(category_id) => Some(state.categories.resolve(category_id).await?),
        None => None,
    };

    let food = Food::update(&state.db, id, payload.category_id, quantity).await?;
    let category = category_after_update(&state, requested, food.category_id).await?;

    info!(%coach_id, food_id = %id, "food updated");
    Ok(Json(FoodResponse::build(&food, category.as_ref())))
}

#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    AuthCoach(coach_id): AuthCoach,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    access::require(&state.db, coach_id, Scope::Food, id).await?;
    Food::delete(&state.db, id).await?;
    info!(%coach_id, food_id = %id, "food deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Reuses the category validated for the update; otherwise looks up the
/// stored one, which may have been deleted from the catalog.
async fn category_after_update(
    state: &AppState,
    requested: Option<FoodCategory>,
    category_id: Uuid,
) -> Result<Option<FoodCategory>, AppError> {
    if requested.is_some() {
        return Ok(requested);
    }
    match state.categories.resolve(category_id).await {
        Ok(c) => Ok(Some(c)),
        Err(ResolveError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn category_for_new_food(
    state: &AppState,
    requested: Option<Uuid>,
) -> Result<FoodCategory, AppError> {
    match requested {
        Some(id) => Ok(state.categories.resolve(id).await?),
        None => catalog::repo::first_by_name(&state.catalog)
            .await?
            .ok_or_else(|| AppError::Validation("No food categories available".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::resolver::{CategoryResolver, InMemoryCategories};
    use std::sync::Arc;
    use time::OffsetDateTime;

    fn milk() -> FoodCategory {
        FoodCategory {
            id: Uuid::new_v4(),
            name: "milk".into(),
            protein: Some(3.2),
            carbs: Some(4.8),
            fat: Some(3.3),
            kcal: Some(61.0),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn state_with(categories: Arc<InMemoryCategories>) -> AppState {
        let mut state = AppState::fake();
        state.categories = categories as Arc<dyn CategoryResolver>;
        state
    }

    #[tokio::test]
    async fn requested_category_is_not_fetched_twice() {
        let milk = milk();
        let categories = Arc::new(InMemoryCategories::with([milk.clone()]));
        let state = state_with(categories.clone());

        let got = category_after_update(&state, Some(milk.clone()), milk.id)
            .await
            .unwrap();
        assert_eq!(got, Some(milk));
        assert_eq!(categories.calls(), 0);
    }

    #[tokio::test]
    async fn stored_category_is_looked_up_and_may_be_gone() {
        let milk = milk();
        let categories = Arc::new(InMemoryCategories::with([milk.clone()]));
        let state = state_with(categories.clone());

        let got = category_after_update(&state, None, milk.id).await.unwrap();
        assert_eq!(got.map(|c| c.name), Some("milk".to_string()));
        assert_eq!(categories.calls(), 1);

        categories.remove(milk.id);
        let gone = category_after_update(&state, None, milk.id).await.unwrap();
        assert!(gone.is_none());
    }
}
