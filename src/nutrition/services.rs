use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use super::{
    aggregator::{Aggregator, FoodEntry, MealFoods},
    dto::{DayNutrition, MealNutrition},
};
use crate::{
    access::{self, Scope},
    error::AppError,
    foods::repo_types::Food,
    meals::repo_types::Meal,
    state::AppState,
};

/// Totals of one meal, after checking the coach owns it.
pub async fn compute_meal_totals(
    state: &AppState,
    coach_id: Uuid,
    meal_id: Uuid,
) -> Result<MealNutrition, AppError> {
    access::require(&state.db, coach_id, Scope::Meal, meal_id).await?;
    let meal = Meal::find(&state.db, meal_id)
        .await?
        .ok_or(AppError::NotFound("meal"))?;
    let foods: Vec<FoodEntry> = Food::list_by_meal(&state.db, meal_id)
        .await?
        .iter()
        .map(FoodEntry::from)
        .collect();

    let tally = Aggregator::new(state.categories.as_ref())
        .meal(&foods)
        .await?;
    debug!(%meal_id, foods = foods.len(), "meal totals computed");

    Ok(MealNutrition {
        meal_id: meal.id,
        name: meal.name,
        totals: tally.report(),
    })
}

/// Totals of one day with its per-meal breakdown. Two tracker queries and
/// one catalog lookup regardless of how many meals the day has.
pub async fn compute_day_totals(
    state: &AppState,
    coach_id: Uuid,
    day_id: Uuid,
) -> Result<DayNutrition, AppError> {
    access::require(&state.db, coach_id, Scope::Day, day_id).await?;
    let meals = Meal::list_by_day(&state.db, day_id).await?;
    let foods = Food::list_by_day(&state.db, day_id).await?;
    let grouped = group_by_meal(&meals, &foods);

    let (total, per_meal) = Aggregator::new(state.categories.as_ref())
        .day(&grouped)
        .await?;
    debug!(%day_id, meals = grouped.len(), foods = foods.len(), "day totals computed");

    let meals = grouped
        .into_iter()
        .zip(per_meal)
        .map(|(m, tally)| MealNutrition {
            meal_id: m.meal_id,
            name: m.name,
            totals: tally.report(),
        })
        .collect();

    Ok(DayNutrition {
        day_id,
        totals: total.report(),
        meals,
    })
}

/// Buckets foods under their meals. Meal order is kept, food order within a
/// meal follows `foods`; foods of unknown meals are dropped.
pub fn group_by_meal(meals: &[Meal], foods: &[Food]) -> Vec<MealFoods> {
    let mut by_meal: HashMap<Uuid, Vec<FoodEntry>> = HashMap::new();
    for food in foods {
        by_meal.entry(food.meal_id).or_default().push(FoodEntry::from(food));
    }

    meals
        .iter()
        .map(|m| MealFoods {
            meal_id: m.id,
            name: m.name.clone(),
            foods: by_meal.remove(&m.id).unwrap_or_default(),
        })
        .collect()
}
