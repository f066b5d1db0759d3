use std::collections::HashSet;
use std::ops::Add;

use tracing::warn;
use uuid::Uuid;

use super::macros::{Macros, NutritionTotals};
use super::resolver::{CategoryResolver, ResolveError, ResolvedCategories};
use crate::catalog::repo_types::FoodCategory;

/// What the aggregator needs from a food row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodEntry {
    pub id: Uuid,
    pub category_id: Uuid,
    pub quantity: i32,
}

/// Foods of one meal, in insertion order.
#[derive(Debug, Clone)]
pub struct MealFoods {
    pub meal_id: Uuid,
    pub name: String,
    pub foods: Vec<FoodEntry>,
}

/// Running, unrounded total for a scope.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub macros: Macros,
    pub grams: i64,
}

impl Tally {
    pub fn report(&self) -> NutritionTotals {
        NutritionTotals::report(self.macros, self.grams)
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, other: Tally) -> Tally {
        Tally {
            macros: self.macros + other.macros,
            grams: self.grams + other.grams,
        }
    }
}

/// Contribution of a single food; an unresolved category counts as zero.
pub fn food_contribution(entry: &FoodEntry, category: Option<&FoodCategory>) -> Macros {
    match category {
        Some(c) => Macros::per_100g(c).for_quantity(entry.quantity),
        None => Macros::ZERO,
    }
}

pub fn compute_food_totals(entry: &FoodEntry, category: Option<&FoodCategory>) -> NutritionTotals {
    NutritionTotals::report(
        food_contribution(entry, category),
        i64::from(entry.quantity),
    )
}

/// Category of a food, or `None` (logged) when the catalog no longer has it.
/// Callers then count the food as zero.
pub fn category_of<'c>(entry: &FoodEntry, categories: &'c ResolvedCategories) -> Option<&'c FoodCategory> {
    match categories.get(entry.category_id) {
        Ok(c) => Some(c),
        Err(e) => {
            warn!(food_id = %entry.id, category_id = %entry.category_id, error = %e,
                "unresolved category counted as zero");
            None
        }
    }
}

/// Sums foods in iteration order against an already resolved category set.
pub fn sum_foods<'a, I>(foods: I, categories: &ResolvedCategories) -> Tally
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    let mut tally = Tally::default();
    for entry in foods {
        tally.macros += food_contribution(entry, category_of(entry, categories));
        tally.grams += i64::from(entry.quantity);
    }
    tally
}

/// Distinct category ids in first-seen order.
pub fn distinct_category_ids<'a, I>(foods: I) -> Vec<Uuid>
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    let mut seen = HashSet::new();
    foods
        .into_iter()
        .map(|f| f.category_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Meal and day rollups with one catalog round-trip per call.
pub struct Aggregator<'a> {
    resolver: &'a dyn CategoryResolver,
}

impl<'a> Aggregator<'a> {
    pub fn new(resolver: &'a dyn CategoryResolver) -> Self {
        Self { resolver }
    }

    pub async fn meal(&self, foods: &[FoodEntry]) -> Result<Tally, ResolveError> {
        let ids = distinct_category_ids(foods);
        let categories = self.resolver.resolve_many(&ids).await?;
        Ok(sum_foods(foods, &categories))
    }

    /// Day total is the sum of the unrounded per-meal totals, which are
    /// returned alongside it in meal order.
    pub async fn day(&self, meals: &[MealFoods]) -> Result<(Tally, Vec<Tally>), ResolveError> {
        let ids = distinct_category_ids(meals.iter().flat_map(|m| m.foods.iter()));
        let categories = self.resolver.resolve_many(&ids).await?;

        let per_meal: Vec<Tally> = meals
            .iter()
            .map(|m| sum_foods(&m.foods, &categories))
            .collect();
        let total = per_meal
            .iter()
            .fold(Tally::default(), |acc, t| acc + *t);
        Ok((total, per_meal))
    }
}
