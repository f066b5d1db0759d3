use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::Food;
use crate::catalog::repo_types::FoodCategory;
use crate::nutrition::{
    aggregator::{compute_food_totals, FoodEntry},
    macros::NutritionTotals,
};

pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
    pub meal_id: Uuid,
    /// Falls back to the first catalog category by name.
    #[serde(default)]
    pub category_id: Option<Uuid>,
    /// Grams, defaults to 1.
    #[serde(default)]
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFoodRequest {
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub quantity: Option<i32>,
}

/// A food with its rounded macro contribution.
#[derive(Debug, Serialize)]
pub struct FoodResponse {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub category_id: Uuid,
    pub category_name: String,
    pub quantity: i32,
    #[serde(flatten)]
    pub totals: NutritionTotals,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl FoodResponse {
    pub fn build(food: &Food, category: Option<&FoodCategory>) -> Self {
        Self {
            id: food.id,
            meal_id: food.meal_id,
            category_id: food.category_id,
            category_name: category
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
            quantity: food.quantity,
            totals: compute_food_totals(&FoodEntry::from(food), category),
            created_at: food.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn food(category_id: Uuid, quantity: i32) -> Food {
        Food {
            id: Uuid::new_v4(),
            meal_id: Uuid::new_v4(),
            category_id,
            quantity,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn response_carries_category_and_rounded_macros() {
        let potato = FoodCategory {
            id: Uuid::new_v4(),
            name: "potato".into(),
            protein: Some(2.0),
            carbs: Some(18.0),
            fat: Some(0.5),
            kcal: Some(80.0),
            created_at: OffsetDateTime::now_utc(),
        };
        let f = food(potato.id, 150);
        let json = serde_json::to_value(FoodResponse::build(&f, Some(&potato))).unwrap();
        assert_eq!(json["category_name"], "potato");
        assert_eq!(json["quantity"], 150);
        assert_eq!(json["protein"], 3.0);
        assert_eq!(json["carbs"], 27.0);
        assert_eq!(json["fat"], 0.8);
        assert_eq!(json["kcal"], 120.0);
        assert_eq!(json["grams_total"], 150);
    }

    #[test]
    fn response_carries_creation_time() {
        let mut f = food(Uuid::new_v4(), 10);
        f.created_at = datetime!(2024-03-09 12:30 UTC);
        let json = serde_json::to_value(FoodResponse::build(&f, None)).unwrap();
        assert_eq!(json["created_at"], "2024-03-09T12:30:00Z");
    }

    #[test]
    fn dangling_category_reads_as_unknown_and_zero() {
        let f = food(Uuid::new_v4(), 90);
        let res = FoodResponse::build(&f, None);
        assert_eq!(res.category_name, UNKNOWN_CATEGORY);
        assert_eq!(res.totals.kcal, 0.0);
        assert_eq!(res.totals.protein, 0.0);
        assert_eq!(res.totals.grams_total, 90);
    }

    #[test]
    fn create_request_defaults() {
        let req: CreateFoodRequest =
            serde_json::from_str(&format!(r#"{{"meal_id":"{}"}}"#, Uuid::nil())).unwrap();
        assert!(req.category_id.is_none());
        assert!(req.quantity.is_none());
    }
}
