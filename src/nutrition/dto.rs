use serde::Serialize;
use uuid::Uuid;

use super::macros::NutritionTotals;

#[derive(Debug, Serialize)]
pub struct MealNutrition {
    pub meal_id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub totals: NutritionTotals,
}

/// Day totals plus the breakdown they were summed from, in meal order.
#[derive(Debug, Serialize)]
pub struct DayNutrition {
    pub day_id: Uuid,
    #[serde(flatten)]
    pub totals: NutritionTotals,
    pub meals: Vec<MealNutrition>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::macros::Macros;

    #[test]
    fn totals_are_flattened_next_to_ids() {
        let totals = NutritionTotals::report(
            Macros {
                protein: 3.0,
                carbs: 27.0,
                fat: 0.75,
                kcal: 120.0,
            },
            150,
        );
        let day = DayNutrition {
            day_id: Uuid::nil(),
            totals,
            meals: vec![MealNutrition {
                meal_id: Uuid::nil(),
                name: "Breakfast".into(),
                totals,
            }],
        };
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["kcal"], 120.0);
        assert_eq!(json["fat"], 0.8);
        assert_eq!(json["grams_total"], 150);
        assert_eq!(json["meals"][0]["name"], "Breakfast");
        assert_eq!(json["meals"][0]["protein"], 3.0);
        assert!(json.get("totals").is_none());
    }
}
