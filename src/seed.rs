//! Optional demo data, enabled with `SEED_DEMO_DATA=true`.

use tracing::info;

use crate::{
    athletes::repo_types::{Athlete, AthleteFields},
    auth::{repo_types::Coach, services::hash_password},
    catalog::{self, repo_types::CategoryFields},
    state::AppState,
};

pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo-password";

/// Macros per 100 g: protein, carbs, fat, kcal.
const DEMO_CATEGORIES: [(&str, f64, f64, f64, f64); 3] = [
    ("potato", 2.0, 18.0, 0.5, 80.0),
    ("milk", 3.2, 4.8, 3.3, 61.0),
    ("beef", 26.0, 0.0, 10.0, 260.0),
];

pub fn demo_categories() -> Vec<CategoryFields> {
    DEMO_CATEGORIES
        .iter()
        .map(|&(name, protein, carbs, fat, kcal)| CategoryFields {
            name: name.to_string(),
            protein: Some(protein),
            carbs: Some(carbs),
            fat: Some(fat),
            kcal: Some(kcal),
        })
        .collect()
}

pub fn demo_athlete() -> (&'static str, AthleteFields) {
    (
        "John Smith",
        AthleteFields {
            name: None,
            email: None,
            phone: None,
            weight_kg: Some(75.0),
            height_m: Some(1.80),
        },
    )
}

/// Fills each store only when it is empty, so restarts are no-ops.
pub async fn run(state: &AppState) -> anyhow::Result<()> {
    if catalog::repo::count(&state.catalog).await? == 0 {
        for fields in demo_categories() {
            catalog::repo::create(&state.catalog, &fields).await?;
        }
        info!(count = DEMO_CATEGORIES.len(), "seeded food categories");
    }

    if Coach::count(&state.db).await? == 0 {
        let hash = hash_password(DEMO_PASSWORD)?;
        let coach = Coach::create(&state.db, DEMO_USERNAME, &hash).await?;
        let (name, fields) = demo_athlete();
        let athlete = Athlete::create(&state.db, coach.id, name, &fields).await?;
        info!(coach_id = %coach.id, athlete_id = %athlete.id, "seeded demo coach");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::services::{is_valid_username, verify_password, MIN_PASSWORD_LEN};
    use crate::catalog::repo_types::FoodCategory;
    use crate::nutrition::{aggregator::compute_food_totals, aggregator::FoodEntry};
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[test]
    fn demo_credentials_pass_registration_rules() {
        assert!(is_valid_username(DEMO_USERNAME));
        assert!(DEMO_PASSWORD.len() >= MIN_PASSWORD_LEN);
        let hash = hash_password(DEMO_PASSWORD).unwrap();
        assert!(verify_password(DEMO_PASSWORD, &hash).unwrap());
    }

    #[test]
    fn demo_categories_have_every_macro() {
        let cats = demo_categories();
        assert_eq!(
            cats.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["potato", "milk", "beef"]
        );
        assert!(cats
            .iter()
            .all(|c| c.protein.is_some() && c.carbs.is_some() && c.fat.is_some() && c.kcal.is_some()));
    }

    #[test]
    fn seeded_beef_scales_like_any_category() {
        let beef = demo_categories().remove(2);
        let category = FoodCategory {
            id: Uuid::new_v4(),
            name: beef.name,
            protein: beef.protein,
            carbs: beef.carbs,
            fat: beef.fat,
            kcal: beef.kcal,
            created_at: OffsetDateTime::now_utc(),
        };
        let entry = FoodEntry {
            id: Uuid::new_v4(),
            category_id: category.id,
            quantity: 200,
        };
        let totals = compute_food_totals(&entry, Some(&category));
        assert_eq!(totals.protein, 52.0);
        assert_eq!(totals.fat, 20.0);
        assert_eq!(totals.kcal, 520.0);
    }

    #[test]
    fn demo_athlete_matches_profile() {
        let (name, fields) = demo_athlete();
        assert_eq!(name, "John Smith");
        assert_eq!(fields.weight_kg, Some(75.0));
        assert_eq!(fields.height_m, Some(1.80));
    }
}
