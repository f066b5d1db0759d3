use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::aggregator::FoodEntry;

/// A consumption record. `category_id` points into the catalog database,
/// so there is no foreign key behind it.
#[derive(Debug, Clone, FromRow)]
pub struct Food {
    pub id: Uuid,
    pub meal_id: Uuid,
    pub category_id: Uuid,
    pub quantity: i32,
    pub created_at: OffsetDateTime,
}

impl From<&Food> for FoodEntry {
    fn from(f: &Food) -> Self {
        FoodEntry {
            id: f.id,
            category_id: f.category_id,
            quantity: f.quantity,
        }
    }
}
