use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub day_id: Uuid,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameMealRequest {
    pub name: String,
}
