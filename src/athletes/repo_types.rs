use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Athlete {
    pub id: Uuid,
    pub coach_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_m: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Column values for insert; for update `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AthleteFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_m: Option<f64>,
}
