use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Day {
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub date: Date,
    pub day_name: Option<String>,
    pub created_at: OffsetDateTime,
}
