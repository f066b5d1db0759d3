use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date, OffsetDateTime};
use uuid::Uuid;

use super::repo_types::Day;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateDayRequest {
    pub athlete_id: Uuid,
    pub day_name: String,
    /// `YYYY-MM-DD`, defaults to today (UTC).
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDayRequest {
    #[serde(default)]
    pub day_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub id: Uuid,
    pub athlete_id: Uuid,
    pub day_name: Option<String>,
    pub date: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Day> for DayResponse {
    fn from(d: Day) -> Self {
        Self {
            id: d.id,
            athlete_id: d.athlete_id,
            day_name: d.day_name,
            date: d.date.to_string(),
            created_at: d.created_at,
        }
    }
}

pub fn parse_date(raw: &str) -> Result<Date, AppError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::Validation(format!("invalid date '{raw}', expected YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2024-03-09").unwrap(), date!(2024 - 03 - 09));
        assert_eq!(parse_date(" 2024-12-31 ").unwrap(), date!(2024 - 12 - 31));
        assert!(parse_date("09/03/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn response_formats_date_as_iso() {
        let day = Day {
            id: Uuid::new_v4(),
            athlete_id: Uuid::new_v4(),
            date: date!(2024 - 03 - 09),
            day_name: Some("Saturday".into()),
            created_at: datetime!(2024-03-09 08:00 UTC),
        };
        let json = serde_json::to_value(DayResponse::from(day)).unwrap();
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["day_name"], "Saturday");
        assert_eq!(json["created_at"], "2024-03-09T08:00:00Z");
    }
}
