//! Coach ownership checks. Every athlete, day, meal and food is reachable
//! only by the coach the athlete belongs to.

use anyhow::Context;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Athlete,
    Day,
    Meal,
    Food,
}

impl Scope {
    pub fn label(self) -> &'static str {
        match self {
            Scope::Athlete => "Athlete",
            Scope::Day => "Day",
            Scope::Meal => "Meal",
            Scope::Food => "Food",
        }
    }

    fn owner_sql(self) -> &'static str {
        match self {
            Scope::Athlete => "SELECT coach_id FROM athletes WHERE id = $1",
            Scope::Day => {
                r#"
                SELECT a.coach_id
                  FROM days d
                  JOIN athletes a ON a.id = d.athlete_id
                 WHERE d.id = $1
                "#
            }
            Scope::Meal => {
                r#"
                SELECT a.coach_id
                  FROM meals m
                  JOIN days d ON d.id = m.day_id
                  JOIN athletes a ON a.id = d.athlete_id
                 WHERE m.id = $1
                "#
            }
            Scope::Food => {
                r#"
                SELECT a.coach_id
                  FROM foods f
                  JOIN meals m ON m.id = f.meal_id
                  JOIN days d ON d.id = m.day_id
                  JOIN athletes a ON a.id = d.athlete_id
                 WHERE f.id = $1
                "#
            }
        }
    }
}

/// Coach owning the entity, `None` when the entity does not exist.
pub async fn owner_of(db: &PgPool, scope: Scope, id: Uuid) -> anyhow::Result<Option<Uuid>> {
    let owner = sqlx::query_scalar::<_, Uuid>(scope.owner_sql())
        .bind(id)
        .fetch_optional(db)
        .await
        .with_context(|| format!("lookup owner of {}", scope.label()))?;
    Ok(owner)
}

pub fn check_owner(scope: Scope, owner: Option<Uuid>, coach_id: Uuid) -> Result<(), AppError> {
    match owner {
        None => Err(AppError::NotFound(scope.label())),
        Some(o) if o == coach_id => Ok(()),
        Some(_) => {
            warn!(%coach_id, scope = scope.label(), "access to another coach's data");
            Err(AppError::Forbidden(scope.label()))
        }
    }
}

pub async fn require(db: &PgPool, coach_id: Uuid, scope: Scope, id: Uuid) -> Result<(), AppError> {
    let owner = owner_of(db, scope, id).await?;
    check_owner(scope, owner, coach_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entity_is_not_found() {
        let err = check_owner(Scope::Meal, None, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::NotFound("Meal")));
    }

    #[test]
    fn other_coach_is_forbidden() {
        let err = check_owner(Scope::Day, Some(Uuid::new_v4()), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Forbidden("Day")));
    }

    #[test]
    fn owner_passes() {
        let coach = Uuid::new_v4();
        assert!(check_owner(Scope::Food, Some(coach), coach).is_ok());
    }
}
