use anyhow::Context;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::Day;

impl Day {
    /// Newest date first.
    pub async fn list_by_athlete(db: &PgPool, athlete_id: Uuid) -> anyhow::Result<Vec<Day>> {
        let rows = sqlx::query_as::<_, Day>(
            r#"
            SELECT id, athlete_id, date, day_name, created_at
              FROM days
             WHERE athlete_id = $1
             ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(athlete_id)
        .fetch_all(db)
        .await
        .context("list days")?;
        Ok(rows)
    }

    pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Day>> {
        let row = sqlx::query_as::<_, Day>(
            r#"SELECT id, athlete_id, date, day_name, created_at FROM days WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find day")?;
        Ok(row)
    }

    /// True when another day of the athlete already uses `day_name`.
    pub async fn name_taken(
        db: &PgPool,
        athlete_id: Uuid,
        day_name: &str,
        except: Option<Uuid>,
    ) -> anyhow::Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM days
                 WHERE athlete_id = $1
                   AND day_name = $2
                   AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(athlete_id)
        .bind(day_name)
        .bind(except)
        .fetch_one(db)
        .await
        .context("check day name")?;
        Ok(taken)
    }

    pub async fn create(
        db: &PgPool,
        athlete_id: Uuid,
        day_name: &str,
        date: Date,
    ) -> anyhow::Result<Day> {
        let row = sqlx::query_as::<_, Day>(
            r#"
            INSERT INTO days (athlete_id, day_name, date)
            VALUES ($1, $2, $3)
            RETURNING id, athlete_id, date, day_name, created_at
            "#,
        )
        .bind(athlete_id)
        .bind(day_name)
        .bind(date)
        .fetch_one(db)
        .await
        .context("insert day")?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        day_name: Option<&str>,
        date: Option<Date>,
    ) -> anyhow::Result<Day> {
        let row = sqlx::query_as::<_, Day>(
            r#"
            UPDATE days
               SET day_name = COALESCE($2, day_name),
                   date     = COALESCE($3, date)
             WHERE id = $1
            RETURNING id, athlete_id, date, day_name, created_at
            "#,
        )
        .bind(id)
        .bind(day_name)
        .bind(date)
        .fetch_one(db)
        .await
        .context("update day")?;
        Ok(row)
    }

    /// Meals and their foods go with it.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM days WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("delete day")?;
        Ok(())
    }
}
