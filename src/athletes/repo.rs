use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Athlete, AthleteFields};

impl Athlete {
    pub async fn list_by_coach(db: &PgPool, coach_id: Uuid) -> anyhow::Result<Vec<Athlete>> {
        let rows = sqlx::query_as::<_, Athlete>(
            r#"
            SELECT id, coach_id, name, email, phone, weight_kg, height_m, created_at
              FROM athletes
             WHERE coach_id = $1
             ORDER BY name ASC, created_at ASC
            "#,
        )
        .bind(coach_id)
        .fetch_all(db)
        .await
        .context("list athletes")?;
        Ok(rows)
    }

    pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Athlete>> {
        let row = sqlx::query_as::<_, Athlete>(
            r#"
            SELECT id, coach_id, name, email, phone, weight_kg, height_m, created_at
              FROM athletes
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find athlete")?;
        Ok(row)
    }

    pub async fn create(
        db: &PgPool,
        coach_id: Uuid,
        name: &str,
        fields: &AthleteFields,
    ) -> anyhow::Result<Athlete> {
        let row = sqlx::query_as::<_, Athlete>(
            r#"
            INSERT INTO athletes (coach_id, name, email, phone, weight_kg, height_m)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, coach_id, name, email, phone, weight_kg, height_m, created_at
            "#,
        )
        .bind(coach_id)
        .bind(name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(fields.weight_kg)
        .bind(fields.height_m)
        .fetch_one(db)
        .await
        .context("insert athlete")?;
        Ok(row)
    }

    /// Partial update; unset fields are kept.
    pub async fn update(db: &PgPool, id: Uuid, fields: &AthleteFields) -> anyhow::Result<Athlete> {
        let row = sqlx::query_as::<_, Athlete>(
            r#"
            UPDATE athletes
               SET name      = COALESCE($2, name),
                   email     = COALESCE($3, email),
                   phone     = COALESCE($4, phone),
                   weight_kg = COALESCE($5, weight_kg),
                   height_m  = COALESCE($6, height_m)
             WHERE id = $1
            RETURNING id, coach_id, name, email, phone, weight_kg, height_m, created_at
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(fields.weight_kg)
        .bind(fields.height_m)
        .fetch_one(db)
        .await
        .context("update athlete")?;
        Ok(row)
    }

    /// Days, meals and foods go with it (ON DELETE CASCADE).
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM athletes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("delete athlete")?;
        Ok(())
    }
}
