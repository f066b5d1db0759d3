use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::Meal;

impl Meal {
    /// Insertion order.
    pub async fn list_by_day(db: &PgPool, day_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, day_id, name, created_at
              FROM meals
             WHERE day_id = $1
             ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(day_id)
        .fetch_all(db)
        .await
        .context("list meals by day")?;
        Ok(rows)
    }

    pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Meal>> {
        let row = sqlx::query_as::<_, Meal>(
            r#"SELECT id, day_id, name, created_at FROM meals WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find meal")?;
        Ok(row)
    }

    pub async fn name_taken(
        db: &PgPool,
        day_id: Uuid,
        name: &str,
        except: Option<Uuid>,
    ) -> anyhow::Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM meals
                 WHERE day_id = $1
                   AND name = $2
                   AND ($3::uuid IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(day_id)
        .bind(name)
        .bind(except)
        .fetch_one(db)
        .await
        .context("check meal name")?;
        Ok(taken)
    }

    pub async fn create(db: &PgPool, day_id: Uuid, name: &str) -> anyhow::Result<Meal> {
        let row = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (day_id, name)
            VALUES ($1, $2)
            RETURNING id, day_id, name, created_at
            "#,
        )
        .bind(day_id)
        .bind(name)
        .fetch_one(db)
        .await
        .context("insert meal")?;
        Ok(row)
    }

    pub async fn rename(db: &PgPool, id: Uuid, name: &str) -> anyhow::Result<Meal> {
        let row = sqlx::query_as::<_, Meal>(
            r#"
            UPDATE meals SET name = $2
             WHERE id = $1
            RETURNING id, day_id, name, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_one(db)
        .await
        .context("rename meal")?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("delete meal")?;
        Ok(())
    }
}
