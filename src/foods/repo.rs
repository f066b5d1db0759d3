use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::Food;

impl Food {
    /// Insertion order.
    pub async fn list_by_meal(db: &PgPool, meal_id: Uuid) -> anyhow::Result<Vec<Food>> {
        let rows = sqlx::query_as::<_, Food>(
            r#"
            SELECT id, meal_id, category_id, quantity, created_at
              FROM foods
             WHERE meal_id = $1
             ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(meal_id)
        .fetch_all(db)
        .await
        .context("list foods by meal")?;
        Ok(rows)
    }

    /// Every food under a day, in insertion order.
    pub async fn list_by_day(db: &PgPool, day_id: Uuid) -> anyhow::Result<Vec<Food>> {
        let rows = sqlx::query_as::<_, Food>(
            r#"
            SELECT f.id, f.meal_id, f.category_id, f.quantity, f.created_at
              FROM foods f
              JOIN meals m ON m.id = f.meal_id
             WHERE m.day_id = $1
             ORDER BY f.created_at ASC, f.id ASC
            "#,
        )
        .bind(day_id)
        .fetch_all(db)
        .await
        .context("list foods by day")?;
        Ok(rows)
    }

    pub async fn create(
        db: &PgPool,
        meal_id: Uuid,
        category_id: Uuid,
        quantity: i32,
    ) -> anyhow::Result<Food> {
        let row = sqlx::query_as::<_, Food>(
            r#"
            INSERT INTO foods (meal_id, category_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, meal_id, category_id, quantity, created_at
            "#,
        )
        .bind(meal_id)
        .bind(category_id)
        .bind(quantity)
        .fetch_one(db)
        .await
        .context("insert food")?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        category_id: Option<Uuid>,
        quantity: Option<i32>,
    ) -> anyhow::Result<Food> {
        let row = sqlx::query_as::<_, Food>(
            r#"
            UPDATE foods
               SET category_id = COALESCE($2, category_id),
                   quantity    = COALESCE($3, quantity)
             WHERE id = $1
            RETURNING id, meal_id, category_id, quantity, created_at
            "#,
        )
        .bind(id)
        .bind(category_id)
        .bind(quantity)
        .fetch_one(db)
        .await
        .context("update food")?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM foods WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("delete food")?;
        Ok(())
    }
}
