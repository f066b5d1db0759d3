use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{CategoryFields, FoodCategory};

const COLUMNS: &str = "id, name, protein, carbs, fat, kcal, created_at";

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<FoodCategory>> {
    let rows = sqlx::query_as::<_, FoodCategory>(&format!(
        "SELECT {COLUMNS} FROM food_categories ORDER BY name ASC"
    ))
    .fetch_all(db)
    .await
    .context("list food categories")?;
    Ok(rows)
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<FoodCategory>> {
    let row = sqlx::query_as::<_, FoodCategory>(&format!(
        "SELECT {COLUMNS} FROM food_categories WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
    .context("find food category")?;
    Ok(row)
}

/// Batch lookup; ids without a row are simply missing from the result.
pub async fn find_many(db: &PgPool, ids: &[Uuid]) -> anyhow::Result<Vec<FoodCategory>> {
    let rows = sqlx::query_as::<_, FoodCategory>(&format!(
        "SELECT {COLUMNS} FROM food_categories WHERE id = ANY($1)"
    ))
    .bind(ids)
    .fetch_all(db)
    .await
    .context("find food categories by ids")?;
    Ok(rows)
}

/// Case-insensitive name lookup, optionally ignoring one row (for renames).
pub async fn find_by_name(
    db: &PgPool,
    name: &str,
    except: Option<Uuid>,
) -> anyhow::Result<Option<FoodCategory>> {
    let row = sqlx::query_as::<_, FoodCategory>(&format!(
        r#"
        SELECT {COLUMNS}
          FROM food_categories
         WHERE lower(name) = lower($1)
           AND ($2::uuid IS NULL OR id <> $2)
        "#
    ))
    .bind(name)
    .bind(except)
    .fetch_optional(db)
    .await
    .context("find food category by name")?;
    Ok(row)
}

/// Default category for foods created without one.
pub async fn first_by_name(db: &PgPool) -> anyhow::Result<Option<FoodCategory>> {
    let row = sqlx::query_as::<_, FoodCategory>(&format!(
        "SELECT {COLUMNS} FROM food_categories ORDER BY name ASC LIMIT 1"
    ))
    .fetch_optional(db)
    .await
    .context("first food category")?;
    Ok(row)
}

pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM food_categories")
        .fetch_one(db)
        .await
        .context("count food categories")?;
    Ok(n)
}

pub async fn create(db: &PgPool, fields: &CategoryFields) -> anyhow::Result<FoodCategory> {
    let row = sqlx::query_as::<_, FoodCategory>(&format!(
        r#"
        INSERT INTO food_categories (name, protein, carbs, fat, kcal)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&fields.name)
    .bind(fields.protein)
    .bind(fields.carbs)
    .bind(fields.fat)
    .bind(fields.kcal)
    .fetch_one(db)
    .await
    .context("insert food category")?;
    Ok(row)
}

/// Full replacement: unset macros are written as NULL.
pub async fn update(
    db: &PgPool,
    id: Uuid,
    fields: &CategoryFields,
) -> anyhow::Result<Option<FoodCategory>> {
    let row = sqlx::query_as::<_, FoodCategory>(&format!(
        r#"
        UPDATE food_categories
           SET name = $2, protein = $3, carbs = $4, fat = $5, kcal = $6
         WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&fields.name)
    .bind(fields.protein)
    .bind(fields.carbs)
    .bind(fields.fat)
    .bind(fields.kcal)
    .fetch_optional(db)
    .await
    .context("update food category")?;
    Ok(row)
}

/// Returns false when nothing was deleted. Foods referencing the category
/// live in another database and are left untouched.
pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM food_categories WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("delete food category")?;
    Ok(res.rows_affected() > 0)
}
