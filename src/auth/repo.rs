use crate::auth::repo_types::Coach;
use sqlx::PgPool;
use uuid::Uuid;

impl Coach {
    /// Find a coach by username (case-insensitive).
    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<Coach>> {
        let coach = sqlx::query_as::<_, Coach>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM coaches
            WHERE lower(username) = lower($1)
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(coach)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Coach>> {
        let coach = sqlx::query_as::<_, Coach>(
            r#"SELECT id, username, password_hash, created_at FROM coaches WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(coach)
    }

    /// Create a new coach with hashed password.
    pub async fn create(db: &PgPool, username: &str, password_hash: &str) -> anyhow::Result<Coach> {
        let coach = sqlx::query_as::<_, Coach>(
            r#"
            INSERT INTO coaches (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(coach)
    }

    pub async fn count(db: &PgPool) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM coaches")
            .fetch_one(db)
            .await?;
        Ok(n)
    }
}
