use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::User;

impl User {
    /// Find a user by email. Emails are stored and compared case-sensitively.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, nivel_idioma, is_active, created_at
            FROM usuarios
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, nivel_idioma, is_active, created_at
            FROM usuarios
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with a hashed password. Lessons and messages hang
    /// off this row and are removed with it (ON DELETE CASCADE).
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        nivel_idioma: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO usuarios (email, password_hash, nivel_idioma)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, nivel_idioma, is_active, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(nivel_idioma)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}
