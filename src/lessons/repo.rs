use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// AI-generated lesson. Immutable after creation; removed with its user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lesson {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub tema: String,
    pub contenido: String,
    pub proveedor_ia: String,
    pub created_at: OffsetDateTime,
}

impl Lesson {
    pub async fn create(
        db: &PgPool,
        usuario_id: Uuid,
        tema: &str,
        contenido: &str,
        proveedor_ia: &str,
    ) -> anyhow::Result<Lesson> {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"
            INSERT INTO lecciones (usuario_id, tema, contenido, proveedor_ia)
            VALUES ($1, $2, $3, $4)
            RETURNING id, usuario_id, tema, contenido, proveedor_ia, created_at
            "#,
        )
        .bind(usuario_id)
        .bind(tema)
        .bind(contenido)
        .bind(proveedor_ia)
        .fetch_one(db)
        .await?;
        Ok(lesson)
    }

    /// All lessons for one user, newest first. No pagination.
    pub async fn list_by_user(db: &PgPool, usuario_id: Uuid) -> anyhow::Result<Vec<Lesson>> {
        let rows = sqlx::query_as::<_, Lesson>(
            r#"
            SELECT id, usuario_id, tema, contenido, proveedor_ia, created_at
            FROM lecciones
            WHERE usuario_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(usuario_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
