use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One chat exchange with the local tutor. Immutable after creation;
/// removed with its user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub texto_usuario: String,
    pub respuesta_ia: Option<String>,
    pub correccion_ia: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Message {
    pub async fn create(
        db: &PgPool,
        usuario_id: Uuid,
        texto_usuario: &str,
        respuesta_ia: &str,
        correccion_ia: Option<&str>,
    ) -> anyhow::Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO mensajes (usuario_id, texto_usuario, respuesta_ia, correccion_ia)
            VALUES ($1, $2, $3, $4)
            RETURNING id, usuario_id, texto_usuario, respuesta_ia, correccion_ia, created_at
            "#,
        )
        .bind(usuario_id)
        .bind(texto_usuario)
        .bind(respuesta_ia)
        .bind(correccion_ia)
        .fetch_one(db)
        .await?;
        Ok(message)
    }
}
