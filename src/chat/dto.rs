use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::dto::default_nivel;
use crate::lessons::dto::default_idioma;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub mensaje: String,
    #[serde(default = "default_idioma")]
    pub idioma_objetivo: String,
    #[serde(default = "default_nivel")]
    pub nivel_idioma: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub respuesta: String,
    pub correccion: Option<String>,
    pub mensaje_id: Option<Uuid>,
}
