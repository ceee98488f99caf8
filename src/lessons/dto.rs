use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::dto::default_nivel;
use crate::lessons::repo::Lesson;
use crate::llm::Provider;

pub(crate) fn default_idioma() -> String {
    "inglés".to_string()
}

#[derive(Debug, Deserialize)]
pub struct GenerarLeccionRequest {
    pub tema: String,
    #[serde(default = "default_nivel")]
    pub nivel_idioma: String,
    #[serde(default = "default_idioma")]
    pub idioma_objetivo: String,
    #[serde(default)]
    pub proveedor: Provider,
}

#[derive(Debug, Serialize)]
pub struct LeccionResponse {
    pub id: Uuid,
    pub tema: String,
    pub contenido: String,
    pub proveedor_ia: String,
}

impl From<Lesson> for LeccionResponse {
    fn from(l: Lesson) -> Self {
        Self {
            id: l.id,
            tema: l.tema,
            contenido: l.contenido,
            proveedor_ia: l.proveedor_ia,
        }
    }
}
