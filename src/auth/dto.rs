use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub(crate) fn default_nivel() -> String {
    "principiante".to_string()
}

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default = "default_nivel")]
    pub nivel_idioma: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String, // always "bearer"
    pub nivel_idioma: String,
    pub usuario_id: Uuid,
}

/// Public part of the user returned by /auth/me.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub nivel_idioma: String,
}
