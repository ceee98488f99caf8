use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::CurrentUser,
    chat::{
        dto::{ChatRequest, ChatResponse},
        repo::Message,
        services,
    },
    error::ApiError,
    llm::prompts::build_chat_prompt,
    state::AppState,
};

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/chat/local", post(chat_local))
}

const MAX_MENSAJE_CHARS: usize = 2000;

/// Talks to the local tutor model. This endpoint never hard-fails on the
/// model being down: the reply degrades to a fixed instructional message
/// and the exchange is persisted either way.
#[instrument(skip_all)]
pub async fn chat_local(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let mensaje_len = payload.mensaje.chars().count();
    if mensaje_len == 0 || mensaje_len > MAX_MENSAJE_CHARS {
        warn!(mensaje_len, "mensaje out of range");
        return Err(ApiError::Validation(
            "El mensaje debe tener entre 1 y 2000 caracteres.".into(),
        ));
    }

    let prompt = build_chat_prompt(
        &payload.mensaje,
        &payload.nivel_idioma,
        &payload.idioma_objetivo,
    );
    let (respuesta, correccion) = services::tutor_exchange(&state, &prompt).await;

    let message = Message::create(
        &state.db,
        user.id,
        &payload.mensaje,
        &respuesta,
        correccion.as_deref(),
    )
    .await?;

    info!(
        user_id = %user.id,
        message_id = %message.id,
        corrected = correccion.is_some(),
        "chat exchange stored"
    );
    Ok(Json(ChatResponse {
        respuesta,
        correccion,
        mensaje_id: Some(message.id),
    }))
}
