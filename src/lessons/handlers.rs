use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::CurrentUser,
    error::ApiError,
    lessons::{
        dto::{GenerarLeccionRequest, LeccionResponse},
        repo::Lesson,
    },
    llm::prompts::build_lesson_prompt,
    state::AppState,
};

pub fn lesson_routes() -> Router<AppState> {
    Router::new()
        .route("/leccion/generar", post(generar_leccion))
        .route("/leccion/lista", get(listar_lecciones))
}

#[instrument(skip_all, fields(proveedor = payload.proveedor.as_str()))]
pub async fn generar_leccion(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<GenerarLeccionRequest>,
) -> Result<Json<LeccionResponse>, ApiError> {
    let tema_len = payload.tema.chars().count();
    if !(2..=200).contains(&tema_len) {
        warn!(tema_len, "tema out of range");
        return Err(ApiError::Validation(
            "El tema debe tener entre 2 y 200 caracteres.".into(),
        ));
    }

    let prompt = build_lesson_prompt(
        &payload.tema,
        &payload.nivel_idioma,
        &payload.idioma_objetivo,
    );

    // Fails with 503 before any network call when the key is missing;
    // provider errors surface as 502 and are not retried.
    let model = payload.proveedor.client(&state.http, &state.config.llm)?;
    let contenido = model.generate(&prompt).await?;

    let lesson = Lesson::create(
        &state.db,
        user.id,
        &payload.tema,
        &contenido,
        payload.proveedor.as_str(),
    )
    .await?;

    info!(
        user_id = %user.id,
        lesson_id = %lesson.id,
        chars = lesson.contenido.len(),
        "lesson generated"
    );
    Ok(Json(lesson.into()))
}

#[instrument(skip_all)]
pub async fn listar_lecciones(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<LeccionResponse>>, ApiError> {
    let lecciones = Lesson::list_by_user(&state.db, user.id).await?;
    Ok(Json(lecciones.into_iter().map(Into::into).collect()))
}
