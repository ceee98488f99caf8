use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::llm::LocalModel;
use crate::state::AppState;

/// Shown as the tutor's reply whenever the local model cannot be reached.
pub fn fallback_reply(local_model: &str) -> String {
    format!(
        "El modelo local no está disponible. Inicia Ollama con `ollama serve` \
         y descarga el modelo con `ollama pull {local_model}`."
    )
}

/// Pull the tutor's `{respuesta, correccion}` envelope out of free-form
/// model output. Greedy first-`{`-to-last-`}` scan, spanning newlines; it
/// can misfire when the output holds several JSON-ish blocks, which is an
/// accepted limitation of this best-effort contract.
pub fn extract_envelope(raw: &str) -> (String, Option<String>) {
    lazy_static! {
        static ref JSON_BLOCK_RE: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
    }
    if let Some(block) = JSON_BLOCK_RE.find(raw) {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(block.as_str()) {
            let respuesta = parsed
                .get("respuesta")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| raw.to_string());
            let correccion = parsed
                .get("correccion")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            return (respuesta, correccion);
        }
    }
    (raw.to_string(), None)
}

/// One best-effort round with the local tutor. Never fails: connection
/// errors, timeouts and non-2xx answers all degrade to the fallback reply.
pub async fn tutor_exchange(state: &AppState, prompt: &str) -> (String, Option<String>) {
    let cfg = &state.config.llm;
    let model = LocalModel::new(
        state.http.clone(),
        cfg.local_url.clone(),
        cfg.local_model.clone(),
    );
    match model.generate(prompt).await {
        Ok(raw) => extract_envelope(&raw),
        Err(e) => {
            warn!(error = %e, "local model unavailable, serving fallback reply");
            (fallback_reply(&cfg.local_model), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn extracts_envelope_embedded_in_prose() {
        let raw = "Claro, aquí tienes:\n{\"respuesta\":\"Hola\",\"correccion\":null}\nEspero que ayude.";
        let (respuesta, correccion) = extract_envelope(raw);
        assert_eq!(respuesta, "Hola");
        assert_eq!(correccion, None);
    }

    #[test]
    fn extracts_a_present_correction() {
        let raw = r#"{"respuesta":"¡Muy bien!","correccion":"Se dice 'fui', no 'fué'."}"#;
        let (respuesta, correccion) = extract_envelope(raw);
        assert_eq!(respuesta, "¡Muy bien!");
        assert_eq!(correccion.as_deref(), Some("Se dice 'fui', no 'fué'."));
    }

    #[test]
    fn empty_correction_becomes_none() {
        let raw = r#"{"respuesta":"Bien","correccion":""}"#;
        let (_, correccion) = extract_envelope(raw);
        assert_eq!(correccion, None);
    }

    #[test]
    fn envelope_spanning_newlines_is_found() {
        let raw = "{\n  \"respuesta\": \"Buenos días\",\n  \"correccion\": null\n}";
        let (respuesta, correccion) = extract_envelope(raw);
        assert_eq!(respuesta, "Buenos días");
        assert_eq!(correccion, None);
    }

    #[test]
    fn output_without_json_is_used_verbatim() {
        let raw = "Hola, ¿cómo estás?";
        let (respuesta, correccion) = extract_envelope(raw);
        assert_eq!(respuesta, raw);
        assert_eq!(correccion, None);
    }

    #[test]
    fn unparseable_block_falls_back_to_raw_text() {
        let raw = "texto {no es json} más texto";
        let (respuesta, correccion) = extract_envelope(raw);
        assert_eq!(respuesta, raw);
        assert_eq!(correccion, None);
    }

    #[test]
    fn missing_respuesta_field_falls_back_to_raw_text() {
        let raw = r#"{"otro_campo":"valor"}"#;
        let (respuesta, _) = extract_envelope(raw);
        assert_eq!(respuesta, raw);
    }

    #[test]
    fn greedy_scan_swallows_multiple_blocks() {
        // Documented fragility: two envelopes collapse into one unparseable
        // span and the whole output becomes the reply.
        let raw = r#"{"respuesta":"a"} y {"respuesta":"b"}"#;
        let (respuesta, _) = extract_envelope(raw);
        assert_eq!(respuesta, raw);
    }

    #[tokio::test]
    async fn unreachable_local_model_degrades_to_fallback() {
        // fake() points the local model at a closed port.
        let state = AppState::fake();
        let (respuesta, correccion) = tutor_exchange(&state, "hola").await;
        assert_eq!(respuesta, fallback_reply(&state.config.llm.local_model));
        assert_eq!(correccion, None);
    }
}
