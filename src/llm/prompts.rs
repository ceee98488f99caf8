//! Prompt construction for both proxies. The instructions are Spanish, the
//! target language appears inside the examples the model produces.

/// Lesson prompt: objectives, vocabulary (>= 10 items with translation),
/// grammar with examples, dialogues and practice exercises.
pub fn build_lesson_prompt(tema: &str, nivel: &str, idioma: &str) -> String {
    format!(
        "Eres un profesor experto de idiomas. Crea una lección completa de {idioma} \
         para un estudiante de nivel '{nivel}' sobre el tema '{tema}'.\n\n\
         La lección DEBE incluir:\n\
         1. Introducción y objetivos\n\
         2. Vocabulario clave (mínimo 10 palabras con traducción)\n\
         3. Explicación gramatical con ejemplos\n\
         4. Diálogos de ejemplo\n\
         5. Actividades prácticas (ejercicios de relleno, traducción o conversación)\n\n\
         Responde en español, pero usa el idioma objetivo en los ejemplos."
    )
}

/// Chat prompt: the model must answer as a patient tutor and emit exactly a
/// two-field JSON object `{{respuesta, correccion|null}}`.
pub fn build_chat_prompt(mensaje: &str, nivel: &str, idioma: &str) -> String {
    format!(
        "Eres un tutor de idiomas amigable y paciente. El estudiante aprende {idioma} \
         y tiene nivel '{nivel}'.\n\n\
         Mensaje del estudiante: \"{mensaje}\"\n\n\
         Responde en DOS secciones usando exactamente este formato JSON (sin texto extra):\n\
         {{\n\
         \x20 \"respuesta\": \"<tu respuesta natural al estudiante>\",\n\
         \x20 \"correccion\": \"<corrección gramatical si aplica, o null si el mensaje es correcto>\"\n\
         }}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_prompt_embeds_topic_level_and_language() {
        let prompt = build_lesson_prompt("la comida", "intermedio", "francés");
        assert!(prompt.contains("'la comida'"));
        assert!(prompt.contains("'intermedio'"));
        assert!(prompt.contains("francés"));
        assert!(prompt.contains("mínimo 10 palabras"));
    }

    #[test]
    fn chat_prompt_quotes_the_message_and_demands_the_envelope() {
        let prompt = build_chat_prompt("Yo comí ayer", "principiante", "inglés");
        assert!(prompt.contains("\"Yo comí ayer\""));
        assert!(prompt.contains("\"respuesta\""));
        assert!(prompt.contains("\"correccion\""));
    }
}
