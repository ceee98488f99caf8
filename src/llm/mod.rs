use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

mod cloud;
pub mod local;
pub mod prompts;

pub use local::LocalModel;

/// Cloud provider tag carried by lesson requests and stored with each lesson.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Anthropic,
    Google,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
        }
    }

    /// Builds the client for this provider, failing fast when its API key
    /// is not configured. No network I/O happens here.
    pub fn client(
        self,
        http: &reqwest::Client,
        cfg: &LlmConfig,
    ) -> Result<Box<dyn LessonModel>, LlmError> {
        match self {
            Provider::OpenAi => {
                let key = cfg
                    .openai
                    .api_key
                    .clone()
                    .ok_or(LlmError::MissingKey("OPENAI_API_KEY"))?;
                Ok(Box::new(cloud::OpenAiClient::new(
                    http.clone(),
                    key,
                    cfg.openai.model.clone(),
                )))
            }
            Provider::Anthropic => {
                let key = cfg
                    .anthropic
                    .api_key
                    .clone()
                    .ok_or(LlmError::MissingKey("ANTHROPIC_API_KEY"))?;
                Ok(Box::new(cloud::AnthropicClient::new(
                    http.clone(),
                    key,
                    cfg.anthropic.model.clone(),
                )))
            }
            Provider::Google => {
                let key = cfg
                    .google
                    .api_key
                    .clone()
                    .ok_or(LlmError::MissingKey("GOOGLE_API_KEY"))?;
                Ok(Box::new(cloud::GoogleClient::new(
                    http.clone(),
                    key,
                    cfg.google.model.clone(),
                )))
            }
        }
    }
}

/// One capability: turn a prompt into generated text.
#[async_trait]
pub trait LessonModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("{0} no configurada.")]
    MissingKey(&'static str),

    /// Non-2xx answer from the provider; `body` is the raw error payload.
    #[error("Error del proveedor de IA: {body}")]
    Upstream { body: String },

    #[error("Error del proveedor de IA: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Respuesta inesperada del proveedor {0}.")]
    Shape(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[test]
    fn provider_tags_round_trip() {
        for (tag, provider) in [
            ("openai", Provider::OpenAi),
            ("anthropic", Provider::Anthropic),
            ("google", Provider::Google),
        ] {
            let parsed: Provider = serde_json::from_str(&format!("\"{tag}\"")).unwrap();
            assert_eq!(parsed, provider);
            assert_eq!(provider.as_str(), tag);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(serde_json::from_str::<Provider>("\"mistral\"").is_err());
    }

    #[test]
    fn default_provider_is_openai() {
        assert_eq!(Provider::default(), Provider::OpenAi);
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_network_call() {
        let state = AppState::fake();
        for provider in [Provider::OpenAi, Provider::Anthropic, Provider::Google] {
            let err = provider
                .client(&state.http, &state.config.llm)
                .err()
                .expect("no key configured");
            assert!(matches!(err, LlmError::MissingKey(_)));
        }
    }

    #[tokio::test]
    async fn configured_key_yields_a_client() {
        let state = AppState::fake();
        let mut cfg = state.config.llm.clone();
        cfg.anthropic.api_key = Some("sk-ant-test".into());
        assert!(Provider::Anthropic.client(&state.http, &cfg).is_ok());
        // The other providers stay unavailable.
        assert!(Provider::OpenAi.client(&state.http, &cfg).is_err());
    }
}
