//! Client for the locally hosted chat model (Ollama-compatible
//! `prompt in, generated text out` API, non-streaming).

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::LlmError;

pub struct LocalModel {
    http: Client,
    url: String,
    model: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl LocalModel {
    pub fn new(http: Client, url: String, model: String) -> Self {
        Self { http, url, model }
    }

    /// Returns the raw generated text. Errors cover connection failure,
    /// timeout and non-2xx answers alike; the caller decides the policy.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        debug!(model = %self.model, url = %self.url, "calling local model");
        let resp = self
            .http
            .post(&self.url)
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
            }))
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(LlmError::Upstream { body });
        }
        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|_| LlmError::Shape("local"))?;
        Ok(parsed.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_response_reads_the_response_field() {
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"model":"qwen2.5:3b","response":"Hola","done":true}"#)
                .unwrap();
        assert_eq!(parsed.response, "Hola");
    }

    #[test]
    fn missing_response_field_defaults_to_empty() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"done":true}"#).unwrap();
        assert_eq!(parsed.response, "");
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        let model = LocalModel::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/api/generate".into(),
            "test-model".into(),
        );
        let err = model.generate("hola").await.unwrap_err();
        assert!(matches!(err, LlmError::Transport(_)));
    }
}
