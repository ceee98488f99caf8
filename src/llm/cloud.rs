//! HTTP clients for the three cloud lesson providers. Each speaks its own
//! endpoint, auth scheme and JSON envelope; all reduce to plain text.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{LessonModel, LlmError};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const GOOGLE_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

async fn read_body(resp: reqwest::Response) -> Result<String, LlmError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(LlmError::Upstream { body });
    }
    Ok(body)
}

// ── OpenAI ────────────────────────────────────────────────────────

pub struct OpenAiClient {
    http: Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(http: Client, api_key: String, model: String) -> Self {
        Self {
            http,
            api_key,
            model,
        }
    }
}

#[derive(Deserialize, Debug)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize, Debug)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize, Debug)]
struct OpenAiMessage {
    content: String,
}

#[async_trait]
impl LessonModel for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        debug!(model = %self.model, "calling openai");
        let resp = self
            .http
            .post(OPENAI_URL)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": [{ "role": "user", "content": prompt }],
                "temperature": 0.7,
            }))
            .send()
            .await?;
        let body = read_body(resp).await?;
        let parsed: OpenAiResponse =
            serde_json::from_str(&body).map_err(|_| LlmError::Shape("openai"))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(LlmError::Shape("openai"))
    }
}

// ── Anthropic ─────────────────────────────────────────────────────

pub struct AnthropicClient {
    http: Client,
    api_key: String,
    model: String,
}

impl AnthropicClient {
    pub fn new(http: Client, api_key: String, model: String) -> Self {
        Self {
            http,
            api_key,
            model,
        }
    }
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicBlock>,
}

#[derive(Deserialize)]
struct AnthropicBlock {
    text: String,
}

#[async_trait]
impl LessonModel for AnthropicClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        debug!(model = %self.model, "calling anthropic");
        let resp = self
            .http
            .post(ANTHROPIC_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&json!({
                "model": self.model,
                "max_tokens": 2048,
                "messages": [{ "role": "user", "content": prompt }],
            }))
            .send()
            .await?;
        let body = read_body(resp).await?;
        let parsed: AnthropicResponse =
            serde_json::from_str(&body).map_err(|_| LlmError::Shape("anthropic"))?;
        parsed
            .content
            .into_iter()
            .next()
            .map(|b| b.text)
            .ok_or(LlmError::Shape("anthropic"))
    }
}

// ── Google ────────────────────────────────────────────────────────

pub struct GoogleClient {
    http: Client,
    api_key: String,
    model: String,
}

impl GoogleClient {
    pub fn new(http: Client, api_key: String, model: String) -> Self {
        Self {
            http,
            api_key,
            model,
        }
    }
}

#[derive(Deserialize)]
struct GoogleResponse {
    candidates: Vec<GoogleCandidate>,
}

#[derive(Deserialize)]
struct GoogleCandidate {
    content: GoogleContent,
}

#[derive(Deserialize)]
struct GoogleContent {
    parts: Vec<GooglePart>,
}

#[derive(Deserialize)]
struct GooglePart {
    text: String,
}

#[async_trait]
impl LessonModel for GoogleClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        debug!(model = %self.model, "calling google");
        let url = format!(
            "{GOOGLE_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let resp = self
            .http
            .post(&url)
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
            }))
            .send()
            .await?;
        let body = read_body(resp).await?;
        let parsed: GoogleResponse =
            serde_json::from_str(&body).map_err(|_| LlmError::Shape("google"))?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(LlmError::Shape("google"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_envelope_parses_to_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Lección 1"}}]}"#;
        let parsed: OpenAiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Lección 1");
    }

    #[test]
    fn anthropic_envelope_parses_to_first_block() {
        let body = r#"{"content":[{"type":"text","text":"Vocabulario"}],"model":"claude-3-haiku-20240307"}"#;
        let parsed: AnthropicResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.content[0].text, "Vocabulario");
    }

    #[test]
    fn google_envelope_parses_to_first_part() {
        let body =
            r#"{"candidates":[{"content":{"parts":[{"text":"Gramática"}],"role":"model"}}]}"#;
        let parsed: GoogleResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "Gramática");
    }

    #[test]
    fn malformed_envelope_is_a_shape_error() {
        let err = serde_json::from_str::<OpenAiResponse>(r#"{"error":"bad request"}"#)
            .map_err(|_| LlmError::Shape("openai"))
            .unwrap_err();
        assert!(matches!(err, LlmError::Shape("openai")));
    }
}
