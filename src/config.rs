use std::env;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

/// Credentials for one cloud LLM provider. `api_key` is `None` when the
/// variable is unset or empty, which disables the provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub openai: ProviderConfig,
    pub anthropic: ProviderConfig,
    pub google: ProviderConfig,
    pub local_url: String,
    pub local_model: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub llm: LlmConfig,
    pub allowed_origins: Vec<String>,
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn with_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: env::var("SECRET_KEY")?,
            ttl_minutes: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let llm = LlmConfig {
            openai: ProviderConfig {
                api_key: optional("OPENAI_API_KEY"),
                model: with_default("OPENAI_MODEL", "gpt-4o-mini"),
            },
            anthropic: ProviderConfig {
                api_key: optional("ANTHROPIC_API_KEY"),
                model: with_default("ANTHROPIC_MODEL", "claude-3-haiku-20240307"),
            },
            google: ProviderConfig {
                api_key: optional("GOOGLE_API_KEY"),
                model: with_default("GOOGLE_MODEL", "gemini-1.5-flash"),
            },
            local_url: with_default("LOCAL_MODEL_URL", "http://localhost:11434/api/generate"),
            local_model: with_default("LOCAL_MODEL_NAME", "qwen2.5:3b"),
        };
        let allowed_origins = optional("ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();
        Ok(Self {
            database_url,
            jwt,
            llm,
            allowed_origins,
        })
    }
}
