use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Nothing is strictly required: without `ANTHROPIC_API_KEY` the service still
/// starts and the model-backed endpoints answer 503.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Per-request timeout of the LLM transport.
    pub llm_timeout_secs: u64,
    /// Round trips per LLM call; 1 means no retries.
    pub llm_max_attempts: u32,
    /// Upper bound on résumé and job description length inside prompts.
    pub prompt_field_max_chars: usize,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            anthropic_api_key: None,
            port: 8080,
            rust_log: "info".to_string(),
            llm_timeout_secs: 120,
            llm_max_attempts: 1,
            prompt_field_max_chars: 20_000,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the environment in production).
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let llm_max_attempts: u32 =
            parse_or("LLM_MAX_ATTEMPTS", &lookup, defaults.llm_max_attempts)?;
        if llm_max_attempts == 0 {
            anyhow::bail!("LLM_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            port: parse_or("PORT", &lookup, defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            llm_timeout_secs: parse_or("LLM_TIMEOUT_SECS", &lookup, defaults.llm_timeout_secs)?,
            llm_max_attempts,
            prompt_field_max_chars: parse_or(
                "PROMPT_FIELD_MAX_CHARS",
                &lookup,
                defaults.prompt_field_max_chars,
            )?,
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", &lookup, defaults.max_upload_bytes)?,
        })
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
