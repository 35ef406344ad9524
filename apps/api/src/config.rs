use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_NLP_MODEL: &str = "en_core_web_lg";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every value has a fallback; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Identifier of the language model loaded once at startup.
    pub nlp_model: String,
    /// `*` mirrors any origin (development); otherwise the single allowed front-end origin.
    pub cors_allowed_origin: String,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            nlp_model: DEFAULT_NLP_MODEL.to_string(),
            cors_allowed_origin: "*".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            None => defaults.max_upload_bytes,
        };

        Ok(Config {
            port,
            nlp_model: non_blank(lookup("NLP_MODEL")).unwrap_or(defaults.nlp_model),
            cors_allowed_origin: non_blank(lookup("CORS_ALLOWED_ORIGIN"))
                .unwrap_or(defaults.cors_allowed_origin),
            max_upload_bytes,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
