use std::net::SocketAddr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TRANSLATE_MODEL: &str = "gemini-2.5-flash-preview-05-20";
const DEFAULT_SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be a number, got '{1}'")]
    InvalidNumber(&'static str, String),

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Unknown prompt style: {0}")]
    UnknownPromptStyle(String),
}

/// Which browser origins may call the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    AnyOrigin,
    AllowList(Vec<String>),
}

impl CorsPolicy {
    /// Parses `*` or a comma-separated origin list. Blank entries are skipped.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "*" {
            return CorsPolicy::AnyOrigin;
        }

        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        CorsPolicy::AllowList(origins)
    }
}

/// Wording used for the translation instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    /// Natural, business-appropriate phrasing; announcements are made appealing.
    #[default]
    Business,
    /// Plain faithful translation with no stylistic direction.
    Faithful,
}

impl std::str::FromStr for PromptStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Ok(PromptStyle::Business),
            "faithful" => Ok(PromptStyle::Faithful),
            other => Err(ConfigError::UnknownPromptStyle(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub api_key: Option<SecretString>,
    pub api_base: String,
    pub translate_model: String,
    pub speech_model: String,
    pub cors: CorsPolicy,
    pub prompt_style: PromptStyle,
    pub upstream_timeout: Option<Duration>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            translate_model: DEFAULT_TRANSLATE_MODEL.to_string(),
            speech_model: DEFAULT_SPEECH_MODEL.to_string(),
            cors: CorsPolicy::AnyOrigin,
            prompt_style: PromptStyle::default(),
            upstream_timeout: None,
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("PORT", raw))?,
            None => defaults.port,
        };

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber("UPSTREAM_TIMEOUT_SECS", raw))?,
            )),
            None => None,
        };

        let prompt_style = match lookup("TRANSLATE_PROMPT_STYLE") {
            Some(raw) => raw.parse()?,
            None => defaults.prompt_style,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            api_key: lookup("GEMINI_API_KEY")
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::new),
            api_base: lookup("GEMINI_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            translate_model: lookup("GEMINI_TRANSLATE_MODEL").unwrap_or(defaults.translate_model),
            speech_model: lookup("GEMINI_SPEECH_MODEL").unwrap_or(defaults.speech_model),
            cors: lookup("CORS_ALLOWED_ORIGINS")
                .map(|raw| CorsPolicy::parse(&raw))
                .unwrap_or(defaults.cors),
            prompt_style,
            upstream_timeout,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}
