//! Application configuration module
//!
//! Assembles the runtime settings from the process environment and an
//! optional `.env` style settings file, then validates them. The resulting
//! value is built once at startup and passed by parameter.

use log::{debug, LevelFilter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use url::Url;

use crate::errors::ConfigError;

/// Environment key for the API key
pub const API_KEY: &str = "API_KEY";
/// Environment key for the OpenAI-compatible base URL
pub const BASE_URL: &str = "BASE_URL";
/// Environment key for the model identifier
pub const MODEL_NAME: &str = "MODEL_NAME";
/// Environment key for the target language code
pub const TARGET_LANGUAGE: &str = "TARGET_LANGUAGE";
/// Environment key for the sampling temperature
pub const TEMPERATURE: &str = "TEMPERATURE";
/// Environment key for the per-request timeout
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
/// Environment key for the per-response token cap
pub const MAX_TOKENS: &str = "MAX_TOKENS";
/// Environment key for the log verbosity
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// Model used when `MODEL_NAME` is not set
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// API key sent as bearer token
    pub api_key: String,

    /// Base URL of the OpenAI-compatible API (e.g. `https://api.openai.com/v1`)
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Temperature parameter for text generation (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on generated tokens per chunk; the server default applies when unset
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the `log` facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(ConfigError::invalid(LOG_LEVEL, format!("unknown log level '{}'", other))),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_target_language() -> String {
    "ja".to_string()
}

fn default_temperature() -> f32 {
    0.0
}

fn default_timeout_secs() -> u64 {
    120
}

/// Parse the contents of a `.env` style settings file.
///
/// Blank lines and `#` comments are skipped, the first `=` separates key from
/// value, both sides are trimmed and one pair of matching quotes around the
/// value is removed. Lines without a key or value are ignored.
pub fn parse_env_file(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            let value = unquote(value.trim());
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Read a settings file into a map. A missing file yields an empty map.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.exists() {
        debug!("No settings file at {:?}, using the environment only", path);
        return Ok(HashMap::new());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::EnvFile {
        path: path.display().to_string(),
        source,
    })?;

    let vars: HashMap<String, String> = parse_env_file(&content).into_iter().collect();
    debug!("Loaded {} setting(s) from {:?}", vars.len(), path);
    Ok(vars)
}

impl Config {
    /// Load the configuration from the process environment, falling back to
    /// the settings file at `env_file` for keys the environment lacks.
    pub fn load(env_file: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(env_file, |key| std::env::var(key).ok())
    }

    /// Like `load`, with the environment supplied as a lookup function
    pub fn load_with_env<F>(env_file: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_vars = load_env_file(env_file)?;
        Self::from_lookup(|key| {
            env(key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| file_vars.get(key).cloned())
        })
    }

    /// Build and validate a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get(API_KEY).ok_or_else(|| ConfigError::missing(API_KEY))?;
        let base_url = get(BASE_URL).ok_or_else(|| ConfigError::missing(BASE_URL))?;

        let temperature = match get(TEMPERATURE) {
            Some(raw) => raw.parse::<f32>().map_err(|e| ConfigError::invalid(TEMPERATURE, e.to_string()))?,
            None => default_temperature(),
        };

        let timeout_secs = match get(REQUEST_TIMEOUT_SECS) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid(REQUEST_TIMEOUT_SECS, e.to_string()))?,
            None => default_timeout_secs(),
        };

        let max_tokens = get(MAX_TOKENS)
            .map(|raw| raw.parse::<u32>().map_err(|e| ConfigError::invalid(MAX_TOKENS, e.to_string())))
            .transpose()?;

        let log_level = match get(LOG_LEVEL) {
            Some(raw) => raw.parse::<LogLevel>()?,
            None => LogLevel::default(),
        };

        let config = Config {
            api_key,
            base_url,
            model: get(MODEL_NAME).unwrap_or_else(default_model),
            target_language: get(TARGET_LANGUAGE).unwrap_or_else(default_target_language),
            temperature,
            timeout_secs,
            max_tokens,
            log_level,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::missing(API_KEY));
        }

        if self.base_url.trim().is_empty() {
            return Err(ConfigError::missing(BASE_URL));
        }
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::invalid(BASE_URL, e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::invalid(
                BASE_URL,
                format!("unsupported scheme '{}', expected http or https", url.scheme()),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid(MODEL_NAME, "model name cannot be empty"));
        }

        crate::language_utils::get_language_name(&self.target_language)
            .map_err(|e| ConfigError::invalid(TARGET_LANGUAGE, e.to_string()))?;

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::invalid(
                TEMPERATURE,
                format!("{} is outside the range 0.0 to 2.0", self.temperature),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid(REQUEST_TIMEOUT_SECS, "timeout must be at least one second"));
        }

        if self.max_tokens == Some(0) {
            return Err(ConfigError::invalid(MAX_TOKENS, "token limit must be positive"));
        }

        Ok(())
    }

    /// English name of the configured target language
    pub fn target_language_name(&self) -> String {
        crate::language_utils::get_language_name(&self.target_language)
            .unwrap_or_else(|_| self.target_language.clone())
    }
}
