/*!
 * Error types for the longtrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised while assembling the runtime configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting was not provided by any source
    #[error("Missing required setting {key}: set it in the environment or the .env file")]
    Missing {
        /// Name of the setting
        key: String,
    },

    /// A setting was provided but cannot be used
    #[error("Invalid value for {key}: {reason}")]
    Invalid {
        /// Name of the setting
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The settings file exists but could not be read
    #[error("Failed to read settings file {path}: {source}")]
    EnvFile {
        /// Path of the settings file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid { key: key.into(), reason: reason.into() }
    }
}

/// Errors that can occur during translation
///
/// Chunk indices are zero-based; display strings use 1-based positions.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The provider call for a chunk failed
    #[error("Translation of chunk {} failed: {source}", .index + 1)]
    Call {
        /// Index of the chunk being translated
        index: usize,
        /// Error from the provider API
        #[source]
        source: ProviderError,
    },

    /// The provider answered without any usable text
    #[error("Provider returned an empty translation for chunk {}", .index + 1)]
    EmptyResponse {
        /// Index of the chunk being translated
        index: usize,
    },

    /// The run was stopped by the caller
    #[error("Translation cancelled before chunk {} completed", .index + 1)]
    Cancelled {
        /// Index of the chunk that was not translated
        index: usize,
    },

    /// A translate step was requested although every chunk is already done
    #[error("No pending chunk to translate")]
    NoPendingChunk,

    /// Combine was requested before every chunk was translated
    #[error("Cannot combine: only {translated} of {total} chunks translated")]
    Incomplete {
        /// Chunks translated so far
        translated: usize,
        /// Total number of chunks
        total: usize,
    },
}

impl TranslationError {
    /// Whether the error is a user-initiated stop rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
