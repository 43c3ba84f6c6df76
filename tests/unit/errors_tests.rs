/*!
 * Tests for error types and conversions
 */

use std::error::Error;
use longtrans::errors::{AppError, ConfigError, ProviderError, TranslationError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 429,
        message: "Too many requests".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("429"));
    assert!(display.contains("Too many requests"));
}

#[test]
fn test_configError_missing_shouldNameTheKey() {
    let display = ConfigError::missing("API_KEY").to_string();
    assert!(display.contains("Missing required setting API_KEY"));
}

#[test]
fn test_configError_invalid_shouldIncludeReason() {
    let display = ConfigError::invalid("TEMPERATURE", "not a number").to_string();
    assert_eq!(display, "Invalid value for TEMPERATURE: not a number");
}

#[test]
fn test_translationError_call_shouldUseOneBasedChunkAndKeepSource() {
    let error = TranslationError::Call {
        index: 1,
        source: ProviderError::ConnectionError("Host unreachable".to_string()),
    };
    let display = error.to_string();
    assert!(display.contains("chunk 2"));
    assert!(display.contains("Host unreachable"));
    assert!(error.source().is_some());
    assert!(!error.is_cancelled());
}

#[test]
fn test_translationError_cancelled_shouldBeDistinguishable() {
    let error = TranslationError::Cancelled { index: 0 };
    assert!(error.is_cancelled());
    assert!(error.to_string().contains("cancelled"));
    assert!(!TranslationError::EmptyResponse { index: 0 }.is_cancelled());
}

#[test]
fn test_translationError_incomplete_shouldReportCounts() {
    let error = TranslationError::Incomplete { translated: 1, total: 3 };
    assert_eq!(error.to_string(), "Cannot combine: only 1 of 3 chunks translated");
}

#[test]
fn test_appError_fromConfigError_shouldWrapCorrectly() {
    let app_error: AppError = ConfigError::missing("BASE_URL").into();
    let display = app_error.to_string();
    assert!(display.contains("Configuration error"));
    assert!(display.contains("BASE_URL"));
}

#[test]
fn test_appError_fromTranslationError_shouldWrapCorrectly() {
    let app_error: AppError = TranslationError::NoPendingChunk.into();
    assert!(app_error.to_string().contains("Translation error"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_anyhowError_shouldDowncastToTranslationError() {
    let error: anyhow::Error = TranslationError::Cancelled { index: 2 }.into();
    let error = error.context("Run aborted");
    let cancelled = error
        .downcast_ref::<TranslationError>()
        .is_some_and(TranslationError::is_cancelled);
    assert!(cancelled);
}
