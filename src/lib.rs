/*!
 * # longtrans - Long text translation with AI
 *
 * A Rust library for translating long texts paragraph by paragraph using an
 * OpenAI-compatible chat completion API.
 *
 * ## Features
 *
 * - Split text into blank-line separated paragraphs
 * - Translate each paragraph with one request, strictly in order
 * - Join the translations back together with blank lines
 * - Typed progress events and cooperative cancellation
 * - Configuration from the environment and a `.env` file
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration loading and validation
 * - `translation`: The translation pipeline:
 *   - `translation::stages`: Split, translate and combine stages
 *   - `translation::pipeline`: Driver sequencing the stages
 *   - `translation::progress`: Progress events
 *   - `translation::cancellation`: Stop signal
 * - `providers`: Client implementations for text-generation services:
 *   - `providers::openai`: OpenAI-compatible API client
 *   - `providers::mock`: Deterministic provider for tests
 * - `app_controller`: Main application controller
 * - `file_utils`: Input/output file handling
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ConfigError, ProviderError, TranslationError};
pub use translation::{CancellationFlag, ProgressEvent, PromptTemplate, TranslationPipeline, TranslationState};
