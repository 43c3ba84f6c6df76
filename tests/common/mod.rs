/*!
 * Common test utilities for the longtrans test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use anyhow::Result;
use tempfile::TempDir;

use longtrans::app_config::{Config, LogLevel};
use longtrans::translation::{ProgressCallback, ProgressEvent};

/// Three paragraphs separated by blank lines of varying shape
pub const THREE_PARAGRAPHS: &str = "First paragraph.\n\n  Second paragraph\nspans two lines.  \n \n\nThird paragraph.";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A valid configuration pointing at a local server
pub fn test_config() -> Config {
    Config {
        api_key: "sk-test".to_string(),
        base_url: "http://localhost:1234/v1".to_string(),
        model: "gpt-4o-mini".to_string(),
        target_language: "ja".to_string(),
        temperature: 0.0,
        timeout_secs: 30,
        max_tokens: None,
        log_level: LogLevel::Info,
    }
}

/// Progress callback that records every event it receives
pub fn recording_progress() -> (ProgressCallback, Arc<Mutex<Vec<ProgressEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let callback: ProgressCallback = Arc::new(move |event: &ProgressEvent| {
        sink.lock().unwrap().push(event.clone());
    });
    (callback, events)
}
