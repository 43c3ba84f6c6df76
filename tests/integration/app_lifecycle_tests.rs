/*!
 * Tests for the application controller and file handling
 */

use longtrans::app_controller::{Controller, SAMPLE_TEXT};
use longtrans::errors::TranslationError;
use longtrans::file_utils::FileManager;
use longtrans::providers::mock::MockProvider;
use longtrans::translation::stages::split_paragraphs;
use longtrans::translation::{CancellationFlag, ProgressEvent};

use crate::common::{create_temp_dir, create_test_file, recording_progress, test_config};

#[test]
fn test_controller_withValidConfig_shouldUseJapaneseByDefault() {
    let controller = Controller::with_config(test_config()).unwrap();
    assert_eq!(controller.config().target_language, "ja");
    assert_eq!(controller.prompt_template().target_language(), "Japanese");
}

#[test]
fn test_controller_withBadBaseUrl_shouldRejectConfig() {
    let mut config = test_config();
    config.base_url = "ftp://example.com".to_string();
    assert!(Controller::with_config(config).is_err());
}

/// File in, translation through a mock, file out
#[tokio::test]
async fn test_translateWith_fileRoundTrip_shouldWriteCombinedTranslation() {
    let dir = create_temp_dir().unwrap();
    let input = create_test_file(dir.path(), "article.txt", "Alpha.\n\nBeta.\n\n\nGamma.\n").unwrap();
    let output = dir.path().join("out").join("article.ja.txt");

    let controller = Controller::with_config(test_config()).unwrap();
    let text = FileManager::read_input(&input).unwrap();
    let translation = controller
        .translate_with(MockProvider::uppercase(), &text, CancellationFlag::new(), None)
        .await
        .unwrap();
    FileManager::write_string(&output, &translation).unwrap();

    assert_eq!(FileManager::read_to_string(&output).unwrap(), "ALPHA.\n\nBETA.\n\nGAMMA.");
}

/// The sample text goes through three chunk calls
#[tokio::test]
async fn test_translateWith_sampleText_shouldReportEveryChunk() {
    let (callback, events) = recording_progress();
    let controller = Controller::with_config(test_config()).unwrap();
    let provider = MockProvider::working();

    controller
        .translate_with(provider.clone(), SAMPLE_TEXT, CancellationFlag::new(), Some(callback))
        .await
        .unwrap();

    let translated = events
        .lock()
        .unwrap()
        .iter()
        .filter(|e| matches!(e, ProgressEvent::ChunkTranslated { .. }))
        .count();
    assert_eq!(translated, split_paragraphs(SAMPLE_TEXT).len());
    assert_eq!(provider.call_count(), 3);
}

#[test]
fn test_translateWith_failingProvider_shouldPropagateError() {
    let controller = Controller::with_config(test_config()).unwrap();
    let provider = MockProvider::failing();

    let result = tokio_test::block_on(async {
        controller
            .translate_with(provider.clone(), "Text.\n\nMore text.", CancellationFlag::new(), None)
            .await
    });

    assert!(matches!(result, Err(TranslationError::Call { index: 0, .. })));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_run_withMissingInput_shouldFailBeforeCallingProvider() {
    let dir = create_temp_dir().unwrap();
    let controller = Controller::with_config(test_config()).unwrap();

    let result = controller
        .run(Some(&dir.path().join("missing.txt")), None, CancellationFlag::new())
        .await;

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Input file does not exist"));
}
