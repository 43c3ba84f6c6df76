/*!
 * End-to-end tests for the translation pipeline using the mock provider
 */

use std::time::Duration;

use longtrans::errors::{ProviderError, TranslationError};
use longtrans::providers::mock::MockProvider;
use longtrans::translation::stages::{combine, split, split_paragraphs, translate_step, CHUNK_SEPARATOR};
use longtrans::translation::{
    CancellationFlag, ProgressEvent, PromptTemplate, TranslationPipeline, TranslationState,
};

use crate::common::{recording_progress, THREE_PARAGRAPHS};

fn japanese_pipeline(provider: MockProvider) -> TranslationPipeline<MockProvider> {
    TranslationPipeline::new(provider, PromptTemplate::new("Japanese"))
}

/// Three paragraphs produce three calls and three blank-line separated results
#[tokio::test]
async fn test_translate_withThreeParagraphs_shouldTranslateEachInOrder() {
    let provider = MockProvider::uppercase();
    let pipeline = japanese_pipeline(provider.clone());

    let result = pipeline.translate(THREE_PARAGRAPHS).await.unwrap();

    assert_eq!(
        result,
        "FIRST PARAGRAPH.\n\nSECOND PARAGRAPH\nSPANS TWO LINES.\n\nTHIRD PARAGRAPH."
    );
    assert_eq!(provider.call_count(), 3);

    let prompts = provider.prompts();
    assert!(prompts[0].ends_with("\n\nFirst paragraph."));
    assert!(prompts[1].ends_with("\n\nSecond paragraph\nspans two lines."));
    assert!(prompts[2].ends_with("\n\nThird paragraph."));
    assert!(prompts.iter().all(|p| p.contains("into Japanese")));
}

/// A single paragraph is one chunk, translated verbatim
#[tokio::test]
async fn test_translate_withSingleParagraph_shouldMakeOneCall() {
    let provider = MockProvider::working();
    let pipeline = japanese_pipeline(provider.clone());

    let result = pipeline.translate("Just one line of text.").await.unwrap();

    assert_eq!(result, "[TRANSLATED] Just one line of text.");
    assert_eq!(provider.call_count(), 1);
}

/// Blank or whitespace-only input never reaches the provider
#[tokio::test]
async fn test_translate_withWhitespaceOnlyInput_shouldReturnEmptyWithoutCalls() {
    let provider = MockProvider::working();
    let pipeline = japanese_pipeline(provider.clone());

    assert_eq!(pipeline.translate("").await.unwrap(), "");
    assert_eq!(pipeline.translate(" \n\n\t\n  ").await.unwrap(), "");
    assert_eq!(provider.call_count(), 0);
}

/// A failing call stops the run and keeps the chunks translated so far
#[tokio::test]
async fn test_run_withFailureOnSecondChunk_shouldStopAndKeepPartialState() {
    let provider = MockProvider::failing_on(2);
    let pipeline = japanese_pipeline(provider.clone());

    let interrupted = pipeline
        .run(TranslationState::new(THREE_PARAGRAPHS))
        .await
        .unwrap_err();

    assert!(matches!(
        interrupted.error,
        TranslationError::Call { index: 1, source: ProviderError::ApiError { status_code: 503, .. } }
    ));
    assert_eq!(provider.call_count(), 2);
    assert_eq!(interrupted.state.current_index, 1);
    assert_eq!(interrupted.state.completed_translations(), ["[TRANSLATED] First paragraph."]);
    assert!(interrupted.state.final_translation.is_empty());
    assert!(interrupted.to_string().contains("1 of 3 chunks translated"));
}

/// An empty answer is a failure, not a silent blank chunk
#[tokio::test]
async fn test_translate_withEmptyResponse_shouldFail() {
    let pipeline = japanese_pipeline(MockProvider::empty());
    let error = pipeline.translate("Hello.\n\nWorld.").await.unwrap_err();
    assert!(matches!(error, TranslationError::EmptyResponse { index: 0 }));
}

/// Events arrive in stage order with one start/finish pair per chunk
#[tokio::test]
async fn test_run_shouldEmitEventsInStageOrder() {
    let (callback, events) = recording_progress();
    let pipeline = japanese_pipeline(MockProvider::working()).with_progress(callback);

    pipeline.translate("One.\n\nTwo.").await.unwrap();

    let events = events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            ProgressEvent::Started,
            ProgressEvent::SplitCompleted { chunks: 2 },
            ProgressEvent::ChunkStarted { index: 0, total: 2 },
            ProgressEvent::ChunkTranslated { index: 0, total: 2 },
            ProgressEvent::ChunkStarted { index: 1, total: 2 },
            ProgressEvent::ChunkTranslated { index: 1, total: 2 },
            ProgressEvent::CombineCompleted { chunks: 2 },
            ProgressEvent::Finished,
        ]
    );
}

/// A flag raised before the run prevents any call
#[tokio::test]
async fn test_translate_withCancelledFlag_shouldNotCallProvider() {
    let provider = MockProvider::working();
    let cancel = CancellationFlag::new();
    cancel.cancel();
    let pipeline = japanese_pipeline(provider.clone()).with_cancellation(cancel);

    let error = pipeline.translate(THREE_PARAGRAPHS).await.unwrap_err();

    assert!(error.is_cancelled());
    assert_eq!(provider.call_count(), 0);
}

/// Raising the flag during a slow call abandons it
#[tokio::test]
async fn test_run_withCancellationDuringCall_shouldStopPromptly() {
    let provider = MockProvider::slow(5_000);
    let cancel = CancellationFlag::new();
    let pipeline = japanese_pipeline(provider.clone()).with_cancellation(cancel.clone());

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let outcome = tokio::time::timeout(
        Duration::from_secs(2),
        pipeline.run(TranslationState::new(THREE_PARAGRAPHS)),
    )
    .await
    .expect("cancellation should interrupt the in-flight call");

    let interrupted = outcome.unwrap_err();
    assert!(matches!(interrupted.error, TranslationError::Cancelled { index: 0 }));
    assert_eq!(interrupted.state.current_index, 0);
    assert_eq!(provider.call_count(), 1);
}

/// Driving the stages by hand matches the pipeline result
#[tokio::test]
async fn test_stages_drivenManually_shouldMatchPipeline() {
    let provider = MockProvider::uppercase();
    let prompt = PromptTemplate::new("Japanese");

    let mut state = split(&TranslationState::new(THREE_PARAGRAPHS));
    assert_eq!(state.total_chunks(), 3);
    assert!(matches!(combine(&state), Err(TranslationError::Incomplete { translated: 0, total: 3 })));

    while state.has_pending_chunks() {
        let next = translate_step(&state, &provider, &prompt, None).await.unwrap();
        assert_eq!(next.current_index, state.current_index + 1);
        assert_eq!(next.chunks, state.chunks);
        state = next;
    }

    assert!(matches!(
        translate_step(&state, &provider, &prompt, None).await,
        Err(TranslationError::NoPendingChunk)
    ));

    let combined = combine(&state).unwrap();
    let expected = japanese_pipeline(MockProvider::uppercase())
        .translate(THREE_PARAGRAPHS)
        .await
        .unwrap();
    assert_eq!(combined.final_translation, expected);
}

/// Identity translation reproduces the normalized paragraphs
#[tokio::test]
async fn test_translate_withEchoProvider_shouldReproduceNormalizedText() {
    let provider = MockProvider::working().with_custom_response(|req| req.source_text().to_string());
    let pipeline = japanese_pipeline(provider);

    let result = pipeline.translate(THREE_PARAGRAPHS).await.unwrap();

    assert_eq!(result, split_paragraphs(THREE_PARAGRAPHS).join(CHUNK_SEPARATOR));
    assert_eq!(split_paragraphs(&result), split_paragraphs(THREE_PARAGRAPHS));
}

/// CRLF blank lines still separate paragraphs
#[test]
fn test_splitParagraphs_withWindowsLineEndings_shouldSplit() {
    let chunks = split_paragraphs("First.\r\n\r\nSecond.\r\n");
    assert_eq!(chunks, vec!["First.", "Second."]);
}
