/*!
 * The three pipeline stages: split, translate (one chunk per call) and combine.
 *
 * Each stage borrows the incoming state and returns a new one.
 */

use log::{debug, trace};
use regex::Regex;
use std::sync::LazyLock;

use crate::errors::TranslationError;
use crate::providers::Provider;
use super::cancellation::CancellationFlag;
use super::prompts::PromptTemplate;
use super::state::TranslationState;

/// Separator placed between translated chunks
pub const CHUNK_SEPARATOR: &str = "\n\n";

// A newline, optional whitespace, then another newline: one or more blank lines
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph pattern is valid"));

/// Split text into trimmed, non-blank paragraphs
pub fn split_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split stage: populate `chunks` and reset the translation slots
pub fn split(state: &TranslationState) -> TranslationState {
    let chunks = split_paragraphs(&state.original_text);
    debug!("Split {} byte(s) of input into {} chunk(s)", state.original_text.len(), chunks.len());

    TranslationState {
        original_text: state.original_text.clone(),
        translated_chunks: vec![String::new(); chunks.len()],
        chunks,
        current_index: 0,
        final_translation: String::new(),
    }
}

/// Translate stage: translate `chunks[current_index]` with one provider call.
///
/// The call is skipped if `cancel` is already raised and abandoned if it is
/// raised while the call is in flight; either way nothing is written.
pub async fn translate_step<P: Provider>(
    state: &TranslationState,
    provider: &P,
    prompt: &PromptTemplate,
    cancel: Option<&CancellationFlag>,
) -> Result<TranslationState, TranslationError> {
    if !state.has_pending_chunks() {
        return Err(TranslationError::NoPendingChunk);
    }
    let index = state.current_index;

    if cancel.is_some_and(CancellationFlag::is_cancelled) {
        return Err(TranslationError::Cancelled { index });
    }

    let request = provider.build_request(&prompt.render(&state.chunks[index]));
    trace!("Sending chunk {} ({} chars)", index + 1, state.chunks[index].len());

    let response = match cancel {
        Some(flag) => tokio::select! {
            result = provider.complete(request) => result,
            _ = flag.cancelled() => return Err(TranslationError::Cancelled { index }),
        },
        None => provider.complete(request).await,
    }
    .map_err(|source| TranslationError::Call { index, source })?;

    let text = P::extract_text(&response).trim().to_string();
    if text.is_empty() {
        return Err(TranslationError::EmptyResponse { index });
    }

    let mut translated_chunks = state.translated_chunks.clone();
    translated_chunks[index] = text;

    Ok(TranslationState {
        original_text: state.original_text.clone(),
        chunks: state.chunks.clone(),
        translated_chunks,
        current_index: index + 1,
        final_translation: state.final_translation.clone(),
    })
}

/// Combine stage: join every translation with a blank line
pub fn combine(state: &TranslationState) -> Result<TranslationState, TranslationError> {
    if !state.is_complete() {
        return Err(TranslationError::Incomplete {
            translated: state.current_index,
            total: state.total_chunks(),
        });
    }

    Ok(TranslationState {
        final_translation: state.translated_chunks.join(CHUNK_SEPARATOR),
        ..state.clone()
    })
}
