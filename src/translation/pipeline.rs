/*!
 * Pipeline driver coordinating the translation stages.
 *
 * The driver runs split once, translate once per chunk in ascending order,
 * then combine once. Each run owns its own state value.
 */

use log::{debug, info};
use thiserror::Error;

use crate::errors::TranslationError;
use crate::providers::Provider;
use super::cancellation::CancellationFlag;
use super::progress::{ProgressCallback, ProgressEvent};
use super::prompts::PromptTemplate;
use super::stages::{combine, split, translate_step};
use super::state::TranslationState;

/// A run that stopped before producing a final translation.
///
/// `state` is the last consistent state: every chunk translated before the
/// failure is kept and `final_translation` is empty.
#[derive(Error, Debug)]
#[error("{error} ({} of {} chunks translated)", .state.current_index, .state.total_chunks())]
pub struct PipelineInterrupted {
    #[source]
    pub error: TranslationError,
    pub state: TranslationState,
}

impl From<PipelineInterrupted> for TranslationError {
    fn from(interrupted: PipelineInterrupted) -> Self {
        interrupted.error
    }
}

/// Sequential long-text translator
pub struct TranslationPipeline<P: Provider> {
    provider: P,
    prompt: PromptTemplate,
    on_progress: Option<ProgressCallback>,
    cancel: Option<CancellationFlag>,
}

impl<P: Provider> TranslationPipeline<P> {
    /// Create a pipeline around a provider and prompt template
    pub fn new(provider: P, prompt: PromptTemplate) -> Self {
        Self {
            provider,
            prompt,
            on_progress: None,
            cancel: None,
        }
    }

    /// Subscribe to progress events
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Abort runs when the flag is raised
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn prompt(&self) -> &PromptTemplate {
        &self.prompt
    }

    fn emit(&self, event: ProgressEvent) {
        debug!("{}", event);
        if let Some(callback) = &self.on_progress {
            callback(&event);
        }
    }

    /// Translate `text` and return the combined translation
    pub async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let state = self.run(TranslationState::new(text)).await?;
        Ok(state.final_translation)
    }

    /// Drive `initial` through every stage and return the final state
    pub async fn run(&self, initial: TranslationState) -> Result<TranslationState, PipelineInterrupted> {
        self.emit(ProgressEvent::Started);

        let mut state = split(&initial);
        let total = state.total_chunks();
        self.emit(ProgressEvent::SplitCompleted { chunks: total });

        for index in 0..total {
            debug_assert_eq!(state.current_index, index);
            self.emit(ProgressEvent::ChunkStarted { index, total });

            state = match translate_step(&state, &self.provider, &self.prompt, self.cancel.as_ref()).await {
                Ok(next) => next,
                Err(error) => {
                    info!("Stopping after {} of {} chunk(s): {}", index, total, error);
                    return Err(PipelineInterrupted { error, state });
                }
            };

            self.emit(ProgressEvent::ChunkTranslated { index, total });
        }

        let state = match combine(&state) {
            Ok(combined) => combined,
            Err(error) => return Err(PipelineInterrupted { error, state }),
        };
        self.emit(ProgressEvent::CombineCompleted { chunks: total });
        self.emit(ProgressEvent::Finished);

        Ok(state)
    }
}
