/*!
 * The record threaded through the translation pipeline.
 *
 * Stages never mutate a state they are given; each one returns a new value.
 */

/// Progress of one translation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationState {
    /// Unmodified input text
    pub original_text: String,

    /// Paragraph segments, fixed after the split stage
    pub chunks: Vec<String>,

    /// Translations, positionally aligned with `chunks`; empty until filled
    pub translated_chunks: Vec<String>,

    /// Index of the next chunk to translate
    pub current_index: usize,

    /// Joined translation, set only by the combine stage
    pub final_translation: String,
}

impl TranslationState {
    /// Create the initial state for a run
    pub fn new(original_text: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            ..Default::default()
        }
    }

    pub fn total_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Guard condition: another translate step must run
    pub fn has_pending_chunks(&self) -> bool {
        self.current_index < self.chunks.len()
    }

    /// Every chunk has been translated and combine may run
    pub fn is_complete(&self) -> bool {
        !self.has_pending_chunks()
    }

    /// Chunks translated so far, in order
    pub fn completed_translations(&self) -> &[String] {
        let done = self.current_index.min(self.translated_chunks.len());
        &self.translated_chunks[..done]
    }
}
