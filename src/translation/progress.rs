/*!
 * Typed progress notifications emitted by the pipeline.
 */

use std::fmt;
use std::sync::Arc;

/// A notification at a stage boundary or chunk completion.
///
/// Chunk indices are zero-based; `Display` renders 1-based positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The run has started
    Started,
    /// The input was split into `chunks` segments
    SplitCompleted { chunks: usize },
    /// The provider call for a chunk is about to be issued
    ChunkStarted { index: usize, total: usize },
    /// A chunk translation was recorded
    ChunkTranslated { index: usize, total: usize },
    /// All translations were joined
    CombineCompleted { chunks: usize },
    /// The run finished successfully
    Finished,
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "Starting translation"),
            Self::SplitCompleted { chunks } => write!(f, "Split text into {} chunk(s)", chunks),
            Self::ChunkStarted { index, total } => write!(f, "Translating chunk {}/{}", index + 1, total),
            Self::ChunkTranslated { index, total } => write!(f, "Translated chunk {}/{}", index + 1, total),
            Self::CombineCompleted { chunks } => write!(f, "Combined {} translated chunk(s)", chunks),
            Self::Finished => write!(f, "Translation complete"),
        }
    }
}

/// Subscriber invoked synchronously for every event
pub type ProgressCallback = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;
