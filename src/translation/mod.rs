/*!
 * Long-text translation pipeline.
 *
 * Input text is split into paragraph chunks, each chunk is translated with
 * one provider call in order, and the results are joined back together.
 * It is split into several submodules:
 *
 * - `state`: The record threaded through the stages
 * - `stages`: Split, per-chunk translate and combine
 * - `pipeline`: Driver sequencing the stages
 * - `prompts`: Prompt template for chunk requests
 * - `progress`: Typed progress events
 * - `cancellation`: Cooperative stop signal
 */

// Re-export main types for easier usage
pub use self::cancellation::CancellationFlag;
pub use self::pipeline::{PipelineInterrupted, TranslationPipeline};
pub use self::progress::{ProgressCallback, ProgressEvent};
pub use self::prompts::PromptTemplate;
pub use self::state::TranslationState;

// Submodules
pub mod cancellation;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod stages;
pub mod state;
