/*!
 * Prompt template used for every chunk request.
 */

/// Placeholder replaced with the target language name
pub const TARGET_LANGUAGE_PLACEHOLDER: &str = "{target_language}";

/// Default instruction placed before each chunk
pub const DEFAULT_INSTRUCTION: &str =
    "Translate the following text naturally into {target_language}. Output only the translation:";

/// Builds the instruction sent for a single chunk
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    instruction: String,
    target_language: String,
}

impl PromptTemplate {
    /// Create a template with the default instruction
    pub fn new(target_language: impl Into<String>) -> Self {
        Self::with_instruction(DEFAULT_INSTRUCTION, target_language)
    }

    /// Create a template with a custom instruction. `{target_language}` is substituted.
    pub fn with_instruction(instruction: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            target_language: target_language.into(),
        }
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Instruction with the target language filled in
    pub fn instruction(&self) -> String {
        self.instruction.replace(TARGET_LANGUAGE_PLACEHOLDER, &self.target_language)
    }

    /// Full prompt for one chunk: instruction, blank line, chunk text
    pub fn render(&self, chunk: &str) -> String {
        format!("{}\n\n{}", self.instruction(), chunk)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new("Japanese")
    }
}
