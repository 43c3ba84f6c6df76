use anyhow::{Result, Context};
use log::{info, debug};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::Config;
use crate::errors::TranslationError;
use crate::file_utils::FileManager;
use crate::providers::Provider;
use crate::providers::openai::OpenAI;
use crate::translation::{
    CancellationFlag, ProgressCallback, ProgressEvent, PromptTemplate, TranslationPipeline,
};

// @module: Application controller for long-text translation

/// Text translated when no input is given
pub const SAMPLE_TEXT: &str = "Artificial intelligence (AI) is intelligence demonstrated by machines, in contrast to the natural intelligence displayed by humans and animals. Leading AI textbooks define the field as the study of \"intelligent agents\": any device that perceives its environment and takes actions that maximize its chance of successfully achieving its goals.

Colloquially, the term \"artificial intelligence\" is often used to describe machines (or computers) that mimic \"cognitive\" functions that humans associate with the human mind, such as \"learning\" and \"problem solving\". As machines become increasingly capable, tasks considered to require \"intelligence\" are often removed from the definition of AI, a phenomenon known as the AI effect.

A machine with artificial general intelligence should be able to solve a wide variety of problems with breadth and versatility similar to human intelligence.";

/// Main application controller for text translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Prompt template for the configured target language
    pub fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate::new(self.config.target_language_name())
    }

    /// Create the OpenAI-compatible client described by the configuration
    pub fn create_provider(&self) -> OpenAI {
        let provider = OpenAI::new(
            &self.config.api_key,
            &self.config.base_url,
            &self.config.model,
            self.config.timeout_secs,
        )
        .with_temperature(self.config.temperature);

        match self.config.max_tokens {
            Some(max_tokens) => provider.with_max_tokens(max_tokens),
            None => provider,
        }
    }

    /// Verify that the configured endpoint accepts our credentials
    pub async fn check_connection(&self) -> Result<()> {
        let provider = self.create_provider();
        info!("Checking connection to {}", provider.api_url("models"));
        provider
            .test_connection()
            .await
            .with_context(|| format!("Connection check failed for {}", self.config.base_url))?;
        info!("Connection OK (model: {})", self.config.model);
        Ok(())
    }

    /// Translate `text` with any provider, reporting progress to `on_progress`
    pub async fn translate_with<P: Provider>(
        &self,
        provider: P,
        text: &str,
        cancel: CancellationFlag,
        on_progress: Option<ProgressCallback>,
    ) -> Result<String, TranslationError> {
        let mut pipeline = TranslationPipeline::new(provider, self.prompt_template())
            .with_cancellation(cancel);
        if let Some(callback) = on_progress {
            pipeline = pipeline.with_progress(callback);
        }
        pipeline.translate(text).await
    }

    /// Run the main workflow: read input, translate it and emit the result
    pub async fn run(&self, input: Option<&Path>, output: Option<&Path>, cancel: CancellationFlag) -> Result<()> {
        let start_time = Instant::now();

        let text = match input {
            Some(path) => FileManager::read_input(path)?,
            None => {
                info!("No input given, translating the built-in sample text");
                SAMPLE_TEXT.to_string()
            }
        };
        debug!("Input has {} characters", text.chars().count());

        info!("Model: {}", self.config.model);
        info!("Base URL: {}", self.config.base_url);
        info!("Target language: {}", self.config.target_language_name());

        let progress_bar = Self::create_progress_bar();
        let translation = self
            .translate_with(
                self.create_provider(),
                &text,
                cancel,
                Some(Self::console_progress(progress_bar.clone())),
            )
            .await;
        progress_bar.finish_and_clear();
        let translation = translation?;

        match output {
            Some(path) => {
                FileManager::write_string(path, &translation)?;
                info!("Success: {:?}", path);
            }
            None => {
                if std::io::stdout().is_terminal() {
                    println!();
                    println!("=== Translation ===");
                }
                println!("{}", translation);
            }
        }

        info!("Finished in {:.1}s", start_time.elapsed().as_secs_f64());
        Ok(())
    }

    fn create_progress_bar() -> ProgressBar {
        let progress_bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }

    /// Progress subscriber that logs stage events and drives the progress bar
    pub fn console_progress(progress_bar: ProgressBar) -> ProgressCallback {
        Arc::new(move |event: &ProgressEvent| match event {
            ProgressEvent::SplitCompleted { chunks } => {
                progress_bar.set_length(*chunks as u64);
                info!("{}", event);
            }
            ProgressEvent::ChunkStarted { .. } => {
                progress_bar.set_message(event.to_string());
                info!("{}", event);
            }
            ProgressEvent::ChunkTranslated { index, .. } => {
                progress_bar.set_position(*index as u64 + 1);
                info!("{}", event);
            }
            _ => info!("{}", event),
        })
    }
}
