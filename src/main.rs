// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
#![cfg_attr(test, allow(non_snake_case))]

use anyhow::{Result, Context};
use log::{error, warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use longtrans::app_config::{self, Config};
use longtrans::app_controller::Controller;
use longtrans::errors::TranslationError;
use longtrans::translation::CancellationFlag;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliLogLevel {
    // @returns: Value as it would appear in LOG_LEVEL
    fn as_setting(self) -> &'static str {
        match self {
            CliLogLevel::Error => "error",
            CliLogLevel::Warn => "warn",
            CliLogLevel::Info => "info",
            CliLogLevel::Debug => "debug",
            CliLogLevel::Trace => "trace",
        }
    }
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a text file, stdin or the built-in sample (default command)
    Translate(TranslateArgs),

    /// Validate the configuration and test the connection to the API
    Check,

    /// Generate shell completions for longtrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct TranslateArgs {
    /// Text file to translate, '-' for stdin; the built-in sample is used when omitted
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Write the translation to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Model name to use for translation (overrides MODEL_NAME)
    #[arg(short, long)]
    model: Option<String>,

    /// Target language code, e.g. 'ja', 'fr' (overrides TARGET_LANGUAGE)
    #[arg(short, long)]
    target_language: Option<String>,
}

/// longtrans - Long text translation with AI
///
/// Splits a text into paragraphs, translates them one by one through an
/// OpenAI-compatible API and joins the results.
#[derive(Parser, Debug)]
#[command(name = "longtrans")]
#[command(version)]
#[command(about = "Paragraph-by-paragraph long text translation")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "longtrans splits a text into paragraphs and translates them one by one with an OpenAI-compatible chat completion API.

EXAMPLES:
    longtrans                                   # Translate the built-in sample text
    longtrans article.txt                       # Translate a file to stdout
    cat article.txt | longtrans -               # Translate stdin
    longtrans -t fr -o article.fr.txt article.txt
    longtrans -m gpt-4o article.txt             # Use a specific model
    longtrans check                             # Validate settings and test the API
    longtrans completions bash > longtrans.bash

CONFIGURATION:
    Settings are read from the environment, then from a .env file
    (see --env-file). Keys: API_KEY, BASE_URL (required), MODEL_NAME
    (default gpt-4o-mini), TARGET_LANGUAGE (default ja), TEMPERATURE,
    REQUEST_TIMEOUT_SECS, LOG_LEVEL.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,

    /// Settings file with KEY=VALUE lines
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour sequence for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // The level filter is adjusted globally via log::set_max_level
        metadata.level() <= self.level.max(log::max_level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let status = exit_status(&e);
            if status == EXIT_CANCELLED {
                warn!("{}", e);
            } else {
                error!("Error: {:?}", e);
            }
            ExitCode::from(status)
        }
    }
}

/// Exit status after a user interrupt (128 + SIGINT)
const EXIT_CANCELLED: u8 = 130;
const EXIT_FAILURE: u8 = 1;

// @returns: Process exit status for a failed run
fn exit_status(error: &anyhow::Error) -> u8 {
    let cancelled = error
        .downcast_ref::<TranslationError>()
        .is_some_and(TranslationError::is_cancelled);
    if cancelled { EXIT_CANCELLED } else { EXIT_FAILURE }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cli_level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(cli_level).to_level_filter());
    }

    let args = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "longtrans", &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Check) => {
            let controller = Controller::with_config(load_config(&cli.env_file, cli.log_level, None)?)?;
            return controller.check_connection().await;
        }
        Some(Commands::Translate(args)) => args,
        // Default behavior - use top-level args
        None => cli.translate,
    };

    let config = load_config(&cli.env_file, cli.log_level, Some(&args))?;
    let controller = Controller::with_config(config)?;
    info!("=== longtrans {} ===", env!("CARGO_PKG_VERSION"));

    let cancel = CancellationFlag::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling translation");
            trigger.cancel();
        }
    });

    controller
        .run(args.input_path.as_deref(), args.output.as_deref(), cancel)
        .await
}

fn load_config(env_file: &Path, cli_level: Option<CliLogLevel>, args: Option<&TranslateArgs>) -> Result<Config> {
    load_config_with_env(env_file, cli_level, args, |key| std::env::var(key).ok())
}

// @returns: Settings given on the command line, keyed like the environment
fn cli_overrides(cli_level: Option<CliLogLevel>, args: Option<&TranslateArgs>) -> HashMap<&'static str, String> {
    let mut overrides = HashMap::new();
    if let Some(level) = cli_level {
        overrides.insert(app_config::LOG_LEVEL, level.as_setting().to_string());
    }
    if let Some(args) = args {
        if let Some(model) = &args.model {
            overrides.insert(app_config::MODEL_NAME, model.clone());
        }
        if let Some(target_language) = &args.target_language {
            overrides.insert(app_config::TARGET_LANGUAGE, target_language.clone());
        }
    }
    overrides
}

// CLI values shadow the environment, which shadows the settings file.
// Validation runs once on the merged result.
fn load_config_with_env<F>(
    env_file: &Path,
    cli_level: Option<CliLogLevel>,
    args: Option<&TranslateArgs>,
    env: F,
) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let overrides = cli_overrides(cli_level, args);
    let config = Config::load_with_env(env_file, |key| overrides.get(key).cloned().or_else(|| env(key)))
        .with_context(|| format!("Failed to load configuration (settings file: {:?})", env_file))?;

    log::set_max_level(config.log_level.to_level_filter());
    Ok(config)
}
