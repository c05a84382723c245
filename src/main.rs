// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::{Path, PathBuf};

use wikitrans::app_config::{self, Config, TranslationProvider};
use wikitrans::app_controller::{Controller, RunOptions};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Ollama,
    OpenAI,
    Anthropic,
    LMStudio,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
            CliTranslationProvider::OpenAI => TranslationProvider::OpenAI,
            CliTranslationProvider::Anthropic => TranslationProvider::Anthropic,
            CliTranslationProvider::LMStudio => TranslationProvider::LMStudio,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
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
    /// Generate shell completions for wikitrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// wikitrans - wiki article translation with AI
///
/// Translates wiki articles listed in a job file, keeping their links pointing
/// at existing pages of the target wiki.
#[derive(Parser, Debug)]
#[command(name = "wikitrans")]
#[command(version)]
#[command(about = "AI-powered wiki article translation tool")]
#[command(long_about = "wikitrans reads a tab-separated job list and translates each wiki article with an AI provider.

JOB LIST FORMAT (one page per line, tab-separated):
    source_page  source_language  target_page  target_language
    An empty target_page means the title is translated as well.

EXAMPLES:
    wikitrans pages.tsv                          # Translate and log the result
    wikitrans pages.tsv -d out/                  # Also write out/<title>.json per page
    wikitrans pages.tsv --save                   # Save pages to the wiki and link them on Wikidata
    wikitrans -p openai -m gpt-4o-mini pages.tsv # Use specific provider and model
    wikitrans completions bash > wikitrans.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Job list file
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Folder receiving one <title>.json per translated page
    #[arg(short, long)]
    destination: Option<PathBuf>,

    /// Save translated pages to the wiki and link them on Wikidata
    #[arg(short, long)]
    save: bool,

    /// Log every page at each stage of the pipeline
    #[arg(short, long)]
    verbose: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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
        // The logger accepts everything; filtering happens through set_max_level
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the configuration is known
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "wikitrans", &mut std::io::stdout());
        return Ok(());
    }

    let input_file = cli.input_file.clone()
        .ok_or_else(|| anyhow!("INPUT_FILE is required when no subcommand is specified"))?;

    run_translate(cli, &input_file).await
}

async fn run_translate(options: CommandLineOptions, input_file: &Path) -> Result<()> {
    let mut config = Config::load_or_create(Path::new(&options.config_path))?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        config.translation.set_model(model);
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else if options.verbose {
        config.log_level = app_config::LogLevel::Debug;
    }
    log::set_max_level(level_filter(&config.log_level));

    config.validate()
        .context("Configuration validation failed")?;

    info!("Input File: {}", input_file.display());
    info!("Should Save: {}", options.save);
    if let Some(destination) = &options.destination {
        info!("Destination: {}", destination.display());
    }

    let controller = Controller::with_config(config)?;
    let run_options = RunOptions {
        destination: options.destination.clone(),
        save: options.save,
    };

    let summary = controller.run(input_file, &run_options).await?;
    if summary.failed > 0 {
        return Err(anyhow!("{} of {} pages failed", summary.failed, summary.total()));
    }

    Ok(())
}
