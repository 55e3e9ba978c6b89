// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::audit::AuditScanner;

mod app_config;
mod app_controller;
mod audit;
mod catalog;
mod catalog_store;
mod errors;
mod file_utils;
mod language_utils;
mod placeholder;
mod policy;
mod providers;
mod script;
mod segmenter;
mod translation_service;

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
    /// Merge and machine-translate catalog files (default command)
    #[command(alias = "run")]
    Translate(TranslateArgs),

    /// Scan produced catalogs for suspect strings and copy matches for review
    Check(CheckArgs),

    /// Generate shell completions for mergecat
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Directory of source-language catalogs (overrides config)
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Directory of previously-translated catalogs (overrides config)
    #[arg(short, long)]
    previous_dir: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Target language code (overrides config)
    #[arg(short, long)]
    target_language: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Folder of produced catalogs to scan (defaults to the previous-translations dir)
    #[arg(short, long)]
    folder: Option<PathBuf>,

    /// Review output directory (overrides config)
    #[arg(short, long)]
    review_dir: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// mergecat - catalog merge and machine translation
///
/// Keeps a target-language gettext catalog current as the source catalog
/// evolves: previously-approved translations survive the merge, and only
/// new or still-untranslated entries are machine translated.
#[derive(Parser, Debug)]
#[command(name = "mergecat")]
#[command(version = "1.0.0")]
#[command(about = "Catalog merge and machine translation tool")]
#[command(long_about = "mergecat merges previously-translated gettext catalogs with updated
source catalogs and machine-translates the entries that still need it.

EXAMPLES:
    mergecat                                  # Translate using conf.json
    mergecat -s catalogs/ru -o catalogs/out   # Override directories
    mergecat -t zh                            # Override target language
    mergecat check                            # Audit produced catalogs
    mergecat completions bash > mergecat.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config-path. If the config file doesn't exist, a
    template is written for you to fill in provider credentials.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
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

    // @returns: ANSI color code for log level
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
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
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

// @applies: Command-line log level immediately
fn apply_log_level(cli_level: &Option<CliLogLevel>) {
    if let Some(cmd_log_level) = cli_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }
}

// @converts: Config log level into the log crate's filter
fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

// @loads: Config file, writing a template when it does not exist yet
fn load_config(config_path: &str) -> Result<Option<Config>> {
    if Path::new(config_path).exists() {
        let config = Config::from_file(config_path)?;
        return Ok(Some(config));
    }

    Config::write_default(config_path)?;
    info!(
        "Created default configuration at {}. Fill in the provider credentials and directories, then re-run.",
        config_path
    );
    Ok(None)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "mergecat", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Check(args)) => run_check(args).await,
        Some(Commands::Translate(args)) => run_translate(args).await,
        // Default behavior - use top-level args
        None => run_translate(cli.translate).await,
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    apply_log_level(&options.log_level);

    let Some(mut config) = load_config(&options.config_path)? else {
        return Ok(());
    };

    // Override config with CLI options if provided
    if let Some(source_dir) = options.source_dir {
        config.source_dir = source_dir;
    }
    if let Some(previous_dir) = options.previous_dir {
        config.previous_dir = previous_dir;
    }
    if let Some(output_dir) = options.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }

    // The config file's log level applies unless the CLI already set one
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;
    controller.run().await
}

async fn run_check(options: CheckArgs) -> Result<()> {
    apply_log_level(&options.log_level);

    let Some(config) = load_config(&options.config_path)? else {
        return Ok(());
    };

    let folder = options.folder.unwrap_or_else(|| config.previous_dir.clone());
    let review_dir = options.review_dir.unwrap_or_else(|| config.review_dir.clone());

    if config.audit.suspect_strings.is_empty() {
        return Err(anyhow!(
            "No suspect strings configured: set audit.suspect_strings in the config file"
        ));
    }

    let scanner = AuditScanner::new(&config.audit.suspect_strings);
    let flagged = scanner.scan(&folder, &config.source_dir, &review_dir)?;
    info!("Flagged {} catalog(s) for review in {:?}", flagged, review_dir);

    Ok(())
}
