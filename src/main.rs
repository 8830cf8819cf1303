// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;
use clap::{Parser, ValueEnum, CommandFactory};
use clap_complete::{generate, Shell};

use site_translate::app_config::{Config, LogLevel};
use site_translate::app_controller::Controller;
use site_translate::language_utils::TargetLocale;
use site_translate::providers::Translator;
use site_translate::providers::deepl::DeepL;

/// CLI selection of target locales
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLanguage {
    Fr,
    Es,
    Both,
}

impl CliLanguage {
    fn locales(self) -> Vec<TargetLocale> {
        match self {
            CliLanguage::Fr => vec![TargetLocale::Fr],
            CliLanguage::Es => vec![TargetLocale::Es],
            CliLanguage::Both => TargetLocale::ALL.to_vec(),
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

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// site-translate - translate static site pages with DeepL
///
/// Translates the configured HTML pages from English into French and/or
/// Spanish, keeping their Jekyll front matter and updating its `lang` field.
#[derive(Parser, Debug)]
#[command(name = "site-translate")]
#[command(version)]
#[command(about = "Translate HTML pages using the DeepL API")]
#[command(long_about = "Translates HTML pages with Jekyll front matter using the DeepL API.

Each page is written to <root>/<locale>/<page>, replacing any existing file.

EXAMPLES:
    site-translate                               # Translate all pages into fr and es
    site-translate --dry-run                     # Show what would be translated
    site-translate --lang fr                     # French only
    site-translate --file resources/index.html   # A single page
    site-translate --completions bash > site-translate.bash

CONFIGURATION:
    Settings are read from site-translate.json when it exists (see --config).
    The API key comes from --api-key, the DEEPL_API_KEY environment variable,
    or translation.api_key in the configuration file.")]
struct CommandLineOptions {
    /// DeepL API key
    #[arg(short = 'k', long, env = "DEEPL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Show what would be translated without calling the API or writing files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Language to translate to
    #[arg(short, long, value_enum)]
    lang: Option<CliLanguage>,

    /// Specific page to translate (relative to the project root)
    #[arg(short, long, value_name = "PAGE")]
    file: Option<PathBuf>,

    /// Project root containing the source pages
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "site-translate.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Do not draw a progress bar
    #[arg(long)]
    no_progress: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Prefix and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("⚠️ ", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let (prefix, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, prefix, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "site-translate", &mut std::io::stdout());
        return Ok(());
    }

    run_translate(cli).await
}

async fn run_translate(options: CommandLineOptions) -> Result<()> {
    let mut config = Config::load_or_default(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(root) = &options.root {
        config.project_root = root.clone();
    }

    if let Some(file) = &options.file {
        config.pages = vec![file.clone()];
    }

    if let Some(lang) = options.lang {
        config.target_locales = lang.locales();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    log::set_max_level(level_filter(&config.log_level));

    config.validate()
        .context("Configuration validation failed")?;

    let api_key = options.api_key.clone()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| Some(config.translation.api_key.clone()).filter(|key| !key.trim().is_empty()))
        .ok_or_else(|| anyhow!("DeepL API key required. Set DEEPL_API_KEY environment variable or use --api-key"))?;

    let translator = DeepL::new(
        api_key,
        config.translation.endpoint.as_deref(),
        Duration::from_secs(config.translation.timeout_secs),
    )
    .context("Error connecting to DeepL API")?;
    info!("✅ Connected to {} API ({})", translator.name(), translator.endpoint());

    let show_progress = !options.no_progress && std::io::stderr().is_terminal();
    let controller = Controller::with_config(config, Box::new(translator))?
        .with_progress(show_progress);

    let summary = controller.run(options.dry_run).await;

    println!();
    for line in summary.report_lines() {
        println!("{}", line);
    }

    Ok(())
}
