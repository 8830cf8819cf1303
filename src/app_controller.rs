use anyhow::Result;
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::front_matter;
use crate::language_utils::TargetLocale;
use crate::providers::{TranslationRequest, Translator};

// @module: Application controller for page translation

/// Front matter key holding the page language
pub const LANG_FIELD: &str = "lang";

/// One page translated into one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    /// Page path relative to the project root
    pub page: PathBuf,
    /// Absolute or root-joined path of the source page
    pub source_path: PathBuf,
    /// Locale to produce
    pub locale: TargetLocale,
    /// Where the translated page is written
    pub output_path: PathBuf,
}

impl TranslationJob {
    // @creates: Job with paths derived from the project root
    pub fn new<P1: AsRef<Path>, P2: AsRef<Path>>(project_root: P1, page: P2, locale: TargetLocale) -> Self {
        let project_root = project_root.as_ref();
        let page = page.as_ref();
        Self {
            page: page.to_path_buf(),
            source_path: project_root.join(page),
            locale,
            output_path: FileManager::generate_output_path(project_root, locale, page),
        }
    }
}

/// Result of sending a page body to the translator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyTranslation {
    /// The provider returned a translation
    Translated(String),
    /// The provider failed; the untranslated body is used instead
    FallbackOriginal {
        /// Original body
        body: String,
        /// Provider error message
        reason: String,
    },
}

impl BodyTranslation {
    /// Body text to write, whichever way it was obtained
    pub fn into_body(self) -> String {
        match self {
            Self::Translated(body) => body,
            Self::FallbackOriginal { body, .. } => body,
        }
    }
}

/// What happened to a single job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Translated page written
    Translated,
    /// Page written with the original body after a provider failure
    FallbackOriginal {
        /// Provider error message
        reason: String,
    },
    /// Dry run: nothing sent, nothing written
    DryRun {
        /// Characters that would have been sent
        characters: usize,
    },
    /// Source page does not exist
    SourceMissing,
}

impl JobOutcome {
    /// Whether the job counts towards the succeeded total.
    ///
    /// A fallback still produced an output file, so it counts as succeeded;
    /// `RunSummary::fallbacks` keeps it distinguishable.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::SourceMissing)
    }
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Jobs started (existing page × locale)
    pub attempted: usize,
    /// Jobs that produced (or in dry-run would produce) an output file
    pub succeeded: usize,
    /// Succeeded jobs that wrote the untranslated body
    pub fallbacks: usize,
    /// Jobs that failed on a read or write error
    pub failed: usize,
    /// Pages skipped because the source file was not found
    pub skipped: usize,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl RunSummary {
    // @creates: Empty summary
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    // @updates: Count a finished job
    pub fn record(&mut self, outcome: &JobOutcome) {
        if let JobOutcome::SourceMissing = outcome {
            self.skipped += 1;
            return;
        }

        self.attempted += 1;
        if outcome.is_success() {
            self.succeeded += 1;
        }
        if let JobOutcome::FallbackOriginal { .. } = outcome {
            self.fallbacks += 1;
        }
    }

    // @updates: Count a job that failed with an error
    pub fn record_failure(&mut self) {
        self.attempted += 1;
        self.failed += 1;
    }

    // @returns: Lines of the final report
    pub fn report_lines(&self) -> Vec<String> {
        let separator = "=".repeat(50);
        let mut lines = vec![
            separator.clone(),
            format!("Translation complete: {}/{} files", self.succeeded, self.attempted),
        ];
        if self.fallbacks > 0 {
            lines.push(format!(
                "({} written with the untranslated body after a translation error)",
                self.fallbacks
            ));
        }
        if self.skipped > 0 {
            lines.push(format!("({} page(s) skipped, source not found)", self.skipped));
        }
        if self.dry_run {
            lines.push("(Dry run - no files were modified)".to_string());
        }
        lines.push(separator);
        lines
    }
}

/// Main application controller for page translation
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Translation provider
    translator: Box<dyn Translator>,
    // @field: Draw a progress bar over all jobs
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration and translator
    pub fn with_config(config: Config, translator: Box<dyn Translator>) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            translator,
            show_progress: false,
        })
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// All jobs of a run: pages in configured order, locales within each page
    pub fn jobs(&self) -> Vec<TranslationJob> {
        let root = &self.config.project_root;
        let locales = &self.config.target_locales;
        self.config.pages.iter()
            .flat_map(|page| locales.iter().map(move |locale| TranslationJob::new(root, page, *locale)))
            .collect()
    }

    /// Run every job once, sequentially, and return the counters
    pub async fn run(&self, dry_run: bool) -> RunSummary {
        let start_time = Instant::now();
        let mut summary = RunSummary::new(dry_run);

        let progress = self.create_progress_bar(self.config.pages.len() * self.config.target_locales.len());
        debug!(
            "Translating {} page(s) into {} locale(s) with {}",
            self.config.pages.len(),
            self.config.target_locales.len(),
            self.translator.name()
        );

        let jobs = self.jobs();
        for page_jobs in jobs.chunk_by(|a, b| a.page == b.page) {
            let Some(first) = page_jobs.first() else {
                continue;
            };
            if !FileManager::file_exists(&first.source_path) {
                progress.suspend(|| warn!("Skipping {} (not found)", first.page.display()));
                summary.record(&JobOutcome::SourceMissing);
                progress.inc(page_jobs.len() as u64);
                continue;
            }

            for job in page_jobs {
                progress.set_message(format!("{} ({})", job.page.display(), job.locale));
                progress.suspend(|| info!(
                    "Translating: {} -> {} ({})",
                    job.source_path.display(),
                    job.output_path.display(),
                    job.locale.api_code()
                ));

                match self.translate_page(job, dry_run).await {
                    Ok(outcome) => {
                        progress.suspend(|| Self::log_outcome(job, &outcome));
                        summary.record(&outcome);
                    }
                    Err(e) => {
                        progress.suspend(|| error!("Failed {} ({}): {}", job.page.display(), job.locale, e));
                        summary.record_failure();
                    }
                }
                progress.inc(1);
            }
        }

        progress.finish_and_clear();
        debug!("Run finished in {}", Self::format_duration(start_time.elapsed()));

        summary
    }

    /// Translate one page into one locale and write the result
    pub async fn translate_page(&self, job: &TranslationJob, dry_run: bool) -> Result<JobOutcome, AppError> {
        if !FileManager::file_exists(&job.source_path) {
            return Ok(JobOutcome::SourceMissing);
        }

        let content = FileManager::read_to_string(&job.source_path)
            .map_err(|e| AppError::SourceRead {
                path: job.source_path.clone(),
                message: format!("{:#}", e),
            })?;
        let mut document = front_matter::split(&content);

        if !document.has_metadata() {
            warn!("No front matter found in {}, translating entire file", job.page.display());
        }

        if dry_run {
            return Ok(JobOutcome::DryRun {
                characters: document.body.chars().count(),
            });
        }

        let translation = self.translate_body(&document.body, job.locale).await;
        let outcome = match &translation {
            BodyTranslation::Translated(_) => JobOutcome::Translated,
            BodyTranslation::FallbackOriginal { reason, .. } => JobOutcome::FallbackOriginal {
                reason: reason.clone(),
            },
        };

        document.metadata = document.metadata.as_deref().map(|metadata| {
            if let Some(previous) = front_matter::get_field(metadata, LANG_FIELD) {
                debug!("Replacing {}: {} with {}", LANG_FIELD, previous, job.locale.code());
            }
            front_matter::set_field(metadata, LANG_FIELD, job.locale.code())
        });
        document.body = translation.into_body();

        FileManager::write_to_file(&job.output_path, &document.reassemble())
            .map_err(|e| AppError::OutputWrite {
                path: job.output_path.clone(),
                message: format!("{:#}", e),
            })?;

        Ok(outcome)
    }

    /// Send a body to the translator, falling back to the original on failure
    pub async fn translate_body(&self, body: &str, locale: TargetLocale) -> BodyTranslation {
        let translation = &self.config.translation;
        let request = TranslationRequest {
            text: body.to_string(),
            source_language: self.config.source_language_code(),
            target_language: locale.api_code().to_string(),
            preserve_formatting: translation.preserve_formatting,
            tag_handling: Some(translation.tag_handling.clone()),
        };

        match self.translator.translate(request).await {
            Ok(translated) => BodyTranslation::Translated(translated),
            Err(e) => BodyTranslation::FallbackOriginal {
                body: body.to_string(),
                reason: e.to_string(),
            },
        }
    }

    fn log_outcome(job: &TranslationJob, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Translated => info!("  Translated successfully"),
            JobOutcome::FallbackOriginal { reason } => warn!(
                "  Error translating {} into {}: {}. Wrote untranslated content",
                job.page.display(),
                job.locale.display_name(),
                reason
            ),
            JobOutcome::DryRun { characters } => info!("  [DRY RUN] Would translate {} characters", characters),
            JobOutcome::SourceMissing => warn!("  Source file not found: {}", job.source_path.display()),
        }
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress.set_style(style);
        progress
    }

    /// Format a duration as seconds or minutes and seconds
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        if total_seconds < 60 {
            format!("{:.1}s", duration.as_secs_f64())
        } else {
            format!("{}m {}s", total_seconds / 60, total_seconds % 60)
        }
    }
}

