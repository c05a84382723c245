use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::{FileManager, TranslationJob};
use crate::translation::{
    OrchestratorConfig, TextTranslator, TranslationOrchestrator, TranslationOutcome, TranslationService,
};
use crate::wiki::{MediaWikiClient, WikiClient};

// @module: Application controller for job list processing

/// What to do with each translated page
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Directory receiving one `<title>.json` per translated page
    pub destination: Option<PathBuf>,
    /// Save translated pages to the wiki and link them on Wikidata
    pub save: bool,
}

/// Outcome counts of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub translated: usize,
    pub already_translated: usize,
    pub unsupported: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.translated + self.already_translated + self.unsupported + self.failed
    }
}

/// Per-job status, folded into the `RunSummary`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobStatus {
    Translated,
    AlreadyTranslated,
    Unsupported,
}

/// Main application controller for page translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Page pipeline
    orchestrator: TranslationOrchestrator,
    // @field: LLM service, when the controller owns one
    service: Option<Arc<TranslationService>>,
}

impl Controller {
    // @method: Create a controller talking to the configured wikis and provider
    pub fn with_config(config: Config) -> Result<Self> {
        let wiki = MediaWikiClient::new(config.wiki.clone(), &config.supported_languages)
            .context("Failed to create wiki client")?;
        let service = Arc::new(
            TranslationService::new(config.translation.clone())
                .context("Failed to create translation service")?,
        );

        let orchestrator = TranslationOrchestrator::new(
            Arc::new(wiki),
            service.clone(),
            OrchestratorConfig::from_config(&config),
        );

        Ok(Self {
            config,
            orchestrator,
            service: Some(service),
        })
    }

    /// Create a controller around existing capabilities
    pub fn with_components(config: Config, wiki: Arc<dyn WikiClient>, translator: Arc<dyn TextTranslator>) -> Self {
        let orchestrator = TranslationOrchestrator::new(wiki, translator, OrchestratorConfig::from_config(&config));
        Self {
            config,
            orchestrator,
            service: None,
        }
    }

    pub fn orchestrator(&self) -> &TranslationOrchestrator {
        &self.orchestrator
    }

    /// Check that the translation provider answers
    pub async fn test_connection(&self) -> Result<()> {
        match &self.service {
            Some(service) => service.test_connection().await,
            None => Ok(()),
        }
    }

    /// Process every job of a job list file
    pub async fn run(&self, input_file: &Path, options: &RunOptions) -> Result<RunSummary> {
        let jobs = FileManager::read_job_list(input_file)?;
        self.run_jobs(&jobs, options).await
    }

    /// Process jobs one after the other; a failed job is logged and the run continues
    pub async fn run_jobs(&self, jobs: &[TranslationJob], options: &RunOptions) -> Result<RunSummary> {
        let start_time = Instant::now();

        if let Some(destination) = &options.destination {
            FileManager::ensure_dir(destination)?;
        }

        info!("wikitrans: {} - {}",
              self.config.translation.provider.display_name(),
              self.config.translation.get_model());

        let progress_bar = ProgressBar::new(jobs.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));

        let mut summary = RunSummary::default();

        for job in jobs {
            progress_bar.set_message(format!("{} ({} -> {})", job.source_title, job.source_language, job.target_language));

            match self.process_job(job, options).await {
                Ok(JobStatus::Translated) => summary.translated += 1,
                Ok(JobStatus::AlreadyTranslated) => summary.already_translated += 1,
                Ok(JobStatus::Unsupported) => summary.unsupported += 1,
                Err(e) => {
                    error!("Error processing '{}' ({} -> {}): {:#}",
                           job.source_title, job.source_language, job.target_language, e);
                    summary.failed += 1;
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("Job list complete");

        info!(
            "Processed {} pages in {}: {} translated, {} already translated, {} unsupported, {} errors",
            summary.total(),
            Self::format_duration(start_time.elapsed()),
            summary.translated,
            summary.already_translated,
            summary.unsupported,
            summary.failed
        );
        if let Some(service) = &self.service {
            info!("{}", service.usage().summary());
        }

        Ok(summary)
    }

    async fn process_job(&self, job: &TranslationJob, options: &RunOptions) -> Result<JobStatus> {
        // Reported and skipped, never translated
        let unsupported: Vec<&str> = [job.source_language.as_str(), job.target_language.as_str()]
            .into_iter()
            .filter(|language| !self.config.is_supported(language))
            .collect();
        if !unsupported.is_empty() {
            for language in unsupported {
                warn!("{} is not a supported language, skipping '{}'", language, job.source_title);
            }
            return Ok(JobStatus::Unsupported);
        }

        let outcome = self.orchestrator
            .translate_page(
                &job.source_title,
                &job.source_language,
                &job.target_language,
                job.target_title.as_deref(),
            )
            .await?;

        let (source, page) = match outcome {
            TranslationOutcome::Translated { source, page } => (source, page),
            TranslationOutcome::AlreadyTranslated(link) => {
                info!("Skipping '{}': already translated as {}", job.source_title, link);
                return Ok(JobStatus::AlreadyTranslated);
            }
        };

        if let Some(destination) = &options.destination {
            let path = FileManager::persist_page(&page, destination)?;
            info!("Success: {}", path.display());
        }

        if options.save {
            let summary = self.orchestrator.generate_summary(&source.title, &source.language, &page.language);
            self.orchestrator.publish(&source, &page, &summary).await?;
        }

        Ok(JobStatus::Translated)
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
