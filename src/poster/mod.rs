//! Poster upgrade pipeline: inspect every item's selected poster, resolve a
//! larger replacement for the ones that fall short, then commit.
//!
//! Stages run strictly one after another and every network call is awaited
//! before the next one starts. Items keep listing order, candidates keep
//! server order.

pub mod commit;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod inspect;
pub mod probe;
pub mod resolve;

pub use commit::CommitOutcome;
pub use error::PosterError;
pub use fetch::ImageFetcher;
pub use filter::ProviderSet;
pub use probe::Thresholds;

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

use crate::plex::{LibraryItem, MediaServer};
use crate::types::FailurePolicy;

/// Subset of application config consumed by the pipeline.
/// Decoupled from CLI parsing so the pipeline can be tested independently.
#[derive(Debug)]
pub struct PosterConfig {
    pub(crate) providers: ProviderSet,
    pub(crate) thresholds: Thresholds,
    pub(crate) dry_run: bool,
    pub(crate) failure_policy: FailurePolicy,
    pub(crate) no_progress_bar: bool,
}

/// A failure skipped under `FailurePolicy::Isolate`.
#[derive(Debug)]
pub struct ItemFailure {
    pub item_key: String,
    pub title: String,
    pub error: PosterError,
}

/// Tally of one run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub inspected: usize,
    pub flagged: usize,
    pub resolved: usize,
    pub updated: usize,
    pub refreshed: usize,
    pub failures: Vec<ItemFailure>,
}

impl RunReport {
    /// Record `error` against an item when the policy allows skipping it,
    /// otherwise hand it back to abort the run.
    fn isolate(
        &mut self,
        policy: FailurePolicy,
        item_key: &str,
        title: &str,
        error: PosterError,
    ) -> Result<(), PosterError> {
        if policy == FailurePolicy::Abort || !error.is_isolatable() {
            return Err(error);
        }
        tracing::warn!(title, "Skipping item: {}", error);
        self.failures.push(ItemFailure {
            item_key: item_key.to_string(),
            title: title.to_string(),
            error,
        });
        Ok(())
    }
}

/// Create a progress bar with a consistent template.
///
/// Returns `ProgressBar::hidden()` when the user passed `--no-progress-bar` or
/// stdout is not a TTY (e.g. piped output, cron jobs).
fn create_progress_bar(no_progress_bar: bool, total: u64) -> ProgressBar {
    if no_progress_bar || !std::io::stdout().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .expect("valid template")
        .progress_chars("=> "),
    );
    pb
}

/// Run the whole pipeline over `items`.
///
/// Under `FailurePolicy::Abort` the first error ends the run and is
/// returned; commits already sent stay in place. Under `Isolate` failures
/// are collected in the report and the run carries on.
pub async fn upgrade_posters(
    server: &dyn MediaServer,
    fetcher: &ImageFetcher<'_>,
    items: &[LibraryItem],
    config: &PosterConfig,
) -> Result<RunReport, PosterError> {
    let mut report = RunReport::default();

    // Inspection
    tracing::info!("Finding posters for {} titles...", items.len());
    let pb = create_progress_bar(config.no_progress_bar, items.len() as u64);
    let mut tasks = Vec::new();
    for item in items {
        pb.set_message(item.title.clone());
        report.inspected += 1;
        match inspect::inspect_item(server, fetcher, item, &config.thresholds).await {
            Ok(Some(task)) => tasks.push(task),
            Ok(None) => {}
            Err(e) => {
                if let Err(e) = report.isolate(config.failure_policy, &item.key, &item.title, e) {
                    pb.abandon();
                    return Err(e);
                }
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    report.flagged = tasks.len();

    // Resolution
    tracing::info!("Finding better posters for {} titles...", tasks.len());
    let resolve_config = resolve::ResolveConfig {
        providers: &config.providers,
        thresholds: config.thresholds,
        failure_policy: config.failure_policy,
    };
    for task in &mut tasks {
        if let Err(e) = resolve::resolve(task, fetcher, &resolve_config).await {
            let (key, title) = (task.item_key.clone(), task.title.clone());
            report.isolate(config.failure_policy, &key, &title, e)?;
        }
        for error in task.skipped.drain(..) {
            report.failures.push(ItemFailure {
                item_key: task.item_key.clone(),
                title: task.title.clone(),
                error,
            });
        }
        if task.resolved_replacement().is_some() {
            report.resolved += 1;
        }
    }

    // Commit
    tracing::info!("Updating {} posters...", tasks.len());
    for task in tasks {
        let (key, title) = (task.item_key.clone(), task.title.clone());
        match commit::commit(server, task, config.dry_run).await {
            Ok(CommitOutcome::Updated) => {
                report.updated += 1;
                report.refreshed += 1;
            }
            Ok(CommitOutcome::Refreshed) => report.refreshed += 1,
            Ok(CommitOutcome::Pretend | CommitOutcome::Nothing) => {}
            Err(e) => report.isolate(config.failure_policy, &key, &title, e)?,
        }
    }

    Ok(report)
}
