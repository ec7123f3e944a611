use tracing::{debug, info, warn};

use crate::plex::PosterCandidate;
use crate::types::FailurePolicy;

use super::error::PosterError;
use super::fetch::ImageFetcher;
use super::filter::{filter_candidates, ProviderSet};
use super::probe::{probe, Dimensions, Thresholds};

/// Outcome of looking for a replacement poster.
///
/// A task starts `Unresolved` and makes exactly one transition; every other
/// state is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Unresolved,
    /// The provider filter left nothing to try.
    NoEligible { before_filtering: usize },
    /// Every eligible candidate was tried and none was large enough.
    Exhausted { tried: usize },
    Resolved(String),
}

/// An item whose poster is missing, unselected, or undersized.
#[derive(Debug)]
pub struct UpgradeTask {
    pub item_key: String,
    pub title: String,
    pub candidates: Vec<PosterCandidate>,
    resolution: Resolution,
    /// Candidate failures skipped under `FailurePolicy::Isolate`.
    pub(crate) skipped: Vec<PosterError>,
}

impl UpgradeTask {
    pub fn new(item_key: &str, title: &str, candidates: Vec<PosterCandidate>) -> Self {
        Self {
            item_key: item_key.to_string(),
            title: title.to_string(),
            candidates,
            resolution: Resolution::Unresolved,
            skipped: Vec::new(),
        }
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// The chosen replacement reference, if any.
    pub fn resolved_replacement(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Resolved(reference) => Some(reference),
            _ => None,
        }
    }

    fn settle(&mut self, next: Resolution) {
        if self.resolution == Resolution::Unresolved {
            self.resolution = next;
        } else {
            debug!(item = %self.item_key, "Resolution already settled, ignoring {:?}", next);
        }
    }
}

/// Settings the resolver needs from the run configuration.
#[derive(Debug, Clone)]
pub struct ResolveConfig<'a> {
    pub providers: &'a ProviderSet,
    pub thresholds: Thresholds,
    pub failure_policy: FailurePolicy,
}

/// Find the first eligible candidate, in server order, that clears the
/// thresholds. Later (possibly larger) candidates are never fetched once one
/// passes. Calling this on a settled task does nothing.
pub async fn resolve(
    task: &mut UpgradeTask,
    fetcher: &ImageFetcher<'_>,
    config: &ResolveConfig<'_>,
) -> Result<(), PosterError> {
    if task.resolution != Resolution::Unresolved {
        return Ok(());
    }

    info!(title = %task.title, "Looking for a better poster");

    let eligible = filter_candidates(&task.candidates, config.providers);
    if eligible.is_empty() {
        info!(
            title = %task.title,
            "No other posters found ({} before filtering)",
            task.candidates.len()
        );
        task.settle(Resolution::NoEligible {
            before_filtering: task.candidates.len(),
        });
        return Ok(());
    }

    let mut tried = 0;
    for candidate in &eligible {
        tried += 1;
        let dims = match probe_candidate(fetcher, &candidate.reference).await {
            Ok(dims) => dims,
            Err(e) if config.failure_policy == FailurePolicy::Isolate && e.is_isolatable() => {
                warn!(title = %task.title, "Skipping candidate: {}", e);
                task.skipped.push(e);
                continue;
            }
            Err(e) => return Err(e),
        };

        if config.thresholds.passes(dims) {
            info!(title = %task.title, "Found {} {}", candidate.reference, dims);
            task.settle(Resolution::Resolved(candidate.reference.clone()));
            return Ok(());
        }
        info!(title = %task.title, "Skip {} {}", candidate.reference, dims);
    }

    task.settle(Resolution::Exhausted { tried });
    Ok(())
}

/// Fetch a reference and read its dimensions.
pub(crate) async fn probe_candidate(
    fetcher: &ImageFetcher<'_>,
    reference: &str,
) -> Result<Dimensions, PosterError> {
    let bytes = fetcher.fetch(reference).await?;
    probe(&bytes, reference)
}
