use tracing::{info, warn};

use crate::plex::{LibraryItem, MediaServer};

use super::error::PosterError;
use super::fetch::ImageFetcher;
use super::probe::Thresholds;
use super::resolve::{probe_candidate, UpgradeTask};

/// Decide whether an item's current poster needs replacing.
///
/// Returns a task when the item has no posters, no selected poster, or a
/// selected poster below `thresholds`; `None` when the current one is fine.
pub async fn inspect_item(
    server: &dyn MediaServer,
    fetcher: &ImageFetcher<'_>,
    item: &LibraryItem,
    thresholds: &Thresholds,
) -> Result<Option<UpgradeTask>, PosterError> {
    let candidates = server
        .list_poster_candidates(&item.key)
        .await
        .map_err(|e| PosterError::listing(&item.key, e))?;

    if candidates.is_empty() {
        warn!(title = %item.title, "No posters");
        return Ok(Some(UpgradeTask::new(&item.key, &item.title, candidates)));
    }

    let Some(selected) = candidates.iter().find(|c| c.selected) else {
        warn!(title = %item.title, "No selected poster");
        return Ok(Some(UpgradeTask::new(&item.key, &item.title, candidates)));
    };

    info!(
        title = %item.title,
        provider = selected.provider.as_deref().unwrap_or("-"),
        "Selected poster {}",
        selected.reference
    );

    let dims = probe_candidate(fetcher, &selected.reference).await?;
    if thresholds.passes(dims) {
        info!(title = %item.title, "Poster ok {}", dims);
        return Ok(None);
    }

    warn!(title = %item.title, "Needs updating: {}", dims);
    Ok(Some(UpgradeTask::new(&item.key, &item.title, candidates)))
}
