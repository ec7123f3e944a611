use tracing::{info, warn};

use crate::plex::MediaServer;

use super::error::PosterError;
use super::resolve::{Resolution, UpgradeTask};

/// What the committer did with a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Dry run: nothing was sent.
    Pretend,
    /// Poster written, then metadata refreshed.
    Updated,
    /// No eligible alternates; metadata refreshed only.
    Refreshed,
    /// No replacement and nothing to refresh.
    Nothing,
}

/// Write the resolved poster back to the server and force a refresh.
///
/// The refresh always follows a poster write: without it the server can lose
/// the artwork association. A write whose refresh is rejected is reported as
/// a `Write` error, not as an update.
pub async fn commit(
    server: &dyn MediaServer,
    task: UpgradeTask,
    dry_run: bool,
) -> Result<CommitOutcome, PosterError> {
    info!(
        "{}: {}: {}",
        task.title,
        task.item_key,
        task.resolved_replacement().unwrap_or("-")
    );

    if dry_run {
        match task.resolved_replacement() {
            Some(reference) => info!(
                "[DRY RUN] Would set poster of {} to {}",
                task.title, reference
            ),
            None => info!("[DRY RUN] Nothing to update to for {}", task.title),
        }
        return Ok(CommitOutcome::Pretend);
    }

    match task.resolution() {
        Resolution::Resolved(reference) => {
            server
                .set_poster(&task.item_key, reference)
                .await
                .map_err(|e| PosterError::write(&task.item_key, e))?;
            info!(title = %task.title, "Poster updated");
            refresh(server, &task.item_key).await?;
            Ok(CommitOutcome::Updated)
        }
        Resolution::NoEligible { .. } => {
            warn!(title = %task.title, "Nothing to update to");
            refresh(server, &task.item_key).await?;
            Ok(CommitOutcome::Refreshed)
        }
        Resolution::Exhausted { .. } | Resolution::Unresolved => {
            warn!(title = %task.title, "Nothing to update to");
            Ok(CommitOutcome::Nothing)
        }
    }
}

async fn refresh(server: &dyn MediaServer, item_key: &str) -> Result<(), PosterError> {
    info!("Refreshing metadata: {}/refresh", item_key);
    server
        .refresh_metadata(item_key)
        .await
        .map_err(|e| PosterError::write(item_key, e))
}
