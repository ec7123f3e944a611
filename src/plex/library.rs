use tracing::{info, warn};

use super::error::PlexError;
use super::session::MediaServer;
use super::types::{LibraryItem, Section, ServerIdentity};

/// Check the server answers and report its version.
pub async fn connect(server: &dyn MediaServer) -> Result<ServerIdentity, PlexError> {
    let identity = server.identity().await?;
    info!(
        version = %identity.version,
        name = identity.friendly_name.as_deref().unwrap_or("-"),
        "Connected to Plex server"
    );
    Ok(identity)
}

/// Keep the sections whose title is one of `wanted`; an empty `wanted`
/// keeps every section.
pub fn select_sections(sections: Vec<Section>, wanted: &[String]) -> Vec<Section> {
    if wanted.is_empty() {
        return sections;
    }
    sections
        .into_iter()
        .filter(|s| wanted.iter().any(|w| w == &s.title))
        .collect()
}

/// Enumerate the titles of every selected section, in section order, capped
/// at `max` when set.
pub async fn collect_titles(
    server: &dyn MediaServer,
    wanted_sections: &[String],
    title_filter: Option<&str>,
    max: Option<usize>,
) -> Result<Vec<LibraryItem>, PlexError> {
    let all_sections = server.list_sections().await?;
    info!("Found {} sections", all_sections.len());

    let sections = select_sections(all_sections, wanted_sections);
    info!(
        "Filtered to {} sections: {}",
        sections.len(),
        sections
            .iter()
            .map(|s| s.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut titles = Vec::new();
    for section in &sections {
        let found = server.list_titles(&section.key, title_filter).await?;
        if found.is_empty() {
            warn!(section = %section.title, "No matches");
        }
        info!(section = %section.title, "{} titles", found.len());
        titles.extend(found);
    }
    info!("Found {} total titles", titles.len());

    Ok(apply_max(titles, max))
}

/// Keep the first `max` items in listing order.
pub fn apply_max(mut items: Vec<LibraryItem>, max: Option<usize>) -> Vec<LibraryItem> {
    if let Some(max) = max {
        items.truncate(max);
    }
    items
}
