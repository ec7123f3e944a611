use thiserror::Error;

use crate::plex::PlexError;

/// Failures of the poster pipeline.
///
/// `is_isolatable()` separates failures confined to one item or candidate
/// from the ones that make the rest of the run pointless (the server is
/// gone), so `--on-error isolate` knows what it may skip past.
#[derive(Debug, Error)]
pub enum PosterError {
    #[error("Cannot reach Plex server: {0}")]
    Connection(String),

    #[error("Failed to fetch {reference}: {reason}")]
    Fetch { reference: String, reason: String },

    #[error("Failed to decode image {reference}: {source}")]
    Decode {
        reference: String,
        source: image::ImageError,
    },

    #[error("Server rejected write for {item_key}: {reason}")]
    Write { item_key: String, reason: String },

    #[error("Failed to list posters for {item_key}: {reason}")]
    Listing { item_key: String, reason: String },
}

impl PosterError {
    pub fn is_isolatable(&self) -> bool {
        !matches!(self, PosterError::Connection(_))
    }

    /// A server error while fetching an image resource.
    pub(crate) fn fetch(reference: &str, err: PlexError) -> Self {
        if err.is_connection() {
            return PosterError::Connection(err.to_string());
        }
        PosterError::Fetch {
            reference: reference.to_string(),
            reason: err.to_string(),
        }
    }

    /// A server error while writing a poster or refreshing metadata.
    pub(crate) fn write(item_key: &str, err: PlexError) -> Self {
        if err.is_connection() {
            return PosterError::Connection(err.to_string());
        }
        PosterError::Write {
            item_key: item_key.to_string(),
            reason: err.to_string(),
        }
    }

    /// A server error while listing an item's poster candidates.
    pub(crate) fn listing(item_key: &str, err: PlexError) -> Self {
        if err.is_connection() {
            return PosterError::Connection(err.to_string());
        }
        PosterError::Listing {
            item_key: item_key.to_string(),
            reason: err.to_string(),
        }
    }
}
