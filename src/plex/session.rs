use super::error::PlexError;
use super::types::{LibraryItem, PosterCandidate, Section, ServerIdentity};

/// The slice of the Plex HTTP API the poster pipeline depends on.
/// The concrete implementation lives in `crate::plex::client`.
///
/// Every method is a single request/response; callers await each one
/// before issuing the next.
#[async_trait::async_trait]
pub trait MediaServer: Send + Sync {
    /// `GET /`
    async fn identity(&self) -> Result<ServerIdentity, PlexError>;

    /// `GET /library/sections`
    async fn list_sections(&self) -> Result<Vec<Section>, PlexError>;

    /// `GET /library/sections/{key}/all[?filter]`. The filter is a raw query
    /// string appended verbatim.
    async fn list_titles(
        &self,
        section_key: &str,
        filter: Option<&str>,
    ) -> Result<Vec<LibraryItem>, PlexError>;

    /// `GET {item_key}/posters`, including the `selected` flag per entry.
    async fn list_poster_candidates(
        &self,
        item_key: &str,
    ) -> Result<Vec<PosterCandidate>, PlexError>;

    /// Raw bytes of an internal resource (image transcode, uploaded file...).
    async fn fetch_binary(&self, resource_key: &str) -> Result<Vec<u8>, PlexError>;

    /// `PUT {item_key}/poster?url=...` with the client fingerprint.
    async fn set_poster(&self, item_key: &str, reference: &str) -> Result<(), PlexError>;

    /// `PUT {item_key}/refresh`
    async fn refresh_metadata(&self, item_key: &str) -> Result<(), PlexError>;
}
