use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::container::{Envelope, MetadataContainer, RootContainer, SectionsContainer};
use super::error::PlexError;
use super::fingerprint;
use super::session::MediaServer;
use super::types::{LibraryItem, PosterCandidate, Section, ServerIdentity};

const TOKEN_HEADER: &str = "x-plex-token";

/// Authenticated Plex API client. One instance (and one connection pool)
/// serves every call of a run.
#[derive(Clone)]
pub struct PlexClient {
    base_url: String,
    client: Client,
}

impl std::fmt::Debug for PlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlexClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PlexClient {
    pub fn new(base_url: &Url, token: &str, timeout: Duration) -> Result<Self, PlexError> {
        let mut token_value = HeaderValue::from_str(token)
            .map_err(|_| PlexError::InvalidToken("contains invalid header characters".into()))?;
        token_value.set_sensitive(true);

        // Plex answers XML unless asked for JSON
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(TOKEN_HEADER, token_value);

        let client = Client::builder()
            .default_headers(default_headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Only a failed connect means the server is gone; a timeout or a broken
    /// body is a failure of that one request.
    fn transport_error(&self, e: reqwest::Error) -> PlexError {
        if e.is_connect() {
            PlexError::Connection {
                url: self.base_url.clone(),
                reason: e.to_string(),
            }
        } else {
            PlexError::Http(e)
        }
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response, PlexError> {
        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        if !response.status().is_success() {
            return Err(PlexError::HttpStatus {
                status: response.status().as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PlexError> {
        let response = self.send(self.client.get(self.url(path)), path).await?;
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        tracing::debug!(path, bytes = body.len(), "Plex response");
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        Ok(envelope.media_container)
    }

    async fn put(&self, path: &str) -> Result<(), PlexError> {
        let response = self.send(self.client.put(self.url(path)), path).await?;
        tracing::debug!(path, status = response.status().as_u16(), "Plex write accepted");
        Ok(())
    }
}

#[async_trait::async_trait]
impl MediaServer for PlexClient {
    async fn identity(&self) -> Result<ServerIdentity, PlexError> {
        let root: RootContainer = self.get_json("/").await?;
        Ok(ServerIdentity {
            version: root.version,
            friendly_name: root.friendly_name,
        })
    }

    async fn list_sections(&self) -> Result<Vec<Section>, PlexError> {
        let sections: SectionsContainer = self.get_json("/library/sections").await?;
        Ok(sections.directory.into_iter().map(Section::from).collect())
    }

    async fn list_titles(
        &self,
        section_key: &str,
        filter: Option<&str>,
    ) -> Result<Vec<LibraryItem>, PlexError> {
        let path = titles_path(section_key, filter);
        let titles: MetadataContainer = self.get_json(&path).await?;
        Ok(titles.metadata.into_iter().map(LibraryItem::from).collect())
    }

    async fn list_poster_candidates(
        &self,
        item_key: &str,
    ) -> Result<Vec<PosterCandidate>, PlexError> {
        let posters: MetadataContainer = self.get_json(&format!("{item_key}/posters")).await?;
        Ok(posters
            .metadata
            .into_iter()
            .map(|m| PosterCandidate::from_entry(item_key, m))
            .collect())
    }

    async fn fetch_binary(&self, resource_key: &str) -> Result<Vec<u8>, PlexError> {
        let response = self
            .send(self.client.get(self.url(resource_key)), resource_key)
            .await?;
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        Ok(body.to_vec())
    }

    async fn set_poster(&self, item_key: &str, reference: &str) -> Result<(), PlexError> {
        self.put(&fingerprint::set_poster_path(item_key, reference))
            .await
    }

    async fn refresh_metadata(&self, item_key: &str) -> Result<(), PlexError> {
        self.put(&format!("{item_key}/refresh")).await
    }
}

fn titles_path(section_key: &str, filter: Option<&str>) -> String {
    match filter {
        Some(f) if !f.is_empty() => format!("/library/sections/{section_key}/all?{f}"),
        _ => format!("/library/sections/{section_key}/all"),
    }
}
