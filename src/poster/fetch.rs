use crate::plex::MediaServer;

use super::error::PosterError;

/// Direct HTTP(S) GET for artwork hosted outside the server.
#[async_trait::async_trait]
pub trait HttpGet: Send + Sync {
    /// Buffer the whole response body; the prober needs the complete image.
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, PosterError>;
}

// Plain `reqwest::Client`, no Plex token: the origin host must not see it.
#[async_trait::async_trait]
impl HttpGet for reqwest::Client {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, PosterError> {
        let fetch_err = |reason: String| PosterError::Fetch {
            reference: url.to_string(),
            reason,
        };

        let response = reqwest::Client::get(self, url)
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;
        if !response.status().is_success() {
            return Err(fetch_err(format!("HTTP {}", response.status().as_u16())));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;
        Ok(body.to_vec())
    }
}

/// Where a poster reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// Resource key served by the Plex server itself.
    Internal(&'a str),
    /// Absolute `http://` / `https://` URL at the artwork's origin.
    External(&'a str),
}

impl<'a> ImageSource<'a> {
    pub fn classify(reference: &'a str) -> Self {
        if reference.starts_with("http") {
            ImageSource::External(reference)
        } else {
            ImageSource::Internal(reference)
        }
    }
}

/// Fetches poster bytes through the server or straight from the origin,
/// depending on the shape of the reference.
pub struct ImageFetcher<'a> {
    server: &'a dyn MediaServer,
    http: &'a dyn HttpGet,
}

impl<'a> ImageFetcher<'a> {
    pub fn new(server: &'a dyn MediaServer, http: &'a dyn HttpGet) -> Self {
        Self { server, http }
    }

    pub async fn fetch(&self, reference: &str) -> Result<Vec<u8>, PosterError> {
        match ImageSource::classify(reference) {
            ImageSource::External(url) => {
                tracing::debug!(url, "Fetching external poster");
                self.http.get_bytes(url).await
            }
            ImageSource::Internal(key) => {
                tracing::debug!(key, "Fetching poster through server");
                self.server
                    .fetch_binary(key)
                    .await
                    .map_err(|e| PosterError::fetch(key, e))
            }
        }
    }
}
