//! In-memory stand-ins for the Plex server and the external HTTP client.

use std::collections::HashMap;
use std::io::Cursor;
use std::net::TcpListener;
use std::sync::Mutex;

use image::{GrayImage, ImageFormat};
use url::Url;

use crate::plex::types::{Section, ServerIdentity};
use crate::plex::{LibraryItem, MediaServer, PlexError, PosterCandidate};
use crate::poster::fetch::HttpGet;
use crate::poster::PosterError;

/// Encode a blank grayscale image of the given size.
fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    GrayImage::new(width, height)
        .write_to(&mut buf, format)
        .expect("encode test image");
    buf.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Jpeg)
}

/// What a fake answers for an image reference.
#[derive(Debug, Clone, Copy)]
pub enum FakeImage {
    Png(u32, u32),
    Jpeg(u32, u32),
    /// Bytes that are not an image.
    Garbage,
    /// An HTTP error status instead of a body.
    Status(u16),
}

impl FakeImage {
    fn body(self) -> Result<Vec<u8>, u16> {
        match self {
            FakeImage::Png(w, h) => Ok(png_bytes(w, h)),
            FakeImage::Jpeg(w, h) => Ok(jpeg_bytes(w, h)),
            FakeImage::Garbage => Ok(b"<html>not a poster</html>".to_vec()),
            FakeImage::Status(code) => Err(code),
        }
    }
}

/// A listener that completes the TCP handshake but never answers. Keep the
/// listener alive for as long as the URL is used.
pub fn silent_listener() -> (TcpListener, Url) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    let url = Url::parse(&format!("http://{addr}")).expect("listener url");
    (listener, url)
}

/// A candidate attached to `/library/metadata/1`.
pub fn candidate(provider: &str, reference: &str, selected: bool) -> PosterCandidate {
    candidate_for("/library/metadata/1", provider, reference, selected)
}

pub fn candidate_for(
    item_key: &str,
    provider: &str,
    reference: &str,
    selected: bool,
) -> PosterCandidate {
    PosterCandidate {
        item_key: item_key.to_string(),
        provider: Some(provider.to_string()),
        reference: reference.to_string(),
        selected,
    }
}

/// Requests seen by `FakeServer`. Identity and section listing are not
/// recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListTitles(String, Option<String>),
    ListPosters(String),
    Fetch(String),
    SetPoster(String, String),
    Refresh(String),
}

#[derive(Debug, Default)]
pub struct FakeServer {
    pub sections: Vec<Section>,
    /// Section key -> titles.
    pub titles: HashMap<String, Vec<LibraryItem>>,
    /// Item key -> candidates. Unknown keys answer 404.
    pub posters: HashMap<String, Vec<PosterCandidate>>,
    /// Internal resource key -> image. Unknown keys answer 404.
    pub images: HashMap<String, FakeImage>,
    /// Answer 403 to poster writes and refreshes.
    pub reject_writes: bool,
    /// Answer 403 to refreshes only.
    pub reject_refresh: bool,
    /// Fail every request as if the server were down.
    pub unreachable: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeServer {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn reachable(&self) -> Result<(), PlexError> {
        if self.unreachable {
            return Err(PlexError::Connection {
                url: "http://fake.invalid:32400".into(),
                reason: "connection refused".into(),
            });
        }
        Ok(())
    }

    fn write(&self, path: String, rejected: bool) -> Result<(), PlexError> {
        if rejected {
            return Err(PlexError::HttpStatus { status: 403, path });
        }
        Ok(())
    }
}

fn not_found(path: &str) -> PlexError {
    PlexError::HttpStatus {
        status: 404,
        path: path.to_string(),
    }
}

#[async_trait::async_trait]
impl MediaServer for FakeServer {
    async fn identity(&self) -> Result<ServerIdentity, PlexError> {
        self.reachable()?;
        Ok(ServerIdentity {
            version: "1.40.0".into(),
            friendly_name: Some("fake".into()),
        })
    }

    async fn list_sections(&self) -> Result<Vec<Section>, PlexError> {
        self.reachable()?;
        Ok(self.sections.clone())
    }

    async fn list_titles(
        &self,
        section_key: &str,
        filter: Option<&str>,
    ) -> Result<Vec<LibraryItem>, PlexError> {
        self.record(Call::ListTitles(
            section_key.to_string(),
            filter.map(str::to_string),
        ));
        self.reachable()?;
        Ok(self.titles.get(section_key).cloned().unwrap_or_default())
    }

    async fn list_poster_candidates(
        &self,
        item_key: &str,
    ) -> Result<Vec<PosterCandidate>, PlexError> {
        self.record(Call::ListPosters(item_key.to_string()));
        self.reachable()?;
        self.posters
            .get(item_key)
            .cloned()
            .ok_or_else(|| not_found(&format!("{item_key}/posters")))
    }

    async fn fetch_binary(&self, resource_key: &str) -> Result<Vec<u8>, PlexError> {
        self.record(Call::Fetch(resource_key.to_string()));
        self.reachable()?;
        let image = self
            .images
            .get(resource_key)
            .ok_or_else(|| not_found(resource_key))?;
        image.body().map_err(|status| PlexError::HttpStatus {
            status,
            path: resource_key.to_string(),
        })
    }

    async fn set_poster(&self, item_key: &str, reference: &str) -> Result<(), PlexError> {
        self.record(Call::SetPoster(item_key.to_string(), reference.to_string()));
        self.reachable()?;
        self.write(format!("{item_key}/poster"), self.reject_writes)
    }

    async fn refresh_metadata(&self, item_key: &str) -> Result<(), PlexError> {
        self.record(Call::Refresh(item_key.to_string()));
        self.reachable()?;
        self.write(
            format!("{item_key}/refresh"),
            self.reject_writes || self.reject_refresh,
        )
    }
}

#[derive(Debug, Default)]
pub struct FakeHttp {
    /// URL -> image. Unknown URLs answer 404.
    pub images: HashMap<String, FakeImage>,
    requested: Mutex<Vec<String>>,
}

impl FakeHttp {
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpGet for FakeHttp {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, PosterError> {
        self.requested.lock().unwrap().push(url.to_string());
        let status = match self.images.get(url) {
            Some(image) => match image.body() {
                Ok(bytes) => return Ok(bytes),
                Err(status) => status,
            },
            None => 404,
        };
        Err(PosterError::Fetch {
            reference: url.to_string(),
            reason: format!("HTTP {status}"),
        })
    }
}
