//! Server-required client fingerprint for poster writes.
//!
//! Plex only accepts `PUT {item}/poster?url=...` when the request identifies
//! itself as one of its own web clients. These values are opaque constants
//! and must go out verbatim; they are not user configuration.

pub const PRODUCT: &str = "Plex Web";
pub const VERSION: &str = "4.8.3";
pub const PLATFORM: &str = "Chrome";
pub const CLIENT_IDENTIFIER: &str = "f8fuynsk07tfit52fht555k1";
pub const PLATFORM_VERSION: &str = "77.0";
pub const SYNC_VERSION: &str = "2";
pub const FEATURES: &str = "external-media";
pub const MODEL: &str = "hosted";
pub const DEVICE: &str = "Windows";
pub const DEVICE_NAME: &str = "Chrome";
pub const DEVICE_SCREEN_RESOLUTION: &str = "1920x1097,1920x1200";
pub const LANGUAGE: &str = "en";

/// Query parameters in the order the server's own client sends them.
pub const PARAMS: &[(&str, &str)] = &[
    ("X-Plex-Product", PRODUCT),
    ("X-Plex-Version", VERSION),
    ("X-Plex-Platform", PLATFORM),
    ("X-Plex-Client-Identifier", CLIENT_IDENTIFIER),
    ("X-Plex-Platform-Version", PLATFORM_VERSION),
    ("X-Plex-Sync-Version", SYNC_VERSION),
    ("X-Plex-Features", FEATURES),
    ("X-Plex-Model", MODEL),
    ("X-Plex-Device", DEVICE),
    ("X-Plex-Device-Name", DEVICE_NAME),
    ("X-Plex-Device-Screen-Resolution", DEVICE_SCREEN_RESOLUTION),
    ("X-Plex-Language", LANGUAGE),
];

/// Render [`PARAMS`] as a URL query string (no leading `?` or `&`).
pub fn query_string() -> String {
    PARAMS
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Path for the poster write: `{item_key}/poster?url=<encoded>&<fingerprint>`.
pub fn set_poster_path(item_key: &str, reference: &str) -> String {
    format!(
        "{}/poster?url={}&{}",
        item_key,
        urlencoding::encode(reference),
        query_string()
    )
}
