use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlexError {
    #[error("Cannot reach Plex server at {url}: {reason}")]
    Connection { url: String, reason: String },

    #[error("HTTP error {status} for {path}")]
    HttpStatus { status: u16, path: String },

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PlexError {
    /// Whether the server itself could not be reached (as opposed to a
    /// request the server answered with an error).
    pub fn is_connection(&self) -> bool {
        matches!(self, PlexError::Connection { .. })
    }
}
