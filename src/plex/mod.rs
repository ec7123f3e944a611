//! Plex Media Server API: the typed client, the `MediaServer` seam the
//! poster pipeline is written against, and library enumeration.

pub mod client;
mod container;
pub mod error;
pub mod fingerprint;
pub mod library;
pub mod session;
pub mod types;

pub use client::PlexClient;
pub use error::PlexError;
pub use session::MediaServer;
pub use types::{LibraryItem, PosterCandidate};
