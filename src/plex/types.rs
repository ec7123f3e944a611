use super::container::{Directory, MetadataEntry};

/// Server name and version reported by `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    pub version: String,
    pub friendly_name: Option<String>,
}

/// A top-level library collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub key: String,
    pub title: String,
    pub kind: String,
}

impl From<Directory> for Section {
    fn from(d: Directory) -> Self {
        Self {
            key: d.key,
            title: d.title,
            kind: d.kind,
        }
    }
}

/// A title in a section: a movie, show, etc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryItem {
    pub key: String,
    pub title: String,
}

impl From<MetadataEntry> for LibraryItem {
    fn from(m: MetadataEntry) -> Self {
        // Shows list as `/library/metadata/N/children`; artwork hangs off the
        // item itself.
        let key = m
            .key
            .strip_suffix("/children")
            .map(str::to_string)
            .unwrap_or(m.key);
        Self {
            key,
            title: m.title,
        }
    }
}

/// One entry of `{item}/posters`.
///
/// `reference` is either an internal resource key (`/library/metadata/...`)
/// or an absolute URL pointing at the artwork's origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterCandidate {
    pub item_key: String,
    pub provider: Option<String>,
    pub reference: String,
    pub selected: bool,
}

impl PosterCandidate {
    pub fn from_entry(item_key: &str, m: MetadataEntry) -> Self {
        Self {
            item_key: item_key.to_string(),
            provider: m.provider,
            reference: m.key,
            selected: m.selected,
        }
    }
}
