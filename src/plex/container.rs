use serde::Deserialize;

/// Every Plex JSON response wraps its payload in `MediaContainer`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    pub media_container: T,
}

/// Response from `/`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootContainer {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
}

/// Response from `/library/sections`.
#[derive(Debug, Deserialize)]
pub struct SectionsContainer {
    #[serde(rename = "Directory", default)]
    pub directory: Vec<Directory>,
}

#[derive(Debug, Deserialize)]
pub struct Directory {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Response from `/library/sections/{key}/all` and `{item}/posters`.
/// Plex omits the `Metadata` array entirely when there are no entries.
#[derive(Debug, Deserialize)]
pub struct MetadataContainer {
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<MetadataEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub selected: bool,
}
