use crate::plex::PosterCandidate;

/// Substring marking the server's own generated/default artwork. Such a
/// candidate is never a replacement, whatever its provider.
pub const DEFAULT_ARTWORK_MARKER: &str = "metadata";

/// Allow-list of poster providers. Input order is kept and duplicates or
/// blank entries are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProviderSet(Vec<String>);

impl ProviderSet {
    pub fn new<I, S>(providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: Vec<String> = Vec::new();
        for p in providers {
            let p = p.into().trim().to_string();
            if !p.is_empty() && !set.contains(&p) {
                set.push(p);
            }
        }
        Self(set)
    }

    pub fn contains(&self, provider: &str) -> bool {
        self.0.iter().any(|p| p == provider)
    }

}

impl std::fmt::Display for ProviderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Candidates from an allowed provider that are not the server's default
/// artwork, in input order.
pub fn filter_candidates(
    candidates: &[PosterCandidate],
    providers: &ProviderSet,
) -> Vec<PosterCandidate> {
    candidates
        .iter()
        .filter(|c| {
            c.provider.as_deref().is_some_and(|p| providers.contains(p))
                && !c.reference.contains(DEFAULT_ARTWORK_MARKER)
        })
        .cloned()
        .collect()
}
