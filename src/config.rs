use std::time::Duration;

use url::Url;

use crate::poster::{ProviderSet, Thresholds};
use crate::types::FailurePolicy;

/// Application configuration, normalized from the command line.
///
/// Heap types first, then the small copyable fields, booleans grouped last.
pub struct Config {
    pub base_url: Url,
    pub token: Option<String>,
    pub sections: Vec<String>,
    pub title_filter: Option<String>,
    pub providers: ProviderSet,

    pub timeout: Duration,
    pub max: Option<usize>,
    pub thresholds: Thresholds,

    pub failure_policy: FailurePolicy,

    pub dry_run: bool,
    pub no_progress_bar: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("sections", &self.sections)
            .field("title_filter", &self.title_filter)
            .field("providers", &self.providers)
            .field("thresholds", &self.thresholds)
            .field("max", &self.max)
            .field("dry_run", &self.dry_run)
            .field("failure_policy", &self.failure_policy)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_cli(cli: crate::cli::Cli) -> anyhow::Result<Self> {
        let base_url = server_base_url(&cli.host, cli.port, cli.https)?;

        if cli.providers.iter().all(|p| p.trim().is_empty()) {
            anyhow::bail!("At least one --provider is required");
        }

        let title_filter = cli
            .filter
            .map(|f| f.trim_start_matches('?').to_string())
            .filter(|f| !f.is_empty());

        Ok(Self {
            base_url,
            token: cli.token.filter(|t| !t.is_empty()),
            sections: cli
                .sections
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            title_filter,
            providers: ProviderSet::new(cli.providers),
            timeout: Duration::from_secs(cli.timeout_secs),
            max: cli.max,
            thresholds: Thresholds {
                min_width: cli.min_width,
                min_height: cli.min_height,
            },
            failure_policy: cli.on_error,
            dry_run: cli.pretend,
            no_progress_bar: cli.no_progress_bar,
        })
    }
}

/// Build the server base URL from `--host`, `--port` and `--https`.
///
/// A host that already carries a scheme is taken as-is; otherwise the scheme
/// comes from `--https` and the port is appended unless the host has one.
pub(crate) fn server_base_url(host: &str, port: u16, https: bool) -> anyhow::Result<Url> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        anyhow::bail!("--host must not be empty");
    }

    if host.contains("://") {
        return Url::parse(host)
            .map_err(|e| anyhow::anyhow!("Invalid --host URL '{}': {}", host, e));
    }

    let scheme = if https { "https" } else { "http" };
    let has_port = host
        .rsplit_once(':')
        .is_some_and(|(_, p)| p.parse::<u16>().is_ok());
    let raw = if has_port {
        format!("{scheme}://{host}")
    } else {
        format!("{scheme}://{host}:{port}")
    };
    Url::parse(&raw).map_err(|e| anyhow::anyhow!("Invalid --host '{}': {}", host, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn make_cli(args: &[&str]) -> crate::cli::Cli {
        let mut full = vec!["plex-poster-upgrader", "--host", "plex.lan"];
        full.extend_from_slice(args);
        crate::cli::Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_base_url_bare_host() {
        let url = server_base_url("plex.lan", 32400, false).unwrap();
        assert_eq!(url.as_str(), "http://plex.lan:32400/");
    }

    #[test]
    fn test_base_url_host_with_port() {
        let url = server_base_url("10.0.0.5:8080", 32400, true).unwrap();
        assert_eq!(url.as_str(), "https://10.0.0.5:8080/");
    }

    #[test]
    fn test_base_url_full_url_kept() {
        let url = server_base_url("https://plex.example.com/", 32400, false).unwrap();
        assert_eq!(url.as_str(), "https://plex.example.com/");
    }

    #[test]
    fn test_base_url_empty() {
        assert!(server_base_url("  ", 32400, false).is_err());
    }

    #[test]
    fn test_scalar_and_list_providers_normalize_alike() {
        let scalar = Config::from_cli(make_cli(&["--provider", "tmdb"])).unwrap();
        let list = Config::from_cli(make_cli(&["--provider", "tmdb,tmdb"])).unwrap();
        assert_eq!(scalar.providers, list.providers);
        assert!(scalar.providers.contains("tmdb"));
        assert_eq!(scalar.providers.to_string(), "tmdb");
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_cli(make_cli(&[])).unwrap();
        assert_eq!(cfg.thresholds.min_width, 800);
        assert_eq!(cfg.thresholds.min_height, 1000);
        assert!(cfg.providers.contains("com.plexapp.agents.themoviedb"));
        assert_eq!(cfg.max, None);
        assert!(!cfg.dry_run);
        assert_eq!(cfg.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_title_filter_leading_question_mark_stripped() {
        let cfg = Config::from_cli(make_cli(&["--filter", "?title=Alien"])).unwrap();
        assert_eq!(cfg.title_filter.as_deref(), Some("title=Alien"));
    }

    #[test]
    fn test_pretend_maps_to_dry_run() {
        let cfg = Config::from_cli(make_cli(&["--pretend"])).unwrap();
        assert!(cfg.dry_run);
    }

    #[test]
    fn test_debug_redacts_token() {
        let cfg = Config::from_cli(make_cli(&["--token", "s3cret"])).unwrap();
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_blank_providers_rejected() {
        assert!(Config::from_cli(make_cli(&["--provider", " "])).is_err());
    }
}
