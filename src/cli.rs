use clap::Parser;
use crate::types::*;

#[derive(Parser, Debug)]
#[command(
    name = "plex-poster-upgrader",
    version,
    about = "Replace undersized Plex posters with higher-resolution alternates"
)]
pub struct Cli {
    /// Plex host name, host:port, or full base URL
    #[arg(long)]
    pub host: String,

    /// Port used when --host does not carry one
    #[arg(long, default_value_t = 32400)]
    pub port: u16,

    /// Use https when --host does not carry a scheme
    #[arg(long)]
    pub https: bool,

    /// Plex token (if not provided, will prompt).
    /// WARNING: passing via --token is visible in process listings.
    /// Prefer the PLEX_TOKEN environment variable instead.
    #[arg(long, env = "PLEX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Section title(s) to audit (default: every section)
    #[arg(long = "section", value_delimiter = ',')]
    pub sections: Vec<String>,

    /// Raw query string appended to each section listing (e.g. "title=Alien")
    #[arg(long)]
    pub filter: Option<String>,

    /// Pretend: report what would change without writing to the server
    #[arg(long)]
    pub pretend: bool,

    /// Minimum acceptable poster height
    #[arg(long, default_value_t = 1000)]
    pub min_height: u32,

    /// Minimum acceptable poster width
    #[arg(long, default_value_t = 800)]
    pub min_width: u32,

    /// Poster provider(s) allowed as replacements
    #[arg(
        long = "provider",
        value_delimiter = ',',
        default_value = "com.plexapp.agents.themoviedb"
    )]
    pub providers: Vec<String>,

    /// Maximum number of titles to consider
    #[arg(long)]
    pub max: Option<usize>,

    /// Abort the whole run on the first failure, or isolate failures per item
    #[arg(long, value_enum, default_value = "abort")]
    pub on_error: FailurePolicy,

    /// HTTP timeout in seconds for server and external requests
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Disable progress bar
    #[arg(long)]
    pub no_progress_bar: bool,
}
