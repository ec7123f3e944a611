#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// What to do when a single item or candidate fails mid-run.
///
/// `Abort` keeps the historical behavior: the first error ends the run.
/// `Isolate` logs the failure, skips the candidate (or item) and keeps going,
/// reporting every failure in the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FailurePolicy {
    #[default]
    Abort,
    Isolate,
}
