use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime configuration resolved once at startup.
///
/// The backend address is injected here rather than compiled in so the
/// dashboard can be pointed at a mock server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Base URL of the analysis backend, e.g. `http://localhost:5000`.
    pub backend_url: String,
    /// Per-request timeout. Always non-zero so a stalled backend surfaces
    /// as an error instead of an endless loading state.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Rows per page for the funding and competitor tables.
    pub page_size: NonZeroUsize,
    pub log_level: String,
}
