//! Client configuration

use std::time::Duration;

/// Default host address (the host runs its own Wi-Fi access point)
pub const DEFAULT_HOST_URL: &str = "http://192.168.4.1";

/// Log directory; the terminal is taken by the dashboard
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Dashboard client configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DINE_HOST_URL | http://192.168.4.1 | Host base URL |
/// | POLL_INTERVAL_MS | 2000 | Table list poll interval |
/// | REQUEST_TIMEOUT_MS | 5000 | Per-request timeout |
/// | LOG_LEVEL | info | Log level |
/// | LOG_DIR | logs | Daily-rolling log file directory |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host base URL (e.g., "http://192.168.4.1")
    pub base_url: String,

    /// Interval between table list polls
    pub poll_interval: Duration,

    /// Request timeout
    pub request_timeout: Duration,

    /// Log level (trace | debug | info | warn | error)
    pub log_level: String,

    /// Directory for daily-rolling log files
    pub log_dir: String,
}

impl ClientConfig {
    /// Create a configuration for the given host with default timings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            poll_interval: Duration::from_millis(2000),
            request_timeout: Duration::from_millis(5000),
            log_level: "info".into(),
            log_dir: DEFAULT_LOG_DIR.into(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset, unparsable or zero values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let millis = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
        };
        let defaults = Self::new(lookup("DINE_HOST_URL").unwrap_or_else(|| DEFAULT_HOST_URL.into()));
        Self {
            poll_interval: millis("POLL_INTERVAL_MS").unwrap_or(defaults.poll_interval),
            request_timeout: millis("REQUEST_TIMEOUT_MS").unwrap_or(defaults.request_timeout),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: lookup("LOG_DIR")
                .filter(|d| !d.is_empty())
                .unwrap_or(defaults.log_dir),
            base_url: defaults.base_url,
        }
    }

    /// Set the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Write logs to daily-rolling files in `dir`
    pub fn with_log_dir(mut self, dir: impl Into<String>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_URL)
    }
}
