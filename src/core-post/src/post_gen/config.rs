//! Configuration options for release post generation.

use std::time::Duration;

/// Default documentation root to scrape.
pub const DEFAULT_BASE_URL: &str = "https://scikit-learn.org/stable";

/// Fixed per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration options for a scrape run.
///
/// The heuristic thresholds themselves (comma density, lookback windows,
/// highlight caps) are deliberately not configurable: they are kept as
/// module constants next to the code that uses them, tuned against the
/// documentation site's markup.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Root URL of the documentation site
    pub base_url: String,
    /// Timeout applied to each page fetch (default: 30 seconds)
    pub timeout: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ScrapeOptions {
    /// Creates a new builder for ScrapeOptions.
    pub fn builder() -> ScrapeOptionsBuilder {
        ScrapeOptionsBuilder::default()
    }
}

/// Builder for ScrapeOptions.
#[derive(Debug, Clone, Default)]
pub struct ScrapeOptionsBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ScrapeOptionsBuilder {
    /// Sets the documentation root URL.
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the ScrapeOptions.
    pub fn build(self) -> ScrapeOptions {
        ScrapeOptions {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        }
    }
}
