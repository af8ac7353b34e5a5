use std::time::Duration;

use folio_core::FolioConfigSnapshot;

pub const DEFAULT_PLACEHOLDER: &str = "/images/placeholder-project.jpg";
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2_000;

/// Settings shared by the resolver and the gallery assembler.
#[derive(Debug, Clone)]
pub struct MediaSettings {
    /// Prefix for root-relative references. Empty keeps URLs root-relative.
    pub origin: String,

    /// Shown when nothing else can be.
    pub placeholder_url: String,

    /// Upper bound for a single existence probe.
    pub probe_timeout: Duration,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            origin: String::new(),
            placeholder_url: DEFAULT_PLACEHOLDER.to_string(),
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
        }
    }
}

impl MediaSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `media.origin`, `media.placeholder` and `media.probe_timeout_ms`.
    pub fn from_config(config: &FolioConfigSnapshot) -> Self {
        let defaults = Self::default();
        Self {
            origin: config
                .get_string("media.origin")
                .unwrap_or(defaults.origin),
            placeholder_url: config
                .get_non_empty("media.placeholder")
                .map(str::to_string)
                .unwrap_or(defaults.placeholder_url),
            probe_timeout: config
                .get_u64("media.probe_timeout_ms")
                .map(Duration::from_millis)
                .unwrap_or(defaults.probe_timeout),
        }
    }

    pub fn with_origin<S: Into<String>>(mut self, origin: S) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_placeholder<S: Into<String>>(mut self, url: S) -> Self {
        self.placeholder_url = url.into();
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}
