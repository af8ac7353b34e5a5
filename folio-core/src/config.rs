//! # Configuration
//!
//! A minimal configuration system based on a string key/value store.
//! Applications layer it however they like: defaults first, then
//! environment overrides via [`load_env_config`].
//!
//! ```rust
//! use folio_core::FolioConfig;
//! let mut config = FolioConfig::new();
//!
//! config.set("http.port", "3001");
//! config.set("media.probe_timeout_ms", "2000");
//!
//! let snapshot = config.snapshot();
//! assert_eq!(snapshot.get_u64("media.probe_timeout_ms"), Some(2000));
//! ```
//!
//! Environment keys are matched by prefix and normalized, so
//! `FOLIO__HTTP__PORT=8080` becomes `http.port = 8080`.

use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct FolioConfig {
    values: HashMap<String, String>,
}

impl FolioConfig {
    /// Create an empty config store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a configuration key to a string value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Set a key only when it is not already present.
    pub fn set_default<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn snapshot(&self) -> FolioConfigSnapshot {
        FolioConfigSnapshot::new(self.values.clone())
    }
}

/// Immutable view of the configuration handed to services and handlers.
#[derive(Debug, Clone, Default)]
pub struct FolioConfigSnapshot {
    map: HashMap<String, String>,
}

impl FolioConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    /// Present and not blank.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.trim().parse::<usize>().ok())
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.trim().parse::<u64>().ok())
    }
}

/// Copy `PREFIX` environment variables into the config.
///
/// `FOLIO__MEDIA__ROOT` → `media.root`; a single underscore stays as-is,
/// so `FOLIO__MEDIA__PROBE_TIMEOUT_MS` → `media.probe_timeout_ms`.
pub fn load_env_config(config: &mut FolioConfig, prefix: &str) {
    apply_env_pairs(config, prefix, std::env::vars());
}

fn apply_env_pairs<I>(config: &mut FolioConfig, prefix: &str, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        if let Some(stripped) = key.strip_prefix(prefix) {
            let normalized = stripped.to_lowercase().replace("__", ".");
            if normalized.is_empty() {
                continue;
            }
            tracing::debug!(key = %normalized, "config override from environment");
            config.set(normalized, value);
        }
    }
}
