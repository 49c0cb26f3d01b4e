//! Settings for opening the on-disk record store.
use crate::error::{LocError, LocResult};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_DB_PATH: &str = "LOCNET_DB_PATH";
pub const ENV_DB_TEMPORARY: &str = "LOCNET_DB_TEMPORARY";
pub const ENV_DB_CACHE_BYTES: &str = "LOCNET_DB_CACHE_BYTES";
pub const ENV_DB_FLUSH_MS: &str = "LOCNET_DB_FLUSH_MS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
    /// Delete the database when the store is dropped.
    pub temporary: bool,
    pub cache_capacity: u64,
    /// `None` disables the background flusher.
    pub flush_every_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("locnet.db"),
            temporary: false,
            cache_capacity: 64 * 1024 * 1024,
            flush_every_ms: Some(500),
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by any `LOCNET_DB_*` variables that are set.
    pub fn from_env() -> LocResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> LocResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DB_PATH) {
            config.path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_DB_TEMPORARY) {
            config.temporary = parse_var(ENV_DB_TEMPORARY, &raw)?;
        }
        if let Some(raw) = lookup(ENV_DB_CACHE_BYTES) {
            config.cache_capacity = parse_var(ENV_DB_CACHE_BYTES, &raw)?;
        }
        if let Some(raw) = lookup(ENV_DB_FLUSH_MS) {
            let ms: u64 = parse_var(ENV_DB_FLUSH_MS, &raw)?;
            config.flush_every_ms = if ms == 0 { None } else { Some(ms) };
        }

        Ok(config)
    }

    pub fn to_sled(&self) -> sled::Config {
        sled::Config::new()
            .path(&self.path)
            .temporary(self.temporary)
            .cache_capacity(self.cache_capacity)
            .flush_every_ms(self.flush_every_ms)
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> LocResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| LocError::malformed(raw, key))
}
