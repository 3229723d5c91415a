//! Flat on-disk cache of raw snapshots, keyed by normalized location.
//!
//! Every operation here is fail-soft: read or parse errors are a miss, write
//! errors are logged and dropped. Caching is an optimization, so nothing in
//! this module returns an error to the caller.

use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::{WeatherSnapshot, model::normalize_location};

/// Key used when the location is inferred from the network origin.
///
/// Upper-case, so it can never equal a lower-cased city key.
pub const AUTO_KEY: &str = "AUTO";

/// Normalized cache slot identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationKey(String);

impl LocationKey {
    pub fn new(location: Option<&str>) -> Self {
        match normalize_location(location) {
            Some(city) => Self(city.to_lowercase()),
            None => Self(AUTO_KEY.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct CacheEntry {
    #[serde(default)]
    data: Value,
    /// Unix time in fractional seconds; missing means the epoch.
    #[serde(default)]
    cached_at: f64,
}

/// Entries stay raw JSON so a malformed one never affects its siblings.
type CacheDocument = Map<String, Value>;

#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached snapshot for `location` if it is younger than `ttl_secs`.
    pub fn lookup(&self, location: Option<&str>, ttl_secs: u64) -> Option<WeatherSnapshot> {
        self.lookup_at(location, ttl_secs, now_secs())
    }

    /// Upserts the snapshot for `location`, stamped with the current time.
    pub fn store(&self, location: Option<&str>, snapshot: &WeatherSnapshot) {
        self.store_at(location, snapshot, now_secs());
    }

    /// Deletes the cache document. A missing file is not an error.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "cache cleared"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to clear cache"),
        }
    }

    pub(crate) fn lookup_at(
        &self,
        location: Option<&str>,
        ttl_secs: u64,
        now: f64,
    ) -> Option<WeatherSnapshot> {
        let key = LocationKey::new(location);
        let mut document = self.read_document()?;

        let Some(raw) = document.remove(key.as_str()) else {
            debug!(%key, "cache miss");
            return None;
        };

        let entry: CacheEntry = match serde_json::from_value(raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(%key, error = %e, "ignoring malformed cache entry");
                return None;
            }
        };

        // An entry exactly `ttl_secs` old is already stale.
        if now - entry.cached_at >= ttl_secs as f64 || entry.data.is_null() {
            debug!(%key, "cache entry stale");
            return None;
        }

        debug!(%key, "cache hit");
        Some(WeatherSnapshot(entry.data))
    }

    pub(crate) fn store_at(&self, location: Option<&str>, snapshot: &WeatherSnapshot, now: f64) {
        let key = LocationKey::new(location);
        let mut document = self.read_document().unwrap_or_default();

        document.insert(
            key.as_str().to_string(),
            json!({ "data": snapshot.as_value(), "cached_at": now }),
        );

        match self.write_document(&document) {
            Ok(()) => debug!(%key, path = %self.path.display(), "cache updated"),
            Err(e) => warn!(%key, path = %self.path.display(), error = %e, "failed to write cache"),
        }
    }

    /// The whole document, or `None` if it is missing or unreadable.
    fn read_document(&self) -> Option<CacheDocument> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read cache");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(document) => Some(document),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring corrupt cache");
                None
            }
        }
    }

    /// Writes to a sibling temp file and renames it over the real path.
    fn write_document(&self, document: &CacheDocument) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_vec_pretty(document)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let tmp_path = self.temp_path();
        let result = fs::write(&tmp_path, payload).and_then(|()| fs::rename(&tmp_path, &self.path));

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}

fn now_secs() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
