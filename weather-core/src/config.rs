use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://wttr.in";
pub const DEFAULT_CACHE_FILE: &str = ".cache/weather.json";
pub const DEFAULT_TTL_SECS: u64 = 300;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_LOCALE: &str = "uk";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// ttl_secs = 600
/// cache_file = "/tmp/weather.json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Weather endpoint; the location is appended as a path segment.
    pub base_url: String,

    /// Cache document location. Relative paths resolve against the working directory.
    pub cache_file: PathBuf,

    /// Default cache TTL, overridable per invocation.
    pub ttl_secs: u64,

    pub timeout_secs: u64,

    pub watch_interval_secs: u64,

    /// Presentation locale, e.g. "uk" or "en".
    pub locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            ttl_secs: DEFAULT_TTL_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            watch_interval_secs: DEFAULT_WATCH_INTERVAL_SECS,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();

        assert_eq!(cfg.base_url, "https://wttr.in");
        assert_eq!(cfg.cache_file, PathBuf::from(".cache/weather.json"));
        assert_eq!(cfg.ttl_secs, 300);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.watch_interval_secs, 300);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let cfg = Config::from_toml("ttl_secs = 600\nlocale = \"en\"\n").expect("valid toml");

        assert_eq!(cfg.ttl_secs, 600);
        assert_eq!(cfg.locale, "en");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let cfg = Config {
            cache_file: PathBuf::from("/tmp/w.json"),
            watch_interval_secs: 60,
            ..Config::default()
        };

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed = Config::from_toml(&text).expect("parse");
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("ttl_secs = \"soon\"").is_err());
    }
}
