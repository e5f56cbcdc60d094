//! Runtime settings for the lookup pipeline.
//!
//! Settings are plain data passed to [`crate::Client::new`] and the session; nothing here
//! is global. [`Config::from_env`] reads the process environment once at start-up
//! (the binary loads `.env` with `dotenvy` before calling it).

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1/name";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_OUTPUT: &str = "countries.txt";

pub const ENV_BASE_URL: &str = "COUNTRIES_API_URL";
pub const ENV_TIMEOUT: &str = "API_TIMEOUT";
pub const ENV_OUTPUT: &str = "COUNTRIES_FILE";
pub const ENV_DEFAULT_COUNTRIES: &str = "DEFAULT_COUNTRIES";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Endpoint the country name is appended to, without a trailing slash.
    pub base_url: String,
    /// Total request timeout.
    pub timeout: Duration,
    /// Append-only log of saved records.
    pub output_path: PathBuf,
    /// Names used by non-interactive runs when none are given.
    pub default_countries: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            default_countries: Vec::new(),
        }
    }
}

impl Config {
    /// Build a config from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads values through `get`, so callers can
    /// supply any key/value source.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(url) = get(ENV_BASE_URL).filter(|s| !s.trim().is_empty()) {
            cfg.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = get(ENV_TIMEOUT).filter(|s| !s.trim().is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid {ENV_TIMEOUT}={raw:?}, expected whole seconds"))?;
            if secs == 0 {
                bail!("invalid {ENV_TIMEOUT}={raw:?}, timeout must be at least 1 second");
            }
            cfg.timeout = Duration::from_secs(secs);
        }
        if let Some(path) = get(ENV_OUTPUT).filter(|s| !s.trim().is_empty()) {
            cfg.output_path = PathBuf::from(path.trim());
        }
        if let Some(list) = get(ENV_DEFAULT_COUNTRIES) {
            cfg.default_countries = parse_list(&list);
        }
        Ok(cfg)
    }
}

/// Split a comma/semicolon separated list, trimming and dropping empty items.
pub fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}
