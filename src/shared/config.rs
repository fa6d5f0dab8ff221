//! Runtime configuration loaded from the environment (and an optional `.env`).

use std::{env, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://www.loc.gov";
pub const DEFAULT_FORMAT_FILTER: &str = "online-format:audio";
pub const DEFAULT_USER_AGENT: &str = "radiodial/0.1 (+https://github.com/radiodial/radiodial)";

/// How the result selector picks among audio-bearing candidates when no
/// title hint matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Always the first candidate. Keeps cache keys stable.
    #[default]
    First,
    /// "Surprise me": uniform pick among candidates.
    Random,
}

impl std::str::FromStr for SelectionMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(SelectionMode::First),
            "random" => Ok(SelectionMode::Random),
            other => Err(AppError::InvalidInput(format!(
                "Unknown selection mode '{}', expected 'first' or 'random'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub base_url: String,
    pub format_filter: String,
    /// Directory for the file-backed durable store. `None` keeps the durable
    /// tier in memory.
    pub cache_dir: Option<PathBuf>,
    pub requests_per_second: f64,
    pub burst: u32,
    pub request_timeout: Duration,
    pub selection_mode: SelectionMode,
    pub user_agent: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            format_filter: DEFAULT_FORMAT_FILTER.to_string(),
            cache_dir: None,
            requests_per_second: 1.0,
            burst: 3,
            request_timeout: Duration::from_secs(20),
            selection_mode: SelectionMode::First,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ArchiveConfig {
    /// Load configuration from `ARCHIVE_*` environment variables, reading a
    /// `.env` file first when one is present.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup. Unset keys keep
    /// their defaults; malformed values are rejected.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = non_empty(lookup("ARCHIVE_BASE_URL")) {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(filter) = non_empty(lookup("ARCHIVE_FORMAT_FILTER")) {
            config.format_filter = filter;
        }
        if let Some(dir) = non_empty(lookup("ARCHIVE_CACHE_DIR")) {
            config.cache_dir = Some(PathBuf::from(dir));
        }
        if let Some(rate) = non_empty(lookup("ARCHIVE_REQUESTS_PER_SECOND")) {
            let rate: f64 = rate.parse()?;
            request_period(rate)?;
            config.requests_per_second = rate;
        }
        if let Some(burst) = non_empty(lookup("ARCHIVE_BURST")) {
            config.burst = burst.parse::<u32>()?.max(1);
        }
        if let Some(timeout) = non_empty(lookup("ARCHIVE_REQUEST_TIMEOUT_SECS")) {
            let secs: u64 = timeout.parse()?;
            if secs == 0 {
                return Err(AppError::InvalidInput(
                    "ARCHIVE_REQUEST_TIMEOUT_SECS must be at least 1".to_string(),
                ));
            }
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(mode) = non_empty(lookup("ARCHIVE_SELECTION_MODE")) {
            config.selection_mode = mode.parse()?;
        }
        if let Some(agent) = non_empty(lookup("ARCHIVE_USER_AGENT")) {
            config.user_agent = agent;
        }

        log::debug!(
            "Archive config: base={} filter={} cache_dir={:?} mode={:?}",
            config.base_url,
            config.format_filter,
            config.cache_dir,
            config.selection_mode
        );

        Ok(config)
    }
}

/// Spacing between requests at `requests_per_second`. Rejects rates that
/// are not positive or whose period does not fit in a `Duration`.
pub fn request_period(requests_per_second: f64) -> AppResult<Duration> {
    if requests_per_second.is_nan() || requests_per_second <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "Request rate must be positive, got {}",
            requests_per_second
        )));
    }
    Duration::try_from_secs_f64(1.0 / requests_per_second).map_err(|e| {
        AppError::InvalidInput(format!(
            "Request rate {} is out of range: {}",
            requests_per_second, e
        ))
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
