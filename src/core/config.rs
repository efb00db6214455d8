//! Client configuration
//!
//! `SwcConfig` is built once, validated eagerly, and never mutated afterwards.
//! Every component that needs a setting receives the config explicitly.

use std::time::Duration;

use crate::error::{Result, SwcError};
use crate::swc::bulk::BulkFileFormat;

/// Serializes tests that touch the process environment.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

pub const BASE_URL_ENV_VAR: &str = "SWC_API_BASE_URL";
pub const BACKOFF_ENV_VAR: &str = "SWC_BACKOFF";
pub const MAX_RETRIES_ENV_VAR: &str = "SWC_MAX_RETRIES";
pub const TIMEOUT_ENV_VAR: &str = "SWC_TIMEOUT_SECONDS";
pub const BULK_FORMAT_ENV_VAR: &str = "SWC_BULK_FILE_FORMAT";

/// Public location the bulk dataset files are published to.
pub const DEFAULT_BULK_FILE_BASE_URL: &str =
    "https://raw.githubusercontent.com/aks03dev/portfolio-project/main/bulk";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_BASE_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_BACKOFF_MAX_DELAY: Duration = Duration::from_secs(10);
pub const DEFAULT_BACKOFF_MAX_TIME: Duration = Duration::from_secs(30);

/// Immutable settings for one [`SwcClient`](crate::SwcClient).
#[derive(Debug, Clone, PartialEq)]
pub struct SwcConfig {
    base_url: String,
    timeout: Duration,
    backoff_enabled: bool,
    max_retries: u32,
    backoff_base_delay: Duration,
    backoff_max_delay: Duration,
    backoff_max_time: Duration,
    bulk_file_format: BulkFileFormat,
    bulk_file_base_url: String,
}

impl SwcConfig {
    /// Default settings pointed at `base_url`.
    ///
    /// ```rust
    /// use swc_client::{BulkFileFormat, SwcConfig};
    ///
    /// let config = SwcConfig::new("http://localhost:8000").unwrap();
    /// assert!(config.backoff_enabled());
    /// assert_eq!(config.bulk_file_format(), BulkFileFormat::Csv);
    /// ```
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> SwcConfigBuilder {
        SwcConfigBuilder::default()
    }

    /// Build a config from `SWC_*` environment variables.
    ///
    /// `SWC_API_BASE_URL` is required; the rest fall back to defaults when unset.
    pub fn from_env() -> Result<Self> {
        if std::env::var_os(BASE_URL_ENV_VAR).is_none() {
            return Err(SwcError::config(format!(
                "base URL not provided and {BASE_URL_ENV_VAR} environment variable not set"
            )));
        }
        SwcConfigBuilder::from_env()?.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn backoff_enabled(&self) -> bool {
        self.backoff_enabled
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn backoff_base_delay(&self) -> Duration {
        self.backoff_base_delay
    }

    pub fn backoff_max_delay(&self) -> Duration {
        self.backoff_max_delay
    }

    /// Upper bound on the total time spent sleeping between attempts of one call.
    pub fn backoff_max_time(&self) -> Duration {
        self.backoff_max_time
    }

    pub fn bulk_file_format(&self) -> BulkFileFormat {
        self.bulk_file_format
    }

    pub fn bulk_file_base_url(&self) -> &str {
        &self.bulk_file_base_url
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SwcError::config(format!("{var}={raw:?} is not a boolean"))),
    }
}

/// Timeout from a seconds value given on the command line or in the environment.
pub fn timeout_from_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(SwcError::config(format!(
            "timeout must be a positive number of seconds, got {secs}"
        )));
    }
    Ok(Duration::from_secs_f64(secs))
}

fn normalize_url(field: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(SwcError::config(format!("{field} must not be empty")));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(SwcError::config(format!(
            "{field} must start with http:// or https://, got {raw:?}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Collects options for [`SwcConfig`]; nothing is checked until [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SwcConfigBuilder {
    base_url: Option<String>,
    timeout: Duration,
    backoff_enabled: bool,
    max_retries: u32,
    backoff_base_delay: Duration,
    backoff_max_delay: Duration,
    backoff_max_time: Duration,
    bulk_file_format: String,
    bulk_file_base_url: String,
}

impl Default for SwcConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            backoff_enabled: true,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_delay: DEFAULT_BACKOFF_BASE_DELAY,
            backoff_max_delay: DEFAULT_BACKOFF_MAX_DELAY,
            backoff_max_time: DEFAULT_BACKOFF_MAX_TIME,
            bulk_file_format: BulkFileFormat::default().to_string(),
            bulk_file_base_url: DEFAULT_BULK_FILE_BASE_URL.to_string(),
        }
    }
}

impl SwcConfigBuilder {
    /// Defaults overridden by whichever `SWC_*` environment variables are set.
    ///
    /// Unlike [`SwcConfig::from_env`] a missing base URL is not an error here, so
    /// callers can still supply one before `build()`.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::default();

        if let Ok(url) = std::env::var(BASE_URL_ENV_VAR) {
            builder = builder.base_url(url);
        }
        if let Ok(raw) = std::env::var(BACKOFF_ENV_VAR) {
            builder = builder.backoff(parse_bool(BACKOFF_ENV_VAR, &raw)?);
        }
        if let Ok(raw) = std::env::var(MAX_RETRIES_ENV_VAR) {
            let retries = raw.trim().parse::<u32>().map_err(|e| {
                SwcError::config(format!("{MAX_RETRIES_ENV_VAR}={raw:?} is not a count: {e}"))
            })?;
            builder = builder.max_retries(retries);
        }
        if let Ok(raw) = std::env::var(TIMEOUT_ENV_VAR) {
            let secs = raw.trim().parse::<f64>().map_err(|e| {
                SwcError::config(format!("{TIMEOUT_ENV_VAR}={raw:?} is not a number: {e}"))
            })?;
            builder = builder.timeout(timeout_from_secs(secs)?);
        }
        if let Ok(raw) = std::env::var(BULK_FORMAT_ENV_VAR) {
            builder = builder.bulk_file_format(raw);
        }

        Ok(builder)
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backoff(mut self, enabled: bool) -> Self {
        self.backoff_enabled = enabled;
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn backoff_base_delay(mut self, delay: Duration) -> Self {
        self.backoff_base_delay = delay;
        self
    }

    pub fn backoff_max_delay(mut self, delay: Duration) -> Self {
        self.backoff_max_delay = delay;
        self
    }

    pub fn backoff_max_time(mut self, budget: Duration) -> Self {
        self.backoff_max_time = budget;
        self
    }

    /// Accepts `"csv"` or `"parquet"` (any case); anything else fails at `build()`.
    pub fn bulk_file_format(mut self, format: impl Into<String>) -> Self {
        self.bulk_file_format = format.into();
        self
    }

    pub fn bulk_file_base_url(mut self, url: impl Into<String>) -> Self {
        self.bulk_file_base_url = url.into();
        self
    }

    pub fn build(self) -> Result<SwcConfig> {
        let base_url = normalize_url("base_url", self.base_url.as_deref().unwrap_or(""))?;
        let bulk_file_base_url = normalize_url("bulk_file_base_url", &self.bulk_file_base_url)?;
        let bulk_file_format = self.bulk_file_format.parse::<BulkFileFormat>()?;

        if self.timeout.is_zero() {
            return Err(SwcError::config("timeout must be greater than zero"));
        }
        if self.backoff_base_delay > self.backoff_max_delay {
            return Err(SwcError::config(format!(
                "backoff_base_delay ({:?}) cannot be greater than backoff_max_delay ({:?})",
                self.backoff_base_delay, self.backoff_max_delay
            )));
        }

        Ok(SwcConfig {
            base_url,
            timeout: self.timeout,
            backoff_enabled: self.backoff_enabled,
            max_retries: self.max_retries,
            backoff_base_delay: self.backoff_base_delay,
            backoff_max_delay: self.backoff_max_delay,
            backoff_max_time: self.backoff_max_time,
            bulk_file_format,
            bulk_file_base_url,
        })
    }
}
