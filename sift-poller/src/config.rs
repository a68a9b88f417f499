//! Poller configuration
//!
//! Defines the polling interval, the per-lookup timeout and the bounds that
//! stop a handle whose session never completes.

use std::time::Duration;

/// Result poller configuration
///
/// All intervals are configurable to allow tuning for different
/// deployment scenarios (local pipeline vs. slow hosted pipeline).
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay between the end of one lookup and the start of the next
    pub interval: Duration,

    /// Upper bound for a single lookup before it counts as a transient failure
    pub request_timeout: Duration,

    /// Consecutive failed lookups after which the handle gives up
    pub max_consecutive_failures: Option<u32>,

    /// Total time after which an incomplete handle gives up
    pub max_duration: Option<Duration>,
}

impl PollerConfig {
    /// Creates a configuration with the given interval and default bounds
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional, seconds):
    /// - SIFT_POLL_INTERVAL (default: 5)
    /// - SIFT_REQUEST_TIMEOUT (default: 10)
    /// - SIFT_MAX_FAILURES (count, default: unbounded)
    /// - SIFT_MAX_DURATION (default: 1800, 0 disables the bound)
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let interval = env_parse::<u64>("SIFT_POLL_INTERVAL")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.interval);

        let request_timeout = env_parse::<u64>("SIFT_REQUEST_TIMEOUT")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let max_consecutive_failures = env_parse::<u32>("SIFT_MAX_FAILURES")?;

        let max_duration = match env_parse::<u64>("SIFT_MAX_DURATION")? {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.max_duration,
        };

        Ok(Self {
            interval,
            request_timeout,
            max_consecutive_failures,
            max_duration,
        })
    }

    /// Sets the consecutive failure bound
    pub fn with_max_failures(mut self, max: u32) -> Self {
        self.max_consecutive_failures = Some(max);
        self
    }

    /// Sets the total duration bound
    pub fn with_max_duration(mut self, max: Duration) -> Self {
        self.max_duration = Some(max);
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.interval.is_zero() {
            anyhow::bail!("interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.max_consecutive_failures == Some(0) {
            anyhow::bail!("max_consecutive_failures must be greater than 0");
        }

        if self.max_duration.is_some_and(|d| d.is_zero()) {
            anyhow::bail!("max_duration must be greater than 0");
        }

        Ok(())
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            max_consecutive_failures: None,
            max_duration: Some(Duration::from_secs(30 * 60)),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> anyhow::Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("invalid {} value {:?}: {}", key, raw, e)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PollerConfig::default();
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.max_consecutive_failures, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = PollerConfig::default();
        assert!(config.validate().is_ok());

        config.interval = Duration::ZERO;
        assert!(config.validate().is_err());
        config.interval = Duration::from_secs(1);

        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
        config.request_timeout = Duration::from_secs(10);

        config = config.with_max_failures(0);
        assert!(config.validate().is_err());

        config = config.with_max_failures(3);
        assert!(config.validate().is_ok());

        config = config.with_max_duration(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_new_keeps_default_bounds() {
        let config = PollerConfig::new(Duration::from_secs(2));
        assert_eq!(config.interval, Duration::from_secs(2));
        assert_eq!(config.max_duration, PollerConfig::default().max_duration);
    }
}
