//! Wait controller configuration.

use std::time::Duration;

/// Polling configuration for [`Waiter`](crate::Waiter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitConfig {
    /// Give up after this long; `None` waits unbounded.
    pub timeout: Option<Duration>,

    /// Polling period between status checks.
    pub check_interval: Duration,
}

impl WaitConfig {
    /// Wait at most `timeout`, polling at the default interval.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::default()
        }
    }

    /// Wait until the task turns terminal, with no deadline.
    pub fn unbounded() -> Self {
        Self {
            timeout: None,
            ..Self::default()
        }
    }

    /// Polling period actually used: the configured interval, clamped to a
    /// finite timeout so at least one re-check happens within the bound.
    pub fn effective_interval(&self) -> Duration {
        match self.timeout {
            Some(timeout) if timeout < self.check_interval => timeout,
            _ => self.check_interval,
        }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(60)),
            check_interval: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WaitConfig::default();
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.check_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_interval_clamped_to_finite_timeout() {
        let config = WaitConfig {
            timeout: Some(Duration::from_secs(5)),
            check_interval: Duration::from_secs(10),
        };
        assert_eq!(config.effective_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_interval_unclamped_when_unbounded() {
        let config = WaitConfig {
            timeout: None,
            check_interval: Duration::from_secs(10),
        };
        assert_eq!(config.effective_interval(), Duration::from_secs(10));
    }
}
