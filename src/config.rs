//! Immutable run configuration.
//!
//! Built once in `main` from the command line and handed by reference to every
//! component that needs an endpoint, a delay window or a file path.

use crate::error::{Result, SweepError};
use rand::Rng;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://www.sheinindia.in/api/cart/apply-voucher";
pub const DEFAULT_ORIGIN: &str = "https://www.sheinindia.in";
pub const DEFAULT_TENANT_ID: &str = "SHEIN";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// An inclusive range of whole seconds from which a sleep is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayWindow {
    min_secs: u64,
    max_secs: u64,
}

impl DelayWindow {
    pub fn new(min_secs: u64, max_secs: u64) -> Result<Self> {
        if min_secs > max_secs {
            return Err(SweepError::Config(format!(
                "delay window minimum ({min_secs}s) exceeds maximum ({max_secs}s)"
            )));
        }
        Ok(Self { min_secs, max_secs })
    }

    /// A window that always yields the same duration.
    pub fn fixed(secs: u64) -> Self {
        Self {
            min_secs: secs,
            max_secs: secs,
        }
    }

    pub fn sample(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.min_secs..=self.max_secs);
        Duration::from_secs(secs)
    }
}

/// Identity of the storefront the requests pretend to come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    pub origin: String,
    pub tenant_id: String,
    pub user_agent: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// How often and how patiently a single code is retried on transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: DelayWindow,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: DelayWindow) -> Result<Self> {
        if max_attempts == 0 {
            return Err(SweepError::Config(
                "at least one attempt per code is required".to_string(),
            ));
        }
        Ok(Self {
            max_attempts,
            backoff,
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: DelayWindow {
                min_secs: 10,
                max_secs: 20,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub cookies_path: PathBuf,
    pub coupons_path: PathBuf,
    pub output_path: PathBuf,
    pub endpoint: String,
    pub site: SiteProfile,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    /// Pause after each code.
    pub code_delay: DelayWindow,
    /// Pause between two passes over the candidate list.
    pub cycle_pause: Duration,
    /// Stop after this many completed cycles; `None` runs forever.
    pub max_cycles: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cookies_path: PathBuf::from("cookies.json"),
            coupons_path: PathBuf::from("coupons.txt"),
            output_path: PathBuf::from("coupanlelo.txt"),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            site: SiteProfile::default(),
            request_timeout: Duration::from_secs(15),
            retry: RetryPolicy::default(),
            code_delay: DelayWindow::fixed(12),
            cycle_pause: Duration::from_secs(60),
            max_cycles: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_window_rejects_inverted_bounds() {
        assert!(matches!(
            DelayWindow::new(20, 10),
            Err(SweepError::Config(_))
        ));
    }

    #[test]
    fn test_fixed_window_always_yields_same_duration() {
        let window = DelayWindow::new(12, 12).unwrap();
        for _ in 0..20 {
            assert_eq!(window.sample(), Duration::from_secs(12));
        }
    }

    #[test]
    fn test_sample_stays_within_bounds() {
        let window = DelayWindow::new(10, 20).unwrap();
        for _ in 0..200 {
            let d = window.sample();
            assert!(d >= Duration::from_secs(10) && d <= Duration::from_secs(20));
        }
    }

    #[test]
    fn test_retry_policy_requires_an_attempt() {
        assert!(RetryPolicy::new(0, DelayWindow::fixed(0)).is_err());
        assert_eq!(
            RetryPolicy::new(2, DelayWindow::fixed(0)).unwrap().max_attempts,
            2
        );
    }

    #[test]
    fn test_defaults_match_original_constants() {
        let config = Config::default();
        assert_eq!(config.code_delay, DelayWindow::fixed(12));
        assert_eq!(config.cycle_pause, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.retry.max_attempts, 2);
        assert_eq!(config.retry.backoff, DelayWindow::new(10, 20).unwrap());
        assert!(config.max_cycles.is_none());
    }
}
