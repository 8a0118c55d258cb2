use std::time::Duration;

use crate::utils::RetryConfig;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Read once at startup from the environment. Unset variables fall back to
// the defaults below.
//
// ============================================================================

pub const DEFAULT_LOG_FILTER: &str = "info,sales_orders=debug";

const LOG_FILTER_VAR: &str = "RUST_LOG";
const MAX_ATTEMPTS_VAR: &str = "SALES_COMMIT_MAX_ATTEMPTS";
const INITIAL_DELAY_VAR: &str = "SALES_COMMIT_INITIAL_DELAY_MS";
const MAX_DELAY_VAR: &str = "SALES_COMMIT_MAX_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("{var} must be at least 1")]
    ZeroAttempts { var: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_filter: String,
    pub commit_retry: RetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            commit_retry: RetryConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        if let Some(attempts) = parse_u64(&lookup, MAX_ATTEMPTS_VAR)? {
            if attempts == 0 {
                return Err(ConfigError::ZeroAttempts { var: MAX_ATTEMPTS_VAR });
            }
            config.commit_retry.max_attempts =
                u32::try_from(attempts).map_err(|_| ConfigError::InvalidValue {
                    var: MAX_ATTEMPTS_VAR,
                    value: attempts.to_string(),
                })?;
        }
        if let Some(ms) = parse_u64(&lookup, INITIAL_DELAY_VAR)? {
            config.commit_retry.initial_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, MAX_DELAY_VAR)? {
            config.commit_retry.max_delay = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

fn parse_u64<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
    }
}
