//! Application configuration
//!
//! One immutable [`ClaimflowConfig`] is built at start-up, either from defaults
//! or from a JSON file, and handed to the constructors that need it. Every
//! section and field is optional in the file.

use claimflow_risk::RiskConfig;
use claimflow_rules::{PolicyConfig, ValidationConfig};
use claimflow_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimflowConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub chaos: ChaosConfig,
}

/// Retry budget for the parallel steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total policy check attempts (first try included)
    #[serde(default = "default_policy_max_attempts")]
    pub policy_max_attempts: u32,

    /// Total risk scoring attempts (first try included)
    #[serde(default = "default_risk_max_attempts")]
    pub risk_max_attempts: u32,

    /// Base delay between risk scoring attempts; 0 disables backoff.
    /// Policy checks are always retried immediately.
    #[serde(default)]
    pub backoff_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Minimum reviewer reason length after trimming
    #[serde(default = "default_min_reason_length")]
    pub min_reason_length: usize,
}

/// Fault injection for exercising the retry and compensation paths
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChaosConfig {
    /// Probability that any single step attempt fails, in `[0, 1]`
    #[serde(default)]
    pub failure_rate: f64,
}

fn default_policy_max_attempts() -> u32 {
    2
}

fn default_risk_max_attempts() -> u32 {
    4
}

fn default_min_reason_length() -> usize {
    10
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            policy_max_attempts: default_policy_max_attempts(),
            risk_max_attempts: default_risk_max_attempts(),
            backoff_ms: 0,
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            min_reason_length: default_min_reason_length(),
        }
    }
}

impl ChaosConfig {
    pub fn is_enabled(&self) -> bool {
        self.failure_rate > 0.0
    }
}

impl ClaimflowConfig {
    /// Load and validate configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.policy_max_attempts == 0 || self.retry.risk_max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry attempts must be at least 1".to_string(),
            ));
        }
        if self.store.page_size == 0 {
            return Err(ConfigError::Invalid("page size must be at least 1".to_string()));
        }
        if self.store.max_update_attempts == 0 {
            return Err(ConfigError::Invalid(
                "store update attempts must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.chaos.failure_rate) {
            return Err(ConfigError::Invalid(format!(
                "chaos failure rate {} is outside [0, 1]",
                self.chaos.failure_rate
            )));
        }
        if self.risk.medium_threshold > self.risk.high_threshold {
            return Err(ConfigError::Invalid(
                "risk medium threshold is above the high threshold".to_string(),
            ));
        }
        Ok(())
    }
}
