// ABOUTME: Environment-driven client configuration: store backend, policies, and timeouts
// ABOUTME: Parses FITLOG_* variables into a typed ClientConfig with contextual errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use fitlog_core::constants::{defaults, env_config};
use tracing::{info, warn};
use url::Url;

use super::types::{BatchWriteMode, ValidationPolicy, WeightSeriesPolicy};

/// Record store backend selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Process-local tables
    #[default]
    Memory,
    /// `PostgREST` endpoint
    Rest {
        /// Project base URL
        base_url: Url,
        /// Public API key
        api_key: String,
        /// Signed-in user's access token; requests fall back to the API key
        access_token: Option<String>,
    },
}

/// Submission pipeline settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmissionConfig {
    /// Handling of unparsable numbers
    pub validation: ValidationPolicy,
    /// Nutrition batch write contract
    pub batch_mode: BatchWriteMode,
}

/// Dashboard aggregation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Which weight samples to keep
    pub weight_series: WeightSeriesPolicy,
    /// Maximum number of weight samples
    pub weight_series_limit: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            weight_series: WeightSeriesPolicy::default(),
            weight_series_limit: defaults::WEIGHT_SERIES_LIMIT,
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Record store backend
    pub store: StoreBackend,
    /// Submission settings
    pub submission: SubmissionConfig,
    /// Aggregation settings
    pub aggregation: AggregationConfig,
    /// REST request timeout
    pub http_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            submission: SubmissionConfig::default(),
            aggregation: AggregationConfig::default(),
            http_timeout: Duration::from_secs(defaults::HTTP_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparsable value or the REST
    /// backend is selected without its URL and key
    pub fn from_env() -> Result<Self> {
        info!("Loading client configuration from environment variables");

        let config = Self {
            store: load_store_backend()?,
            submission: SubmissionConfig {
                validation: env_var_or(env_config::VALIDATION, ValidationPolicy::default().as_str())
                    .parse()
                    .with_context(|| format!("Invalid {} value", env_config::VALIDATION))?,
                batch_mode: env_var_or(env_config::BATCH_MODE, BatchWriteMode::default().as_str())
                    .parse()
                    .with_context(|| format!("Invalid {} value", env_config::BATCH_MODE))?,
            },
            aggregation: AggregationConfig {
                weight_series: env_var_or(
                    env_config::WEIGHT_SERIES,
                    WeightSeriesPolicy::default().as_str(),
                )
                .parse()
                .with_context(|| format!("Invalid {} value", env_config::WEIGHT_SERIES))?,
                weight_series_limit: env_var_or(
                    env_config::WEIGHT_SERIES_LIMIT,
                    &defaults::WEIGHT_SERIES_LIMIT.to_string(),
                )
                .parse()
                .with_context(|| format!("Invalid {} value", env_config::WEIGHT_SERIES_LIMIT))?,
            },
            http_timeout: Duration::from_secs(
                env_var_or(
                    env_config::HTTP_TIMEOUT_SECS,
                    &defaults::HTTP_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .with_context(|| format!("Invalid {} value", env_config::HTTP_TIMEOUT_SECS))?,
            ),
        };

        config.validate()?;
        config.log_summary();
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the weight series bound is zero
    pub fn validate(&self) -> Result<()> {
        if self.aggregation.weight_series_limit == 0 {
            bail!("{} must be at least 1", env_config::WEIGHT_SERIES_LIMIT);
        }
        if self.http_timeout.is_zero() {
            bail!("{} must be at least 1", env_config::HTTP_TIMEOUT_SECS);
        }
        Ok(())
    }

    fn log_summary(&self) {
        let backend = match &self.store {
            StoreBackend::Memory => "memory",
            StoreBackend::Rest { .. } => "rest",
        };
        info!(
            store.backend = backend,
            submission.validation = %self.submission.validation,
            submission.batch_mode = %self.submission.batch_mode,
            aggregation.weight_series = %self.aggregation.weight_series,
            aggregation.limit = self.aggregation.weight_series_limit,
            "Client configuration loaded"
        );
    }
}

fn load_store_backend() -> Result<StoreBackend> {
    match env_var_or(env_config::STORE, "memory").to_lowercase().as_str() {
        "memory" => Ok(StoreBackend::Memory),
        "rest" => {
            let raw_url = env::var(env_config::STORE_URL)
                .with_context(|| format!("{} is required for the rest store", env_config::STORE_URL))?;
            let base_url = parse_base_url(&raw_url)
                .with_context(|| format!("Invalid {} value", env_config::STORE_URL))?;
            let api_key = env::var(env_config::STORE_API_KEY).with_context(|| {
                format!("{} is required for the rest store", env_config::STORE_API_KEY)
            })?;
            if api_key.trim().is_empty() {
                bail!("{} must not be empty", env_config::STORE_API_KEY);
            }
            let access_token = env::var(env_config::ACCESS_TOKEN)
                .ok()
                .map(|token| token.trim().to_owned())
                .filter(|token| !token.is_empty());
            if access_token.is_none() {
                warn!("No user access token configured; REST requests use the API key");
            }
            Ok(StoreBackend::Rest {
                base_url,
                api_key,
                access_token,
            })
        }
        other => {
            warn!(store.backend = other, "Unknown store backend requested");
            bail!("Invalid {} value '{other}': expected 'memory' or 'rest'", env_config::STORE)
        }
    }
}

/// Parse a base URL, forcing a trailing slash so `Url::join` keeps the path
///
/// # Errors
///
/// Returns an error if the text is not an absolute URL
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).with_context(|| format!("'{trimmed}' is not an absolute URL"))
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = parse_base_url("https://project.example.co/sub").unwrap();
        assert_eq!(url.as_str(), "https://project.example.co/sub/");
        assert_eq!(
            url.join("rest/v1/workouts").unwrap().as_str(),
            "https://project.example.co/sub/rest/v1/workouts"
        );
    }

    #[test]
    fn default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.aggregation.weight_series_limit, 10);
        assert_eq!(config.store, StoreBackend::Memory);
    }
}
