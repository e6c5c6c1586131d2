// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use crate::error::{Error, Result};

pub const ENV_CLIENT_ID: &str = "AGGREGATION_CLIENT_ID";
pub const ENV_SECRET: &str = "AGGREGATION_SECRET";
pub const ENV_ENVIRONMENT: &str = "AGGREGATION_ENV";
pub const ENV_DB_PATH: &str = "WEALTHCLIP_DB";

/// Rolling sync window: fetch transactions for the last N days ending today.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorEnvironment {
    Sandbox,
    Development,
    Production,
}

impl AggregatorEnvironment {
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox.aggregation.example.com",
            Self::Development => "https://development.aggregation.example.com",
            Self::Production => "https://production.aggregation.example.com",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(Error::Config(format!(
                "Invalid aggregation environment '{}' (expected sandbox, development, or production)",
                other
            ))),
        }
    }
}

/// Credentials for the aggregation service, sourced from the process
/// environment. Validated eagerly so a misconfigured process fails before the
/// first service call, not on it.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub client_id: String,
    pub secret: String,
    pub environment: AggregatorEnvironment,
}

impl AggregatorConfig {
    pub fn from_env() -> Result<Self> {
        let client_id = require_env(ENV_CLIENT_ID)?;
        let secret = require_env(ENV_SECRET)?;
        let environment = match std::env::var(ENV_ENVIRONMENT) {
            Ok(raw) => AggregatorEnvironment::parse(&raw)?,
            Err(_) => AggregatorEnvironment::Sandbox,
        };
        Ok(Self {
            client_id,
            secret,
            environment,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Config(format!(
            "Aggregation credential {} is missing or empty",
            key
        ))),
    }
}

/// Backoff applied to the initial database open only. Per-call service
/// requests are not retried; callers wanting resilience wrap them themselves.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(200),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// Delay before the given retry, zero-based: base * multiplier^attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(self.multiplier.saturating_pow(attempt))
    }
}
