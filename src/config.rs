//! Configuration management for the catalog engine.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct LendingConfig {
    /// Default loan duration applied when the caller does not specify one.
    pub loan_duration_days: i64,
    /// Flat fine per day of late return.
    pub fine_per_day: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    /// Initial bucket count of the title and author hash indices.
    pub hash_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReservationConfig {
    /// Days before an unclaimed reservation expires.
    pub expiry_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendationConfig {
    /// Traversal depth used when the caller does not specify one.
    pub default_depth: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub lending: LendingConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub reservations: ReservationConfig,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from files and environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix ATHENEUM_)
            .add_source(
                Environment::with_prefix("ATHENEUM")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            loan_duration_days: 7,
            fine_per_day: 5000.0,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { hash_capacity: 500 }
    }
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self { expiry_days: 7 }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self { default_depth: 2 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
