//! Configuration management for the procure-to-pay engine
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with P2P_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main engine configuration
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Current environment (development, production)
    pub environment: String,

    /// Lot numbering configuration
    pub lot: LotConfig,

    /// Traceability code configuration
    pub traceability: TraceabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LotConfig {
    /// Prefix for generated lot numbers
    pub prefix: String,

    /// Zero-padding width of the lot sequence number
    pub sequence_width: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TraceabilityConfig {
    /// Delimiter between traceability code fields
    pub delimiter: String,
}

impl EngineConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment = std::env::var("P2P_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("lot.prefix", "LOT")?
            .set_default("lot.sequence_width", 4)?
            .set_default("traceability.delimiter", "|")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (P2P_ prefix)
            .add_source(
                Environment::with_prefix("P2P")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            lot: LotConfig::default(),
            traceability: TraceabilityConfig::default(),
        }
    }
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            prefix: "LOT".to_string(),
            sequence_width: 4,
        }
    }
}

impl Default for TraceabilityConfig {
    fn default() -> Self {
        Self {
            delimiter: "|".to_string(),
        }
    }
}
