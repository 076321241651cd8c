// src/config.rs
//! Engine configuration
//!
//! Every key is optional in TOML; missing keys take the defaults below.
//!
//! ```toml
//! risk_free_rate = 0.045
//! default_volatility = 0.30
//! days_per_year = 365.0
//! parallel_threshold = 64
//! ```

use crate::analytics::bs_analytic::{
    GreeksConfig, DAYS_PER_YEAR, DEFAULT_RISK_FREE_RATE, DEFAULT_VOLATILITY,
};
use crate::error::{validation::*, GreeksError, GreeksResult};
use crate::strategy::AggregateConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub risk_free_rate: f64,
    /// Used when neither the caller nor the market supplies a volatility
    pub default_volatility: f64,
    /// Day count for converting calendar days to years
    pub days_per_year: f64,
    /// Strategies with at least this many legs are evaluated in parallel
    pub parallel_threshold: usize,
    /// Include rho in net strategy Greeks
    pub net_rho: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            default_volatility: DEFAULT_VOLATILITY,
            days_per_year: DAYS_PER_YEAR,
            parallel_threshold: 64,
            net_rho: false,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> GreeksResult<()> {
        validate_finite("risk_free_rate", self.risk_free_rate)?;
        validate_positive("default_volatility", self.default_volatility)?;
        validate_positive("days_per_year", self.days_per_year)?;
        if self.parallel_threshold == 0 {
            return Err(GreeksError::InvalidConfiguration {
                field: "parallel_threshold".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn from_toml_str(input: &str) -> GreeksResult<Self> {
        let cfg: EngineConfig = toml::from_str(input).map_err(|e| GreeksError::ParseError {
            input: "engine config".to_string(),
            reason: e.to_string(),
        })?;
        cfg.validate()?;
        debug!(?cfg, "parsed engine config");
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> GreeksResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            risk_free_rate = cfg.risk_free_rate,
            default_volatility = cfg.default_volatility,
            "loaded engine config"
        );
        Ok(cfg)
    }

    /// Settings handed to the strategy aggregator
    pub fn aggregate_config(&self) -> AggregateConfig {
        let greeks = if self.net_rho {
            GreeksConfig::NET | GreeksConfig::RHO
        } else {
            GreeksConfig::NET
        };
        AggregateConfig {
            greeks,
            risk_free_rate: self.risk_free_rate,
            default_volatility: self.default_volatility,
            parallel_threshold: self.parallel_threshold,
        }
    }
}
