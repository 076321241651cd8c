// src/error.rs
use std::fmt;

/// Error types for the fast-greeks library
#[derive(Debug, Clone, PartialEq)]
pub enum GreeksError {
    /// Invalid input values (non-positive spot, strike, volatility, ...)
    InvalidInput {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid engine configuration
    InvalidConfiguration { field: String, reason: String },

    /// Malformed textual input (dates, option types, strategy legs, config files)
    ParseError { input: String, reason: String },

    /// The injected market-data accessor could not serve a symbol
    MarketData { symbol: String, reason: String },

    /// File system failure while reading config or writing output
    Io(String),
}

impl fmt::Display for GreeksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GreeksError::InvalidInput {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid input '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            GreeksError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            GreeksError::ParseError { input, reason } => {
                write!(f, "Could not parse '{}': {}", input, reason)
            }
            GreeksError::MarketData { symbol, reason } => {
                write!(f, "Market data unavailable for {}: {}", symbol, reason)
            }
            GreeksError::Io(reason) => write!(f, "I/O error: {}", reason),
        }
    }
}

impl std::error::Error for GreeksError {}

impl From<std::io::Error> for GreeksError {
    fn from(err: std::io::Error) -> Self {
        GreeksError::Io(err.to_string())
    }
}

/// Result type alias for fast-greeks operations
pub type GreeksResult<T> = Result<T, GreeksError>;

/// Validation utilities
pub mod validation {
    use super::{GreeksError, GreeksResult};

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> GreeksResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(GreeksError::InvalidInput {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> GreeksResult<()> {
        if !value.is_finite() {
            Err(GreeksError::InvalidInput {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a leg quantity
    pub fn validate_quantity(quantity: u32) -> GreeksResult<()> {
        if quantity == 0 {
            Err(GreeksError::InvalidInput {
                parameter: "quantity".to_string(),
                value: 0.0,
                constraint: "must be a positive integer".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
