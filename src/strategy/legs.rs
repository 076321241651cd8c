// src/strategy/legs.rs
//! Strategy legs
//!
//! A leg is one option position inside a multi-option strategy. Two forms
//! exist:
//! - [`StrategyLeg`]: engine-ready, with time to expiry already in years
//! - [`LegSpec`]: the wire form carrying a calendar expiration date, as
//!   accepted in JSON by the analyzer
//!
//! ```text
//! [{"strike_price": 100, "expiration_date": "2024-12-20",
//!   "option_type": "call", "action": "buy", "quantity": 1}]
//! ```

use crate::analytics::bs_analytic::OptionType;
use crate::error::{validation::*, GreeksError, GreeksResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
}

impl Action {
    /// +1 for long, -1 for short
    pub fn sign(&self) -> f64 {
        match self {
            Action::Buy => 1.0,
            Action::Sell => -1.0,
        }
    }
}

impl FromStr for Action {
    type Err = GreeksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "long" => Ok(Action::Buy),
            "sell" | "short" => Ok(Action::Sell),
            _ => Err(GreeksError::ParseError {
                input: s.to_string(),
                reason: "action must be 'buy' or 'sell'".to_string(),
            }),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
        }
    }
}

/// One engine-ready leg; spot and rate are shared across the strategy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyLeg {
    pub strike_price: f64,
    /// Years to expiry
    pub time_to_expiry: f64,
    pub option_type: OptionType,
    /// Falls back to the configured default when absent
    pub volatility: Option<f64>,
    pub action: Action,
    pub quantity: u32,
}

impl StrategyLeg {
    pub fn new(
        strike_price: f64,
        time_to_expiry: f64,
        option_type: OptionType,
        action: Action,
        quantity: u32,
    ) -> Self {
        Self {
            strike_price,
            time_to_expiry,
            option_type,
            volatility: None,
            action,
            quantity,
        }
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Signed position size: `+quantity` for BUY, `-quantity` for SELL
    pub fn signed_quantity(&self) -> f64 {
        self.action.sign() * self.quantity as f64
    }
}

fn default_quantity() -> u32 {
    1
}

/// A leg as supplied by a caller, with a calendar expiration date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegSpec {
    pub strike_price: f64,
    pub expiration_date: NaiveDate,
    pub option_type: OptionType,
    pub action: Action,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub volatility: Option<f64>,
}

impl LegSpec {
    /// Resolve into an engine-ready leg given a precomputed time to expiry
    pub fn to_leg(&self, time_to_expiry: f64) -> GreeksResult<StrategyLeg> {
        validate_quantity(self.quantity)?;
        Ok(StrategyLeg {
            strike_price: self.strike_price,
            time_to_expiry,
            option_type: self.option_type,
            volatility: self.volatility,
            action: self.action,
            quantity: self.quantity,
        })
    }
}

/// Parse a JSON array of legs
///
/// # Errors
///
/// `ParseError` for malformed JSON or unknown field values,
/// `InvalidInput` for a zero quantity.
pub fn parse_legs(json: &str) -> GreeksResult<Vec<LegSpec>> {
    let legs: Vec<LegSpec> = serde_json::from_str(json).map_err(|e| GreeksError::ParseError {
        input: "legs".to_string(),
        reason: e.to_string(),
    })?;
    for leg in &legs {
        validate_quantity(leg.quantity)?;
    }
    Ok(legs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_sign_and_parsing() {
        assert_eq!(Action::Buy.sign(), 1.0);
        assert_eq!(Action::Sell.sign(), -1.0);
        assert_eq!("SELL".parse::<Action>().unwrap(), Action::Sell);
        assert_eq!("long".parse::<Action>().unwrap(), Action::Buy);
        assert!("hold".parse::<Action>().is_err());
    }

    #[test]
    fn test_signed_quantity() {
        let short = StrategyLeg::new(100.0, 0.5, OptionType::Put, Action::Sell, 3);
        assert_eq!(short.signed_quantity(), -3.0);
        let long = StrategyLeg::new(100.0, 0.5, OptionType::Call, Action::Buy, 2);
        assert_eq!(long.signed_quantity(), 2.0);
    }

    #[test]
    fn test_parse_legs_defaults() {
        let json = r#"[
            {"strike_price": 100, "expiration_date": "2024-12-20", "option_type": "call", "action": "buy"},
            {"strike_price": 110, "expiration_date": "2024-12-20", "option_type": "call", "action": "sell", "quantity": 2, "volatility": 0.3}
        ]"#;
        let legs = parse_legs(json).unwrap();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].quantity, 1);
        assert_eq!(legs[0].volatility, None);
        assert_eq!(legs[1].action, Action::Sell);
        assert_eq!(legs[1].quantity, 2);
        assert_eq!(legs[1].volatility, Some(0.3));
        assert_eq!(
            legs[1].expiration_date,
            NaiveDate::from_ymd_opt(2024, 12, 20).unwrap()
        );
    }

    #[test]
    fn test_parse_legs_rejects_bad_input() {
        assert!(matches!(
            parse_legs("not json"),
            Err(GreeksError::ParseError { .. })
        ));
        let bad_type = r#"[{"strike_price": 100, "expiration_date": "2024-12-20", "option_type": "straddle", "action": "buy"}]"#;
        assert!(matches!(
            parse_legs(bad_type),
            Err(GreeksError::ParseError { .. })
        ));
        let zero_qty = r#"[{"strike_price": 100, "expiration_date": "2024-12-20", "option_type": "put", "action": "buy", "quantity": 0}]"#;
        assert!(matches!(
            parse_legs(zero_qty),
            Err(GreeksError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_empty_leg_list_parses() {
        assert!(parse_legs("[]").unwrap().is_empty());
    }
}
