// src/analyzer.rs
//! Request-level analytics on top of the pure engine
//!
//! The analyzer resolves the market inputs (spot, volatility), turns
//! calendar expirations into year fractions, and delegates to
//! [`compute_greeks`] and [`aggregate_with`]. The market-data accessor and
//! the configuration are injected at construction.

use crate::analytics::bs_analytic::{compute_greeks, Greeks, OptionParameters, OptionType};
use crate::config::EngineConfig;
use crate::error::{validation::*, GreeksResult};
use crate::expiry::{days_to_expiry, time_to_expiry_years};
use crate::market::{MarketData, Quote};
use crate::math_utils::round_to;
use crate::strategy::{aggregate_with, LegSpec, NetGreeks, StrategyLeg};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Greeks of one contract together with the inputs they were computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreeksReport {
    pub symbol: String,
    pub strike_price: f64,
    pub expiration_date: NaiveDate,
    pub option_type: OptionType,
    pub spot_price: f64,
    /// Rounded to 4 decimals
    pub time_to_expiry_years: f64,
    pub time_to_expiry_days: i64,
    pub greeks: Greeks,
}

/// Net Greeks of a named multi-leg strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyReport {
    pub strategy_type: String,
    pub symbol: String,
    pub spot_price: f64,
    pub legs: Vec<LegSpec>,
    pub net: NetGreeks,
}

pub struct OptionsAnalyzer<M: MarketData> {
    market: M,
    config: EngineConfig,
}

impl<M: MarketData> OptionsAnalyzer<M> {
    pub fn new(market: M, config: EngineConfig) -> GreeksResult<Self> {
        config.validate()?;
        Ok(Self { market, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn market(&self) -> &M {
        &self.market
    }

    fn spot_quote(&self, symbol: &str) -> GreeksResult<Quote> {
        let quote = self.market.quote(symbol)?;
        validate_positive("spot_price", quote.price)?;
        debug!(symbol, spot = quote.price, iv = ?quote.implied_volatility, "resolved quote");
        Ok(quote)
    }

    /// Caller override first, then the market's implied volatility, then the default.
    /// Single contracts only; strategy legs never read the quote's volatility.
    fn resolve_volatility(&self, explicit: Option<f64>, quote: &Quote) -> f64 {
        explicit
            .or(quote.implied_volatility)
            .unwrap_or(self.config.default_volatility)
    }

    /// Greeks of a single listed contract as of `today`
    pub fn calculate_option_greeks(
        &self,
        symbol: &str,
        strike_price: f64,
        expiration_date: NaiveDate,
        option_type: OptionType,
        volatility: Option<f64>,
        today: NaiveDate,
    ) -> GreeksResult<GreeksReport> {
        let quote = self.spot_quote(symbol)?;
        let time_to_expiry =
            time_to_expiry_years(expiration_date, today, self.config.days_per_year);

        let params = OptionParameters {
            spot_price: quote.price,
            strike_price,
            time_to_expiry,
            risk_free_rate: self.config.risk_free_rate,
            volatility: self.resolve_volatility(volatility, &quote),
            option_type,
        };
        let greeks = compute_greeks(&params)?;

        info!(
            symbol = %symbol.to_ascii_uppercase(),
            strike = strike_price,
            %option_type,
            t = time_to_expiry,
            delta = greeks.delta,
            "computed option greeks"
        );

        Ok(GreeksReport {
            symbol: symbol.trim().to_ascii_uppercase(),
            strike_price,
            expiration_date,
            option_type,
            spot_price: quote.price,
            time_to_expiry_years: round_to(time_to_expiry, 4),
            time_to_expiry_days: days_to_expiry(expiration_date, today),
            greeks,
        })
    }

    /// Net Greeks of a strategy on `symbol` as of `today`
    pub fn analyze_strategy(
        &self,
        strategy_type: &str,
        symbol: &str,
        legs: &[LegSpec],
        today: NaiveDate,
    ) -> GreeksResult<StrategyReport> {
        let quote = self.spot_quote(symbol)?;

        let resolved = legs
            .iter()
            .map(|spec| {
                spec.to_leg(time_to_expiry_years(
                    spec.expiration_date,
                    today,
                    self.config.days_per_year,
                ))
            })
            .collect::<GreeksResult<Vec<StrategyLeg>>>()?;

        // Legs without their own volatility use the configured default
        let net = aggregate_with(&resolved, quote.price, &self.config.aggregate_config())?;

        info!(
            strategy = strategy_type,
            symbol = %symbol.to_ascii_uppercase(),
            legs = net.legs,
            net_delta = net.delta,
            "analyzed strategy"
        );

        Ok(StrategyReport {
            strategy_type: strategy_type.to_string(),
            symbol: symbol.trim().to_ascii_uppercase(),
            spot_price: quote.price,
            legs: legs.to_vec(),
            net,
        })
    }
}
