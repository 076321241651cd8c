// src/market.rs
//! Market-data seam
//!
//! The analyzer never reaches for a process-wide client. Whatever supplies
//! spot prices (a live feed, a cache, a test fixture) implements
//! [`MarketData`] and is handed to [`crate::analyzer::OptionsAnalyzer`].

use crate::error::{validation::*, GreeksError, GreeksResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Latest numbers known for an underlying
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    #[serde(default)]
    pub implied_volatility: Option<f64>,
}

impl Quote {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            implied_volatility: None,
        }
    }

    pub fn with_implied_volatility(mut self, implied_volatility: f64) -> Self {
        self.implied_volatility = Some(implied_volatility);
        self
    }
}

/// Source of spot prices and optional implied volatility per symbol
pub trait MarketData {
    fn quote(&self, symbol: &str) -> GreeksResult<Quote>;
}

impl<M: MarketData + ?Sized> MarketData for &M {
    fn quote(&self, symbol: &str) -> GreeksResult<Quote> {
        (**self).quote(symbol)
    }
}

/// In-memory quotes keyed by upper-cased symbol
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticMarketData {
    quotes: HashMap<String, Quote>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a quote
    pub fn insert(&mut self, symbol: &str, quote: Quote) -> GreeksResult<()> {
        validate_positive("price", quote.price)?;
        if let Some(iv) = quote.implied_volatility {
            validate_positive("implied_volatility", iv)?;
        }
        self.quotes.insert(symbol.trim().to_ascii_uppercase(), quote);
        Ok(())
    }

    pub fn with_quote(mut self, symbol: &str, quote: Quote) -> GreeksResult<Self> {
        self.insert(symbol, quote)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl MarketData for StaticMarketData {
    fn quote(&self, symbol: &str) -> GreeksResult<Quote> {
        let key = symbol.trim().to_ascii_uppercase();
        self.quotes
            .get(&key)
            .copied()
            .ok_or_else(|| GreeksError::MarketData {
                symbol: key,
                reason: "no quote available".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_case_insensitive() {
        let market = StaticMarketData::new()
            .with_quote("aapl", Quote::new(190.5))
            .unwrap();
        assert_eq!(market.quote("AAPL").unwrap().price, 190.5);
        assert_eq!(market.quote(" aapl ").unwrap().price, 190.5);
        assert_eq!(market.len(), 1);
    }

    #[test]
    fn test_unknown_symbol() {
        let market = StaticMarketData::new();
        assert!(market.is_empty());
        match market.quote("tsla") {
            Err(GreeksError::MarketData { symbol, .. }) => assert_eq!(symbol, "TSLA"),
            other => panic!("expected market data error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_positive_quotes() {
        let mut market = StaticMarketData::new();
        assert!(market.insert("SPY", Quote::new(0.0)).is_err());
        assert!(market
            .insert("SPY", Quote::new(500.0).with_implied_volatility(-0.2))
            .is_err());
        assert!(market.is_empty());
    }

    #[test]
    fn test_reference_implements_trait() {
        fn spot<M: MarketData>(m: M) -> f64 {
            m.quote("QQQ").unwrap().price
        }
        let market = StaticMarketData::new()
            .with_quote("QQQ", Quote::new(480.0))
            .unwrap();
        assert_eq!(spot(&market), 480.0);
    }
}
