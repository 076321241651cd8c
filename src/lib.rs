//! # fast-greeks: Closed-Form Black-Scholes Greeks
//!
//! A Rust library computing the Black-Scholes sensitivities of European
//! options and the net Greeks of multi-leg option strategies.
//!
//! ## Key Features
//!
//! - **Closed-Form Greeks**: Delta, Gamma, Theta (per day), Vega and Rho (per 1%)
//! - **Deterministic**: Pure functions, results rounded to 4 decimal places
//! - **Explicit Expiry Policy**: Expired options return immediate-payoff Greeks
//! - **Strategy Aggregation**: Signed, quantity-weighted net Greeks, parallel with Rayon
//! - **Injected Market Data**: Spot and implied volatility come from a `MarketData` implementation
//!
//! ## Quick Start
//!
//! ```rust
//! use fast_greeks::analytics::bs_analytic::{compute_greeks, OptionParameters, OptionType};
//!
//! // At-the-money call, 3 months, r = 5%, σ = 25%
//! let params = OptionParameters::new(150.0, 150.0, 0.25, OptionType::Call);
//!
//! let greeks = compute_greeks(&params).expect("Valid parameters");
//! assert_eq!(greeks.delta, 0.5645);
//! println!("Delta: {:.4}, Vega: {:.4}", greeks.delta, greeks.vega);
//! ```
//!
//! ## Strategies
//!
//! ```rust
//! use fast_greeks::analytics::bs_analytic::OptionType;
//! use fast_greeks::strategy::{aggregate, Action, StrategyLeg};
//!
//! // Bull call spread
//! let legs = [
//!     StrategyLeg::new(150.0, 0.25, OptionType::Call, Action::Buy, 1),
//!     StrategyLeg::new(160.0, 0.25, OptionType::Call, Action::Sell, 1),
//! ];
//! let net = aggregate(&legs, 150.0).expect("Valid legs");
//! assert!(net.delta > 0.0);
//! ```

// Module declarations
pub mod error;
pub mod math_utils;
pub mod analytics;
pub mod strategy;
pub mod expiry;
pub mod market;
pub mod config;
pub mod analyzer;
pub mod output;

// Re-export commonly used types for convenience
pub use analytics::bs_analytic::{compute_greeks, Greeks, OptionParameters, OptionType};
pub use error::{GreeksError, GreeksResult};
pub use strategy::{aggregate, NetGreeks, StrategyLeg};
