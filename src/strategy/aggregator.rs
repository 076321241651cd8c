// src/strategy/aggregator.rs
//! Net Greeks of a multi-leg strategy
//!
//! # Aggregation
//!
//! ```text
//! net_x = Σ sign(action_i) * quantity_i * x_i      x ∈ {Δ, Γ, Θ, ν, (ρ)}
//! ```
//!
//! Per-leg Greeks come from the engine already rounded to 4 decimals; the
//! sums are rounded again. Leg evaluation is independent, so large
//! strategies are evaluated with Rayon. The reduction always runs in leg
//! order, which keeps parallel and sequential results bit-identical.

use crate::analytics::bs_analytic::{
    compute_greeks, Greeks, GreeksConfig, OptionParameters, DEFAULT_RISK_FREE_RATE,
    DEFAULT_VOLATILITY, GREEKS_DECIMALS,
};
use crate::error::{validation::*, GreeksResult};
use crate::math_utils::round_to;
use crate::strategy::legs::{Action, StrategyLeg};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Signed, quantity-weighted sum of per-leg Greeks
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetGreeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    /// Only summed when `GreeksConfig::RHO` is requested
    pub rho: Option<f64>,
    /// Number of legs aggregated
    pub legs: usize,
}

impl NetGreeks {
    fn accumulate(&mut self, greeks: &Greeks, signed_quantity: f64, mask: GreeksConfig) {
        if mask.contains(GreeksConfig::DELTA) {
            self.delta += greeks.delta * signed_quantity;
        }
        if mask.contains(GreeksConfig::GAMMA) {
            self.gamma += greeks.gamma * signed_quantity;
        }
        if mask.contains(GreeksConfig::THETA) {
            self.theta += greeks.theta * signed_quantity;
        }
        if mask.contains(GreeksConfig::VEGA) {
            self.vega += greeks.vega * signed_quantity;
        }
        if mask.contains(GreeksConfig::RHO) {
            *self.rho.get_or_insert(0.0) += greeks.rho * signed_quantity;
        }
        self.legs += 1;
    }

    fn rounded(mut self, decimals: i32) -> Self {
        self.delta = round_to(self.delta, decimals);
        self.gamma = round_to(self.gamma, decimals);
        self.theta = round_to(self.theta, decimals);
        self.vega = round_to(self.vega, decimals);
        self.rho = self.rho.map(|rho| round_to(rho, decimals));
        self
    }
}

/// Aggregation settings shared by every leg of a strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateConfig {
    /// Greeks to sum; fields outside the mask stay zero
    pub greeks: GreeksConfig,
    pub risk_free_rate: f64,
    /// Volatility for legs that carry none
    pub default_volatility: f64,
    /// Strategies with at least this many legs are evaluated in parallel
    pub parallel_threshold: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            greeks: GreeksConfig::NET,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            default_volatility: DEFAULT_VOLATILITY,
            parallel_threshold: 64,
        }
    }
}

impl AggregateConfig {
    pub fn validate(&self) -> GreeksResult<()> {
        validate_finite("risk_free_rate", self.risk_free_rate)?;
        validate_positive("default_volatility", self.default_volatility)?;
        Ok(())
    }

    fn leg_parameters(&self, leg: &StrategyLeg, spot_price: f64) -> OptionParameters {
        OptionParameters {
            spot_price,
            strike_price: leg.strike_price,
            time_to_expiry: leg.time_to_expiry,
            risk_free_rate: self.risk_free_rate,
            volatility: leg.volatility.unwrap_or(self.default_volatility),
            option_type: leg.option_type,
        }
    }
}

/// Net Greeks with default settings (r = 5%, σ = 25%, Δ/Γ/Θ/ν)
pub fn aggregate(legs: &[StrategyLeg], spot_price: f64) -> GreeksResult<NetGreeks> {
    aggregate_with(legs, spot_price, &AggregateConfig::default())
}

/// Net Greeks of `legs` evaluated at a shared spot price
///
/// An empty strategy yields all-zero Greeks.
///
/// # Errors
///
/// Returns `GreeksError::InvalidInput` for a non-positive spot even when
/// `legs` is empty. Otherwise the first leg (in input order) with a zero
/// quantity or invalid parameters aborts the aggregation; no partial
/// result is returned.
pub fn aggregate_with(
    legs: &[StrategyLeg],
    spot_price: f64,
    cfg: &AggregateConfig,
) -> GreeksResult<NetGreeks> {
    cfg.validate()?;
    validate_positive("spot_price", spot_price)?;

    let evaluate = |leg: &StrategyLeg| {
        validate_quantity(leg.quantity)?;
        compute_greeks(&cfg.leg_parameters(leg, spot_price))
            .map(|greeks| (leg.signed_quantity(), greeks))
    };

    // Ordered collection keeps the reduction deterministic
    let per_leg: Vec<GreeksResult<(f64, Greeks)>> = if legs.len() >= cfg.parallel_threshold {
        legs.par_iter().map(evaluate).collect()
    } else {
        legs.iter().map(evaluate).collect()
    };

    let mut net = NetGreeks::default();
    for result in per_leg {
        let (signed_quantity, greeks) = result?;
        net.accumulate(&greeks, signed_quantity, cfg.greeks);
    }
    Ok(net.rounded(GREEKS_DECIMALS))
}

/// Net Greeks from already-computed per-leg Greeks
///
/// # Errors
///
/// Returns `GreeksError::InvalidInput` if any position has a zero quantity.
pub fn aggregate_greeks(
    positions: &[(Action, u32, Greeks)],
    mask: GreeksConfig,
) -> GreeksResult<NetGreeks> {
    let mut net = NetGreeks::default();
    for (action, quantity, greeks) in positions {
        validate_quantity(*quantity)?;
        net.accumulate(greeks, action.sign() * *quantity as f64, mask);
    }
    Ok(net.rounded(GREEKS_DECIMALS))
}
