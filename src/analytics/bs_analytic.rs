// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes Greeks for European options
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model the underlying follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! Every sensitivity below is expressed through
//! ```text
//! d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
//! d₂ = d₁ - σ√T
//! ```
//! and the standard normal CDF Φ and PDF φ.
//!
//! # Reporting conventions
//!
//! - Theta is decay per calendar day (annual theta / 365)
//! - Vega is per 1 percentage point of volatility (∂V/∂σ / 100)
//! - Rho is per 1 percentage point of rate (∂V/∂r / 100)
//! - [`compute_greeks`] rounds every sensitivity to 4 decimal places
//!
//! # Expiry boundary
//!
//! For `time_to_expiry <= 0` the engine returns the immediate-payoff
//! Greeks: delta is the exercise indicator (1 / -1 / 0) and the remaining
//! sensitivities are zero. Inputs are validated before that short-circuit.

use crate::error::{validation::*, GreeksError, GreeksResult};
use crate::math_utils::{norm_cdf, norm_pdf, round_to};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Annualized risk-free rate used when the caller supplies none
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.05;

/// Annualized volatility used when neither caller nor market supplies one
pub const DEFAULT_VOLATILITY: f64 = 0.25;

/// Day count for theta and for converting calendar days to years
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Decimal places of every reported sensitivity
pub const GREEKS_DECIMALS: i32 = 4;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl FromStr for OptionType {
    type Err = GreeksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(GreeksError::ParseError {
                input: s.to_string(),
                reason: "option type must be 'call' or 'put'".to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "CALL"),
            OptionType::Put => write!(f, "PUT"),
        }
    }
}

bitflags! {
    /// Selects which sensitivities a report renders or an aggregation sums
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GreeksConfig: u32 {
        const NONE  = 0;
        const DELTA = 1 << 0;
        const GAMMA = 1 << 1;
        const THETA = 1 << 2;
        const VEGA  = 1 << 3;
        const RHO   = 1 << 4;
        /// The four fields reported for a net strategy position
        const NET = Self::DELTA.bits() | Self::GAMMA.bits() | Self::THETA.bits() | Self::VEGA.bits();
    }
}

impl Default for GreeksConfig {
    fn default() -> Self {
        GreeksConfig::all()
    }
}

/// Inputs of a single Black-Scholes evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionParameters {
    pub spot_price: f64,
    pub strike_price: f64,
    /// Years to expiry; zero or negative means expired
    pub time_to_expiry: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    pub option_type: OptionType,
}

impl OptionParameters {
    /// Parameters with the default rate (5%) and volatility (25%)
    pub fn new(
        spot_price: f64,
        strike_price: f64,
        time_to_expiry: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot_price,
            strike_price,
            time_to_expiry,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            volatility: DEFAULT_VOLATILITY,
            option_type,
        }
    }

    pub fn with_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Validate the parameters
    pub fn validate(&self) -> GreeksResult<()> {
        validate_positive("spot_price", self.spot_price)?;
        validate_positive("strike_price", self.strike_price)?;
        validate_positive("volatility", self.volatility)?;
        validate_finite("risk_free_rate", self.risk_free_rate)?;
        validate_finite("time_to_expiry", self.time_to_expiry)?;
        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        self.time_to_expiry <= 0.0
    }
}

/// Black-Scholes sensitivities plus the volatility they were computed with
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: ∂V/∂S
    pub delta: f64,
    /// Gamma: ∂²V/∂S²
    pub gamma: f64,
    /// Theta: per calendar day
    pub theta: f64,
    /// Vega: per 1% volatility move
    pub vega: f64,
    /// Rho: per 1% rate move
    pub rho: f64,
    /// Volatility used for the evaluation
    pub implied_volatility: f64,
}

impl Greeks {
    /// Round every sensitivity; `implied_volatility` is echoed untouched
    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            delta: round_to(self.delta, decimals),
            gamma: round_to(self.gamma, decimals),
            theta: round_to(self.theta, decimals),
            vega: round_to(self.vega, decimals),
            rho: round_to(self.rho, decimals),
            implied_volatility: self.implied_volatility,
        }
    }
}

/// Black-Scholes d₁ and d₂
///
/// Requires `t > 0` and `sigma > 0`.
pub fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let sigma_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    (d1, d1 - sigma_sqrt_t)
}

/// Intermediate terms shared by every sensitivity of one evaluation
struct BsTerms {
    s: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    sqrt_t: f64,
    d1: f64,
    d2: f64,
    pdf_d1: f64,
    /// e^(-rT)
    discount: f64,
}

impl BsTerms {
    fn new(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> Self {
        let (d1, d2) = d1_d2(s, k, r, sigma, t);
        Self {
            s,
            k,
            r,
            sigma,
            t,
            sqrt_t: t.sqrt(),
            d1,
            d2,
            pdf_d1: norm_pdf(d1),
            discount: (-r * t).exp(),
        }
    }

    fn delta(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => norm_cdf(self.d1),
            OptionType::Put => norm_cdf(self.d1) - 1.0,
        }
    }

    fn gamma(&self) -> f64 {
        self.pdf_d1 / (self.s * self.sigma * self.sqrt_t)
    }

    fn vega(&self) -> f64 {
        self.s * self.pdf_d1 * self.sqrt_t / 100.0
    }

    fn theta(&self, option_type: OptionType) -> f64 {
        let decay = -self.s * self.pdf_d1 * self.sigma / (2.0 * self.sqrt_t);
        let carry = self.r * self.k * self.discount;
        let annual = match option_type {
            OptionType::Call => decay - carry * norm_cdf(self.d2),
            OptionType::Put => decay + carry * norm_cdf(-self.d2),
        };
        annual / DAYS_PER_YEAR
    }

    fn rho(&self, option_type: OptionType) -> f64 {
        let discounted = self.k * self.t * self.discount;
        match option_type {
            OptionType::Call => discounted * norm_cdf(self.d2) / 100.0,
            OptionType::Put => -discounted * norm_cdf(-self.d2) / 100.0,
        }
    }
}

/// Black-Scholes Delta (∂V/∂S)
///
/// # Formula
/// ```text
/// Δ_call = Φ(d₁)
/// Δ_put  = Φ(d₁) - 1
/// ```
pub fn bs_delta(s: f64, k: f64, r: f64, sigma: f64, t: f64, option_type: OptionType) -> f64 {
    BsTerms::new(s, k, r, sigma, t).delta(option_type)
}

/// Black-Scholes Gamma (∂²V/∂S²), identical for calls and puts
///
/// # Formula
/// ```text
/// Γ = φ(d₁) / (S * σ * √T)
/// ```
pub fn bs_gamma(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    BsTerms::new(s, k, r, sigma, t).gamma()
}

/// Black-Scholes Vega per 1% volatility move, identical for calls and puts
///
/// # Formula
/// ```text
/// ν = S * φ(d₁) * √T / 100
/// ```
pub fn bs_vega(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    BsTerms::new(s, k, r, sigma, t).vega()
}

/// Black-Scholes Theta per calendar day
///
/// # Formula
/// ```text
/// Θ_call = [-S*φ(d₁)*σ/(2√T) - r*K*e^(-rT)*Φ(d₂)]  / 365
/// Θ_put  = [-S*φ(d₁)*σ/(2√T) + r*K*e^(-rT)*Φ(-d₂)] / 365
/// ```
pub fn bs_theta(s: f64, k: f64, r: f64, sigma: f64, t: f64, option_type: OptionType) -> f64 {
    BsTerms::new(s, k, r, sigma, t).theta(option_type)
}

/// Black-Scholes Rho per 1% rate move
///
/// # Formula
/// ```text
/// ρ_call =  K * T * e^(-rT) * Φ(d₂)  / 100
/// ρ_put  = -K * T * e^(-rT) * Φ(-d₂) / 100
/// ```
pub fn bs_rho(s: f64, k: f64, r: f64, sigma: f64, t: f64, option_type: OptionType) -> f64 {
    BsTerms::new(s, k, r, sigma, t).rho(option_type)
}

/// Greeks at or after expiry: exercise indicator delta, everything else flat
fn expired_greeks(params: &OptionParameters) -> Greeks {
    let delta = match params.option_type {
        OptionType::Call if params.spot_price > params.strike_price => 1.0,
        OptionType::Put if params.spot_price < params.strike_price => -1.0,
        _ => 0.0,
    };
    Greeks {
        delta,
        implied_volatility: params.volatility,
        ..Greeks::default()
    }
}

/// Full-precision Greeks
///
/// # Errors
///
/// Returns `GreeksError::InvalidInput` for non-positive spot, strike or
/// volatility and for non-finite rate or time.
pub fn compute_raw_greeks(params: &OptionParameters) -> GreeksResult<Greeks> {
    params.validate()?;
    if params.is_expired() {
        return Ok(expired_greeks(params));
    }

    let terms = BsTerms::new(
        params.spot_price,
        params.strike_price,
        params.risk_free_rate,
        params.volatility,
        params.time_to_expiry,
    );
    let option_type = params.option_type;

    Ok(Greeks {
        delta: terms.delta(option_type),
        gamma: terms.gamma(),
        theta: terms.theta(option_type),
        vega: terms.vega(),
        rho: terms.rho(option_type),
        implied_volatility: params.volatility,
    })
}

/// Black-Scholes Greeks rounded to 4 decimal places
///
/// Deterministic: identical parameters always give bit-identical output.
pub fn compute_greeks(params: &OptionParameters) -> GreeksResult<Greeks> {
    compute_raw_greeks(params).map(|g| g.rounded(GREEKS_DECIMALS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm(option_type: OptionType) -> OptionParameters {
        OptionParameters::new(150.0, 150.0, 0.25, option_type)
    }

    #[test]
    fn test_option_type_parsing() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("PUT".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!(" Call ".parse::<OptionType>().unwrap(), OptionType::Call);
        assert!("straddle".parse::<OptionType>().is_err());
        assert_eq!(OptionType::Put.to_string(), "PUT");
    }

    #[test]
    fn test_defaults() {
        let p = atm(OptionType::Call);
        assert_eq!(p.risk_free_rate, 0.05);
        assert_eq!(p.volatility, 0.25);
        let p = p.with_rate(0.03).with_volatility(0.4);
        assert_eq!(p.risk_free_rate, 0.03);
        assert_eq!(p.volatility, 0.4);
    }

    #[test]
    fn test_closed_forms_match_engine() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let p = OptionParameters::new(100.0, 110.0, 0.5, option_type)
                .with_rate(0.03)
                .with_volatility(0.3);
            let g = compute_raw_greeks(&p).unwrap();
            let (s, k, r, v, t) = (100.0, 110.0, 0.03, 0.3, 0.5);
            assert!((g.delta - bs_delta(s, k, r, v, t, option_type)).abs() < 1e-14);
            assert!((g.gamma - bs_gamma(s, k, r, v, t)).abs() < 1e-14);
            assert!((g.theta - bs_theta(s, k, r, v, t, option_type)).abs() < 1e-14);
            assert!((g.vega - bs_vega(s, k, r, v, t)).abs() < 1e-14);
            assert!((g.rho - bs_rho(s, k, r, v, t, option_type)).abs() < 1e-14);
        }
    }

    #[test]
    fn test_rounding_to_four_decimals() {
        let g = compute_greeks(&atm(OptionType::Call)).unwrap();
        for value in [g.delta, g.gamma, g.theta, g.vega, g.rho] {
            assert!((value * 1e4 - (value * 1e4).round()).abs() < 1e-6);
        }
        assert_eq!(g.implied_volatility, 0.25);
    }

    #[test]
    fn test_expired_call_and_put() {
        let itm_call = OptionParameters::new(160.0, 150.0, 0.0, OptionType::Call);
        let g = compute_greeks(&itm_call).unwrap();
        assert_eq!(g.delta, 1.0);
        assert_eq!((g.gamma, g.theta, g.vega, g.rho), (0.0, 0.0, 0.0, 0.0));

        let otm_call = OptionParameters::new(140.0, 150.0, -0.1, OptionType::Call);
        assert_eq!(compute_greeks(&otm_call).unwrap().delta, 0.0);

        let itm_put = OptionParameters::new(140.0, 150.0, 0.0, OptionType::Put);
        assert_eq!(compute_greeks(&itm_put).unwrap().delta, -1.0);

        let otm_put = OptionParameters::new(160.0, 150.0, -1.0, OptionType::Put);
        assert_eq!(compute_greeks(&otm_put).unwrap().delta, 0.0);

        let atm_put = OptionParameters::new(150.0, 150.0, 0.0, OptionType::Put)
            .with_volatility(0.4);
        let g = compute_greeks(&atm_put).unwrap();
        assert_eq!(g.delta, 0.0);
        assert_eq!(g.implied_volatility, 0.4);
    }

    #[test]
    fn test_invalid_inputs_rejected_even_when_expired() {
        let bad_spot = OptionParameters::new(0.0, 150.0, 0.25, OptionType::Call);
        assert!(matches!(
            compute_greeks(&bad_spot),
            Err(GreeksError::InvalidInput { ref parameter, .. }) if parameter == "spot_price"
        ));

        let bad_strike = OptionParameters::new(150.0, -5.0, 0.0, OptionType::Put);
        assert!(matches!(
            compute_greeks(&bad_strike),
            Err(GreeksError::InvalidInput { ref parameter, .. }) if parameter == "strike_price"
        ));

        let bad_vol = atm(OptionType::Call).with_volatility(0.0);
        assert!(compute_greeks(&bad_vol).is_err());

        let nan_time = OptionParameters::new(150.0, 150.0, f64::NAN, OptionType::Call);
        assert!(compute_greeks(&nan_time).is_err());

        let inf_rate = atm(OptionType::Put).with_rate(f64::INFINITY);
        assert!(compute_greeks(&inf_rate).is_err());
    }

    #[test]
    fn test_greeks_config_net_mask() {
        assert!(GreeksConfig::NET.contains(GreeksConfig::DELTA | GreeksConfig::VEGA));
        assert!(!GreeksConfig::NET.contains(GreeksConfig::RHO));
        assert!(GreeksConfig::default().contains(GreeksConfig::RHO));
    }
}
