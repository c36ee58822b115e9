use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::PricingError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    #[default]
    Call,
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "CALL"),
            OptionType::Put => write!(f, "PUT"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown option type '{0}', expected 'call' or 'put'")]
pub struct ParseOptionTypeError(pub String);

impl FromStr for OptionType {
    type Err = ParseOptionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(ParseOptionTypeError(s.to_string())),
        }
    }
}

/// Inputs of a European option under Black-Scholes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionParameters {
    /// the asset's price at time t
    pub asset_price: f64,
    /// the strike or exercise price of the asset
    pub strike: f64,
    /// (T - t) in years, where T is the time of the option's expiration and t is the current time
    pub time_to_expiration: f64,
    /// the annualized risk-free interest rate
    pub rfr: f64,
    /// the annualized standard deviation of the stock's returns
    pub vola: f64,
    pub kind: OptionType,
}

impl OptionParameters {
    pub fn new(
        asset_price: f64,
        strike: f64,
        time_to_expiration: f64,
        rfr: f64,
        vola: f64,
        kind: OptionType,
    ) -> Self {
        Self {
            asset_price,
            strike,
            time_to_expiration,
            rfr,
            vola,
            kind,
        }
    }

    pub fn call(asset_price: f64, strike: f64, time_to_expiration: f64, rfr: f64, vola: f64) -> Self {
        Self::new(asset_price, strike, time_to_expiration, rfr, vola, OptionType::Call)
    }

    pub fn put(asset_price: f64, strike: f64, time_to_expiration: f64, rfr: f64, vola: f64) -> Self {
        Self::new(asset_price, strike, time_to_expiration, rfr, vola, OptionType::Put)
    }

    pub fn with_spot(self, asset_price: f64) -> Self {
        Self { asset_price, ..self }
    }

    pub fn with_volatility(self, vola: f64) -> Self {
        Self { vola, ..self }
    }

    pub fn with_kind(self, kind: OptionType) -> Self {
        Self { kind, ..self }
    }

    /// Checks that spot, strike, expiry and volatility are finite and strictly positive
    /// and that the rate is finite.
    pub fn validate(&self) -> Result<(), PricingError> {
        positive("asset_price", self.asset_price)?;
        positive("strike", self.strike)?;
        positive("time_to_expiration", self.time_to_expiration)?;
        positive("vola", self.vola)?;
        if !self.rfr.is_finite() {
            return Err(PricingError::invalid_input("rfr", self.rfr));
        }
        Ok(())
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid_input(parameter, value))
    }
}

/// Theoretical value and first order sensitivities (plus gamma) of a European option.
/// Theta is per year, vega per unit of volatility, rho per unit of rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

impl PricingResult {
    pub fn is_finite(&self) -> bool {
        [self.price, self.delta, self.gamma, self.theta, self.vega, self.rho]
            .iter()
            .all(|v| v.is_finite())
    }
}
