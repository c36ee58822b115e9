use crate::common::models::{OptionParameters, OptionType, PricingResult};
use crate::error::PricingError;
use probability::distribution::{Continuous, Distribution, Gaussian};
use tracing::trace;

/// Standard normal cumulative distribution function.
pub fn cdf(d: f64) -> f64 {
    let normal = Gaussian::new(0.0, 1.0);
    normal.distribution(d)
}

/// Standard normal density.
pub fn pdf(d: f64) -> f64 {
    let normal = Gaussian::new(0.0, 1.0);
    normal.density(d)
}

pub fn discount_factor(rfr: f64, time_to_expiration: f64) -> f64 {
    (-rfr * time_to_expiration).exp()
}

/// Payoff if exercised now: max(S - K, 0) for calls, max(K - S, 0) for puts.
pub fn intrinsic_value(dp: &OptionParameters) -> f64 {
    match dp.kind {
        OptionType::Call => (dp.asset_price - dp.strike).max(0.0),
        OptionType::Put => (dp.strike - dp.asset_price).max(0.0),
    }
}

pub trait OptionPricer {
    fn price(&self, params: &OptionParameters) -> Result<PricingResult, PricingError>;
}

/// European Put and Call option prices and Greeks for stocks.
/// https://en.wikipedia.org/wiki/Black-Scholes_model
#[derive(Clone, Copy, Debug, Default)]
pub struct BlackScholesMerton;

impl OptionPricer for BlackScholesMerton {
    fn price(&self, dp: &OptionParameters) -> Result<PricingResult, PricingError> {
        dp.validate()?;

        let sqrt_t = dp.time_to_expiration.sqrt();
        let sigma_exp = dp.vola * sqrt_t;
        let d1 = ((dp.asset_price / dp.strike).ln()
            + (dp.rfr + dp.vola.powi(2) / 2.0) * dp.time_to_expiration)
            / sigma_exp;
        let d2 = d1 - sigma_exp;

        let disc_strike = dp.strike * discount_factor(dp.rfr, dp.time_to_expiration);
        let density = pdf(d1);

        // identical for puts and calls
        let gamma = density / (dp.asset_price * sigma_exp);
        let vega = dp.asset_price * density * sqrt_t;
        let time_decay = -dp.asset_price * density * dp.vola / (2.0 * sqrt_t);

        let result = match dp.kind {
            OptionType::Call => PricingResult {
                price: cdf(d1) * dp.asset_price - cdf(d2) * disc_strike,
                delta: cdf(d1),
                gamma,
                theta: time_decay - dp.rfr * disc_strike * cdf(d2),
                vega,
                rho: dp.time_to_expiration * disc_strike * cdf(d2),
            },
            OptionType::Put => PricingResult {
                price: cdf(-d2) * disc_strike - cdf(-d1) * dp.asset_price,
                delta: cdf(d1) - 1.0,
                gamma,
                theta: time_decay + dp.rfr * disc_strike * cdf(-d2),
                vega,
                rho: -dp.time_to_expiration * disc_strike * cdf(-d2),
            },
        };

        if !disc_strike.is_finite() || !result.is_finite() {
            let (parameter, value) = if disc_strike.is_finite() {
                ("asset_price", dp.asset_price)
            } else {
                ("rfr", dp.rfr)
            };
            return Err(PricingError::invalid_input(parameter, value));
        }

        trace!(
            kind = %dp.kind,
            spot = dp.asset_price,
            vola = dp.vola,
            price = result.price,
            "priced option"
        );
        Ok(result)
    }
}

/// Price and Greeks of a European option, see [`BlackScholesMerton`].
pub fn price(params: &OptionParameters) -> Result<PricingResult, PricingError> {
    BlackScholesMerton.price(params)
}
