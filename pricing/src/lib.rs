//! Closed-form Black-Scholes prices and Greeks for European options.
//!
//! ```
//! use pricing::{price, OptionParameters};
//!
//! let params = OptionParameters::call(100.0, 100.0, 1.0, 0.05, 0.2);
//! let result = price(&params).unwrap();
//! assert!((result.price - 10.4506).abs() < 1e-4);
//! ```

pub mod analytic;
pub mod common;
pub mod error;

pub use analytic::{intrinsic_value, price, BlackScholesMerton, OptionPricer};
pub use common::models::{OptionParameters, OptionType, ParseOptionTypeError, PricingResult};
pub use error::PricingError;
