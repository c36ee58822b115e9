mod black_scholes;

pub use black_scholes::{
    cdf, discount_factor, intrinsic_value, pdf, price, BlackScholesMerton, OptionPricer,
};
