use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("invalid input: {parameter} = {value} is outside the admissible range")]
    InvalidInput { parameter: &'static str, value: f64 },
}

impl PricingError {
    pub fn invalid_input(parameter: &'static str, value: f64) -> Self {
        Self::InvalidInput { parameter, value }
    }
}
