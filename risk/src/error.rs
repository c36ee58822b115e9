use pricing::PricingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("invalid scenario grid: {0}")]
    InvalidGrid(String),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error("heatmap shape mismatch: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl RiskError {
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }
}
