//! Spot / volatility scenario grids and the price and P&L heatmaps swept over them.

pub mod error;
pub mod grid;
pub mod heatmap;

pub use error::RiskError;
pub use grid::{GridAxis, GridBounds, ScenarioGrid};
pub use heatmap::{Heatmap, HeatmapMetric, HeatmapSet, ParseSideError, Side};
