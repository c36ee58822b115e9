use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RiskError;

const CENT_EPSILON: f64 = 1e-9;

/// Rounds up to the next cent. The epsilon keeps representation error
/// (0.1 * 100.0 = 10.000000000000002) from bumping exact cents.
fn round_up_to_cents(x: f64) -> f64 {
    (x * 100.0 - CENT_EPSILON).ceil() / 100.0
}

/// Ranges of the spot and volatility axes of a scenario grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub min_spot: f64,
    pub max_spot: f64,
    pub min_volatility: f64,
    pub max_volatility: f64,
    /// number of points on each axis
    pub steps: usize,
}

impl GridBounds {
    pub const DEFAULT_STEPS: usize = 10;
    pub const MAX_STEPS: usize = 1_000;

    /// Spot from 80% to 120% and volatility from 50% to 150% of the given values.
    pub fn around(spot: f64, vola: f64) -> Self {
        Self {
            min_spot: spot * 0.8,
            max_spot: spot * 1.2,
            min_volatility: vola * 0.5,
            max_volatility: vola * 1.5,
            steps: Self::DEFAULT_STEPS,
        }
    }

    pub fn contains(&self, spot: f64, vola: f64) -> bool {
        (self.min_spot..=self.max_spot).contains(&spot)
            && (self.min_volatility..=self.max_volatility).contains(&vola)
    }
}

/// Evenly spaced axis values, rounded up to two decimals.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridAxis {
    values: Array1<f64>,
}

impl GridAxis {
    pub fn linspace(min: f64, max: f64, steps: usize) -> Result<Self, RiskError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RiskError::invalid_grid(format!(
                "axis bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min > max {
            return Err(RiskError::invalid_grid(format!(
                "axis minimum {min} exceeds maximum {max}"
            )));
        }
        if steps == 0 {
            return Err(RiskError::invalid_grid("axis needs at least one step"));
        }
        let values = Array1::linspace(min, max, steps).mapv(round_up_to_cents);
        Ok(Self { values })
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn ensure_positive(&self, name: &str) -> Result<(), RiskError> {
        match self.values.iter().find(|v| **v <= 0.0) {
            Some(v) => Err(RiskError::invalid_grid(format!(
                "{name} axis must be strictly positive, got {v}"
            ))),
            None => Ok(()),
        }
    }
}

/// Spot prices along the columns, volatilities along the rows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioGrid {
    spots: GridAxis,
    volatilities: GridAxis,
}

impl ScenarioGrid {
    pub fn new(bounds: &GridBounds) -> Result<Self, RiskError> {
        if bounds.steps > GridBounds::MAX_STEPS {
            return Err(RiskError::invalid_grid(format!(
                "{} steps per axis exceeds the limit of {}",
                bounds.steps,
                GridBounds::MAX_STEPS
            )));
        }
        let spots = GridAxis::linspace(bounds.min_spot, bounds.max_spot, bounds.steps)?;
        let volatilities =
            GridAxis::linspace(bounds.min_volatility, bounds.max_volatility, bounds.steps)?;
        spots.ensure_positive("spot")?;
        volatilities.ensure_positive("volatility")?;

        debug!(
            steps = bounds.steps,
            min_spot = bounds.min_spot,
            max_spot = bounds.max_spot,
            min_volatility = bounds.min_volatility,
            max_volatility = bounds.max_volatility,
            "built scenario grid"
        );
        Ok(Self {
            spots,
            volatilities,
        })
    }

    pub fn spots(&self) -> &Array1<f64> {
        self.spots.values()
    }

    pub fn volatilities(&self) -> &Array1<f64> {
        self.volatilities.values()
    }

    /// (rows, columns) = (volatilities, spots)
    pub fn shape(&self) -> (usize, usize) {
        (self.volatilities.len(), self.spots.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn linspace_rounds_up_to_cents() {
        let axis = GridAxis::linspace(80.0, 120.0, 10).unwrap();
        assert_eq!(axis.len(), 10);
        assert_eq!(axis.values()[0], 80.0);
        assert_eq!(axis.values()[1], 84.45);
        assert_eq!(axis.values()[9], 120.0);

        let axis = GridAxis::linspace(0.1, 0.3, 3).unwrap();
        assert_approx_eq!(axis.values()[0], 0.1, 1e-12);
        assert_approx_eq!(axis.values()[1], 0.2, 1e-12);
    }

    #[test]
    fn single_step_axis() {
        let axis = GridAxis::linspace(42.0, 50.0, 1).unwrap();
        assert_eq!(axis.values().to_vec(), vec![42.0]);
    }

    #[test]
    fn invalid_axes() {
        assert!(matches!(
            GridAxis::linspace(2.0, 1.0, 10),
            Err(RiskError::InvalidGrid(_))
        ));
        assert!(GridAxis::linspace(1.0, 2.0, 0).is_err());
        assert!(GridAxis::linspace(f64::NAN, 2.0, 5).is_err());
        assert!(GridAxis::linspace(1.0, f64::INFINITY, 5).is_err());
    }

    #[test]
    fn default_bounds_around_spot_and_vola() {
        let bounds = GridBounds::around(100.0, 0.2);
        assert_approx_eq!(bounds.min_spot, 80.0, 1e-12);
        assert_approx_eq!(bounds.max_spot, 120.0, 1e-12);
        assert_approx_eq!(bounds.min_volatility, 0.1, 1e-12);
        assert_approx_eq!(bounds.max_volatility, 0.3, 1e-12);
        assert_eq!(bounds.steps, GridBounds::DEFAULT_STEPS);

        assert!(bounds.contains(100.0, 0.2));
        assert!(bounds.contains(80.0, 0.3));
        assert!(!bounds.contains(79.0, 0.2));
        assert!(!bounds.contains(100.0, 0.35));
    }

    #[test]
    fn grid_shape_and_positivity() {
        let grid = ScenarioGrid::new(&GridBounds::around(100.0, 0.2)).unwrap();
        assert_eq!(grid.shape(), (10, 10));
        assert_eq!(grid.spots()[0], 80.0);
        assert_eq!(grid.volatilities()[9], 0.3);

        let bounds = GridBounds {
            min_volatility: 0.0,
            ..GridBounds::around(100.0, 0.2)
        };
        assert!(matches!(
            ScenarioGrid::new(&bounds),
            Err(RiskError::InvalidGrid(_))
        ));
    }

    #[test]
    fn sub_cent_volatility_rounds_up_to_one_cent() {
        let grid = ScenarioGrid::new(&GridBounds::around(100.0, 0.008)).unwrap();
        assert_eq!(grid.volatilities()[0], 0.01);
        assert!(grid.volatilities().iter().all(|v| *v > 0.0));
    }

    #[test]
    fn too_many_steps() {
        let bounds = GridBounds {
            steps: 100_000_000,
            ..GridBounds::around(100.0, 0.2)
        };
        assert!(matches!(
            ScenarioGrid::new(&bounds),
            Err(RiskError::InvalidGrid(_))
        ));

        let bounds = GridBounds {
            steps: GridBounds::MAX_STEPS,
            ..GridBounds::around(100.0, 0.2)
        };
        assert_eq!(ScenarioGrid::new(&bounds).unwrap().shape(), (1_000, 1_000));
    }
}
