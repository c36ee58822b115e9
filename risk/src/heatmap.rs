use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2};
use pricing::{OptionParameters, OptionPricer, OptionType};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::RiskError;
use crate::grid::{GridBounds, ScenarioGrid};

/// Direction of the position a P&L heatmap is drawn for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Long,
    /// the option was written and the premium received
    #[default]
    Short,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown position side '{0}', expected 'long' or 'short'")]
pub struct ParseSideError(pub String);

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" | "buy" => Ok(Side::Long),
            "short" | "sell" => Ok(Side::Short),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

/// What each heatmap cell shows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "lowercase")]
pub enum HeatmapMetric {
    Price,
    PnL { premium: f64, side: Side },
}

impl HeatmapMetric {
    pub fn evaluate(&self, value: f64) -> f64 {
        match *self {
            HeatmapMetric::Price => value,
            HeatmapMetric::PnL { premium, side: Side::Long } => value - premium,
            HeatmapMetric::PnL { premium, side: Side::Short } => premium - value,
        }
    }

    fn title(&self, kind: OptionType) -> String {
        match self {
            HeatmapMetric::Price => kind.to_string(),
            HeatmapMetric::PnL { .. } => format!("{kind} P&L"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Heatmap {
    title: String,
    kind: OptionType,
    metric: HeatmapMetric,
    spots: Array1<f64>,
    volatilities: Array1<f64>,
    /// row i: volatilities[i], column j: spots[j]
    values: Array2<f64>,
}

impl Heatmap {
    /// Evaluates `metric` for `base` with spot and volatility replaced by every grid point.
    pub fn compute<P: OptionPricer>(
        pricer: &P,
        base: &OptionParameters,
        grid: &ScenarioGrid,
        metric: HeatmapMetric,
    ) -> Result<Self, RiskError> {
        let (rows, cols) = grid.shape();
        let mut cells = Vec::with_capacity(rows * cols);
        for &vola in grid.volatilities() {
            for &spot in grid.spots() {
                let scenario = base.with_spot(spot).with_volatility(vola);
                let result = pricer.price(&scenario)?;
                cells.push(metric.evaluate(result.price));
            }
        }
        let values = Array2::from_shape_vec((rows, cols), cells)?;

        let title = metric.title(base.kind);
        debug!(%title, rows, cols, "computed heatmap");
        Ok(Self {
            title,
            kind: base.kind,
            metric,
            spots: grid.spots().clone(),
            volatilities: grid.volatilities().clone(),
            values,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> OptionType {
        self.kind
    }

    pub fn metric(&self) -> HeatmapMetric {
        self.metric
    }

    pub fn spots(&self) -> &Array1<f64> {
        &self.spots
    }

    pub fn volatilities(&self) -> &Array1<f64> {
        &self.volatilities
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn value(&self, vola_idx: usize, spot_idx: usize) -> Option<f64> {
        self.values.get((vola_idx, spot_idx)).copied()
    }
}

/// Call and put price heatmaps, plus P&L heatmaps against the current premiums
/// when the current spot and volatility lie inside the grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeatmapSet {
    pub call: Heatmap,
    pub put: Heatmap,
    pub call_pnl: Option<Heatmap>,
    pub put_pnl: Option<Heatmap>,
}

impl HeatmapSet {
    pub fn compute<P: OptionPricer>(
        pricer: &P,
        base: &OptionParameters,
        bounds: &GridBounds,
        side: Side,
    ) -> Result<Self, RiskError> {
        let grid = ScenarioGrid::new(bounds)?;
        let call_base = base.with_kind(OptionType::Call);
        let put_base = base.with_kind(OptionType::Put);

        let call = Heatmap::compute(pricer, &call_base, &grid, HeatmapMetric::Price)?;
        let put = Heatmap::compute(pricer, &put_base, &grid, HeatmapMetric::Price)?;

        let (call_pnl, put_pnl) = if bounds.contains(base.asset_price, base.vola) {
            let call_premium = pricer.price(&call_base)?.price;
            let put_premium = pricer.price(&put_base)?.price;
            let pnl = |premium| HeatmapMetric::PnL { premium, side };
            (
                Some(Heatmap::compute(pricer, &call_base, &grid, pnl(call_premium))?),
                Some(Heatmap::compute(pricer, &put_base, &grid, pnl(put_premium))?),
            )
        } else {
            debug!(
                spot = base.asset_price,
                vola = base.vola,
                "current parameters outside grid, skipping P&L heatmaps"
            );
            (None, None)
        };

        Ok(Self {
            call,
            put,
            call_pnl,
            put_pnl,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Heatmap> {
        [Some(&self.call), Some(&self.put), self.call_pnl.as_ref(), self.put_pnl.as_ref()]
            .into_iter()
            .flatten()
    }
}
