use std::io::{self, Write};

use pricing::{OptionParameters, PricingResult};
use risk::{Heatmap, HeatmapSet};
use serde::Serialize;

const LABEL_WIDTH: usize = 26;
const CELL_WIDTH: usize = 9;

/// Everything a run produces, as emitted by `--json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub parameters: &'a OptionParameters,
    pub result: &'a PricingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmaps: Option<&'a HeatmapSet>,
}

impl Report<'_> {
    pub fn write_json(&self, out: &mut impl Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }

    pub fn write_tables(&self, out: &mut impl Write) -> io::Result<()> {
        write_pricing_table(out, self.parameters, self.result)?;
        writeln!(out)?;
        write_greeks_table(out, self.result)?;
        if let Some(heatmaps) = self.heatmaps {
            for heatmap in heatmaps.iter() {
                writeln!(out)?;
                write_heatmap(out, heatmap)?;
            }
        }
        Ok(())
    }
}

fn write_row(out: &mut impl Write, label: &str, value: f64, precision: usize) -> io::Result<()> {
    writeln!(out, "{label:<LABEL_WIDTH$}{value:>14.precision$}")
}

pub fn write_pricing_table(
    out: &mut impl Write,
    params: &OptionParameters,
    result: &PricingResult,
) -> io::Result<()> {
    writeln!(out, "Black-Scholes {} option", params.kind)?;
    write_row(out, "Current Asset Price", params.asset_price, 2)?;
    write_row(out, "Strike Price", params.strike, 2)?;
    write_row(out, "Time to Maturity (Years)", params.time_to_expiration, 2)?;
    write_row(out, "Volatility (σ)", params.vola, 2)?;
    write_row(out, "Risk-Free Rate", params.rfr, 2)?;
    write_row(out, "Option Price", result.price, 2)
}

pub fn write_greeks_table(out: &mut impl Write, result: &PricingResult) -> io::Result<()> {
    writeln!(out, "Greeks")?;
    write_row(out, "Delta", result.delta, 4)?;
    write_row(out, "Gamma", result.gamma, 4)?;
    write_row(out, "Vega", result.vega, 4)?;
    write_row(out, "Theta", result.theta, 4)?;
    write_row(out, "Rho", result.rho, 4)
}

/// Volatilities down the side, spot prices across the top.
pub fn write_heatmap(out: &mut impl Write, heatmap: &Heatmap) -> io::Result<()> {
    writeln!(out, "{}", heatmap.title())?;
    write!(out, "{:>CELL_WIDTH$}", "vol\\spot")?;
    for spot in heatmap.spots() {
        write!(out, "{spot:>CELL_WIDTH$.2}")?;
    }
    writeln!(out)?;

    for (vola, row) in heatmap.volatilities().iter().zip(heatmap.values().rows()) {
        write!(out, "{vola:>CELL_WIDTH$.2}")?;
        for value in row {
            write!(out, "{value:>CELL_WIDTH$.2}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
