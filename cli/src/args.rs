use std::path::PathBuf;

use clap::Parser;
use pricing::OptionType;
use risk::Side;

/// Black-Scholes option price, Greeks and spot / volatility heatmaps
#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct Args {
    /// Current asset price
    #[arg(short, long)]
    pub spot: Option<f64>,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: Option<f64>,

    /// Time to maturity in years
    #[arg(short = 't', long)]
    pub expiry: Option<f64>,

    /// Annualized volatility, e.g. 0.2
    #[arg(short = 'v', long)]
    pub volatility: Option<f64>,

    /// Annualized risk-free interest rate, e.g. 0.05
    #[arg(short, long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Option type: call or put
    #[arg(long)]
    pub kind: Option<OptionType>,

    /// Lowest spot price of the heatmap grid
    #[arg(long)]
    pub min_spot: Option<f64>,

    /// Highest spot price of the heatmap grid
    #[arg(long)]
    pub max_spot: Option<f64>,

    /// Lowest volatility of the heatmap grid
    #[arg(long)]
    pub min_vol: Option<f64>,

    /// Highest volatility of the heatmap grid
    #[arg(long)]
    pub max_vol: Option<f64>,

    /// Number of grid points per axis
    #[arg(long)]
    pub steps: Option<usize>,

    /// Position the P&L heatmaps are drawn for: long or short
    #[arg(long)]
    pub side: Option<Side>,

    /// TOML file with [option] and [heatmap] tables
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print a single JSON document instead of tables
    #[arg(long)]
    pub json: bool,

    /// Skip the heatmaps
    #[arg(long)]
    pub no_heatmaps: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "bsm", "--spot", "120", "-k", "110", "--kind", "put", "--rate", "-0.01", "--side",
            "long", "--json",
        ])
        .unwrap();
        assert_eq!(args.spot, Some(120.0));
        assert_eq!(args.strike, Some(110.0));
        assert_eq!(args.kind, Some(OptionType::Put));
        assert_eq!(args.rate, Some(-0.01));
        assert_eq!(args.side, Some(Side::Long));
        assert!(args.json);
        assert!(!args.no_heatmaps);
        assert_eq!(args.volatility, None);
    }

    #[test]
    fn switches_default_to_off() {
        let args = Args::try_parse_from(["bsm"]).unwrap();
        assert!(!args.json);
        assert!(!args.no_heatmaps);
        assert!(Args::try_parse_from(["bsm", "--no-heatmaps"]).unwrap().no_heatmaps);
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(Args::try_parse_from(["bsm", "--kind", "swaption"]).is_err());
    }
}
