use std::fs;
use std::path::Path;

use anyhow::Context;
use pricing::{OptionParameters, OptionType};
use risk::{GridBounds, Side};
use serde::Deserialize;

use crate::args::Args;

pub const DEFAULT_SPOT: f64 = 100.0;
pub const DEFAULT_STRIKE: f64 = 100.0;
pub const DEFAULT_EXPIRY: f64 = 1.0;
pub const DEFAULT_VOLATILITY: f64 = 0.2;
pub const DEFAULT_RATE: f64 = 0.05;

/// Contents of the optional TOML config file. Every field may be omitted.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub option: OptionSection,
    pub heatmap: HeatmapSection,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionSection {
    pub spot: Option<f64>,
    pub strike: Option<f64>,
    pub expiry: Option<f64>,
    pub volatility: Option<f64>,
    pub rate: Option<f64>,
    pub kind: Option<OptionType>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatmapSection {
    pub enabled: Option<bool>,
    pub min_spot: Option<f64>,
    pub max_spot: Option<f64>,
    pub min_volatility: Option<f64>,
    pub max_volatility: Option<f64>,
    pub steps: Option<usize>,
    pub side: Option<Side>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// Fully resolved run settings: built-in defaults, overridden by the config file,
/// overridden by command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub params: OptionParameters,
    pub bounds: GridBounds,
    pub side: Side,
    pub heatmaps: bool,
    pub json: bool,
}

impl Settings {
    pub fn resolve(args: &Args, file: &FileConfig) -> Self {
        let opt = &file.option;
        let params = OptionParameters::new(
            args.spot.or(opt.spot).unwrap_or(DEFAULT_SPOT),
            args.strike.or(opt.strike).unwrap_or(DEFAULT_STRIKE),
            args.expiry.or(opt.expiry).unwrap_or(DEFAULT_EXPIRY),
            args.rate.or(opt.rate).unwrap_or(DEFAULT_RATE),
            args.volatility.or(opt.volatility).unwrap_or(DEFAULT_VOLATILITY),
            args.kind.or(opt.kind).unwrap_or_default(),
        );

        let hm = &file.heatmap;
        let around = GridBounds::around(params.asset_price, params.vola);
        let bounds = GridBounds {
            min_spot: args.min_spot.or(hm.min_spot).unwrap_or(around.min_spot),
            max_spot: args.max_spot.or(hm.max_spot).unwrap_or(around.max_spot),
            min_volatility: args.min_vol.or(hm.min_volatility).unwrap_or(around.min_volatility),
            max_volatility: args.max_vol.or(hm.max_volatility).unwrap_or(around.max_volatility),
            steps: args.steps.or(hm.steps).unwrap_or(around.steps),
        };

        Self {
            params,
            bounds,
            side: args.side.or(hm.side).unwrap_or_default(),
            heatmaps: !args.no_heatmaps && hm.enabled.unwrap_or(true),
            json: args.json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn defaults_without_file_or_flags() {
        let settings = Settings::resolve(&Args::default(), &FileConfig::default());
        assert_eq!(
            settings.params,
            OptionParameters::call(100.0, 100.0, 1.0, 0.05, 0.2)
        );
        assert_approx_eq!(settings.bounds.min_spot, 80.0, 1e-12);
        assert_approx_eq!(settings.bounds.max_volatility, 0.3, 1e-12);
        assert_eq!(settings.bounds.steps, 10);
        assert_eq!(settings.side, Side::Short);
        assert!(settings.heatmaps);
        assert!(!settings.json);
    }

    #[test]
    fn file_overrides_defaults_and_flags_override_file() {
        let file = FileConfig::parse(
            r#"
            [option]
            spot = 50.0
            volatility = 0.4
            kind = "put"

            [heatmap]
            steps = 5
            side = "long"
            max_spot = 70.0
            "#,
        )
        .unwrap();
        let args = Args {
            spot: Some(60.0),
            steps: Some(7),
            ..Args::default()
        };

        let settings = Settings::resolve(&args, &file);
        assert_eq!(settings.params.asset_price, 60.0);
        assert_eq!(settings.params.vola, 0.4);
        assert_eq!(settings.params.kind, OptionType::Put);
        assert_eq!(settings.params.strike, DEFAULT_STRIKE);
        assert_eq!(settings.bounds.steps, 7);
        assert_eq!(settings.bounds.max_spot, 70.0);
        // derived from the resolved spot, not the file's
        assert_approx_eq!(settings.bounds.min_spot, 48.0, 1e-12);
        assert_eq!(settings.side, Side::Long);
    }

    #[test]
    fn heatmaps_can_be_disabled() {
        let file = FileConfig::parse("[heatmap]\nenabled = false\n").unwrap();
        assert!(!Settings::resolve(&Args::default(), &file).heatmaps);

        let args = Args {
            no_heatmaps: true,
            ..Args::default()
        };
        assert!(!Settings::resolve(&args, &FileConfig::default()).heatmaps);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(FileConfig::parse("[option]\nspott = 1.0\n").is_err());
        assert!(FileConfig::parse("[option]\nkind = \"swaption\"\n").is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = FileConfig::load(Path::new("/nonexistent/bsm.toml")).unwrap_err();
        assert!(err.to_string().contains("could not read config file"));
    }
}
