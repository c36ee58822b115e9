//! `bsm`: Black-Scholes price, Greeks and heatmaps on the command line.
//!
//! Settings are resolved from built-in defaults, an optional TOML config file
//! (`--config`) and flags, in that order. Logs go to stderr, filtered by `RUST_LOG`.

mod args;
mod config;
mod render;

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use pricing::{BlackScholesMerton, OptionPricer};
use risk::HeatmapSet;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::config::{FileConfig, Settings};
use crate::render::Report;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let file = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading config file");
            FileConfig::load(path)?
        }
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, &file);
    debug!(?settings, "resolved settings");

    run(&settings, &mut io::stdout().lock())
}

fn run(settings: &Settings, out: &mut impl Write) -> anyhow::Result<()> {
    let pricer = BlackScholesMerton;
    let result = pricer
        .price(&settings.params)
        .context("cannot price option")?;

    let heatmaps = if settings.heatmaps {
        let set = HeatmapSet::compute(&pricer, &settings.params, &settings.bounds, settings.side)
            .context("cannot build heatmaps")?;
        Some(set)
    } else {
        None
    };

    let report = Report {
        parameters: &settings.params,
        result: &result,
        heatmaps: heatmaps.as_ref(),
    };
    if settings.json {
        report.write_json(out)?;
    } else {
        report.write_tables(out)?;
    }
    Ok(())
}
