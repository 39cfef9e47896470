//! Helpers shared by the subcommands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use ombros_io::{TemplateVars, read_station_ids, render_path};

use crate::config::OmbrosConfig;

/// Loads and parses the TOML configuration file.
pub fn load_config(path: &Path) -> Result<OmbrosConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Parses a `YYYYMMDD` command-line date.
pub fn parse_ymd(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y%m%d")
        .with_context(|| format!("invalid date '{value}' (expected YYYYMMDD)"))
}

/// Reads the station list snapshot for one (model, obs) pairing.
pub fn load_stations(config: &OmbrosConfig, model: &str, obs: &str) -> Result<Vec<u32>> {
    let path = render_path(
        &config.paths.station_xy_file,
        &TemplateVars {
            model: Some(model),
            obs: Some(obs),
            ..Default::default()
        },
    );
    let stations = read_station_ids(&path)
        .with_context(|| format!("failed to read station list: {}", path.display()))?;
    if stations.is_empty() {
        bail!("station list is empty: {}", path.display());
    }
    Ok(stations)
}
