use std::collections::BTreeMap;

use ombros_contingency::ThresholdMm;
use serde::Deserialize;

/// Top-level Ombros configuration.
///
/// Every field has an operational default, so an empty file (or no
/// file beyond the defaults) is a valid configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OmbrosConfig {
    /// Input/output path templates.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Threshold depth ladder in millimetres.
    #[serde(default = "default_thresholds_mm")]
    pub thresholds_mm: Vec<f64>,

    /// Per-model forecast configuration, keyed by model code.
    #[serde(default = "default_models")]
    pub models: BTreeMap<String, ModelConfig>,
}

impl OmbrosConfig {
    /// The threshold ladder as exact depths.
    pub fn thresholds(&self) -> Vec<ThresholdMm> {
        self.thresholds_mm
            .iter()
            .map(|&mm| ThresholdMm::from_mm(mm))
            .collect()
    }
}

impl Default for OmbrosConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            thresholds_mm: default_thresholds_mm(),
            models: default_models(),
        }
    }
}

/// Path templates; see `ombros-io` for the available placeholders.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// One observation day file.
    #[serde(default = "default_obs_day_file")]
    pub obs_day_file: String,

    /// One forecast cycle's extract.
    #[serde(default = "default_model_extract_file")]
    pub model_extract_file: String,

    /// Station-grid mapping snapshot.
    #[serde(default = "default_station_xy_file")]
    pub station_xy_file: String,

    /// Monthly per-station database, calendar-day regime.
    #[serde(default = "default_ct_day_db")]
    pub ct_day_db: String,

    /// Monthly summary database, calendar-day regime.
    #[serde(default = "default_ct_daysum_db")]
    pub ct_daysum_db: String,

    /// Monthly per-station database, short-range rule.
    #[serde(default = "default_ct_day_db_short")]
    pub ct_day_db_short: String,

    /// Monthly summary database, short-range rule.
    #[serde(default = "default_ct_daysum_db_short")]
    pub ct_daysum_db_short: String,

    /// Per-day station CSV export.
    #[serde(default = "default_ct_day_csv")]
    pub ct_day_csv: String,

    /// Per-day summary CSV export.
    #[serde(default = "default_ct_daysum_csv")]
    pub ct_daysum_csv: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            obs_day_file: default_obs_day_file(),
            model_extract_file: default_model_extract_file(),
            station_xy_file: default_station_xy_file(),
            ct_day_db: default_ct_day_db(),
            ct_daysum_db: default_ct_daysum_db(),
            ct_day_db_short: default_ct_day_db_short(),
            ct_daysum_db_short: default_ct_daysum_db_short(),
            ct_day_csv: default_ct_day_csv(),
            ct_daysum_csv: default_ct_daysum_csv(),
        }
    }
}

/// Forecast layout of one model.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Window lengths verified under the calendar-day regime.
    pub threshold_hours: Vec<i64>,

    /// Declared maximum lead hours; the planner uses the largest.
    pub fcst_max_hours: Vec<i64>,

    /// Hours of day at which cycles are issued.
    pub issue_hours: Vec<i64>,

    /// Native lead-step interval in hours.
    pub fcst_interval: i64,
}

impl ModelConfig {
    /// The largest declared maximum lead hour.
    pub fn max_lead(&self) -> i64 {
        self.fcst_max_hours.iter().copied().max().unwrap_or(0)
    }
}

fn default_thresholds_mm() -> Vec<f64> {
    vec![0.1, 1.0, 5.0, 12.5, 15.0, 25.0, 50.0]
}

fn default_models() -> BTreeMap<String, ModelConfig> {
    BTreeMap::from([
        (
            "gdps_ne36".to_string(),
            ModelConfig {
                threshold_hours: vec![3, 6, 12],
                fcst_max_hours: vec![72, 120],
                issue_hours: vec![0, 12],
                fcst_interval: 3,
            },
        ),
        (
            "klfs_ne36".to_string(),
            ModelConfig {
                threshold_hours: vec![1, 3],
                fcst_max_hours: vec![12],
                issue_hours: vec![0, 3, 6, 9, 12, 15, 18, 21],
                fcst_interval: 1,
            },
        ),
    ])
}

fn default_obs_day_file() -> String {
    "data/obs/{YYYY}/rain_obsv_{OBS}.{YYYYMMDD}".to_string()
}
fn default_model_extract_file() -> String {
    "data/model/{MODEL}/{YYYY}/extract_{MODEL}_{OBS}.{YYYYMMDDHH}".to_string()
}
fn default_station_xy_file() -> String {
    "data/stnxy/{MODEL}/stnxy_{MODEL}_{OBS}.csv".to_string()
}
fn default_ct_day_db() -> String {
    "out/daily/{YYYY}/ct_day_{MODEL}_{OBS}_{YYYYMM}.db".to_string()
}
fn default_ct_daysum_db() -> String {
    "out/daily/{YYYY}/ct_daysum_{OBS}_{YYYYMM}.db".to_string()
}
fn default_ct_day_db_short() -> String {
    "out/daily_shrt/{YYYY}/ct_day_{MODEL}_{OBS}_{YYYYMM}.db".to_string()
}
fn default_ct_daysum_db_short() -> String {
    "out/daily_shrt/{YYYY}/ct_daysum_{OBS}_{YYYYMM}.db".to_string()
}
fn default_ct_day_csv() -> String {
    "out/daily/{YYYY}/ct_day_{MODEL}_{OBS}_{YYYYMMDD}.csv".to_string()
}
fn default_ct_daysum_csv() -> String {
    "out/daily/{YYYY}/ct_daysum_{OBS}_{YYYYMMDD}.csv".to_string()
}
