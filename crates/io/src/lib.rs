//! # ombros-io
//!
//! Read the fixed-width observation and forecast text extracts and the
//! station CSV snapshot into the accumulation containers, and render
//! the configured path templates. Bridges the on-disk formats into the
//! engine; it never decides what gets verified.

mod error;
mod field;
mod forecast_read;
mod obs_read;
mod paths;
mod stations;

pub use error::IoError;
pub use forecast_read::read_forecast_extract;
pub use obs_read::read_obs_day;
pub use paths::{TemplateVars, render_path};
pub use stations::read_station_ids;
