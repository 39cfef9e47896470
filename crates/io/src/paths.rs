//! Path-template rendering.
//!
//! Configured file locations are templates with `{MODEL}`, `{OBS}`,
//! `{YYYY}`, `{YYYYMM}`, `{YYYYMMDD}`, and `{YYYYMMDDHH}`
//! placeholders. Unmatched placeholders are left in place, which makes
//! a misconfigured template visible in the resulting error path.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};

/// Substitution values for the placeholders of one template.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateVars<'a> {
    /// Value for `{MODEL}`.
    pub model: Option<&'a str>,
    /// Value for `{OBS}`.
    pub obs: Option<&'a str>,
    /// Date feeding `{YYYY}`, `{YYYYMM}`, and `{YYYYMMDD}`.
    pub day: Option<NaiveDate>,
    /// Cycle issue time feeding `{YYYYMMDDHH}`; also feeds the date
    /// placeholders when no `day` is given.
    pub issue: Option<NaiveDateTime>,
}

/// Renders one configured template.
pub fn render_path(template: &str, vars: &TemplateVars<'_>) -> PathBuf {
    let mut out = template.to_string();
    if let Some(model) = vars.model {
        out = out.replace("{MODEL}", model);
    }
    if let Some(obs) = vars.obs {
        out = out.replace("{OBS}", obs);
    }
    if let Some(issue) = vars.issue {
        out = out.replace("{YYYYMMDDHH}", &issue.format("%Y%m%d%H").to_string());
    }
    if let Some(date) = vars.day.or_else(|| vars.issue.map(|ts| ts.date())) {
        out = out.replace("{YYYYMMDD}", &date.format("%Y%m%d").to_string());
        out = out.replace("{YYYYMM}", &date.format("%Y%m").to_string());
        out = out.replace("{YYYY}", &date.format("%Y").to_string());
    }
    PathBuf::from(out)
}
