use std::io::{self, Write};

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::domain::results::Results;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Yaml,
    Json,
}

/// `Results` plus the run context that must stay out of the cache key.
#[derive(Serialize, Debug, Clone)]
pub struct CalculationReport {
    pub data_source: String,
    pub start_date: String,
    pub break_even_date: Option<String>,
    pub results: Results,
}

pub fn build_report(data_source: &str, start_date: NaiveDate, results: &Results) -> CalculationReport {
    CalculationReport {
        data_source: data_source_name(data_source),
        start_date: start_date.format("%Y-%m-%d").to_string(),
        break_even_date: break_even_date(start_date, results.key_metrics.payback_months)
            .map(|date| date.format("%Y-%m-%d").to_string()),
        results: results.clone(),
    }
}

/// Calendar date after `payback_months` (rounded up to whole months), or
/// `None` when the investment never pays back.
pub fn break_even_date(start_date: NaiveDate, payback_months: f64) -> Option<NaiveDate> {
    if !payback_months.is_finite() || payback_months < 0.0 {
        return None;
    }
    let months = payback_months.ceil();
    if months > f64::from(u32::MAX) {
        return None;
    }
    start_date.checked_add_months(Months::new(months as u32))
}

pub fn write_report<W: Write>(
    writer: &mut W,
    report: &CalculationReport,
    format: ReportFormat,
) -> io::Result<()> {
    let contents = match format {
        ReportFormat::Yaml => serde_yaml::to_string(report).map_err(io::Error::other)?,
        ReportFormat::Json => serde_json::to_string_pretty(report).map_err(io::Error::other)?,
    };
    writer.write_all(contents.as_bytes())
}

fn data_source_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}
