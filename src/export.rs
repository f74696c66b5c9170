//! Tabular export of projection results
//!
//! The engine always works in raw currency units; `to_wan` is the display
//! conversion used by report front ends.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use log::info;
use serde::Serialize;

use crate::projection::{ProjectionResult, SummaryMetrics};

/// Currency units per 万
pub const WAN: f64 = 10_000.0;

/// Convert a raw amount into 万 for display
pub fn to_wan(amount: f64) -> f64 {
    amount / WAN
}

/// Timestamped file name for a stage export
pub fn default_export_name() -> String {
    format!("household_projection_{}.csv", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Write one CSV row per stage with every stage field in raw currency units
pub fn write_stage_csv<W: Write>(writer: W, result: &ProjectionResult) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for stage in &result.stages {
        csv_writer.serialize(stage)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the stage table to a file
pub fn write_stage_csv_file<P: AsRef<Path>>(path: P, result: &ProjectionResult) -> csv::Result<()> {
    let path = path.as_ref();
    write_stage_csv(File::create(path)?, result)?;
    info!("Stage table written to {}", path.display());
    Ok(())
}

/// One row of a multi-household comparison table
#[derive(Debug, Clone, Serialize)]
struct SummaryRow<'a> {
    name: &'a str,
    total_net_asset_change: f64,
    min_cash_flow_surplus: f64,
    total_marriage_cost: f64,
    total_child_cost: f64,
    total_cost: f64,
    stage_attributed_child_cost: f64,
    risk_coefficient: f64,
}

impl<'a> SummaryRow<'a> {
    fn new(name: &'a str, summary: &SummaryMetrics) -> Self {
        Self {
            name,
            total_net_asset_change: summary.total_net_asset_change,
            min_cash_flow_surplus: summary.min_cash_flow_surplus,
            total_marriage_cost: summary.total_marriage_cost,
            total_child_cost: summary.total_child_cost,
            total_cost: summary.total_cost,
            stage_attributed_child_cost: summary.stage_attributed_child_cost,
            risk_coefficient: summary.risk_coefficient,
        }
    }
}

/// Write one CSV row per household summary
pub fn write_summary_csv<'a, W, I>(writer: W, rows: I) -> csv::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a SummaryMetrics)>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (name, summary) in rows {
        csv_writer.serialize(SummaryRow::new(name, summary))?;
    }
    csv_writer.flush()?;
    Ok(())
}
