//! Report export
//!
//! Serializes a finished run to JSON for external consumption.

use crate::reports::depth::{self, DepthSnapshot};
use crate::SimulationReport;
use matching_engine::OrderBookSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Price levels per side included in the export
pub const EXPORT_DEPTH: usize = 10;

/// Combined export of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationExport {
    pub version: String,
    pub report: SimulationReport,
    pub depth: Vec<DepthSnapshot>,
}

pub fn build_export(report: &SimulationReport, universe: &OrderBookSet) -> SimulationExport {
    SimulationExport {
        version: crate::VERSION.to_string(),
        report: report.clone(),
        depth: depth::snapshot_active(universe, EXPORT_DEPTH),
    }
}

pub fn export_json(export: &SimulationExport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(export)
}

/// Write the export as pretty JSON
pub fn write_to_file<P: AsRef<Path>>(export: &SimulationExport, path: P) -> std::io::Result<()> {
    let json = export_json(export)?;
    std::fs::write(path, json)
}
