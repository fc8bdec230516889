//! JSON report adapter implementing ReportPort.

use chrono::NaiveDate;
use serde::Serialize;

use crate::adapters::markdown_report_adapter::write_report;
use crate::domain::error::FinboardError;
use crate::domain::projection::StrategyProjection;
use crate::domain::strategy::BacktestStrategy;
use crate::domain::target::DailyTargetProgress;
use crate::domain::trade::TradeEvent;
use crate::ports::report_port::ReportPort;

#[derive(Serialize)]
struct ProgressReport<'a> {
    date: NaiveDate,
    progress: &'a DailyTargetProgress,
    trades: &'a [TradeEvent],
}

#[derive(Serialize)]
struct ProjectionReport<'a> {
    strategy: &'a BacktestStrategy,
    projection: &'a StrategyProjection,
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, FinboardError> {
    serde_json::to_string_pretty(value).map_err(|e| FinboardError::Data {
        reason: format!("failed to serialize report: {e}"),
    })
}

pub struct JsonReportAdapter;

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for JsonReportAdapter {
    fn write_progress(
        &self,
        date: NaiveDate,
        progress: &DailyTargetProgress,
        trades: &[TradeEvent],
        output_path: &str,
    ) -> Result<(), FinboardError> {
        let report = ProgressReport {
            date,
            progress,
            trades,
        };
        write_report(output_path, &render_json(&report)?)
    }

    fn write_projection(
        &self,
        strategy: &BacktestStrategy,
        projection: &StrategyProjection,
        output_path: &str,
    ) -> Result<(), FinboardError> {
        let report = ProjectionReport {
            strategy,
            projection,
        };
        write_report(output_path, &render_json(&report)?)
    }
}
