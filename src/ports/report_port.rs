//! Report generation port trait.

use chrono::NaiveDate;

use crate::domain::error::FinboardError;
use crate::domain::projection::StrategyProjection;
use crate::domain::strategy::BacktestStrategy;
use crate::domain::target::DailyTargetProgress;
use crate::domain::trade::TradeEvent;

/// Port for writing progress and projection reports.
pub trait ReportPort {
    fn write_progress(
        &self,
        date: NaiveDate,
        progress: &DailyTargetProgress,
        trades: &[TradeEvent],
        output_path: &str,
    ) -> Result<(), FinboardError>;

    fn write_projection(
        &self,
        strategy: &BacktestStrategy,
        projection: &StrategyProjection,
        output_path: &str,
    ) -> Result<(), FinboardError>;
}
