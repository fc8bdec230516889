//! Markdown report adapter implementing ReportPort.
//!
//! Renders progress and projection results as Markdown tables. The render
//! functions are public so the CLI can print the same tables to stdout.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::domain::error::FinboardError;
use crate::domain::projection::StrategyProjection;
use crate::domain::strategy::BacktestStrategy;
use crate::domain::target::DailyTargetProgress;
use crate::domain::trade::TradeEvent;
use crate::ports::report_port::ReportPort;

pub fn render_progress(
    date: NaiveDate,
    progress: &DailyTargetProgress,
    trades: &[TradeEvent],
) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Daily target: {}\n\n", date));

    let status = if progress.is_completed {
        "completed"
    } else {
        "open"
    };
    output.push_str(&format!("Status: **{}**\n\n", status));

    output.push_str("| Metric | Goal | Actual | Remaining | Progress |\n");
    output.push_str("|---|---:|---:|---:|---:|\n");
    output.push_str(&format!(
        "| Profit | {:.2} | {:.2} | {:.2} | {:.1}% |\n",
        progress.income_target,
        progress.actual_income,
        progress.remaining_income,
        progress.income_progress_pct
    ));
    output.push_str(&format!(
        "| Loss limit | {:.2} | {:.2} | {:.2} | {:.1}% |\n",
        progress.expense_limit,
        progress.actual_expense,
        progress.remaining_expense,
        progress.expense_progress_pct
    ));
    output.push_str(&format!(
        "| Savings | {:.2} | {:.2} | {:.2} | {:.1}% |\n\n",
        progress.savings_target,
        progress.actual_savings,
        (progress.savings_target - progress.actual_savings).max(0.0),
        progress.savings_progress_pct
    ));

    output.push_str(&format!(
        "Trades: {} ({} wins / {} losses), win rate {:.1}%, net {:.2}\n\n",
        progress.total_trades,
        progress.win_count,
        progress.loss_count,
        progress.win_rate_pct,
        progress.net_result()
    ));

    if !trades.is_empty() {
        output.push_str(&render_trade_log(trades));
    }
    output
}

pub fn render_trade_log(trades: &[TradeEvent]) -> String {
    let mut output = String::new();
    output.push_str("| Time | Type | Amount | Symbol | Pips | Lot | Note |\n");
    output.push_str("|---|---|---:|---|---:|---:|---|\n");
    for trade in trades {
        output.push_str(&format!(
            "| {} | {} | {:.2} | {} | {} | {} | {} |\n",
            trade
                .trade_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
            trade.kind,
            trade.amount,
            trade.symbol.as_deref().unwrap_or("-"),
            trade.pips.map(|p| format!("{p}")).unwrap_or_else(|| "-".to_string()),
            trade
                .lot_size
                .map(|l| format!("{l}"))
                .unwrap_or_else(|| "-".to_string()),
            trade.description.as_deref().unwrap_or(""),
        ));
    }
    output.push('\n');
    output
}

pub fn render_projection(strategy: &BacktestStrategy, projection: &StrategyProjection) -> String {
    let input = &strategy.input;
    let mut output = String::new();
    output.push_str(&format!("# Strategy projection: {}\n\n", strategy.name));
    if !strategy.description.is_empty() {
        output.push_str(&format!("{}\n\n", strategy.description));
    }

    output.push_str("| Parameter | Value |\n|---|---:|\n");
    output.push_str(&format!("| Type | {} |\n", strategy.kind));
    output.push_str(&format!("| Status | {} |\n", strategy.status));
    if let Some(start) = strategy.start_date {
        output.push_str(&format!("| Start | {} |\n", start));
    }
    if let Some(end) = strategy.end_date() {
        output.push_str(&format!("| End | {} |\n", end));
    }
    output.push_str(&format!("| Initial amount | {:.2} |\n", input.initial_amount));
    output.push_str(&format!(
        "| Monthly contribution | {:.2} |\n",
        input.monthly_contribution
    ));
    output.push_str(&format!(
        "| Expected return | {}% p.a. |\n",
        input.expected_annual_return_pct
    ));
    output.push_str(&format!("| Duration | {} months |\n\n", input.duration_months));

    output.push_str("| Month | Contributed | Returns | Balance |\n");
    output.push_str("|---:|---:|---:|---:|\n");
    for month in &projection.monthly_breakdown {
        output.push_str(&format!(
            "| {} | {:.2} | {:.2} | {:.2} |\n",
            month.month_index, month.contributed, month.returns, month.balance
        ));
    }
    output.push('\n');

    output.push_str(&format!(
        "Total contributed: {:.2}\n\n",
        projection.total_contributed
    ));
    output.push_str(&format!("Total returns: {:.2}\n\n", projection.total_returns));
    output.push_str(&format!("Final amount: **{:.2}**\n", projection.final_amount));
    if let Some(gap) = strategy.performance_gap() {
        output.push_str(&format!("\nPerformance gap: {:.2}\n", gap));
    }
    output
}

pub(crate) fn write_report(output_path: &str, content: &str) -> Result<(), FinboardError> {
    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}

pub struct MarkdownReportAdapter;

impl MarkdownReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for MarkdownReportAdapter {
    fn write_progress(
        &self,
        date: NaiveDate,
        progress: &DailyTargetProgress,
        trades: &[TradeEvent],
        output_path: &str,
    ) -> Result<(), FinboardError> {
        write_report(output_path, &render_progress(date, progress, trades))
    }

    fn write_projection(
        &self,
        strategy: &BacktestStrategy,
        projection: &StrategyProjection,
        output_path: &str,
    ) -> Result<(), FinboardError> {
        write_report(output_path, &render_projection(strategy, projection))
    }
}
