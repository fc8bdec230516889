//! Week and month roll-ups across daily targets.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

use super::error::FinboardError;
use super::target::DailyTargetProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Period {
    Week,
    Month,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Week => write!(f, "week"),
            Period::Month => write!(f, "month"),
        }
    }
}

impl FromStr for Period {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(FinboardError::invalid(
                "period",
                format!("unknown period '{other}' (expected week or month)"),
            )),
        }
    }
}

/// Inclusive date range of the period containing `anchor`. Weeks run
/// Monday to Sunday.
pub fn period_bounds(
    period: Period,
    anchor: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), FinboardError> {
    let out_of_range = || FinboardError::invalid("date", "date out of supported range");
    match period {
        Period::Week => {
            let offset = anchor.weekday().num_days_from_monday() as i64;
            let start = anchor
                .checked_sub_signed(Duration::days(offset))
                .ok_or_else(out_of_range)?;
            let end = start
                .checked_add_signed(Duration::days(6))
                .ok_or_else(out_of_range)?;
            Ok((start, end))
        }
        Period::Month => {
            let start = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1)
                .ok_or_else(out_of_range)?;
            let (next_year, next_month) = if anchor.month() == 12 {
                (anchor.year() + 1, 1)
            } else {
                (anchor.year(), anchor.month() + 1)
            };
            let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
                .and_then(|d| d.pred_opt())
                .ok_or_else(out_of_range)?;
            Ok((start, end))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodSummary {
    pub total_days: usize,
    pub days_met_income: usize,
    pub days_within_expense: usize,
    pub days_met_savings: usize,
    pub days_completed: usize,
    pub total_income_target: f64,
    pub total_expense_limit: f64,
    pub total_savings_target: f64,
    pub total_actual_income: f64,
    pub total_actual_expense: f64,
    pub total_actual_savings: f64,
    pub net: f64,
    pub total_trades: usize,
    pub total_wins: usize,
    pub total_losses: usize,
    pub win_rate_pct: f64,
}

impl PeriodSummary {
    pub fn compute(days: &[DailyTargetProgress]) -> Self {
        let mut summary = PeriodSummary {
            total_days: days.len(),
            ..Default::default()
        };

        for day in days {
            if day.met_income() {
                summary.days_met_income += 1;
            }
            if day.within_expense_limit() {
                summary.days_within_expense += 1;
            }
            if day.met_savings() {
                summary.days_met_savings += 1;
            }
            if day.is_completed {
                summary.days_completed += 1;
            }
            summary.total_income_target += day.income_target;
            summary.total_expense_limit += day.expense_limit;
            summary.total_savings_target += day.savings_target;
            summary.total_actual_income += day.actual_income;
            summary.total_actual_expense += day.actual_expense;
            summary.total_actual_savings += day.actual_savings;
            summary.total_trades += day.total_trades;
            summary.total_wins += day.win_count;
            summary.total_losses += day.loss_count;
        }

        summary.net = summary.total_actual_income - summary.total_actual_expense;
        summary.win_rate_pct = if summary.total_trades > 0 {
            summary.total_wins as f64 / summary.total_trades as f64 * 100.0
        } else {
            0.0
        };
        summary
    }
}
