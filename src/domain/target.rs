//! Daily trading target progress.
//!
//! Derives every display metric of a daily target from its static goals and
//! the trade events recorded against it. Percentages are not capped; values
//! above 100 mean the goal (or limit) was exceeded.

use chrono::NaiveDate;

use super::error::{ensure_non_negative, FinboardError};
use super::trade::{TradeEvent, TradeKind};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyTargetGoals {
    pub income_target: f64,
    pub expense_limit: f64,
    pub savings_target: f64,
}

impl DailyTargetGoals {
    pub fn new(income_target: f64, expense_limit: f64, savings_target: f64) -> Self {
        DailyTargetGoals {
            income_target,
            expense_limit,
            savings_target,
        }
    }

    pub fn validate(&self) -> Result<(), FinboardError> {
        ensure_non_negative("income_target", self.income_target)?;
        ensure_non_negative("expense_limit", self.expense_limit)?;
        ensure_non_negative("savings_target", self.savings_target)?;
        Ok(())
    }
}

/// A stored daily target: the goals for one date plus the savings actual
/// reported by the ledger.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyTargetRecord {
    pub date: NaiveDate,
    pub goals: DailyTargetGoals,
    pub actual_savings: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyTargetProgress {
    pub income_target: f64,
    pub expense_limit: f64,
    pub savings_target: f64,
    pub actual_income: f64,
    pub actual_expense: f64,
    pub actual_savings: f64,
    pub remaining_income: f64,
    pub remaining_expense: f64,
    pub income_progress_pct: f64,
    pub expense_progress_pct: f64,
    pub savings_progress_pct: f64,
    pub total_trades: usize,
    pub win_count: usize,
    pub loss_count: usize,
    pub win_rate_pct: f64,
    pub is_completed: bool,
}

/// Compute target progress from goals and recorded trades.
///
/// All inputs are validated before anything is summed, so a call either
/// returns a complete result or an `InvalidArgument` naming the bad field.
pub fn compute_progress(
    goals: &DailyTargetGoals,
    events: &[TradeEvent],
) -> Result<DailyTargetProgress, FinboardError> {
    goals.validate()?;
    for event in events {
        event.validate()?;
    }

    let mut actual_income = 0.0_f64;
    let mut actual_expense = 0.0_f64;
    let mut win_count = 0usize;
    let mut loss_count = 0usize;

    for event in events {
        match event.kind {
            TradeKind::Win => {
                win_count += 1;
                actual_income += event.amount;
            }
            TradeKind::Loss => {
                loss_count += 1;
                actual_expense += event.amount;
            }
        }
    }

    if !actual_income.is_finite() || !actual_expense.is_finite() {
        return Err(FinboardError::invalid("amount", "trade totals overflow"));
    }

    let total_trades = win_count + loss_count;
    let win_rate_pct = if total_trades > 0 {
        win_count as f64 / total_trades as f64 * 100.0
    } else {
        0.0
    };

    let is_completed = actual_income >= goals.income_target
        || (goals.expense_limit > 0.0 && actual_expense >= goals.expense_limit);

    Ok(DailyTargetProgress {
        income_target: goals.income_target,
        expense_limit: goals.expense_limit,
        savings_target: goals.savings_target,
        actual_income,
        actual_expense,
        actual_savings: 0.0,
        remaining_income: (goals.income_target - actual_income).max(0.0),
        remaining_expense: (goals.expense_limit - actual_expense).max(0.0),
        income_progress_pct: progress_pct(actual_income, goals.income_target),
        expense_progress_pct: progress_pct(actual_expense, goals.expense_limit),
        savings_progress_pct: 0.0,
        total_trades,
        win_count,
        loss_count,
        win_rate_pct,
        is_completed,
    })
}

/// `actual / goal * 100`, with a zero goal reading as 100 once anything
/// has been recorded and 0 otherwise.
pub fn progress_pct(actual: f64, goal: f64) -> f64 {
    if goal == 0.0 {
        if actual > 0.0 { 100.0 } else { 0.0 }
    } else {
        actual / goal * 100.0
    }
}

impl DailyTargetProgress {
    /// Attach the savings actual reported by the ledger. Savings are not
    /// derivable from trades, so the value is echoed as given.
    pub fn with_actual_savings(mut self, actual_savings: f64) -> Result<Self, FinboardError> {
        ensure_non_negative("actual_savings", actual_savings)?;
        self.actual_savings = actual_savings;
        self.savings_progress_pct = progress_pct(actual_savings, self.savings_target);
        Ok(self)
    }

    pub fn net_result(&self) -> f64 {
        self.actual_income - self.actual_expense
    }

    pub fn met_income(&self) -> bool {
        self.actual_income >= self.income_target
    }

    pub fn within_expense_limit(&self) -> bool {
        self.actual_expense <= self.expense_limit
    }

    pub fn met_savings(&self) -> bool {
        self.actual_savings >= self.savings_target
    }

    /// Gate for recording a new trade against this target.
    pub fn ensure_accepts_trades(&self) -> Result<(), FinboardError> {
        if self.is_completed {
            return Err(FinboardError::TargetCompleted);
        }
        Ok(())
    }
}
