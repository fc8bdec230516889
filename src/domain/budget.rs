//! Budget utilisation, status bands and alerts.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::error::{ensure_non_negative, FinboardError};
use super::target::progress_pct;
use super::transaction::{Transaction, TransactionKind};

/// Alert threshold used when none is configured.
pub const DEFAULT_ALERT_THRESHOLD_PCT: f64 = 80.0;

const WARNING_PCT: f64 = 75.0;
const CRITICAL_PCT: f64 = 90.0;
const EXCEEDED_PCT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetPeriod::Weekly => write!(f, "weekly"),
            BudgetPeriod::Monthly => write!(f, "monthly"),
            BudgetPeriod::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(BudgetPeriod::Weekly),
            "monthly" => Ok(BudgetPeriod::Monthly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(FinboardError::invalid(
                "period",
                format!("unknown budget period '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BudgetStatus {
    Good,
    Warning,
    Critical,
    Exceeded,
}

impl BudgetStatus {
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= EXCEEDED_PCT {
            BudgetStatus::Exceeded
        } else if pct >= CRITICAL_PCT {
            BudgetStatus::Critical
        } else if pct >= WARNING_PCT {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Good
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStatus::Good => write!(f, "good"),
            BudgetStatus::Warning => write!(f, "warning"),
            BudgetStatus::Critical => write!(f, "critical"),
            BudgetStatus::Exceeded => write!(f, "exceeded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Budget {
    pub category: String,
    pub amount: f64,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_recurring: bool,
}

impl Budget {
    pub fn validate(&self) -> Result<(), FinboardError> {
        ensure_non_negative("amount", self.amount)?;
        if self.start_date > self.end_date {
            return Err(FinboardError::invalid(
                "start_date",
                "start_date must not be after end_date",
            ));
        }
        Ok(())
    }

    pub fn is_active(&self, on: NaiveDate) -> bool {
        self.start_date <= on && on <= self.end_date
    }

    fn covers(&self, tx: &Transaction) -> bool {
        tx.kind == TransactionKind::Expense
            && tx.category.eq_ignore_ascii_case(&self.category)
            && self.is_active(tx.date)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BudgetUsage {
    pub budget: Budget,
    pub spent: f64,
    pub remaining: f64,
    pub percentage: f64,
    pub status: BudgetStatus,
}

impl BudgetUsage {
    /// Spending against `budget` from expense transactions in the same
    /// category (case-insensitive) dated within the budget window.
    pub fn compute(budget: &Budget, transactions: &[Transaction]) -> Result<Self, FinboardError> {
        budget.validate()?;
        let mut spent = 0.0_f64;
        for tx in transactions.iter().filter(|t| budget.covers(t)) {
            tx.validate()?;
            spent += tx.amount;
        }

        let percentage = progress_pct(spent, budget.amount);
        Ok(BudgetUsage {
            budget: budget.clone(),
            spent,
            remaining: (budget.amount - spent).max(0.0),
            percentage,
            status: BudgetStatus::from_percentage(percentage),
        })
    }
}

/// Usages at or above `threshold_pct`, most utilised first.
pub fn budget_alerts(usages: &[BudgetUsage], threshold_pct: f64) -> Vec<&BudgetUsage> {
    let mut alerts: Vec<&BudgetUsage> = usages
        .iter()
        .filter(|u| u.percentage >= threshold_pct)
        .collect();
    alerts.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    alerts
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BudgetSummary {
    pub total_allocated: f64,
    pub total_spent: f64,
    pub total_remaining: f64,
    pub over_budget_count: usize,
}

impl BudgetSummary {
    pub fn compute(usages: &[BudgetUsage]) -> Self {
        let mut summary = BudgetSummary::default();
        for usage in usages {
            summary.total_allocated += usage.budget.amount;
            summary.total_spent += usage.spent;
            summary.total_remaining += usage.remaining;
            if usage.status == BudgetStatus::Exceeded {
                summary.over_budget_count += 1;
            }
        }
        summary
    }
}
