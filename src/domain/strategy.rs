//! Backtest strategy records and their lifecycle.
//!
//! A strategy starts as a draft, may be run (projected) any number of times
//! while draft or active, and ends either completed with an actual amount or
//! cancelled.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::error::{ensure_non_negative, FinboardError};
use super::projection::{project_with_limit, StrategyInput, StrategyProjection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrategyKind {
    Savings,
    Investment,
    ExpenseReduction,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Savings => write!(f, "savings"),
            StrategyKind::Investment => write!(f, "investment"),
            StrategyKind::ExpenseReduction => write!(f, "expense_reduction"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" => Ok(StrategyKind::Savings),
            "investment" => Ok(StrategyKind::Investment),
            "expense_reduction" => Ok(StrategyKind::ExpenseReduction),
            other => Err(FinboardError::invalid(
                "type",
                format!("unknown strategy type '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StrategyStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}

impl fmt::Display for StrategyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyStatus::Draft => write!(f, "draft"),
            StrategyStatus::Active => write!(f, "active"),
            StrategyStatus::Completed => write!(f, "completed"),
            StrategyStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktestStrategy {
    pub name: String,
    pub description: String,
    pub kind: StrategyKind,
    pub input: StrategyInput,
    pub start_date: Option<NaiveDate>,
    pub status: StrategyStatus,
    pub projected_amount: Option<f64>,
    pub actual_amount: Option<f64>,
}

impl BacktestStrategy {
    pub fn new(name: String, kind: StrategyKind, input: StrategyInput) -> Self {
        BacktestStrategy {
            name,
            description: String::new(),
            kind,
            input,
            start_date: None,
            status: StrategyStatus::Draft,
            projected_amount: None,
            actual_amount: None,
        }
    }

    /// Last month covered by the projection, if a start date is known.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.start_date
            .and_then(|d| d.checked_add_months(chrono::Months::new(self.input.duration_months)))
    }

    pub fn run(&mut self, max_duration_months: u32) -> Result<StrategyProjection, FinboardError> {
        match self.status {
            StrategyStatus::Draft | StrategyStatus::Active => {}
            other => return Err(transition(other, "run")),
        }
        let projection = project_with_limit(&self.input, max_duration_months)?;
        self.projected_amount = Some(projection.final_amount);
        Ok(projection)
    }

    pub fn activate(&mut self) -> Result<(), FinboardError> {
        if self.status != StrategyStatus::Draft {
            return Err(transition(self.status, StrategyStatus::Active));
        }
        self.status = StrategyStatus::Active;
        Ok(())
    }

    pub fn complete(&mut self, actual_amount: f64) -> Result<(), FinboardError> {
        if self.status != StrategyStatus::Active {
            return Err(transition(self.status, StrategyStatus::Completed));
        }
        ensure_non_negative("actual_amount", actual_amount)?;
        self.actual_amount = Some(actual_amount);
        self.status = StrategyStatus::Completed;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), FinboardError> {
        match self.status {
            StrategyStatus::Draft | StrategyStatus::Active => {
                self.status = StrategyStatus::Cancelled;
                Ok(())
            }
            other => Err(transition(other, StrategyStatus::Cancelled)),
        }
    }

    /// Actual minus projected; `None` until both are known.
    pub fn performance_gap(&self) -> Option<f64> {
        match (self.actual_amount, self.projected_amount) {
            (Some(actual), Some(projected)) => Some(actual - projected),
            _ => None,
        }
    }
}

fn transition(from: StrategyStatus, to: impl fmt::Display) -> FinboardError {
    FinboardError::InvalidTransition {
        from: from.to_string(),
        to: to.to_string(),
    }
}
