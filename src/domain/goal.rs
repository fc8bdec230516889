//! Financial goals: progress, time left and required pace.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::error::{ensure_non_negative, ensure_positive, FinboardError};
use super::target::progress_pct;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

impl fmt::Display for GoalPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalPriority::Low => write!(f, "low"),
            GoalPriority::Medium => write!(f, "medium"),
            GoalPriority::High => write!(f, "high"),
        }
    }
}

/// Accepts the label (`low`/`medium`/`high`) or its numeric code (0/1/2).
impl FromStr for GoalPriority {
    type Err = FinboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "low" => Ok(GoalPriority::Low),
            "1" | "medium" => Ok(GoalPriority::Medium),
            "2" | "high" => Ok(GoalPriority::High),
            other => Err(FinboardError::invalid(
                "priority",
                format!("unknown priority '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinancialGoal {
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
    pub category: Option<String>,
    pub priority: GoalPriority,
}

impl FinancialGoal {
    pub fn validate(&self) -> Result<(), FinboardError> {
        ensure_non_negative("target_amount", self.target_amount)?;
        ensure_non_negative("current_amount", self.current_amount)?;
        if self.start_date > self.target_date {
            return Err(FinboardError::invalid(
                "target_date",
                "target_date must not be before start_date",
            ));
        }
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Increment the saved amount.
    pub fn add_progress(&mut self, amount: f64) -> Result<(), FinboardError> {
        ensure_positive("amount", amount)?;
        self.current_amount += amount;
        Ok(())
    }

    /// Overwrite the saved amount.
    pub fn set_progress(&mut self, amount: f64) -> Result<(), FinboardError> {
        ensure_non_negative("amount", amount)?;
        self.current_amount = amount;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalProgress {
    pub title: String,
    pub priority: GoalPriority,
    pub target_amount: f64,
    pub current_amount: f64,
    pub remaining_amount: f64,
    pub progress_pct: f64,
    pub is_completed: bool,
    pub days_remaining: i64,
    pub required_per_day: f64,
}

impl GoalProgress {
    pub fn compute(goal: &FinancialGoal, today: NaiveDate) -> Result<Self, FinboardError> {
        goal.validate()?;

        let remaining_amount = (goal.target_amount - goal.current_amount).max(0.0);
        let days_remaining = (goal.target_date - today).num_days().max(0);
        let required_per_day = if days_remaining > 0 && remaining_amount > 0.0 {
            remaining_amount / days_remaining as f64
        } else {
            0.0
        };

        Ok(GoalProgress {
            title: goal.title.clone(),
            priority: goal.priority,
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            remaining_amount,
            progress_pct: progress_pct(goal.current_amount, goal.target_amount),
            is_completed: goal.is_completed(),
            days_remaining,
            required_per_day,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalsSummary {
    pub total_goals: usize,
    pub active_goals: usize,
    pub completed_goals: usize,
    pub total_target: f64,
    pub total_current: f64,
    pub overall_progress_pct: f64,
}

impl GoalsSummary {
    pub fn compute(goals: &[FinancialGoal]) -> Result<Self, FinboardError> {
        let mut summary = GoalsSummary {
            total_goals: goals.len(),
            ..Default::default()
        };
        for goal in goals {
            goal.validate()?;
            if goal.is_completed() {
                summary.completed_goals += 1;
            } else {
                summary.active_goals += 1;
            }
            summary.total_target += goal.target_amount;
            summary.total_current += goal.current_amount;
        }
        summary.overall_progress_pct = if summary.total_target > 0.0 {
            summary.total_current / summary.total_target * 100.0
        } else {
            0.0
        };
        Ok(summary)
    }
}
