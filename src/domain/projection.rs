//! Fixed-contribution, fixed-rate compounding projection.
//!
//! Each month the contribution is deposited first and then the whole balance
//! earns that month's return.

use super::error::{ensure_non_negative, FinboardError};

/// Ceiling on `duration_months` (100 years) unless configured otherwise.
pub const DEFAULT_MAX_DURATION_MONTHS: u32 = 1200;

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyInput {
    pub initial_amount: f64,
    pub monthly_contribution: f64,
    pub expected_annual_return_pct: f64,
    pub duration_months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthlyBreakdown {
    pub month_index: u32,
    pub contributed: f64,
    pub returns: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyProjection {
    pub monthly_breakdown: Vec<MonthlyBreakdown>,
    pub total_contributed: f64,
    pub total_returns: f64,
    pub final_amount: f64,
}

impl StrategyInput {
    pub fn monthly_rate(&self) -> f64 {
        self.expected_annual_return_pct / 100.0 / MONTHS_PER_YEAR
    }

    pub fn validate(&self, max_duration_months: u32) -> Result<(), FinboardError> {
        if self.duration_months == 0 {
            return Err(FinboardError::invalid(
                "duration_months",
                "must be at least 1",
            ));
        }
        if self.duration_months > max_duration_months {
            return Err(FinboardError::invalid(
                "duration_months",
                format!("must not exceed {max_duration_months}"),
            ));
        }
        ensure_non_negative("initial_amount", self.initial_amount)?;
        ensure_non_negative("monthly_contribution", self.monthly_contribution)?;
        if !self.expected_annual_return_pct.is_finite() {
            return Err(FinboardError::invalid(
                "expected_annual_return_pct",
                "must be a finite number",
            ));
        }
        Ok(())
    }
}

/// Project `input` using [`DEFAULT_MAX_DURATION_MONTHS`] as the ceiling.
pub fn project(input: &StrategyInput) -> Result<StrategyProjection, FinboardError> {
    project_with_limit(input, DEFAULT_MAX_DURATION_MONTHS)
}

pub fn project_with_limit(
    input: &StrategyInput,
    max_duration_months: u32,
) -> Result<StrategyProjection, FinboardError> {
    input.validate(max_duration_months)?;

    let monthly_rate = input.monthly_rate();
    let mut balance = input.initial_amount;
    let mut total_returns = 0.0_f64;
    let mut monthly_breakdown = Vec::with_capacity(input.duration_months as usize);

    for month_index in 1..=input.duration_months {
        balance += input.monthly_contribution;
        let period_return = balance * monthly_rate;
        balance += period_return;
        total_returns += period_return;
        if !balance.is_finite() || !total_returns.is_finite() {
            return Err(FinboardError::invalid(
                "expected_annual_return_pct",
                format!("balance overflows in month {month_index}"),
            ));
        }

        monthly_breakdown.push(MonthlyBreakdown {
            month_index,
            contributed: input.monthly_contribution,
            returns: period_return,
            balance,
        });
    }

    Ok(StrategyProjection {
        monthly_breakdown,
        total_contributed: input.monthly_contribution * input.duration_months as f64,
        total_returns,
        final_amount: balance,
    })
}

impl StrategyProjection {
    /// Final amount over everything put in, as a percentage. Zero when nothing
    /// was invested.
    pub fn return_on_contributions_pct(&self, initial_amount: f64) -> f64 {
        let invested = initial_amount + self.total_contributed;
        if invested > 0.0 {
            self.total_returns / invested * 100.0
        } else {
            0.0
        }
    }
}
