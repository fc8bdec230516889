//! Configuration validation.
//!
//! Validates config sections before any calculation runs. Numeric keys are
//! read as strings and parsed here so that a typo is reported instead of
//! silently falling back to a default.

use crate::domain::error::FinboardError;
use crate::domain::strategy::StrategyKind;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_target_config(config: &dyn ConfigPort) -> Result<(), FinboardError> {
    match read_number(config, "target", "income_target")? {
        Some(v) => non_negative("target", "income_target", v)?,
        None => {
            return Err(FinboardError::ConfigMissing {
                section: "target".to_string(),
                key: "income_target".to_string(),
            })
        }
    }
    for key in ["expense_limit", "savings_target"] {
        if let Some(v) = read_number(config, "target", key)? {
            non_negative("target", key, v)?;
        }
    }
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), FinboardError> {
    for key in ["initial_amount", "monthly_contribution"] {
        if let Some(v) = read_number(config, "strategy", key)? {
            non_negative("strategy", key, v)?;
        }
    }

    if read_number(config, "strategy", "expected_return")?.is_none() {
        return Err(FinboardError::ConfigMissing {
            section: "strategy".to_string(),
            key: "expected_return".to_string(),
        });
    }

    validate_duration(config)?;
    validate_strategy_type(config)?;

    if let Some(s) = config.get_string("strategy", "start_date") {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            FinboardError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "start_date".to_string(),
                reason: "invalid start_date format, expected YYYY-MM-DD".to_string(),
            }
        })?;
    }
    Ok(())
}

pub fn validate_limits_config(config: &dyn ConfigPort) -> Result<(), FinboardError> {
    if let Some(v) = read_number(config, "limits", "max_duration_months")? {
        if v < 1.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
            return Err(FinboardError::ConfigInvalid {
                section: "limits".to_string(),
                key: "max_duration_months".to_string(),
                reason: "max_duration_months must be a positive whole number".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_budget_config(config: &dyn ConfigPort) -> Result<(), FinboardError> {
    if let Some(v) = read_number(config, "budget", "alert_threshold")? {
        non_negative("budget", "alert_threshold", v)?;
    }
    Ok(())
}

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), FinboardError> {
    match config.get_string("report", "format") {
        None => Ok(()),
        Some(f) if f.eq_ignore_ascii_case("markdown") || f.eq_ignore_ascii_case("json") => Ok(()),
        Some(_) => Err(FinboardError::ConfigInvalid {
            section: "report".to_string(),
            key: "format".to_string(),
            reason: "format must be markdown or json".to_string(),
        }),
    }
}

/// Parse an optional numeric key. Missing or blank keys yield `None`.
pub fn read_number(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, FinboardError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(FinboardError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("'{}' is not a number", s.trim()),
            }),
        },
    }
}

fn non_negative(section: &str, key: &str, value: f64) -> Result<(), FinboardError> {
    if value < 0.0 {
        return Err(FinboardError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{key} must be non-negative"),
        });
    }
    Ok(())
}

fn validate_duration(config: &dyn ConfigPort) -> Result<(), FinboardError> {
    match read_number(config, "strategy", "duration")? {
        None => Err(FinboardError::ConfigMissing {
            section: "strategy".to_string(),
            key: "duration".to_string(),
        }),
        Some(v) if v < 1.0 || v.fract() != 0.0 => Err(FinboardError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "duration".to_string(),
            reason: "duration must be a whole number of months, at least 1".to_string(),
        }),
        Some(_) => Ok(()),
    }
}

fn validate_strategy_type(config: &dyn ConfigPort) -> Result<(), FinboardError> {
    if let Some(t) = config.get_string("strategy", "type") {
        t.parse::<StrategyKind>()
            .map_err(|_| FinboardError::ConfigInvalid {
                section: "strategy".to_string(),
                key: "type".to_string(),
                reason: "type must be savings, investment or expense_reduction".to_string(),
            })?;
    }
    Ok(())
}
