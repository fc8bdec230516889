//! CSV file ledger adapter.
//!
//! Reads a data directory holding `trades.csv`, `targets.csv`,
//! `transactions.csv`, `budgets.csv` and `goals.csv`. Columns are positional
//! after a header row; optional columns may be left empty or omitted.

use crate::domain::budget::Budget;
use crate::domain::error::FinboardError;
use crate::domain::goal::{FinancialGoal, GoalPriority};
use crate::domain::target::{DailyTargetGoals, DailyTargetRecord};
use crate::domain::trade::TradeEvent;
use crate::domain::transaction::Transaction;
use crate::ports::ledger_port::LedgerPort;
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;

pub const TRADES_FILE: &str = "trades.csv";
pub const TARGETS_FILE: &str = "targets.csv";
pub const TRANSACTIONS_FILE: &str = "transactions.csv";
pub const BUDGETS_FILE: &str = "budgets.csv";
pub const GOALS_FILE: &str = "goals.csv";

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn read_records(&self, file: &str) -> Result<Vec<StringRecord>, FinboardError> {
        let path = self.base_path.join(file);
        let content = fs::read_to_string(&path).map_err(|e| FinboardError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        rdr.records()
            .map(|r| {
                r.map_err(|e| FinboardError::Data {
                    reason: format!("{file}: CSV parse error: {e}"),
                })
            })
            .collect()
    }
}

fn required<'a>(
    record: &'a StringRecord,
    idx: usize,
    column: &str,
) -> Result<&'a str, FinboardError> {
    match record.get(idx) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(FinboardError::Data {
            reason: format!("missing {column} column"),
        }),
    }
}

fn optional(record: &StringRecord, idx: usize) -> Option<String> {
    record
        .get(idx)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn parse_f64(record: &StringRecord, idx: usize, column: &str) -> Result<f64, FinboardError> {
    required(record, idx, column)?
        .parse()
        .map_err(|e| FinboardError::Data {
            reason: format!("invalid {column} value: {e}"),
        })
}

fn parse_optional_f64(
    record: &StringRecord,
    idx: usize,
    column: &str,
) -> Result<Option<f64>, FinboardError> {
    match optional(record, idx) {
        None => Ok(None),
        Some(s) => s.parse().map(Some).map_err(|e| FinboardError::Data {
            reason: format!("invalid {column} value: {e}"),
        }),
    }
}

fn parse_date(record: &StringRecord, idx: usize, column: &str) -> Result<NaiveDate, FinboardError> {
    let s = required(record, idx, column)?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| FinboardError::Data {
        reason: format!("invalid {column} format: {e}"),
    })
}

fn parse_kind<T: std::str::FromStr<Err = FinboardError>>(
    record: &StringRecord,
    idx: usize,
    column: &str,
) -> Result<T, FinboardError> {
    required(record, idx, column)?
        .parse()
        .map_err(|e: FinboardError| FinboardError::Data {
            reason: format!("invalid {column} value: {e}"),
        })
}

/// Accepts `YYYY-MM-DD HH:MM[:SS]`, the `T`-separated form, or a bare date
/// (read as midnight).
fn parse_trade_time(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

impl LedgerPort for CsvAdapter {
    fn fetch_trades(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<TradeEvent>, FinboardError> {
        let mut trades = Vec::new();

        for record in self.read_records(TRADES_FILE)? {
            let time_str = required(&record, 0, "trade_time")?;
            let trade_time = parse_trade_time(time_str).ok_or_else(|| FinboardError::Data {
                reason: format!("invalid trade_time format: {time_str}"),
            })?;

            let date = trade_time.date();
            if date < start_date || date > end_date {
                continue;
            }

            trades.push(TradeEvent {
                kind: parse_kind(&record, 1, "type")?,
                amount: parse_f64(&record, 2, "amount")?,
                trade_time: Some(trade_time),
                symbol: optional(&record, 3),
                pips: parse_optional_f64(&record, 4, "pips")?,
                lot_size: parse_optional_f64(&record, 5, "lot_size")?,
                description: optional(&record, 6),
            });
        }

        trades.sort_by_key(|t| t.trade_time);
        Ok(trades)
    }

    fn fetch_targets(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyTargetRecord>, FinboardError> {
        let mut targets = Vec::new();

        for record in self.read_records(TARGETS_FILE)? {
            let date = parse_date(&record, 0, "date")?;
            if date < start_date || date > end_date {
                continue;
            }

            targets.push(DailyTargetRecord {
                date,
                goals: DailyTargetGoals {
                    income_target: parse_f64(&record, 1, "income_target")?,
                    expense_limit: parse_optional_f64(&record, 2, "expense_limit")?.unwrap_or(0.0),
                    savings_target: parse_optional_f64(&record, 3, "savings_target")?
                        .unwrap_or(0.0),
                },
                actual_savings: parse_optional_f64(&record, 4, "actual_savings")?.unwrap_or(0.0),
            });
        }

        targets.sort_by_key(|t| t.date);
        Ok(targets)
    }

    fn fetch_transactions(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Transaction>, FinboardError> {
        let mut transactions = Vec::new();

        for record in self.read_records(TRANSACTIONS_FILE)? {
            let date = parse_date(&record, 0, "date")?;
            if date < start_date || date > end_date {
                continue;
            }

            let tags: Vec<String> = optional(&record, 5)
                .map(|t| {
                    t.split(';')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default();

            transactions.push(Transaction {
                date,
                kind: parse_kind(&record, 1, "type")?,
                amount: parse_f64(&record, 2, "amount")?,
                category: required(&record, 3, "category")?.to_string(),
                description: optional(&record, 4),
                tags,
            });
        }

        transactions.sort_by_key(|t| t.date);
        Ok(transactions)
    }

    fn fetch_budgets(&self) -> Result<Vec<Budget>, FinboardError> {
        self.read_records(BUDGETS_FILE)?
            .iter()
            .map(|record| -> Result<Budget, FinboardError> {
                Ok(Budget {
                    category: required(record, 0, "category")?.to_string(),
                    amount: parse_f64(record, 1, "amount")?,
                    period: parse_kind(record, 2, "period")?,
                    start_date: parse_date(record, 3, "start_date")?,
                    end_date: parse_date(record, 4, "end_date")?,
                    is_recurring: matches!(
                        optional(record, 5).as_deref().map(str::to_lowercase).as_deref(),
                        Some("true" | "yes" | "1")
                    ),
                })
            })
            .collect()
    }

    fn fetch_goals(&self) -> Result<Vec<FinancialGoal>, FinboardError> {
        self.read_records(GOALS_FILE)?
            .iter()
            .map(|record| -> Result<FinancialGoal, FinboardError> {
                Ok(FinancialGoal {
                    title: required(record, 0, "title")?.to_string(),
                    target_amount: parse_f64(record, 1, "target_amount")?,
                    current_amount: parse_optional_f64(record, 2, "current_amount")?
                        .unwrap_or(0.0),
                    start_date: parse_date(record, 3, "start_date")?,
                    target_date: parse_date(record, 4, "target_date")?,
                    category: optional(record, 5),
                    priority: match optional(record, 6) {
                        Some(_) => parse_kind(record, 6, "priority")?,
                        None => GoalPriority::Medium,
                    },
                })
            })
            .collect()
    }
}
